use crate::{GameSession, SessionConfig, VariantKind};

/// All open games in display order, plus which one is current.
///
/// Sessions are only ever appended. The current index is valid whenever
/// there is at least one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRegistry {
    sessions: Vec<GameSession>,
    current: usize,
    config: SessionConfig,
}

/// One line of the session listing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    /// 1-based position in the registry.
    pub ordinal: usize,
    pub kind: VariantKind,
    pub current: bool,
}

impl std::fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.ordinal, self.kind)?;
        if self.current {
            write!(f, " (current)")?;
        }
        Ok(())
    }
}

impl SessionRegistry {
    /// An empty registry.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Vec::new(),
            current: 0,
            config,
        }
    }

    /// The starting registry: one game of each variant, the first one current.
    pub fn with_defaults(config: SessionConfig) -> Self {
        let mut registry = Self::new(config);
        for kind in VariantKind::ALL {
            registry.create(kind);
        }
        registry
    }

    /// Assembles a registry from restored sessions. The index is clamped.
    pub fn from_parts(sessions: Vec<GameSession>, current: usize, config: SessionConfig) -> Self {
        let current = current.min(sessions.len().saturating_sub(1));
        Self {
            sessions,
            current,
            config,
        }
    }

    /// Appends a new session with the next free id. The current session
    /// does not change.
    pub fn create(&mut self, kind: VariantKind) -> &GameSession {
        let id = self
            .sessions
            .iter()
            .map(GameSession::id)
            .max()
            .unwrap_or(0)
            + 1;
        self.sessions.push(GameSession::new(kind, id, &self.config));
        &self.sessions[self.sessions.len() - 1]
    }

    /// Makes the session at `index` current. Returns false and does nothing
    /// if there is no such session.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index < self.sessions.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&GameSession> {
        self.sessions.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut GameSession> {
        self.sessions.get_mut(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn sessions(&self) -> &[GameSession] {
        &self.sessions
    }

    pub fn listing(&self) -> Vec<ListingEntry> {
        self.sessions
            .iter()
            .enumerate()
            .map(|(i, session)| ListingEntry {
                ordinal: i + 1,
                kind: session.kind(),
                current: i == self.current,
            })
            .collect()
    }
}
