use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Collects every command of a console run and writes them out as JSON.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    commands: Vec<RecordedCommand>,
}

/// One dispatched line of input and how it went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedCommand {
    /// Id of the session that was current when the line was entered.
    pub session_id: Option<u32>,
    /// Name of the player to move at that time.
    pub player: Option<String>,
    pub input: String,
    pub accepted: bool,
    pub message: String,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            commands: Vec::new(),
        })
    }

    pub fn store_command(&mut self, command: RecordedCommand) {
        self.commands.push(command);
    }

    /// Writes the stored commands to the next `recording_<NNNNNN>.json` file.
    ///
    /// Does nothing when no command was stored since the last write.
    pub fn write_recording(&mut self) -> anyhow::Result<Option<PathBuf>> {
        if self.commands.is_empty() {
            return Ok(None);
        }
        let filepath = self
            .directory
            .join(format!("recording_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &self.commands)?;
        writeln!(writer)?;
        writer.flush()?;
        debug!(path = %filepath.display(), commands = self.commands.len(), "Wrote recording");
        self.commands.clear();
        self.num += 1;
        Ok(Some(filepath))
    }
}

/// Reads a file written by [`Recorder::write_recording()`].
pub fn load_recording(path: &Path) -> anyhow::Result<Vec<RecordedCommand>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
