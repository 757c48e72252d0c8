pub use board::*;
pub use demo::*;
pub use errors::*;
pub use gomoku::GomokuState;
pub use labels::*;
pub use piece::*;
pub use player::*;
pub use registry::*;
pub use rules::*;
pub use session::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod demo;
mod errors;
pub mod gomoku;
mod labels;
mod piece;
mod player;
mod registry;
pub mod reversi;
mod rules;
mod session;
mod visualization;
