mod command;
mod console;
mod recording;
mod save;
pub use command::*;
pub use console::*;
pub use recording::*;
pub use save::*;
