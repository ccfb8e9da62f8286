pub mod render;
pub mod terminal;

pub use terminal::TerminalHost;
