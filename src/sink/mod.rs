//! Output sinks
//!
//! Delivery targets for generated prompts and export artifacts.

mod clipboard;
mod file;
mod traits;

pub use clipboard::CommandClipboard;
pub use file::DirectorySink;
pub use traits::*;
