//! Reference handler implementations

pub mod console;
pub mod memory;

pub use console::ConsoleHandler;
pub use memory::MemoryHandler;

pub use crate::core::{handler_fn, FnHandler, Handler};
