pub mod v1;
pub mod console;
pub mod engine;
pub mod error;
pub mod logger;
pub mod source;
pub mod template;

pub use console::{BufferConsole, ChannelConsole, Console, StdConsole};
pub use engine::PseudoEngine;
pub use error::{ConsoleError, LexError, PseudoError, PseudoResult, RuntimeError, SyntaxError};
pub use logger::RunLogger;
pub use v1::stmt::Program;
pub use v1::types::{Value, VarType};
