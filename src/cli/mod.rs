//! 交互式命令行
//!
//! 命令解析与执行、结果打印、Tab 补全

mod commands;
mod completer;
mod printer;

pub use commands::{CommandResult, Session, SessionConfig};
pub use completer::{CommandCompleter, COMMANDS};
pub use printer::{PrintMode, Printer};
