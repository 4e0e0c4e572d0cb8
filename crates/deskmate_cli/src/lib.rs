//! Interactive front end for the deskmate assistant.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod parse;
pub mod render;
pub mod repl;

pub use command::Command;
pub use config::{AppConfig, Cli, ConfigError};
pub use dispatch::{Outcome, Session};
