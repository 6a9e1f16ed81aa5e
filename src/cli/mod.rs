//! Command-line front end for hospdb
//!
//! - `args`: clap definitions
//! - `config`: optional JSON config file merged with flags
//! - `io`: prompt/echo console over any reader and writer
//! - `menu`, `session`: the main menu and its handlers
//! - `commands`: connect, run the menu, disconnect

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod menu;
mod session;

pub use args::Cli;
pub use commands::{run, run_with};
pub use config::{FileConfig, Settings};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::Console;
pub use menu::{render_menu, MenuChoice};
pub use session::Session;
