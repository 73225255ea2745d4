//! CLI module for The Focus Study.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `keymap`: Key bindings of the interactive timer
//! - `display`: Output of the non-interactive subcommands

pub mod commands;
pub mod display;
pub mod keymap;

pub use commands::{Cli, Commands, SessionArgs};
pub use display::Display;
pub use keymap::{map_key, Action, KeyContext};
