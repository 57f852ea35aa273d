//! Command-line surface: argument definitions and one handler per command.

pub mod commands;
pub mod parser;
