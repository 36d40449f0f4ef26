//! Configuration for the folding commands: an optional TOML file, `--set` overrides and
//! command-line flags, merged over built-in defaults in that order of increasing precedence.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
