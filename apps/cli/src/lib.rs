//! Strata CLI application: bootstraps a model registry from a config file
//! and the built-in modules, then lists or invokes its methods.

pub use cmd::{Cli, Command};

pub mod cmd;
pub mod config;
pub mod modules;
