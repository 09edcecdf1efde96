//! CLI module for the matter-yaml command-line interface
//!
//! Argument parsing lives in [`args`]; [`commands`] bridges parsed arguments
//! to the library.

pub mod args;
pub mod commands;
