//! CLI module containing argument parsing and configuration

pub mod args;
pub mod config;
