//! Application module

pub mod cli;
pub mod display;
pub mod error;
pub mod import;
pub mod startup;
