pub mod app;
pub mod catalog;
pub mod core;
pub mod queue;
