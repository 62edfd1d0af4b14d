//! Test modules for the batch queue
//!
//! Tests are organized by functional area.

mod helpers;
