//! Platform glue
//!
//! Handles timing that the simulation itself stays out of.

pub mod time;

pub use time::FrameClock;
