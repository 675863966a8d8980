//! Production wall-clock handler

use chrono::{Local, NaiveDateTime};
use radgate_core::TimeEffects;

/// Real time handler for production use
///
/// Stateless; delegates to the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler
    pub fn new() -> Self {
        Self
    }
}

impl TimeEffects for RealTimeHandler {
    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
