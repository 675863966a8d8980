//! Wall-clock time effect

use chrono::NaiveDateTime;

/// Source of local wall-clock time
pub trait TimeEffects: Send + Sync {
    /// Current local date and time
    fn local_now(&self) -> NaiveDateTime;
}
