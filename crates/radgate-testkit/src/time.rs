//! Controllable clock

use chrono::{Duration, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use radgate_core::TimeEffects;
use std::sync::Arc;

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    /// Clock frozen at `now`
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for FixedClock {
    /// 2024/01/02 03:04:05
    fn default() -> Self {
        let now = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 5))
            .expect("valid fixed timestamp");
        Self::at(now)
    }
}

impl TimeEffects for FixedClock {
    fn local_now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radgate_core::audit::format_audit_timestamp;

    #[test]
    fn advances_only_on_request() {
        let clock = FixedClock::default();
        assert_eq!(format_audit_timestamp(&clock.local_now()), "2024/01/02 03:04:05");
        clock.advance(Duration::seconds(61));
        assert_eq!(format_audit_timestamp(&clock.local_now()), "2024/01/02 03:05:06");
    }
}
