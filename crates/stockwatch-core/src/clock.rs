//! Time source used by the cache to decide when a calendar day has ended.

use std::sync::Mutex;

use time::{Date, Duration, OffsetDateTime, UtcOffset};

/// Supplies the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock, read at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub const fn utc() -> Self {
        Self {
            offset: UtcOffset::UTC,
        }
    }

    pub const fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

/// Settable clock for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
    today: Mutex<Date>,
}

impl ManualClock {
    pub fn new(today: Date) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, date: Date) {
        *self.lock() = date;
    }

    pub fn advance_days(&self, days: i64) {
        let mut today = self.lock();
        if let Some(next) = today.checked_add(Duration::days(days)) {
            *today = next;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Date> {
        // A poisoned date is still a valid date.
        self.today.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn today(&self) -> Date {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn manual_clock_advances_across_month_boundary() {
        let clock = ManualClock::new(date!(2025 - 03 - 31));
        clock.advance_days(1);
        assert_eq!(clock.today(), date!(2025 - 04 - 01));
    }

    #[test]
    fn manual_clock_can_be_rewound() {
        let clock = ManualClock::new(date!(2025 - 03 - 07));
        clock.set(date!(2025 - 03 - 06));
        assert_eq!(clock.today(), date!(2025 - 03 - 06));
    }

    #[test]
    fn system_clock_offsets_shift_the_date_by_at_most_one_day() {
        let utc = SystemClock::utc().today();
        let ahead = SystemClock::with_offset(
            UtcOffset::from_hms(14, 0, 0).expect("valid offset"),
        )
        .today();
        let diff = (ahead - utc).whole_days();
        assert!((0..=1).contains(&diff), "unexpected day difference {diff}");
    }
}
