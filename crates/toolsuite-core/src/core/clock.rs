// crates/toolsuite-core/src/core/clock.rs
// ============================================================================
// Module: Suite Clock
// Description: Injectable time source for timestamps and synthesized ids.
// Purpose: Keep synthesis reproducible under test while defaulting to wall-clock time.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Synthesis reads time in exactly two places: the suite `generatedAt` stamp
//! and `test-id-<millis>` parameter values. Both go through [`Clock`] so tests
//! can pin them with [`FixedClock`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Clock Interface
// ============================================================================

/// Time source used by synthesis.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> OffsetDateTime;

    /// Returns the current instant as unix epoch milliseconds, clamped at zero.
    fn unix_millis(&self) -> u64 {
        u64::try_from(self.now().unix_timestamp_nanos() / 1_000_000).unwrap_or(0)
    }

    /// Returns the current instant formatted as RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns [`time::error::Format`] when the instant cannot be represented.
    fn rfc3339(&self) -> Result<String, time::error::Format> {
        self.now().format(&Rfc3339)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Time source pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    /// Instant returned by every call.
    instant: OffsetDateTime,
}

impl FixedClock {
    /// Creates a clock pinned to `instant`.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self {
            instant,
        }
    }

    /// Creates a clock pinned to a unix timestamp in seconds.
    ///
    /// Returns `None` when the timestamp is out of range.
    #[must_use]
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds).ok().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.instant
    }
}
