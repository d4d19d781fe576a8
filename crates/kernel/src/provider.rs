//! Collaborators injected into domain stores: wall-clock time and id
//! generation. Production code uses [`SystemClock`] and [`UuidV7Generator`];
//! tests substitute deterministic fakes.

use time::OffsetDateTime;
use uuid::{NoContext, Timestamp, Uuid};

/// Source of the current time.
///
/// Successive calls must never go backwards.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Source of opaque, never-reused identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Time-ordered UUID v7 identifiers, rendered in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn generate(&self) -> String {
        Uuid::new_v7(Timestamp::now(NoContext)).to_string()
    }
}
