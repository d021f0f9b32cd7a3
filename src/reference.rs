// Client-side booking references derived from the wall clock
use crate::models::BookingKind;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

static BOOKING_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^SE-(FLT|HTL|PKG)-[0-9A-Z]+$").expect("valid booking reference pattern"));

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// Always reports the same instant; handy for reproducible documents
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Issues booking references of the form `SE-{FLT|HTL|PKG}-{base36 millis}`.
///
/// References are not server issued and carry no collision check beyond
/// this: one generator never hands out the same millisecond twice, bumping
/// to the next millisecond instead. Separate generators may collide.
pub struct ReferenceGenerator {
    clock: Arc<dyn Clock>,
    last_millis: AtomicI64,
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ReferenceGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_millis: AtomicI64::new(0),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn next_millis(&self) -> i64 {
        let now = self.clock.now().timestamp_millis();
        let previous = self
            .last_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
            .unwrap_or(now);
        now.max(previous + 1)
    }

    pub fn booking_ref(&self, kind: BookingKind) -> String {
        let millis = self.next_millis();
        format!("SE-{}-{}", kind.reference_prefix(), to_base36(millis.max(0) as u64))
    }

    // Flight checkout ids: "SE" followed by the last nine digits of the millis
    pub fn booking_id(&self) -> String {
        let millis = self.next_millis().to_string();
        let start = millis.len().saturating_sub(9);
        format!("SE{}", &millis[start..])
    }
}

pub fn is_booking_ref(candidate: &str) -> bool {
    BOOKING_REF_PATTERN.is_match(candidate)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn fixed() -> ReferenceGenerator {
        let instant = Utc.timestamp_millis_opt(1_705_300_000_000).unwrap();
        ReferenceGenerator::new(Arc::new(FixedClock(instant)))
    }

    #[test]
    fn test_reference_format() {
        let generator = ReferenceGenerator::default();
        for kind in [BookingKind::Flight, BookingKind::Hotel, BookingKind::Package] {
            let reference = generator.booking_ref(kind);
            assert!(is_booking_ref(&reference), "bad reference {}", reference);
            assert!(reference.starts_with(&format!("SE-{}-", kind.reference_prefix())));
        }
    }

    #[test]
    fn test_reference_encodes_millis_in_base36() {
        let generator = fixed();
        assert_eq!(generator.booking_ref(BookingKind::Flight), "SE-FLT-LREJL98G");
    }

    #[test]
    fn test_same_millisecond_is_bumped() {
        let generator = fixed();
        let issued: HashSet<String> = (0..100)
            .map(|_| generator.booking_ref(BookingKind::Hotel))
            .collect();
        assert_eq!(issued.len(), 100);
    }

    #[test]
    fn test_booking_id_keeps_last_nine_digits() {
        let generator = fixed();
        assert_eq!(generator.booking_id(), "SE300000000");
    }

    #[test]
    fn test_rejects_foreign_formats() {
        assert!(!is_booking_ref("SE-BUS-123"));
        assert!(!is_booking_ref("se-flt-abc"));
        assert!(!is_booking_ref("SE-FLT-"));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
    }
}
