//! Time source, id generation and timestamp formatting.

use chrono::{DateTime, Local, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

const RANDOM_SUFFIX_LEN: usize = 6;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of "now" in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        self.millis.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Generates `<prefix>_<base36 millis>_<6 random base36 chars>`.
///
/// The time component orders ids by creation; the random component comes
/// from a v4 UUID and keeps ids issued within the same millisecond apart.
pub fn uid(prefix: &str, now_millis: i64) -> String {
    let random = Uuid::new_v4().as_u128();
    format!(
        "{}_{}_{}",
        prefix,
        to_base36(now_millis.max(0) as u128),
        to_base36_padded(random, RANDOM_SUFFIX_LEN)
    )
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn to_base36_padded(mut value: u128, len: usize) -> String {
    let mut digits = vec![b'0'; len];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36_DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8(digits).unwrap_or_default()
}

/// Formats an epoch-millisecond timestamp as local date-time text.
/// Returns an empty string for 0 or out-of-range values.
pub fn format_timestamp(millis: i64) -> String {
    if millis == 0 {
        return String::new();
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}
