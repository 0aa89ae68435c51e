// src/time.rs
// Clock access, unit conversions and interval fuzzing.

use rand::Rng;

pub const SECS_PER_MINUTE: i64 = 60;
pub const SECS_PER_DAY: i64 = 86_400;

/// Learning cards due within this many seconds are already counted as due.
pub const LEARN_AHEAD_SECS: i64 = 1_200;

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Day number (days since the epoch) that contains `secs`.
pub fn day_index(secs: i64) -> i64 {
    secs.div_euclid(SECS_PER_DAY)
}

/// Whole calendar days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: i64, to: i64) -> i64 {
    day_index(to) - day_index(from)
}

/// A source of uniformly distributed integers for interval fuzzing.
///
/// Every `rand::Rng` is a `FuzzSource`, so production code can hand in
/// `rand::thread_rng()` while tests pass a stub that returns fixed values.
pub trait FuzzSource {
    /// Returns a value in `low..=high`.
    fn pick(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng> FuzzSource for R {
    fn pick(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

/// Half-width of the fuzz window for an interval of `interval` days.
pub fn fuzz_range(interval: u32) -> u32 {
    match interval {
        0..=1 => 0,
        2..=6 => 1,
        7..=29 => (interval as f64 * 0.15).floor().max(1.0) as u32,
        _ => (interval as f64 * 0.05).floor().max(2.0) as u32,
    }
}

/// Perturbs `interval` by a random amount inside its fuzz window so cards
/// graduated together drift apart. Intervals below two days are left alone
/// and the result never drops below two.
pub fn fuzz_interval(interval: u32, rng: &mut impl FuzzSource) -> u32 {
    fuzz_interval_at_least(interval, 0, rng)
}

/// Like [`fuzz_interval`], but the lower end of the window is raised to
/// `minimum` when it would otherwise fall below it.
pub fn fuzz_interval_at_least(interval: u32, minimum: u32, rng: &mut impl FuzzSource) -> u32 {
    if interval < 2 {
        return interval;
    }
    let fuzz = fuzz_range(interval);
    let low = interval.saturating_sub(fuzz).max(2).max(minimum.min(interval));
    let high = interval.saturating_add(fuzz);
    let fuzzed = rng.pick(low, high);
    log::trace!("fuzzed interval {} -> {} (window {}..={})", interval, fuzzed, low, high);
    fuzzed
}
