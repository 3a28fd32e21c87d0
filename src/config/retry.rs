//! Retry tuning for transient network failures.
//!
//! [`RetryConfig`] controls the exponential backoff applied when a request
//! fails before any response is received. Rate-limit (429) and server error
//! (5xx) retries have their own fixed delays and are not affected by it.

use std::time::Duration;

/// Default delay before the first network retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);

/// Default upper bound for a single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(2);

/// Default total time a request may spend retrying.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(5);

/// Default jitter fraction applied to each delay.
pub const DEFAULT_JITTER: f64 = 0.2;

/// Backoff settings for network-level retries.
///
/// # Environment
///
/// [`RetryConfig::from_env`] reads:
///
/// | Variable | Meaning |
/// |---|---|
/// | `SHOPLINE_RETRY_BASE` | base delay, e.g. `200ms` |
/// | `SHOPLINE_RETRY_MAX` | maximum delay, e.g. `2s` |
/// | `SHOPLINE_RETRY_BUDGET` | total budget; `0` disables retries, negative is unlimited |
/// | `SHOPLINE_RETRY_JITTER` | jitter fraction, clamped to `[0, 1]` |
///
/// Values that fail to parse leave the default in place.
///
/// # Example
///
/// ```rust
/// use shopline_api::RetryConfig;
/// use std::time::Duration;
///
/// let retry = RetryConfig::default();
/// assert_eq!(retry.base_delay(), Duration::from_millis(200));
/// assert_eq!(retry.budget(), Some(Duration::from_secs(5)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    base_delay: Duration,
    max_delay: Duration,
    /// `None` means unlimited.
    budget: Option<Duration>,
    jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            budget: Some(DEFAULT_BUDGET),
            jitter: DEFAULT_JITTER,
        }
    }
}

impl RetryConfig {
    /// Creates a retry config with explicit values.
    ///
    /// `jitter` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(
        base_delay: Duration,
        max_delay: Duration,
        budget: Option<Duration>,
        jitter: f64,
    ) -> Self {
        Self {
            base_delay,
            max_delay,
            budget,
            jitter: clamp_jitter(jitter),
        }
    }

    /// A config that never retries network failures.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            budget: Some(Duration::ZERO),
            ..Self::default()
        }
    }

    /// Builds a config from the `SHOPLINE_RETRY_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some((negative, d)) = read("SHOPLINE_RETRY_BASE").and_then(|v| parse_duration(&v)) {
            cfg.base_delay = if negative { Duration::ZERO } else { d };
        }
        if let Some((negative, d)) = read("SHOPLINE_RETRY_MAX").and_then(|v| parse_duration(&v)) {
            cfg.max_delay = if negative { Duration::ZERO } else { d };
        }
        if let Some((negative, d)) = read("SHOPLINE_RETRY_BUDGET").and_then(|v| parse_duration(&v))
        {
            cfg.budget = if negative { None } else { Some(d) };
        }
        if let Some(jitter) = read("SHOPLINE_RETRY_JITTER").and_then(|v| v.parse::<f64>().ok()) {
            cfg.jitter = clamp_jitter(jitter);
        }

        cfg
    }

    /// Returns the base backoff delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the maximum backoff delay.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Returns the retry budget, `None` when unlimited.
    #[must_use]
    pub const fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Returns the jitter fraction.
    #[must_use]
    pub const fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Computes the backoff delay for a zero-based attempt number.
    ///
    /// `base * 2^attempt`, capped at the max delay, then spread by
    /// `± jitter * delay` using `rand_unit` in `[-1, 1]`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32, rand_unit: f64) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }

        let multiplier = 2u32.saturating_pow(attempt);
        let mut delay = self.base_delay.saturating_mul(multiplier);
        if !self.max_delay.is_zero() && delay > self.max_delay {
            delay = self.max_delay;
        }

        if self.jitter > 0.0 {
            #[allow(clippy::cast_precision_loss)]
            let nanos = delay.as_nanos() as f64;
            let jittered = self.jitter.mul_add(nanos * rand_unit.clamp(-1.0, 1.0), nanos);
            delay = nanos_to_duration(jittered);
        }

        delay
    }

    /// Returns `true` if sleeping `delay` after `elapsed` stays within budget.
    #[must_use]
    pub fn within_budget(&self, elapsed: Duration, delay: Duration) -> bool {
        match self.budget {
            None => true,
            Some(budget) if budget.is_zero() => false,
            Some(budget) => elapsed.saturating_add(delay) <= budget,
        }
    }
}

fn clamp_jitter(jitter: f64) -> f64 {
    if jitter.is_nan() {
        return 0.0;
    }
    jitter.clamp(0.0, 1.0)
}

/// Parses durations like `250ms`, `1.5s`, `1m30s` or `-1s`.
///
/// Returns the sign separately since [`Duration`] is unsigned. A bare `0` is
/// accepted.
pub(crate) fn parse_duration(input: &str) -> Option<(bool, Duration)> {
    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    if rest == "0" {
        return Some((negative, Duration::ZERO));
    }
    if rest.is_empty() {
        return None;
    }

    let mut total_nanos = 0.0_f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let value: f64 = rest[..number_len].parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 6e10,
            "h" => 3.6e12,
            _ => return None,
        };
        rest = &rest[unit_len..];

        total_nanos += value * nanos_per_unit;
    }

    #[allow(clippy::cast_precision_loss)]
    let max_nanos = u64::MAX as f64;
    if total_nanos > max_nanos {
        return None;
    }
    Some((negative, nanos_to_duration(total_nanos)))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn nanos_to_duration(nanos: f64) -> Duration {
    if nanos <= 0.0 || nanos.is_nan() {
        return Duration::ZERO;
    }
    Duration::from_nanos(nanos.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(
            parse_duration("250ms"),
            Some((false, Duration::from_millis(250)))
        );
        assert_eq!(
            parse_duration("1.5s"),
            Some((false, Duration::from_millis(1500)))
        );
        assert_eq!(
            parse_duration("1m30s"),
            Some((false, Duration::from_secs(90)))
        );
        assert_eq!(parse_duration("-1s"), Some((true, Duration::from_secs(1))));
        assert_eq!(parse_duration("0"), Some((false, Duration::ZERO)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("5"), None);
        assert_eq!(parse_duration("5 days"), None);
    }

    #[test]
    fn test_from_lookup_uses_defaults_when_unset() {
        let cfg = RetryConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, RetryConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let cfg = RetryConfig::from_lookup(lookup(&[
            ("SHOPLINE_RETRY_BASE", "50ms"),
            ("SHOPLINE_RETRY_MAX", "1s"),
            ("SHOPLINE_RETRY_BUDGET", "10s"),
            ("SHOPLINE_RETRY_JITTER", "0.5"),
        ]));
        assert_eq!(cfg.base_delay(), Duration::from_millis(50));
        assert_eq!(cfg.max_delay(), Duration::from_secs(1));
        assert_eq!(cfg.budget(), Some(Duration::from_secs(10)));
        assert!((cfg.jitter() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_lookup_budget_sign() {
        let cfg = RetryConfig::from_lookup(lookup(&[("SHOPLINE_RETRY_BUDGET", "-1s")]));
        assert_eq!(cfg.budget(), None);

        let cfg = RetryConfig::from_lookup(lookup(&[("SHOPLINE_RETRY_BUDGET", "0")]));
        assert_eq!(cfg.budget(), Some(Duration::ZERO));
        assert!(!cfg.within_budget(Duration::ZERO, Duration::ZERO));
    }

    #[test]
    fn test_from_lookup_clamps_jitter_and_ignores_invalid() {
        let cfg = RetryConfig::from_lookup(lookup(&[
            ("SHOPLINE_RETRY_JITTER", "3.0"),
            ("SHOPLINE_RETRY_BASE", "soon"),
        ]));
        assert!((cfg.jitter() - 1.0).abs() < f64::EPSILON);
        assert_eq!(cfg.base_delay(), DEFAULT_BASE_DELAY);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let cfg = RetryConfig::new(
            Duration::from_millis(200),
            Duration::from_secs(1),
            None,
            0.0,
        );
        assert_eq!(cfg.delay_for_attempt(0, 0.0), Duration::from_millis(200));
        assert_eq!(cfg.delay_for_attempt(1, 0.0), Duration::from_millis(400));
        assert_eq!(cfg.delay_for_attempt(2, 0.0), Duration::from_millis(800));
        assert_eq!(cfg.delay_for_attempt(3, 0.0), Duration::from_secs(1));
    }

    #[test]
    fn test_delay_jitter_bounds() {
        let cfg = RetryConfig::new(
            Duration::from_millis(1000),
            Duration::from_secs(10),
            None,
            0.2,
        );
        assert_eq!(cfg.delay_for_attempt(0, 1.0), Duration::from_millis(1200));
        assert_eq!(cfg.delay_for_attempt(0, -1.0), Duration::from_millis(800));
    }

    #[test]
    fn test_within_budget() {
        let cfg = RetryConfig::default();
        assert!(cfg.within_budget(Duration::from_secs(1), Duration::from_secs(1)));
        assert!(!cfg.within_budget(Duration::from_secs(5), Duration::from_millis(1)));
        assert!(!RetryConfig::disabled().within_budget(Duration::ZERO, Duration::ZERO));
    }
}
