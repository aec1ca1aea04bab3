//! Resolves bound sensor ids to display values
//!
//! Unusable sensor state never surfaces as an error: every failure mode
//! (unbound slot, missing sensor, `unavailable`/`unknown`, non-numeric state)
//! yields the slot's compiled-in fallback instead.

use crate::types::SensorSnapshot;

/// Maps `(entity id, fallback)` to a plain number
pub struct ValueResolver;

impl ValueResolver {
    /// Resolve the numeric value of `entity_id`, or `fallback`
    ///
    /// No unit conversion or rounding happens here.
    pub fn resolve(snapshot: &SensorSnapshot, entity_id: Option<&str>, fallback: f64) -> f64 {
        let Some(id) = entity_id.filter(|id| !id.is_empty()) else {
            return fallback;
        };
        let Some(state) = snapshot.get(id) else {
            return fallback;
        };
        if state.is_unusable() {
            return fallback;
        }
        parse_leading_number(&state.state).unwrap_or(fallback)
    }
}

/// Parse the longest numeric prefix of `text`
///
/// Accepts an optional sign, digits with an optional fraction and an
/// optional exponent, after leading whitespace; trailing text such as a
/// unit is ignored. Returns `None` when there is no number or the result
/// is not finite.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorState;

    fn snapshot_with(id: &str, state: &str) -> SensorSnapshot {
        let mut snap = SensorSnapshot::new();
        snap.insert(id.to_string(), SensorState::new(state));
        snap
    }

    #[test]
    fn test_unbound_returns_fallback() {
        let snap = snapshot_with("sensor.a", "10");
        assert_eq!(ValueResolver::resolve(&snap, None, 4500.0), 4500.0);
        assert_eq!(ValueResolver::resolve(&snap, Some(""), 4500.0), 4500.0);
    }

    #[test]
    fn test_missing_sensor_returns_fallback() {
        let snap = snapshot_with("sensor.a", "10");
        assert_eq!(ValueResolver::resolve(&snap, Some("sensor.b"), -1200.0), -1200.0);
    }

    #[test]
    fn test_sentinels_return_fallback() {
        for state in ["unavailable", "unknown", "notanumber"] {
            let snap = snapshot_with("sensor.a", state);
            assert_eq!(ValueResolver::resolve(&snap, Some("sensor.a"), 85.0), 85.0);
        }
    }

    #[test]
    fn test_parses_value() {
        let snap = snapshot_with("sensor.a", "42.5");
        assert_eq!(ValueResolver::resolve(&snap, Some("sensor.a"), 0.0), 42.5);
    }

    #[test]
    fn test_leading_number_rules() {
        assert_eq!(parse_leading_number("  -12.5 W"), Some(-12.5));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("1e3"), Some(1000.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("1e999"), None);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_absent_ids_always_fall_back(id in "[a-z_.]{0,20}", fallback in -1e6f64..1e6) {
            let snap = snapshot_with("sensor.present", "1");
            prop_assume!(id != "sensor.present");
            prop_assert_eq!(ValueResolver::resolve(&snap, Some(&id), fallback), fallback);
        }

        #[test]
        fn test_formatted_numbers_parse_back(value in -1e9f64..1e9) {
            let snap = snapshot_with("sensor.x", &value.to_string());
            prop_assert_eq!(ValueResolver::resolve(&snap, Some("sensor.x"), 0.0), value);
        }

        #[test]
        fn test_parse_never_panics(text in "\\PC{0,24}") {
            let _ = parse_leading_number(&text);
        }
    }
}
