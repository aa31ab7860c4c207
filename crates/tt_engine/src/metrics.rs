/// Words per minute from a character count, assuming the conventional
/// 5 characters per "word". Returns `0.0` for a non-positive or
/// non-finite duration rather than dividing by zero or producing NaN.
#[must_use]
pub fn wpm(correct_chars: u64, duration_ms: f64) -> f64 {
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return 0.0;
    }
    (correct_chars as f64 / 5.0) / (duration_ms / 60_000.0)
}

/// Percentage of typed keystrokes that did not land as a counted
/// correct character: mismatches, collateral keystrokes during slack,
/// and backspaces. Returns `0.0` when nothing has been typed yet.
#[must_use]
pub fn unproductive_percent(typed_keystrokes: u64, incorrect: u64, collateral: u64, backspaces: u64) -> f64 {
    if typed_keystrokes == 0 {
        return 0.0;
    }
    ((incorrect + collateral + backspaces) as f64 / typed_keystrokes as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wpm_of_300_chars_in_one_minute_is_60() {
        assert!((wpm(300, 60_000.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn wpm_is_zero_for_non_positive_duration() {
        assert_eq!(wpm(100, 0.0), 0.0);
        assert_eq!(wpm(100, -5.0), 0.0);
    }

    #[test]
    fn wpm_is_zero_for_non_finite_duration() {
        assert_eq!(wpm(100, f64::NAN), 0.0);
        assert_eq!(wpm(100, f64::INFINITY), 0.0);
    }

    #[test]
    fn unproductive_percent_of_nothing_typed_is_zero() {
        assert_eq!(unproductive_percent(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn unproductive_percent_counts_all_three_kinds() {
        // 2 incorrect + 1 collateral + 1 backspace out of 10 keystrokes.
        assert!((unproductive_percent(10, 2, 1, 1) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unproductive_percent_of_all_correct_is_zero() {
        assert_eq!(unproductive_percent(10, 0, 0, 0), 0.0);
    }
}
