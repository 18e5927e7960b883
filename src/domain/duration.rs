use super::field::Parsed;

/// Parse elapsed-time text into whole seconds.
///
/// Accepted forms, in priority order:
/// - a bare non-negative integer, read as hours ("2" -> 7200)
/// - "H:MM:SS" with 1-3 hour digits and 1-2 minute/second digits
/// - "H:MM", the legacy two-field form, read as hours:minutes
pub fn parse(text: &str) -> Parsed<u64> {
    let s = text.trim();
    if s.is_empty() {
        return Parsed::Empty;
    }

    // Plain number => hours
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return match s.parse::<u64>().ok().and_then(|h| h.checked_mul(3600)) {
            Some(seconds) => Parsed::Value(seconds),
            None => Parsed::Invalid,
        };
    }

    let fields: Vec<&str> = s.split(':').collect();
    match fields.as_slice() {
        &[h, m, sec] => match (field(h, 3), field(m, 2), field(sec, 2)) {
            (Some(h), Some(m), Some(sec)) => Parsed::Value(h * 3600 + m * 60 + sec),
            _ => Parsed::Invalid,
        },
        &[h, m] => match (field(h, 3), field(m, 2)) {
            (Some(h), Some(m)) => Parsed::Value(h * 3600 + m * 60),
            _ => Parsed::Invalid,
        },
        _ => Parsed::Invalid,
    }
}

/// Parse one numeric field of at most `max_digits` digits
fn field(s: &str, max_digits: usize) -> Option<u64> {
    if s.is_empty() || s.len() > max_digits || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Format seconds as "H:MM:SS", keeping a leading '-' for negative values
pub fn format(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    let h = abs / 3600;
    let m = (abs % 3600) / 60;
    let s = abs % 60;
    format!("{}{}:{:02}:{:02}", sign, h, m, s)
}

/// Format seconds as "H:MM" (no seconds field); summary output only,
/// never fed back through `parse` for round-trip editing
pub fn format_hm(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    let h = abs / 3600;
    let m = (abs % 3600) / 60;
    format!("{}{}:{:02}", sign, h, m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bare_integer_is_hours() {
        assert_eq!(parse("2"), Parsed::Value(7200));
        assert_eq!(parse("90"), Parsed::Value(324_000));
        assert_eq!(parse("0"), Parsed::Value(0));
    }

    #[test]
    fn test_parse_h_mm_ss() {
        assert_eq!(parse("2:05:09"), Parsed::Value(7509));
        assert_eq!(parse("0:00:01"), Parsed::Value(1));
        assert_eq!(parse("123:5:9"), Parsed::Value(123 * 3600 + 5 * 60 + 9));
    }

    #[test]
    fn test_parse_legacy_h_mm() {
        assert_eq!(parse("1:30"), Parsed::Value(5400));
        assert_eq!(parse("0:05"), Parsed::Value(300));
    }

    #[test]
    fn test_parse_empty_is_unset() {
        assert_eq!(parse(""), Parsed::Empty);
        assert_eq!(parse("   "), Parsed::Empty);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse("abc"), Parsed::Invalid);
        assert_eq!(parse("-1"), Parsed::Invalid);
        assert_eq!(parse("1:-5"), Parsed::Invalid);
        assert_eq!(parse("1:234"), Parsed::Invalid);
        assert_eq!(parse("1234:00:00"), Parsed::Invalid);
        assert_eq!(parse("1:2:3:4"), Parsed::Invalid);
        assert_eq!(parse("1:"), Parsed::Invalid);
    }

    #[test]
    fn test_parse_rejects_overflowing_hours() {
        // 19 digits of hours would overflow seconds; invalid, not a panic
        assert_eq!(parse("9999999999999999999"), Parsed::Invalid);
        // 20+ digits already fail u64 parsing
        assert_eq!(parse("99999999999999999999"), Parsed::Invalid);
        // The largest representable hour count still parses
        assert_eq!(
            parse("5124095576030431"),
            Parsed::Value(5_124_095_576_030_431 * 3600)
        );
    }

    #[test]
    fn test_format() {
        assert_eq!(format(7509), "2:05:09");
        assert_eq!(format(0), "0:00:00");
        assert_eq!(format(-3200), "-0:53:20");
        assert_eq!(format(46_800), "13:00:00");
    }

    #[test]
    fn test_format_hm() {
        assert_eq!(format_hm(46_800), "13:00");
        assert_eq!(format_hm(-3200), "-0:53");
        assert_eq!(format_hm(59), "0:00");
    }

    #[test]
    fn test_parse_format_round_trip() {
        for s in [0u64, 1, 59, 60, 61, 3599, 3600, 7505, 86_399, 500_000] {
            assert_eq!(parse(&format(s as i64)), Parsed::Value(s), "round trip {}", s);
        }
    }
}
