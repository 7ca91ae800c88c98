//! scalar normalization for GTFS text values. malformed input never fails;
//! it collapses to a documented default of 0 so a single bad cell cannot
//! abort a feed conversion.

/// converts a GTFS `HH:MM:SS` time-of-day value to seconds since midnight.
/// the GTFS spec allows hours > 23 for service running past midnight, so
/// results may exceed 86400. anything other than three integer fields
/// yields 0, as does a value whose total seconds exceed the u32 range.
pub fn time_to_seconds(text: &str) -> u32 {
    let mut parts = text.split(':').map(|part| part.trim().parse::<u32>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(h)), Some(Ok(m)), Some(Ok(s)), None) => {
            // widen before multiplying; an absurd hour field must not wrap
            let total = h as u64 * 3600 + m as u64 * 60 + s as u64;
            u32::try_from(total).unwrap_or(0)
        }
        _ => 0,
    }
}

/// parses a GTFS `YYYYMMDD` date as a plain integer so dates compare
/// numerically. malformed input yields 0.
pub fn date_to_int(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(0)
}

/// scales a coordinate in degrees to fixed-point 1e5 integer degrees,
/// truncating toward zero.
pub fn scale_e5(degrees: f64) -> i32 {
    (degrees * 1e5) as i32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_time_past_midnight() {
        assert_eq!(time_to_seconds("25:30:00"), 91800);
    }

    #[test]
    fn test_time_ordinary() {
        assert_eq!(time_to_seconds("08:15:30"), 29730);
    }

    #[test]
    fn test_time_overflowing_hours_default_to_zero() {
        assert_eq!(time_to_seconds("1193047:00:00"), 0);
        assert_eq!(time_to_seconds("4294967295:59:59"), 0);
        // large but representable hours still convert
        assert_eq!(time_to_seconds("10000:00:00"), 36_000_000);
    }

    #[test]
    fn test_time_malformed_defaults_to_zero() {
        assert_eq!(time_to_seconds(""), 0);
        assert_eq!(time_to_seconds("8:30"), 0);
        assert_eq!(time_to_seconds("a:b:c"), 0);
        assert_eq!(time_to_seconds("1:2:3:4"), 0);
    }

    #[test]
    fn test_date_to_int() {
        assert_eq!(date_to_int("20240115"), 20240115);
        assert_eq!(date_to_int("bad"), 0);
        assert_eq!(date_to_int(""), 0);
    }

    #[test]
    fn test_scale_e5_truncates_toward_zero() {
        assert_eq!(scale_e5(47.5), 4750000);
        assert_eq!(scale_e5(-122.25), -12225000);
        assert_eq!(scale_e5(1.000009), 100000);
        assert_eq!(scale_e5(-1.000009), -100000);
        assert_eq!(scale_e5(0.0), 0);
    }
}
