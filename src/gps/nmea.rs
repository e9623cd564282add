// src/gps/nmea.rs
//! NMEA GGA sentence parsing

use super::data::Fix;
use crate::error::{GpsError, Result};
use chrono::NaiveTime;

/// Fields in a GGA sentence, counting the `$xxGGA` tag
pub const GGA_FIELD_COUNT: usize = 15;

/// Outcome of parsing a checksummed GGA sentence
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// A complete new fix
    Updated(Fix),
    /// The receiver has no time yet; keep the previous fix
    NoUpdate,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest magnitude in decimal degrees
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

/// Check whether a line carries the fix sentence (`$xxGGA`)
pub fn is_fix_sentence(line: &str) -> bool {
    line.get(3..6) == Some("GGA")
}

/// Parse a GGA (Global Positioning System Fix Data) sentence.
///
/// Either every field decodes and a full `Fix` is returned, or nothing is;
/// the caller never sees a partially filled fix.
pub fn parse_fix(sentence: &str) -> Result<ParseOutcome> {
    let sentence = sentence.trim_end_matches(['\r', '\n']);
    let sentence = sentence.strip_prefix('$').unwrap_or(sentence);
    let body = sentence.rsplit_once('*').map_or(sentence, |(body, _)| body);

    let parts: Vec<&str> = body.split(',').collect();
    if parts.len() < GGA_FIELD_COUNT {
        return Err(GpsError::Parse(format!(
            "GGA has {} fields, expected {}",
            parts.len(),
            GGA_FIELD_COUNT
        )));
    }

    // Time (field 1); blank until the receiver has acquired time
    let time = match parse_time(parts[1])? {
        Some(time) => time,
        None => return Ok(ParseOutcome::NoUpdate),
    };

    // Latitude (field 2 and 3), longitude (field 4 and 5)
    let latitude = nmea_to_decimal(parts[2], parts[3], Axis::Latitude)?;
    let longitude = nmea_to_decimal(parts[4], parts[5], Axis::Longitude)?;

    // Fix quality (field 6)
    let quality = parts[6]
        .trim()
        .parse::<u32>()
        .map_err(|e| GpsError::Parse(format!("fix quality {:?}: {}", parts[6], e)))?;

    // Number of satellites (field 7)
    let satellites = parts[7]
        .trim()
        .parse::<u32>()
        .map_err(|e| GpsError::Parse(format!("satellite count {:?}: {}", parts[7], e)))?;

    // Altitude (field 9)
    let altitude = parse_altitude(parts[9])?;

    Ok(ParseOutcome::Updated(Fix {
        time: Some(time),
        latitude,
        longitude,
        altitude,
        satellites,
        quality,
        has_fix: quality != 0,
    }))
}

/// `hhmmss[.sss]` to a time of day; `None` for a blank field
fn parse_time(field: &str) -> Result<Option<NaiveTime>> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }

    let hms = field
        .get(0..6)
        .filter(|hms| hms.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| GpsError::Parse(format!("time {:?}", field)))?;

    let formatted = format!("{}:{}:{}", &hms[0..2], &hms[2..4], &hms[4..6]);
    NaiveTime::parse_from_str(&formatted, "%H:%M:%S")
        .map(Some)
        .map_err(|e| GpsError::Parse(format!("time {:?}: {}", field, e)))
}

fn parse_altitude(field: &str) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(0.0);
    }
    field
        .parse::<f64>()
        .map_err(|e| GpsError::Parse(format!("altitude {:?}: {}", field, e)))
}

/// Convert `ddmm.mmmm` / `dddmm.mmmm` plus a hemisphere to decimal degrees.
/// An empty value decodes to `0.0`.
fn nmea_to_decimal(value: &str, direction: &str, axis: Axis) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }

    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let valid = whole.len() >= 3
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(GpsError::Parse(format!("coordinate {:?}", value)));
    }

    // Minutes are always the last two integer digits plus the fraction
    let split = whole.len() - 2;
    let degrees: f64 = whole[..split]
        .parse()
        .map_err(|e| GpsError::Parse(format!("coordinate {:?}: {}", value, e)))?;
    let minutes: f64 = value[split..]
        .parse()
        .map_err(|e| GpsError::Parse(format!("coordinate {:?}: {}", value, e)))?;
    if minutes >= 60.0 {
        return Err(GpsError::Parse(format!("coordinate {:?}: minutes out of range", value)));
    }
    let decimal = degrees + minutes / 60.0;
    if decimal > axis.limit() {
        return Err(GpsError::Parse(format!("{:?} {:?} out of range", axis, value)));
    }

    let sign = match (axis, direction.trim()) {
        (Axis::Latitude, "N" | "") | (Axis::Longitude, "E" | "") => 1.0,
        (Axis::Latitude, "S") | (Axis::Longitude, "W") => -1.0,
        (_, other) => {
            return Err(GpsError::Parse(format!("{:?} direction {:?}", axis, other)));
        }
    };

    Ok(sign * decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    fn updated(sentence: &str) -> Fix {
        match parse_fix(sentence) {
            Ok(ParseOutcome::Updated(fix)) => fix,
            other => panic!("expected a fix, got {:?}", other),
        }
    }

    /// Decimal degrees back to `(d)ddmm.mmmmmm` and a hemisphere
    fn encode(decimal: f64, axis: Axis) -> (String, &'static str) {
        let dir = match (axis, decimal < 0.0) {
            (Axis::Latitude, false) => "N",
            (Axis::Latitude, true) => "S",
            (Axis::Longitude, false) => "E",
            (Axis::Longitude, true) => "W",
        };
        let abs = decimal.abs();
        let degrees = abs.trunc();
        let minutes = (abs - degrees) * 60.0;
        let width = match axis {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        };
        (format!("{:0w$}{:09.6}", degrees as u32, minutes, w = width), dir)
    }

    #[test]
    fn test_gpgga_parsing() {
        let fix = updated(GGA);

        assert_eq!(fix.time, NaiveTime::from_hms_opt(12, 35, 19));
        assert!((fix.latitude - 48.1173).abs() < 1e-4);
        assert!((fix.longitude - 11.516_666).abs() < 1e-4);
        assert_eq!(fix.altitude, 545.4);
        assert_eq!(fix.satellites, 8);
        assert_eq!(fix.quality, 1);
        assert!(fix.has_fix);
    }

    #[test]
    fn test_southern_and_western_hemispheres_are_negative() {
        let fix = updated("$GNGGA,010203,3351.500,S,15112.600,W,2,05,1.0,10.0,M,0.0,M,,*00");
        assert!((fix.latitude + 33.858_333).abs() < 1e-5);
        assert!((fix.longitude + 151.21).abs() < 1e-5);
    }

    #[test]
    fn test_quality_zero_means_no_fix() {
        // Satellites present but the receiver reports no fix
        let fix = updated("$GPGGA,123519,4807.038,N,01131.000,E,0,07,0.9,545.4,M,46.9,M,,*47");
        assert!(!fix.has_fix);
        assert_eq!(fix.satellites, 7);
    }

    #[test]
    fn test_nonzero_quality_means_fix() {
        for q in ["1", "2", "6", "8"] {
            let s = format!("$GPGGA,123519,4807.038,N,01131.000,E,{},00,0.9,545.4,M,46.9,M,,", q);
            assert!(updated(&s).has_fix, "quality {}", q);
        }
    }

    #[test]
    fn test_quality_above_byte_range_is_kept() {
        let fix = updated("$GPGGA,123519,4807.038,N,01131.000,E,300,08,0.9,545.4,M,46.9,M,,");
        assert_eq!(fix.quality, 300);
        assert!(fix.has_fix);
        assert_eq!(fix.fix_description(), "Unknown (300)");
    }

    #[test]
    fn test_blank_time_is_no_update() {
        let s = "$GPGGA,      ,,,,,0,00,99.99,,,,,,*48";
        assert_eq!(parse_fix(s).unwrap(), ParseOutcome::NoUpdate);
        let s = "$GPGGA,,,,,,0,00,99.99,,,,,,*48";
        assert_eq!(parse_fix(s).unwrap(), ParseOutcome::NoUpdate);
    }

    #[test]
    fn test_empty_position_and_altitude_decode_to_zero() {
        let fix = updated("$GPGGA,000001,,,,,0,00,99.99,,M,,M,,*00");
        assert_eq!(fix.latitude, 0.0);
        assert_eq!(fix.longitude, 0.0);
        assert_eq!(fix.altitude, 0.0);
        assert_eq!(fix.time, NaiveTime::from_hms_opt(0, 0, 1));
    }

    #[test]
    fn test_fractional_seconds_truncated() {
        let fix = updated("$GPGGA,235959.00,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*00");
        assert_eq!(fix.time, NaiveTime::from_hms_opt(23, 59, 59));
    }

    #[test]
    fn test_too_few_fields_is_error() {
        let err = parse_fix("$GPGGA,123519,4807.038,N,01131.000,E,1,08*00").unwrap_err();
        assert!(matches!(err, GpsError::Parse(_)));
    }

    #[test]
    fn test_missing_satellite_count_is_error() {
        let s = "$GPGGA,123519,4807.038,N,01131.000,E,1,,0.9,545.4,M,46.9,M,,";
        assert!(matches!(parse_fix(s), Err(GpsError::Parse(_))));
    }

    #[test]
    fn test_numeric_failures_are_errors() {
        let cases = [
            "$GPGGA,12x519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,256019,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,48O7.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,4867.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,9907.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,9000.001,S,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,4807.038,N,18100.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,4807.038,X,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,4807.038,N,01131.000,E,A,08,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,4807.038,N,01131.000,E,1,-8,0.9,545.4,M,46.9,M,,",
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,5x5.4,M,46.9,M,,",
        ];
        for s in cases {
            assert!(matches!(parse_fix(s), Err(GpsError::Parse(_))), "{}", s);
        }
    }

    #[test]
    fn test_coordinate_round_trip() {
        for &lat in &[0.0, 12.345_678, -33.858_333, 89.999_9, -0.5] {
            let (value, dir) = encode(lat, Axis::Latitude);
            let decoded = nmea_to_decimal(&value, dir, Axis::Latitude).unwrap();
            assert!((decoded - lat).abs() < 1e-5, "{} -> {} -> {}", lat, value, decoded);
        }
        for &lon in &[0.0, 11.516_667, -151.21, 179.999_9, -7.25] {
            let (value, dir) = encode(lon, Axis::Longitude);
            let decoded = nmea_to_decimal(&value, dir, Axis::Longitude).unwrap();
            assert!((decoded - lon).abs() < 1e-5, "{} -> {} -> {}", lon, value, decoded);
        }
    }

    #[test]
    fn test_poles_and_antimeridian_are_in_range() {
        assert_eq!(nmea_to_decimal("9000.000", "S", Axis::Latitude).unwrap(), -90.0);
        assert_eq!(nmea_to_decimal("18000.000", "W", Axis::Longitude).unwrap(), -180.0);
        assert!(nmea_to_decimal("09100.000", "N", Axis::Latitude).is_err());
    }

    #[test]
    fn test_is_fix_sentence() {
        assert!(is_fix_sentence(GGA));
        assert!(is_fix_sentence("$GNGGA,,,"));
        assert!(!is_fix_sentence("$GPRMC,123519,A"));
        assert!(!is_fix_sentence("Decode Error"));
        assert!(!is_fix_sentence("$GP"));
        assert!(!is_fix_sentence(""));
    }
}
