//! NMEA0183 sentence encoder.
//!
//! A [`Sentence`] is built field by field. Every append returns `Option<()>`
//! so builders can stop at the first field that does not fit or cannot be
//! formatted, and hand back `None` instead of a partial sentence.
//!
//! The `build_*` functions take internal SI values (radians, m/s, meters,
//! Kelvin) and do the unit conversion for the wire format themselves.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::units::{KNOTS_PER_MS, METERS_PER_NAUTICAL_MILE, RAD_TO_DEG, normalize0_360};

/// Longest framed sentence, counting `$`, `*HH` and the trailing CR LF.
pub const MAX_SENTENCE_LENGTH: usize = 82;
const FRAMING_LENGTH: usize = 1 + 3 + 2;

pub const TALKER_INSTRUMENTS: &str = "II";
/// Talker used for sentences synthesized locally rather than relayed.
pub const TALKER_LOCAL: &str = "GP";

const FEET_PER_METER: f64 = 3.28084;
const FATHOMS_PER_METER: f64 = 0.546807;
const KMH_PER_MS: f64 = 3.6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    // talker + code followed by ",field" for every field
    body: String,
}

impl Sentence {
    pub fn new(talker: &str, code: &str) -> Option<Self> {
        let valid = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if !valid(talker, 2) || !valid(code, 3) {
            return None;
        }
        Some(Self {
            body: format!("{}{}", talker, code),
        })
    }

    pub fn talker(&self) -> &str {
        &self.body[..2]
    }

    pub fn code(&self) -> &str {
        &self.body[2..5]
    }

    /// Framed length including CR LF.
    pub fn len(&self) -> usize {
        self.body.len() + FRAMING_LENGTH
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.body.split(',').skip(1)
    }

    pub fn checksum(&self) -> u8 {
        self.body.bytes().fold(0, |acc, b| acc ^ b)
    }

    pub fn add_str_field(&mut self, value: &str) -> Option<()> {
        if value.bytes().any(|b| matches!(b, b',' | b'*' | b'$' | b'!' | b'\r' | b'\n') || !b.is_ascii()) {
            return None;
        }
        if self.len() + 1 + value.len() > MAX_SENTENCE_LENGTH {
            return None;
        }
        self.body.push(',');
        self.body.push_str(value);
        Some(())
    }

    /// Append a number with `decimals` digits; not available becomes an empty field.
    pub fn add_double_field(&mut self, value: Option<f64>, decimals: usize) -> Option<()> {
        match value {
            None => self.add_str_field(""),
            Some(v) if !v.is_finite() => None,
            Some(v) => self.add_str_field(&format!("{:.*}", decimals, v)),
        }
    }

    /// Append the absolute value and a hemisphere letter, e.g. variation `3.2,W`.
    pub fn add_signed_field(&mut self, value: Option<f64>, decimals: usize, positive: &str, negative: &str) -> Option<()> {
        match value {
            None => {
                self.add_str_field("")?;
                self.add_str_field("")
            }
            Some(v) => {
                self.add_double_field(Some(v.abs()), decimals)?;
                self.add_str_field(if v < 0.0 { negative } else { positive })
            }
        }
    }

    /// Latitude as `ddmm.mmmm,N`.
    pub fn add_lat_field(&mut self, latitude: Option<f64>) -> Option<()> {
        self.add_coordinate(latitude, 90.0, 2, "N", "S")
    }

    /// Longitude as `dddmm.mmmm,E`.
    pub fn add_lon_field(&mut self, longitude: Option<f64>) -> Option<()> {
        self.add_coordinate(longitude, 180.0, 3, "E", "W")
    }

    fn add_coordinate(&mut self, value: Option<f64>, limit: f64, degree_digits: usize, positive: &str, negative: &str) -> Option<()> {
        let Some(v) = value else {
            self.add_str_field("")?;
            return self.add_str_field("");
        };
        if !v.is_finite() || v.abs() > limit {
            return None;
        }
        // Round on the minute scale first so 59.99999' never prints as 60'
        let total_minutes = (v.abs() * 60.0 * 10000.0).round() / 10000.0;
        let degrees = (total_minutes / 60.0).floor();
        let minutes = total_minutes - degrees * 60.0;
        let text = format!("{:0width$}{:07.4}", degrees as u32, minutes, width = degree_digits);
        self.add_str_field(&text)?;
        self.add_str_field(if v < 0.0 { negative } else { positive })
    }

    /// Seconds since midnight as `hhmmss.ss`.
    pub fn add_time_field(&mut self, seconds_since_midnight: Option<f64>) -> Option<()> {
        let Some(seconds) = seconds_since_midnight else {
            return self.add_str_field("");
        };
        if !seconds.is_finite() || !(0.0..86400.0).contains(&seconds) {
            return None;
        }
        // the last hundredth of the day must not round up to 24:00:00
        let centis = ((seconds * 100.0).round() as u64).min(8_639_999);
        let hours = centis / 360_000;
        let minutes = (centis / 6000) % 60;
        let secs = (centis % 6000) as f64 / 100.0;
        self.add_str_field(&format!("{:02}{:02}{:05.2}", hours, minutes, secs))
    }

    /// Days since 1970-01-01 as `ddmmyy`.
    pub fn add_date_field(&mut self, days_since_1970: Option<u16>) -> Option<()> {
        let Some(days) = days_since_1970 else {
            return self.add_str_field("");
        };
        let date = NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_days(Days::new(days as u64))?;
        self.add_str_field(&date.format("%d%m%y").to_string())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}*{:02X}", self.body, self.checksum())
    }
}

fn deg(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * RAD_TO_DEG)
}

fn deg360(value: Option<f64>) -> Option<f64> {
    value.map(|v| normalize0_360(v * RAD_TO_DEG))
}

fn knots(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * KNOTS_PER_MS)
}

fn kmh(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * KMH_PER_MS)
}

/// Heading, deviation and variation.
pub fn build_hdg(heading: Option<f64>, deviation: Option<f64>, variation: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_INSTRUMENTS, "HDG")?;
    s.add_double_field(deg360(heading), 1)?;
    s.add_signed_field(deg(deviation), 1, "E", "W")?;
    s.add_signed_field(deg(variation), 1, "E", "W")?;
    Some(s)
}

/// Water speed and heading.
pub fn build_vhw(true_heading: Option<f64>, magnetic_heading: Option<f64>, water_speed: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_INSTRUMENTS, "VHW")?;
    s.add_double_field(deg360(true_heading), 1)?;
    s.add_str_field("T")?;
    s.add_double_field(deg360(magnetic_heading), 1)?;
    s.add_str_field("M")?;
    s.add_double_field(knots(water_speed), 1)?;
    s.add_str_field("N")?;
    s.add_double_field(kmh(water_speed), 1)?;
    s.add_str_field("K")?;
    Some(s)
}

/// Depth below transducer and transducer offset.
pub fn build_dpt(depth_below_transducer: Option<f64>, offset: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_INSTRUMENTS, "DPT")?;
    s.add_double_field(depth_below_transducer, 1)?;
    s.add_double_field(offset, 1)?;
    Some(s)
}

/// Depth below surface (positive offset), below keel (negative offset) or
/// below transducer (no offset).
pub fn build_dbx(depth_below_transducer: Option<f64>, offset: Option<f64>) -> Option<Sentence> {
    let offset = offset.unwrap_or(0.0);
    let code = if offset > 0.0 {
        "DBS"
    } else if offset < 0.0 {
        "DBK"
    } else {
        "DBT"
    };
    let depth = depth_below_transducer.map(|d| d + offset);
    let mut s = Sentence::new(TALKER_INSTRUMENTS, code)?;
    s.add_double_field(depth.map(|d| d * FEET_PER_METER), 1)?;
    s.add_str_field("f")?;
    s.add_double_field(depth, 1)?;
    s.add_str_field("M")?;
    s.add_double_field(depth.map(|d| d * FATHOMS_PER_METER), 1)?;
    s.add_str_field("F")?;
    Some(s)
}

/// Track made good and ground speed.
pub fn build_vtg(true_cog: Option<f64>, magnetic_cog: Option<f64>, sog: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_INSTRUMENTS, "VTG")?;
    s.add_double_field(deg360(true_cog), 1)?;
    s.add_str_field("T")?;
    s.add_double_field(deg360(magnetic_cog), 1)?;
    s.add_str_field("M")?;
    s.add_double_field(knots(sog), 1)?;
    s.add_str_field("N")?;
    s.add_double_field(kmh(sog), 1)?;
    s.add_str_field("K")?;
    Some(s)
}

/// Fields of a recommended minimum navigation sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RmcFields {
    pub seconds_since_midnight: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub days_since_1970: Option<u16>,
    pub variation: Option<f64>,
}

pub fn build_rmc(fields: &RmcFields) -> Option<Sentence> {
    let valid = fields.latitude.is_some() && fields.longitude.is_some();
    let mut s = Sentence::new(TALKER_INSTRUMENTS, "RMC")?;
    s.add_time_field(fields.seconds_since_midnight)?;
    s.add_str_field(if valid { "A" } else { "V" })?;
    s.add_lat_field(fields.latitude)?;
    s.add_lon_field(fields.longitude)?;
    s.add_double_field(knots(fields.sog), 1)?;
    s.add_double_field(deg360(fields.cog), 1)?;
    s.add_date_field(fields.days_since_1970)?;
    s.add_signed_field(deg(fields.variation), 1, "E", "W")?;
    s.add_str_field(if valid { "A" } else { "N" })?;
    Some(s)
}

/// Wind angle relative to the bow and wind speed in m/s.
pub fn build_mwv(angle: Option<f64>, apparent: bool, speed: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_INSTRUMENTS, "MWV")?;
    s.add_double_field(deg360(angle), 1)?;
    s.add_str_field(if apparent { "R" } else { "T" })?;
    s.add_double_field(speed, 1)?;
    s.add_str_field("M")?;
    s.add_str_field(if angle.is_some() && speed.is_some() { "A" } else { "V" })?;
    Some(s)
}

/// Wind direction, reported in both the true and the magnetic field, and speed.
pub fn build_mwd(direction: Option<f64>, speed: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_LOCAL, "MWD")?;
    s.add_double_field(deg360(direction), 1)?;
    s.add_str_field("T")?;
    s.add_double_field(deg360(direction), 1)?;
    s.add_str_field("M")?;
    s.add_double_field(knots(speed), 1)?;
    s.add_str_field("N")?;
    s.add_double_field(speed, 1)?;
    s.add_str_field("M")?;
    Some(s)
}

/// Total and trip distance through water, from meters.
pub fn build_vlw(log: Option<f64>, trip_log: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_LOCAL, "VLW")?;
    s.add_double_field(log.map(|v| v / METERS_PER_NAUTICAL_MILE), 2)?;
    s.add_str_field("N")?;
    s.add_double_field(trip_log.map(|v| v / METERS_PER_NAUTICAL_MILE), 2)?;
    s.add_str_field("N")?;
    Some(s)
}

/// Starboard rudder angle; the port channel is always reported as 0.0.
pub fn build_rsa(rudder_position: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_LOCAL, "RSA")?;
    s.add_double_field(deg(rudder_position), 1)?;
    s.add_str_field("A")?;
    s.add_double_field(Some(0.0), 1)?;
    s.add_str_field("A")?;
    Some(s)
}

/// Water temperature from Kelvin.
pub fn build_mtw(water_temperature: Option<f64>) -> Option<Sentence> {
    let mut s = Sentence::new(TALKER_LOCAL, "MTW")?;
    s.add_double_field(water_temperature.map(|k| k - 273.15), 1)?;
    s.add_str_field("C")?;
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_list(s: &Sentence) -> Vec<&str> {
        s.fields().collect()
    }

    #[test]
    fn test_checksum_known_sentence() {
        let mut s = Sentence::new("GP", "GLL").unwrap();
        for field in ["4916.45", "N", "12311.12", "W", "225444", "A", ""] {
            s.add_str_field(field).unwrap();
        }
        assert_eq!(s.to_string(), "$GPGLL,4916.45,N,12311.12,W,225444,A,*1D");
    }

    #[test]
    fn test_invalid_header() {
        assert!(Sentence::new("G", "GLL").is_none());
        assert!(Sentence::new("GP", "gll").is_none());
        assert!(Sentence::new("GP", "GLLX").is_none());
    }

    #[test]
    fn test_field_rejects_delimiters() {
        let mut s = Sentence::new("GP", "TXT").unwrap();
        assert!(s.add_str_field("a,b").is_none());
        assert!(s.add_str_field("a*b").is_none());
        assert_eq!(s.fields().count(), 0);
    }

    #[test]
    fn test_capacity_limit() {
        let mut s = Sentence::new("GP", "TXT").unwrap();
        let mut appended = 0;
        while s.add_str_field("123456789").is_some() {
            appended += 1;
        }
        assert_eq!(appended, 7);
        assert!(s.len() <= MAX_SENTENCE_LENGTH);
        assert!(s.to_string().len() + 2 <= MAX_SENTENCE_LENGTH);
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let mut s = Sentence::new("II", "HDG").unwrap();
        assert!(s.add_double_field(Some(f64::NAN), 1).is_none());
        assert!(build_mwv(Some(f64::INFINITY), true, Some(1.0)).is_none());
    }

    #[test]
    fn test_hdg() {
        let s = build_hdg(Some(90.0_f64.to_radians()), Some(0.0), Some((-3.5_f64).to_radians())).unwrap();
        assert_eq!(s.talker(), "II");
        assert_eq!(s.code(), "HDG");
        assert_eq!(field_list(&s), vec!["90.0", "0.0", "E", "3.5", "W"]);
    }

    #[test]
    fn test_not_available_fields_are_empty() {
        let s = build_hdg(None, Some(0.0), None).unwrap();
        assert_eq!(field_list(&s), vec!["", "0.0", "E", "", ""]);
    }

    #[test]
    fn test_dbx_selection() {
        assert_eq!(build_dbx(Some(10.0), Some(0.5)).unwrap().code(), "DBS");
        assert_eq!(build_dbx(Some(10.0), Some(-1.0)).unwrap().code(), "DBK");
        assert_eq!(build_dbx(Some(10.0), None).unwrap().code(), "DBT");
        let dbs = build_dbx(Some(10.0), Some(0.5)).unwrap();
        assert_eq!(field_list(&dbs)[2], "10.5");
    }

    #[test]
    fn test_rmc() {
        let fields = RmcFields {
            seconds_since_midnight: Some(45296.5),
            latitude: Some(43.5),
            longitude: Some(-10.25),
            cog: Some(180.0_f64.to_radians()),
            sog: Some(1852.0 / 3600.0 * 6.0),
            days_since_1970: Some(19000),
            variation: Some(2.0_f64.to_radians()),
        };
        let s = build_rmc(&fields).unwrap();
        assert_eq!(
            field_list(&s),
            vec!["123456.50", "A", "4330.0000", "N", "01015.0000", "W", "6.0", "180.0", "080122", "2.0", "E", "A"]
        );
    }

    #[test]
    fn test_lat_rounding_never_prints_sixty_minutes() {
        let mut s = Sentence::new("II", "GLL").unwrap();
        s.add_lat_field(Some(10.999999999)).unwrap();
        assert_eq!(field_list(&s), vec!["1100.0000", "N"]);
    }

    #[test]
    fn test_locally_synthesized_talker() {
        assert_eq!(build_vlw(Some(1852.0), Some(926.0)).unwrap().talker(), "GP");
        assert_eq!(build_rsa(Some(0.1)).unwrap().talker(), "GP");
        assert_eq!(build_mtw(Some(293.15)).unwrap().talker(), "GP");
        assert_eq!(build_mwd(Some(1.0), Some(5.0)).unwrap().talker(), "GP");
    }

    #[test]
    fn test_vlw_and_rsa_fields() {
        let vlw = build_vlw(Some(18520.0), Some(926.0)).unwrap();
        assert_eq!(field_list(&vlw), vec!["10.00", "N", "0.50", "N"]);
        let rsa = build_rsa(Some(10.0_f64.to_radians())).unwrap();
        assert_eq!(field_list(&rsa), vec!["10.0", "A", "0.0", "A"]);
        let mtw = build_mtw(Some(293.15)).unwrap();
        assert_eq!(field_list(&mtw), vec!["20.0", "C"]);
    }

    #[test]
    fn test_display_has_valid_checksum() {
        let s = build_vtg(Some(1.0), Some(0.9), Some(3.0)).unwrap();
        let text = s.to_string();
        let (body, checksum) = text[1..].split_once('*').unwrap();
        let expected = body.bytes().fold(0u8, |acc, b| acc ^ b);
        assert_eq!(checksum, format!("{:02X}", expected));
    }

    #[test]
    fn test_time_field_stays_within_the_day() {
        let mut s = Sentence::new("GP", "ZDA").unwrap();
        assert!(s.add_time_field(Some(86400.0)).is_none());
        assert!(s.add_time_field(Some(86400.5)).is_none());
        assert!(s.add_time_field(Some(-0.5)).is_none());
        s.add_time_field(Some(86399.999)).unwrap();
        s.add_time_field(Some(0.0)).unwrap();
        assert_eq!(field_list(&s), vec!["235959.99", "000000.00"]);
    }

    #[test]
    fn test_mwd_fields() {
        let s = build_mwd(Some(90.0_f64.to_radians()), Some(5.0)).unwrap();
        assert!(s.to_string().starts_with("$GPMWD,"));
        assert_eq!(field_list(&s), vec!["90.0", "T", "90.0", "M", "9.7", "N", "5.0", "M"]);

        let s = build_mwd(None, None).unwrap();
        assert_eq!(field_list(&s), vec!["", "T", "", "M", "", "N", "", "M"]);
    }

    #[test]
    fn test_vhw_fields() {
        let s = build_vhw(Some(100.0_f64.to_radians()), Some(93.0_f64.to_radians()), Some(6.0 * 1852.0 / 3600.0)).unwrap();
        assert_eq!(field_list(&s), vec!["100.0", "T", "93.0", "M", "6.0", "N", "11.1", "K"]);

        let s = build_vhw(None, None, Some(0.0)).unwrap();
        assert_eq!(field_list(&s), vec!["", "T", "", "M", "0.0", "N", "0.0", "K"]);
    }

    #[test]
    fn test_dpt_fields() {
        let s = build_dpt(Some(12.34), Some(-0.5)).unwrap();
        assert_eq!(field_list(&s), vec!["12.3", "-0.5"]);

        let s = build_dpt(None, None).unwrap();
        assert_eq!(field_list(&s), vec!["", ""]);
    }

    #[test]
    fn test_mwv_fields() {
        let s = build_mwv(Some(45.0_f64.to_radians()), true, Some(7.0)).unwrap();
        assert_eq!(field_list(&s), vec!["45.0", "R", "7.0", "M", "A"]);

        let s = build_mwv(Some(-90.0_f64.to_radians()), false, Some(3.0)).unwrap();
        assert_eq!(field_list(&s), vec!["270.0", "T", "3.0", "M", "A"]);

        let s = build_mwv(None, false, Some(3.0)).unwrap();
        assert_eq!(field_list(&s), vec!["", "T", "3.0", "M", "V"]);
    }
}
