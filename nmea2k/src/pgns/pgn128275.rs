use std::fmt;

use super::fields::u32_scaled;
use super::nmea2000_date_time::N2kDateTime;

/// Distance log, a fast packet PGN carrying the odometer readings.
#[derive(Debug, Clone)]
pub struct DistanceLog {
    #[allow(dead_code)]
    pub pgn: u32,
    pub date_time: N2kDateTime,
    pub log: Option<f64>,      // meters
    pub trip_log: Option<f64>, // meters
}

impl DistanceLog {
    pub fn new(log: Option<f64>, trip_log: Option<f64>) -> Self {
        Self {
            pgn: 128275,
            date_time: N2kDateTime::new(None, None),
            log,
            trip_log,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 14 {
            return None;
        }
        Some(Self {
            pgn: 128275,
            date_time: N2kDateTime::from_bytes(data, 0),
            log: u32_scaled(data, 6, 1.0),
            trip_log: u32_scaled(data, 10, 1.0),
        })
    }
}

impl fmt::Display for DistanceLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "      Log: ")?;
        match self.log {
            Some(log) => write!(f, "{:.2} NM", log / 1852.0)?,
            None => write!(f, "N/A")?,
        }
        write!(f, " | Trip: ")?;
        match self.trip_log {
            Some(trip) => write!(f, "{:.2} NM", trip / 1852.0),
            None => write!(f, "N/A"),
        }
    }
}
