use std::fmt;

use super::fields::{i16_scaled, i64_scaled, u8_raw};
use super::nmea2000_date_time::N2kDateTime;

#[derive(Debug, Clone)]
pub struct GnssPositionData {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub date_time: N2kDateTime,
    pub latitude: Option<f64>,  // degrees
    pub longitude: Option<f64>, // degrees
    pub altitude: Option<f64>,  // meters
    pub gnss_type: GnssType,
    pub method: GnssMethod,
    pub num_svs: Option<u8>,
    pub hdop: Option<f64>,
    pub pdop: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GnssType {
    Gps,
    Glonass,
    GpsGlonass,
    GpsSbasWaas,
    GpsSbasWaasDglonass,
    Chayka,
    Integrated,
    Surveyed,
    Galileo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GnssMethod {
    NoGnss,
    GnssFix,
    DGnss,
    PreciseGnss,
    RtkFixed,
    RtkFloat,
}

impl GnssPositionData {
    pub fn new(
        date_time: N2kDateTime,
        latitude: Option<f64>,
        longitude: Option<f64>,
        altitude: Option<f64>,
    ) -> Self {
        Self {
            pgn: 129029,
            sid: 0,
            date_time,
            latitude,
            longitude,
            altitude,
            gnss_type: GnssType::Gps,
            method: GnssMethod::GnssFix,
            num_svs: None,
            hdop: None,
            pdop: None,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 38 {
            return None;
        }
        Some(Self {
            pgn: 129029,
            sid: data[0],
            date_time: N2kDateTime::from_bytes(data, 1),
            latitude: i64_scaled(data, 7, 1e-16),
            longitude: i64_scaled(data, 15, 1e-16),
            altitude: i64_scaled(data, 23, 1e-6),
            gnss_type: match data[31] & 0x0F {
                0 => GnssType::Gps,
                1 => GnssType::Glonass,
                2 => GnssType::GpsGlonass,
                3 => GnssType::GpsSbasWaas,
                4 => GnssType::GpsSbasWaasDglonass,
                5 => GnssType::Chayka,
                6 => GnssType::Integrated,
                7 => GnssType::Surveyed,
                8 => GnssType::Galileo,
                _ => GnssType::Gps,
            },
            method: match (data[31] >> 4) & 0x0F {
                1 => GnssMethod::GnssFix,
                2 => GnssMethod::DGnss,
                3 => GnssMethod::PreciseGnss,
                4 => GnssMethod::RtkFixed,
                5 => GnssMethod::RtkFloat,
                _ => GnssMethod::NoGnss,
            },
            num_svs: u8_raw(data, 33),
            hdop: i16_scaled(data, 34, 0.01),
            pdop: i16_scaled(data, 36, 0.01),
        })
    }
}

impl fmt::Display for GnssPositionData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => write!(f, "      Position: {:.6}°, {:.6}°", lat, lon)?,
            _ => write!(f, "      Position: N/A")?,
        }
        write!(f, " Type: {:?} Method: {:?}", self.gnss_type, self.method)?;
        if let Some(n) = self.num_svs {
            write!(f, " Satellites: {}", n)?;
        }
        if let Some(hdop) = self.hdop {
            write!(f, " HDOP: {:.2}", hdop)?;
        }
        Ok(())
    }
}
