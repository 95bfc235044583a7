use std::fmt;

use super::fields::i32_scaled;

#[derive(Debug, Clone)]
pub struct PositionRapidUpdate {
    pub pgn: u32,
    pub latitude: Option<f64>,  // degrees
    pub longitude: Option<f64>, // degrees
}

impl PositionRapidUpdate {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            pgn: 129025,
            latitude,
            longitude,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        Some(Self {
            pgn: 129025,
            latitude: i32_scaled(data, 0, 1e-7),
            longitude: i32_scaled(data, 4, 1e-7),
        })
    }
}

impl fmt::Display for PositionRapidUpdate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => write!(f, "      Position: {:.6}° N, {:.6}° E", lat, lon),
            _ => write!(f, "      Position: N/A"),
        }
    }
}
