use std::fmt;

use super::fields::u16_scaled;

#[derive(Debug, Clone)]
pub struct SpeedWaterReferenced {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub water_referenced: Option<f64>, // m/s
    pub ground_referenced: Option<f64>, // m/s
    pub reference_type: u8,
}

impl SpeedWaterReferenced {
    pub fn new(water_referenced: Option<f64>) -> Self {
        Self {
            pgn: 128259,
            sid: 0,
            water_referenced,
            ground_referenced: None,
            reference_type: 0,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }
        Some(Self {
            pgn: 128259,
            sid: data[0],
            water_referenced: u16_scaled(data, 1, 0.01),
            ground_referenced: u16_scaled(data, 3, 0.01),
            reference_type: data.get(5).copied().unwrap_or(0xFF),
        })
    }
}

impl fmt::Display for SpeedWaterReferenced {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.water_referenced {
            Some(speed) => write!(f, "      Speed: {:.2} m/s ({:.2} knots)", speed, speed * 1.94384),
            None => write!(f, "      Speed: N/A"),
        }
    }
}
