use std::fmt;

use super::fields::{i16_scaled, u32_scaled, u8_raw};

#[derive(Debug, Clone)]
pub struct WaterDepth {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub depth: Option<f64>,  // meters below transducer
    pub offset: Option<f64>, // meters, positive = transducer to waterline, negative = to keel
    pub range: Option<f64>,  // meters
}

impl WaterDepth {
    pub fn new(depth: Option<f64>, offset: Option<f64>) -> Self {
        Self {
            pgn: 128267,
            sid: 0,
            depth,
            offset,
            range: None,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 7 {
            return None;
        }
        Some(Self {
            pgn: 128267,
            sid: data[0],
            depth: u32_scaled(data, 1, 0.01),
            offset: i16_scaled(data, 5, 0.001),
            range: u8_raw(data, 7).map(|r| r as f64 * 10.0),
        })
    }
}

impl fmt::Display for WaterDepth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.depth, self.offset) {
            (Some(depth), Some(offset)) => write!(f, "      Depth: {:.2} m | Offset: {:.3} m", depth, offset),
            (Some(depth), None) => write!(f, "      Depth: {:.2} m", depth),
            _ => write!(f, "      Depth: N/A"),
        }
    }
}
