use std::fmt;

use super::fields::u16_scaled;

#[derive(Debug, Clone)]
pub struct WindData {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub speed: Option<f64>, // m/s
    pub angle: Option<f64>, // radians
    pub reference: WindReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindReference {
    TrueGroundNorth,
    Magnetic,
    Apparent,
    TrueBoat,
    TrueWater,
    /// Reserved or not available reference codes (5..=7)
    Unavailable(u8),
}

impl WindData {
    pub fn new(speed: Option<f64>, angle: Option<f64>, reference: WindReference) -> Self {
        Self {
            pgn: 130306,
            sid: 0,
            speed,
            angle,
            reference,
        }
    }

    pub fn new_apparent(speed: f64, angle: f64) -> Self {
        Self::new(Some(speed), Some(angle), WindReference::Apparent)
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 6 {
            return None;
        }
        Some(Self {
            pgn: 130306,
            sid: data[0],
            speed: u16_scaled(data, 1, 0.01),
            angle: u16_scaled(data, 3, 0.0001),
            reference: match data[5] & 0x07 {
                0 => WindReference::TrueGroundNorth,
                1 => WindReference::Magnetic,
                2 => WindReference::Apparent,
                3 => WindReference::TrueBoat,
                4 => WindReference::TrueWater,
                other => WindReference::Unavailable(other),
            },
        })
    }

    pub fn is_apparent(&self) -> bool {
        self.reference == WindReference::Apparent
    }
}

impl fmt::Display for WindData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.speed, self.angle) {
            (Some(speed), Some(angle)) => write!(
                f,
                "      Wind Speed: {:.2} m/s ({:.2} knots) | Angle: {:.2}° | Ref: {:?}",
                speed,
                speed * 1.94384,
                angle.to_degrees(),
                self.reference
            ),
            _ => write!(f, "      Wind: N/A | Ref: {:?}", self.reference),
        }
    }
}
