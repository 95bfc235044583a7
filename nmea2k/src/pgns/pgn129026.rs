use std::fmt;

use super::fields::u16_scaled;
use super::pgn127250::HeadingReference;

#[derive(Debug, Clone)]
pub struct CogSogRapidUpdate {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub cog_reference: HeadingReference,
    pub cog: Option<f64>, // radians
    pub sog: Option<f64>, // m/s
}

impl CogSogRapidUpdate {
    pub fn new(cog_reference: HeadingReference, cog: Option<f64>, sog: Option<f64>) -> Self {
        Self {
            pgn: 129026,
            sid: 0,
            cog_reference,
            cog,
            sog,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 6 {
            return None;
        }
        Some(Self {
            pgn: 129026,
            sid: data[0],
            cog_reference: HeadingReference::from_bits(data[1]),
            cog: u16_scaled(data, 2, 0.0001),
            sog: u16_scaled(data, 4, 0.01),
        })
    }
}

impl fmt::Display for CogSogRapidUpdate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.cog, self.sog) {
            (Some(cog), Some(sog)) => write!(
                f,
                "      COG: {:.2}° ({:?}) | SOG: {:.2} m/s ({:.2} knots)",
                cog.to_degrees(),
                self.cog_reference,
                sog,
                sog * 1.94384
            ),
            _ => write!(f, "      COG/SOG: N/A"),
        }
    }
}
