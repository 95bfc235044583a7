use std::fmt;

use super::fields::{i16_scaled, u16_raw};

#[derive(Debug, Clone)]
pub struct MagneticVariation {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub source: VariationSource,
    pub days_since_1970: Option<u16>,
    pub variation: Option<f64>, // radians, east positive
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationSource {
    Manual,
    Chart,
    Table,
    Calc,
    Wmm2000,
    Wmm2005,
    Wmm2010,
    Wmm2015,
    Wmm2020,
    Unknown(u8),
}

impl MagneticVariation {
    pub fn new(variation: Option<f64>) -> Self {
        Self {
            pgn: 127258,
            sid: 0,
            source: VariationSource::Manual,
            days_since_1970: None,
            variation,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 6 {
            return None;
        }
        Some(Self {
            pgn: 127258,
            sid: data[0],
            source: match data[1] & 0x0F {
                0 => VariationSource::Manual,
                1 => VariationSource::Chart,
                2 => VariationSource::Table,
                3 => VariationSource::Calc,
                4 => VariationSource::Wmm2000,
                5 => VariationSource::Wmm2005,
                6 => VariationSource::Wmm2010,
                7 => VariationSource::Wmm2015,
                8 => VariationSource::Wmm2020,
                other => VariationSource::Unknown(other),
            },
            days_since_1970: u16_raw(data, 2),
            variation: i16_scaled(data, 4, 0.0001),
        })
    }
}

impl fmt::Display for MagneticVariation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.variation {
            Some(v) => write!(f, "      Variation: {:.2}° ({:?})", v.to_degrees(), self.source),
            None => write!(f, "      Variation: N/A ({:?})", self.source),
        }
    }
}
