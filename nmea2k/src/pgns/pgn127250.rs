use std::fmt;

use super::fields::{i16_scaled, u16_scaled};

#[derive(Debug, Clone)]
pub struct VesselHeading {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub heading: Option<f64>, // radians
    pub deviation: Option<f64>,
    pub variation: Option<f64>,
    pub reference: HeadingReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingReference {
    True,
    Magnetic,
    Error,
    Null,
}

impl HeadingReference {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => HeadingReference::True,
            1 => HeadingReference::Magnetic,
            2 => HeadingReference::Error,
            _ => HeadingReference::Null,
        }
    }
}

impl VesselHeading {
    pub fn new(heading: Option<f64>, variation: Option<f64>, reference: HeadingReference) -> Self {
        Self {
            pgn: 127250,
            sid: 0,
            heading,
            deviation: None,
            variation,
            reference,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        Some(Self {
            pgn: 127250,
            sid: data[0],
            heading: u16_scaled(data, 1, 0.0001),
            deviation: i16_scaled(data, 3, 0.0001),
            variation: i16_scaled(data, 5, 0.0001),
            reference: HeadingReference::from_bits(data[7]),
        })
    }
}

impl fmt::Display for VesselHeading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.heading {
            Some(h) => write!(f, "      Heading: {:.2}° ({:?})", h.to_degrees(), self.reference)?,
            None => write!(f, "      Heading: N/A ({:?})", self.reference)?,
        }
        if let Some(dev) = self.deviation {
            write!(f, " | Deviation: {:.2}°", dev.to_degrees())?;
        }
        if let Some(var) = self.variation {
            write!(f, " | Variation: {:.2}°", var.to_degrees())?;
        }
        Ok(())
    }
}
