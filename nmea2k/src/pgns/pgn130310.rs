use std::fmt;

use super::fields::u16_scaled;

/// Environmental parameters (outside): water and air temperature plus pressure.
#[derive(Debug, Clone)]
pub struct EnvironmentalParameters {
    #[allow(dead_code)]
    pub pgn: u32,
    #[allow(dead_code)]
    sid: u8,
    pub water_temperature: Option<f64>,   // Kelvin
    pub outside_temperature: Option<f64>, // Kelvin
    pub atmospheric_pressure: Option<f64>, // Pascals
}

impl EnvironmentalParameters {
    pub fn new(water_temperature: Option<f64>) -> Self {
        Self {
            pgn: 130310,
            sid: 0,
            water_temperature,
            outside_temperature: None,
            atmospheric_pressure: None,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }
        Some(Self {
            pgn: 130310,
            sid: data[0],
            water_temperature: u16_scaled(data, 1, 0.01),
            outside_temperature: u16_scaled(data, 3, 0.01),
            atmospheric_pressure: u16_scaled(data, 5, 100.0),
        })
    }
}

impl fmt::Display for EnvironmentalParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.water_temperature {
            Some(t) => write!(f, "      Water Temp: {:.2}°C", t - 273.15)?,
            None => write!(f, "      Water Temp: N/A")?,
        }
        if let Some(t) = self.outside_temperature {
            write!(f, " | Air Temp: {:.2}°C", t - 273.15)?;
        }
        if let Some(p) = self.atmospheric_pressure {
            write!(f, " | Pressure: {:.0} Pa", p)?;
        }
        Ok(())
    }
}
