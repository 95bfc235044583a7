use std::fmt;

use super::fields::i16_scaled;

#[derive(Debug, Clone)]
pub struct Rudder {
    #[allow(dead_code)]
    pub pgn: u32,
    pub instance: u8,
    pub direction_order: RudderDirectionOrder,
    pub angle_order: Option<f64>, // radians
    pub position: Option<f64>,    // radians, positive to starboard
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RudderDirectionOrder {
    NoOrder,
    MoveToStarboard,
    MoveToPort,
    Unavailable,
}

impl Rudder {
    pub fn new(instance: u8, position: Option<f64>) -> Self {
        Self {
            pgn: 127245,
            instance,
            direction_order: RudderDirectionOrder::NoOrder,
            angle_order: None,
            position,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 6 {
            return None;
        }
        Some(Self {
            pgn: 127245,
            instance: data[0],
            direction_order: match data[1] & 0x07 {
                0 => RudderDirectionOrder::NoOrder,
                1 => RudderDirectionOrder::MoveToStarboard,
                2 => RudderDirectionOrder::MoveToPort,
                _ => RudderDirectionOrder::Unavailable,
            },
            angle_order: i16_scaled(data, 2, 0.0001),
            position: i16_scaled(data, 4, 0.0001),
        })
    }
}

impl fmt::Display for Rudder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.position {
            Some(p) => write!(f, "      Rudder #{}: {:.1}°", self.instance, p.to_degrees()),
            None => write!(f, "      Rudder #{}: N/A", self.instance),
        }
    }
}
