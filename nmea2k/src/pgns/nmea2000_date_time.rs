use super::fields::{u16_raw, u32_scaled};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct N2kDateTime {
    pub date: Option<u16>, // days since 1970-01-01
    pub time: Option<f64>, // seconds since midnight
}

impl N2kDateTime {
    pub fn new(date: Option<u16>, time: Option<f64>) -> Self {
        Self { date, time }
    }

    /// Read the 2 byte date and 4 byte time (0.0001 s resolution) pair at `offset`.
    pub fn from_bytes(data: &[u8], offset: usize) -> Self {
        Self {
            date: u16_raw(data, offset),
            time: u32_scaled(data, offset + 2, 0.0001),
        }
    }
}
