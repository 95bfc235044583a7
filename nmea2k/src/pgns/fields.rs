//! Little-endian field readers that map the NMEA2000 "data not available"
//! raw values to `None`.
//!
//! NMEA2000 reserves the top of each integer range: the maximum value means
//! "not available" and, for unsigned fields, the value just below it means
//! "out of range". Both are reported as `None`.

pub fn u8_raw(data: &[u8], offset: usize) -> Option<u8> {
    match *data.get(offset)? {
        0xFF | 0xFE => None,
        v => Some(v),
    }
}

pub fn u16_scaled(data: &[u8], offset: usize, scale: f64) -> Option<f64> {
    let bytes = data.get(offset..offset + 2)?;
    match u16::from_le_bytes([bytes[0], bytes[1]]) {
        0xFFFF | 0xFFFE => None,
        v => Some(v as f64 * scale),
    }
}

pub fn i16_scaled(data: &[u8], offset: usize, scale: f64) -> Option<f64> {
    let bytes = data.get(offset..offset + 2)?;
    match i16::from_le_bytes([bytes[0], bytes[1]]) {
        0x7FFF | 0x7FFE => None,
        v => Some(v as f64 * scale),
    }
}

pub fn u16_raw(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    match u16::from_le_bytes([bytes[0], bytes[1]]) {
        0xFFFF | 0xFFFE => None,
        v => Some(v),
    }
}

pub fn u32_scaled(data: &[u8], offset: usize, scale: f64) -> Option<f64> {
    let bytes = data.get(offset..offset + 4)?;
    match u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) {
        0xFFFF_FFFF | 0xFFFF_FFFE => None,
        v => Some(v as f64 * scale),
    }
}

pub fn i32_scaled(data: &[u8], offset: usize, scale: f64) -> Option<f64> {
    let bytes = data.get(offset..offset + 4)?;
    match i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) {
        0x7FFF_FFFF | 0x7FFF_FFFE => None,
        v => Some(v as f64 * scale),
    }
}

pub fn i64_scaled(data: &[u8], offset: usize, scale: f64) -> Option<f64> {
    let bytes: [u8; 8] = data.get(offset..offset + 8)?.try_into().ok()?;
    match i64::from_le_bytes(bytes) {
        0x7FFF_FFFF_FFFF_FFFF | 0x7FFF_FFFF_FFFF_FFFE => None,
        v => Some(v as f64 * scale),
    }
}
