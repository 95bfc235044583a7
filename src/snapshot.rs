use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::SensorState;
use crate::units::{KNOTS_PER_MS, kelvin_to_celsius, meters_to_scaled_nm, ms_to_knots, rad_to_deg};

const SECONDS_PER_DAY: i64 = 86_400;

/// Boat state in display units: degrees, knots, nautical miles and Celsius.
///
/// Built fresh on every publish; `None` means not available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoatDataSnapshot {
    pub heading: Option<f64>,
    pub variation: Option<f64>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub stw: Option<f64>,
    pub aws: Option<f64>,
    pub tws: Option<f64>,
    pub max_aws: f64,
    pub max_tws: f64,
    pub awa: Option<f64>,
    pub twa: Option<f64>,
    pub awd: Option<f64>,
    pub twd: Option<f64>,
    pub trip_log: Option<f64>,
    pub log: Option<f64>,
    pub rudder_position: Option<f64>,
    pub water_temperature: Option<f64>,
    pub water_depth: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub gps_time: Option<f64>,
    pub days_since_1970: Option<u16>,
}

impl BoatDataSnapshot {
    /// Convert the internal SI state. Odometer values are divided by
    /// `log_meters_per_mile`.
    pub fn from_state(state: &SensorState, log_meters_per_mile: f64) -> Self {
        Self {
            heading: rad_to_deg(state.heading),
            variation: rad_to_deg(state.variation),
            cog: rad_to_deg(state.cog),
            sog: ms_to_knots(state.sog),
            stw: ms_to_knots(state.stw),
            aws: ms_to_knots(state.aws),
            tws: ms_to_knots(state.tws),
            max_aws: state.max_aws * KNOTS_PER_MS,
            max_tws: state.max_tws * KNOTS_PER_MS,
            awa: rad_to_deg(state.awa),
            twa: rad_to_deg(state.twa),
            awd: rad_to_deg(state.awd),
            twd: rad_to_deg(state.twd),
            trip_log: meters_to_scaled_nm(state.trip_log, log_meters_per_mile),
            log: meters_to_scaled_nm(state.log, log_meters_per_mile),
            rudder_position: rad_to_deg(state.rudder_position),
            water_temperature: kelvin_to_celsius(state.water_temperature),
            water_depth: state.water_depth,
            latitude: state.latitude,
            longitude: state.longitude,
            altitude: state.altitude,
            gps_time: state.seconds_since_midnight,
            days_since_1970: state.days_since_1970,
        }
    }

    /// Whole seconds since the Unix epoch, or 0 when the date or the time
    /// of day is not available.
    pub fn epoch_seconds(&self) -> i64 {
        match (self.days_since_1970, self.gps_time) {
            (Some(days), Some(seconds)) if seconds.is_finite() => days as i64 * SECONDS_PER_DAY + seconds.floor() as i64,
            _ => 0,
        }
    }

    pub fn utc(&self) -> Option<DateTime<Utc>> {
        let days = self.days_since_1970?;
        let seconds = self.gps_time?;
        if !seconds.is_finite() {
            return None;
        }
        let millis = days as i64 * SECONDS_PER_DAY * 1000 + (seconds * 1000.0).round() as i64;
        DateTime::from_timestamp_millis(millis)
    }
}
