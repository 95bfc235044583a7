use nmea2k::N2kMessage;
use nmea2k::pgns::{
    CogSogRapidUpdate, DistanceLog, EnvironmentalParameters, GnssPositionData, HeadingReference, MagneticVariation,
    PositionRapidUpdate, Rudder, SpeedWaterReferenced, VesselHeading, WaterDepth, WindData,
};
use tracing::trace;

use crate::emitter::SentenceEmitter;
use crate::staleness::StalenessMonitor;
use crate::state::{FieldGroup, SensorState};
use crate::units::normalize_radians;
use crate::wind::{WindResolver, wind_direction_deg};

/// Which handler, if any, a message was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled(u32),
    Ignored,
}

/// Routes every decoded NMEA2000 message to exactly one handler.
///
/// Handlers update the sensor state, refresh the staleness timer of the
/// field group they wrote and emit the matching NMEA0183 sentences.
pub struct MessageRouter<'a> {
    state: &'a mut SensorState,
    staleness: &'a mut StalenessMonitor,
    wind: &'a mut WindResolver,
    emitter: &'a mut SentenceEmitter,
}

impl<'a> MessageRouter<'a> {
    pub fn new(
        state: &'a mut SensorState,
        staleness: &'a mut StalenessMonitor,
        wind: &'a mut WindResolver,
        emitter: &'a mut SentenceEmitter,
    ) -> Self {
        Self {
            state,
            staleness,
            wind,
            emitter,
        }
    }

    pub fn dispatch(&mut self, message: &N2kMessage, now_ms: u32) -> Dispatch {
        match message {
            N2kMessage::VesselHeading(heading) => self.handle_heading(heading, now_ms),
            N2kMessage::MagneticVariation(variation) => self.handle_variation(variation),
            N2kMessage::SpeedWaterReferenced(speed) => self.handle_boat_speed(speed),
            N2kMessage::WaterDepth(depth) => self.handle_depth(depth),
            N2kMessage::PositionRapidUpdate(position) => self.handle_position(position, now_ms),
            N2kMessage::CogSogRapidUpdate(cog_sog) => self.handle_cog_sog(cog_sog, now_ms),
            N2kMessage::GnssPositionData(gnss) => self.handle_gnss(gnss, now_ms),
            N2kMessage::WindData(wind) => self.handle_wind(wind, now_ms),
            N2kMessage::DistanceLog(log) => self.handle_distance_log(log),
            N2kMessage::Rudder(rudder) => self.handle_rudder(rudder),
            N2kMessage::EnvironmentalParameters(env) => self.handle_water_temperature(env),
            N2kMessage::Unknown(pgn, _) => {
                trace!("Ignoring PGN {}", pgn);
                return Dispatch::Ignored;
            }
        }
        Dispatch::Handled(message.pgn())
    }

    fn handle_heading(&mut self, msg: &VesselHeading, now_ms: u32) {
        if msg.reference == HeadingReference::Magnetic {
            if msg.variation.is_some() {
                self.state.variation = msg.variation;
            }
            self.state.heading = msg.heading.zip(self.state.variation).map(|(h, v)| normalize_radians(h + v));
        } else {
            self.state.heading = msg.heading;
        }
        self.staleness.mark_updated(FieldGroup::Heading, now_ms);
        self.emitter.emit_heading(self.state);
    }

    fn handle_variation(&mut self, msg: &MagneticVariation) {
        if msg.variation.is_some() {
            self.state.variation = msg.variation;
        }
    }

    fn handle_boat_speed(&mut self, msg: &SpeedWaterReferenced) {
        self.state.stw = msg.water_referenced;
        self.emitter.emit_boat_speed(self.state);
    }

    fn handle_depth(&mut self, msg: &WaterDepth) {
        self.state.water_depth = msg.depth.map(|d| d + msg.offset.unwrap_or(0.0));
        self.emitter.emit_depth(msg.depth, msg.offset);
    }

    fn handle_position(&mut self, msg: &PositionRapidUpdate, now_ms: u32) {
        self.state.latitude = msg.latitude;
        self.state.longitude = msg.longitude;
        self.staleness.mark_updated(FieldGroup::Position, now_ms);
    }

    fn handle_cog_sog(&mut self, msg: &CogSogRapidUpdate, now_ms: u32) {
        let variation = self.state.variation;
        let (true_cog, magnetic_cog) = match msg.cog_reference {
            HeadingReference::Magnetic => (msg.cog.zip(variation).map(|(c, v)| normalize_radians(c + v)), msg.cog),
            _ => (msg.cog, msg.cog.zip(variation).map(|(c, v)| normalize_radians(c - v))),
        };
        self.state.cog = true_cog;
        self.state.sog = msg.sog;
        self.staleness.mark_updated(FieldGroup::CogSog, now_ms);
        self.emitter.emit_cog_sog(self.state, magnetic_cog);
    }

    fn handle_gnss(&mut self, msg: &GnssPositionData, now_ms: u32) {
        self.state.days_since_1970 = msg.date_time.date;
        self.state.seconds_since_midnight = msg.date_time.time;
        self.state.latitude = msg.latitude;
        self.state.longitude = msg.longitude;
        self.state.altitude = msg.altitude;
        self.staleness.mark_updated(FieldGroup::Position, now_ms);
    }

    fn handle_wind(&mut self, msg: &WindData, now_ms: u32) {
        self.staleness.mark_updated(FieldGroup::Wind, now_ms);

        if !msg.is_apparent() {
            self.emitter.emit_wind(msg.angle, false, msg.speed);
            return;
        }

        self.state.awa = msg.angle;
        self.state.aws = msg.speed;
        if let Some(aws) = msg.speed {
            self.wind.record_apparent(aws);
        }
        self.state.max_aws = self.wind.max_aws();
        self.emitter.emit_wind(self.state.awa, true, self.state.aws);

        let Some(true_wind) = self.wind.resolve(self.state.aws, self.state.awa, self.state.sog) else {
            return;
        };
        let heading = self.state.heading;
        self.state.tws = Some(true_wind.speed);
        self.state.twa = Some(true_wind.angle_rad());
        self.state.awd = self
            .state
            .awa
            .zip(heading)
            .map(|(awa, hdg)| wind_direction_deg(awa, hdg).to_radians());
        self.state.twd = heading.map(|hdg| wind_direction_deg(true_wind.angle_rad(), hdg).to_radians());
        self.state.max_tws = self.wind.max_tws();
        self.emitter.emit_true_wind(self.state);
    }

    fn handle_distance_log(&mut self, msg: &DistanceLog) {
        self.state.log = msg.log;
        self.state.trip_log = msg.trip_log;
        self.emitter.emit_log(self.state);
    }

    fn handle_rudder(&mut self, msg: &Rudder) {
        if msg.instance != 0 {
            trace!("Ignoring rudder instance {}", msg.instance);
            return;
        }
        self.state.rudder_position = msg.position;
        self.emitter.emit_rudder(self.state);
    }

    fn handle_water_temperature(&mut self, msg: &EnvironmentalParameters) {
        self.state.water_temperature = msg.water_temperature;
        self.emitter.emit_water_temperature(self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StalenessConfig;
    use crate::emitter::tests::recording_listener;
    use crate::staleness::Freshness;
    use approx::assert_abs_diff_eq;
    use nmea2k::pgns::{N2kDateTime, WindReference};
    use std::cell::RefCell;
    use std::rc::Rc;

    const KNOT: f64 = 1852.0 / 3600.0;

    struct Fixture {
        state: SensorState,
        staleness: StalenessMonitor,
        wind: WindResolver,
        emitter: SentenceEmitter,
        sent: Rc<RefCell<Vec<String>>>,
    }

    impl Fixture {
        fn new() -> Self {
            let (sent, listener) = recording_listener();
            Self {
                state: SensorState::new(0.0),
                staleness: StalenessMonitor::new(&StalenessConfig::default()),
                wind: WindResolver::new(),
                emitter: SentenceEmitter::new(1000, vec![listener]),
                sent,
            }
        }

        fn dispatch(&mut self, message: N2kMessage, now_ms: u32) -> Dispatch {
            MessageRouter::new(&mut self.state, &mut self.staleness, &mut self.wind, &mut self.emitter)
                .dispatch(&message, now_ms)
        }

        fn codes(&self) -> Vec<String> {
            self.sent.borrow().iter().map(|s| s[1..6].to_string()).collect()
        }
    }

    #[test]
    fn test_heading_dispatch_is_exclusive() {
        let mut fx = Fixture::new();
        let before = fx.state.clone();
        let heading = VesselHeading::new(Some(1.0), None, HeadingReference::True);
        assert_eq!(fx.dispatch(N2kMessage::VesselHeading(heading), 10), Dispatch::Handled(127250));
        assert_eq!(fx.codes(), vec!["IIHDG"]);

        let mut expected = before;
        expected.heading = Some(1.0);
        assert_eq!(fx.state, expected);
        assert_eq!(fx.staleness.freshness(FieldGroup::Heading), Freshness::Fresh);
        assert_eq!(fx.staleness.freshness(FieldGroup::Wind), Freshness::Stale);
    }

    #[test]
    fn test_magnetic_heading_uses_message_variation() {
        let mut fx = Fixture::new();
        let heading = VesselHeading::new(Some(1.0), Some(0.1), HeadingReference::Magnetic);
        fx.dispatch(N2kMessage::VesselHeading(heading), 0);
        assert_abs_diff_eq!(fx.state.variation.unwrap(), 0.1);
        assert_abs_diff_eq!(fx.state.heading.unwrap(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_magnetic_heading_wraps_past_north() {
        let mut fx = Fixture::new();
        fx.state.variation = Some(7.0_f64.to_radians());
        let heading = VesselHeading::new(Some(359.0_f64.to_radians()), None, HeadingReference::Magnetic);
        fx.dispatch(N2kMessage::VesselHeading(heading), 0);
        assert_abs_diff_eq!(fx.state.heading.unwrap().to_degrees(), 6.0, epsilon = 1e-9);
        assert!(fx.sent.borrow()[0].starts_with("$IIHDG,6.0,0.0,E,7.0,E*"));
    }

    #[test]
    fn test_magnetic_cog_wraps_past_north() {
        let mut fx = Fixture::new();
        fx.state.variation = Some(7.0_f64.to_radians());
        let cog_sog = CogSogRapidUpdate::new(HeadingReference::Magnetic, Some(359.0_f64.to_radians()), Some(2.0));
        fx.dispatch(N2kMessage::CogSogRapidUpdate(cog_sog), 0);
        assert_abs_diff_eq!(fx.state.cog.unwrap().to_degrees(), 6.0, epsilon = 1e-9);

        let cog_sog = CogSogRapidUpdate::new(HeadingReference::True, Some(2.0_f64.to_radians()), Some(2.0));
        fx.dispatch(N2kMessage::CogSogRapidUpdate(cog_sog), 0);
        let fields: Vec<String> = fx.sent.borrow()[1].split(',').map(str::to_string).collect();
        assert_eq!(fields[3], "355.0");
    }

    #[test]
    fn test_variation_emits_nothing() {
        let mut fx = Fixture::new();
        let variation = MagneticVariation::new(Some(-0.05));
        assert_eq!(fx.dispatch(N2kMessage::MagneticVariation(variation), 0), Dispatch::Handled(127258));
        assert_eq!(fx.state.variation, Some(-0.05));
        assert!(fx.codes().is_empty());

        fx.dispatch(N2kMessage::MagneticVariation(MagneticVariation::new(None)), 0);
        assert_eq!(fx.state.variation, Some(-0.05));
    }

    #[test]
    fn test_boat_speed_emits_vhw() {
        let mut fx = Fixture::new();
        fx.dispatch(N2kMessage::SpeedWaterReferenced(SpeedWaterReferenced::new(Some(3.0))), 0);
        assert_eq!(fx.state.stw, Some(3.0));
        assert_eq!(fx.codes(), vec!["IIVHW"]);
    }

    #[test]
    fn test_depth_emits_dpt_then_dbx() {
        let mut fx = Fixture::new();
        fx.dispatch(N2kMessage::WaterDepth(WaterDepth::new(Some(10.0), Some(-1.5))), 0);
        assert_abs_diff_eq!(fx.state.water_depth.unwrap(), 8.5);
        assert_eq!(fx.codes(), vec!["IIDPT", "IIDBK"]);

        fx.dispatch(N2kMessage::WaterDepth(WaterDepth::new(Some(10.0), None)), 0);
        assert_abs_diff_eq!(fx.state.water_depth.unwrap(), 10.0);
        assert_eq!(fx.codes()[3], "IIDBT");
    }

    #[test]
    fn test_encode_failure_only_drops_that_sentence() {
        let mut fx = Fixture::new();
        // DPT fits, the three unit DBT of the same depth does not
        fx.dispatch(N2kMessage::WaterDepth(WaterDepth::new(Some(1e30), None)), 0);
        assert_eq!(fx.codes(), vec!["IIDPT"]);
        assert_eq!(fx.emitter.sentences_discarded(), 1);
        assert_eq!(fx.state.water_depth, Some(1e30));
    }

    #[test]
    fn test_position_and_gnss_refresh_position() {
        let mut fx = Fixture::new();
        fx.dispatch(N2kMessage::PositionRapidUpdate(PositionRapidUpdate::new(Some(43.0), Some(10.0))), 5);
        assert!(fx.state.has_position());
        assert_eq!(fx.staleness.last_update(FieldGroup::Position), Some(5));

        let gnss = GnssPositionData::new(N2kDateTime::new(Some(19000), Some(3600.0)), Some(44.0), Some(11.0), Some(3.0));
        assert_eq!(fx.dispatch(N2kMessage::GnssPositionData(gnss), 9), Dispatch::Handled(129029));
        assert_eq!(fx.state.days_since_1970, Some(19000));
        assert_eq!(fx.state.seconds_since_midnight, Some(3600.0));
        assert_eq!(fx.state.latitude, Some(44.0));
        assert_eq!(fx.state.altitude, Some(3.0));
        assert_eq!(fx.staleness.last_update(FieldGroup::Position), Some(9));
        assert!(fx.codes().is_empty());
    }

    #[test]
    fn test_cog_sog_magnetic_reference() {
        let mut fx = Fixture::new();
        fx.state.variation = Some(0.1);
        let cog_sog = CogSogRapidUpdate::new(HeadingReference::Magnetic, Some(1.0), Some(2.0));
        fx.dispatch(N2kMessage::CogSogRapidUpdate(cog_sog), 0);
        assert_abs_diff_eq!(fx.state.cog.unwrap(), 1.1, epsilon = 1e-12);
        assert_eq!(fx.state.sog, Some(2.0));
        assert_eq!(fx.codes(), vec!["IIVTG"]);
        let vtg = fx.sent.borrow()[0].clone();
        let fields: Vec<&str> = vtg.split(',').collect();
        assert_eq!(fields[1], format!("{:.1}", 1.1_f64.to_degrees()));
        assert_eq!(fields[3], format!("{:.1}", 1.0_f64.to_degrees()));
    }

    #[test]
    fn test_apparent_wind_without_sog() {
        let mut fx = Fixture::new();
        fx.dispatch(N2kMessage::WindData(WindData::new_apparent(6.0, 0.5)), 0);
        assert_eq!(fx.codes(), vec!["IIMWV"]);
        assert_eq!(fx.state.aws, Some(6.0));
        assert_eq!(fx.state.max_aws, 6.0);
        assert!(fx.state.tws.is_none());
        assert_eq!(fx.staleness.freshness(FieldGroup::Wind), Freshness::Fresh);
    }

    #[test]
    fn test_apparent_wind_resolves_true_wind() {
        let mut fx = Fixture::new();
        fx.state.sog = Some(5.0 * KNOT);
        fx.state.heading = Some(90.0_f64.to_radians());
        fx.dispatch(N2kMessage::WindData(WindData::new_apparent(10.0 * KNOT, 0.0)), 0);

        assert_eq!(fx.codes(), vec!["IIMWV", "IIMWV", "GPMWD"]);
        assert_abs_diff_eq!(fx.state.tws.unwrap() / KNOT, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fx.state.twa.unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fx.state.awd.unwrap().to_degrees(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fx.state.twd.unwrap().to_degrees(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fx.state.max_tws / KNOT, 5.0, epsilon = 1e-9);
        assert!(fx.sent.borrow()[0].contains(",R,"));
        assert!(fx.sent.borrow()[1].contains(",T,"));
    }

    #[test]
    fn test_true_wind_without_heading_has_no_direction() {
        let mut fx = Fixture::new();
        fx.state.sog = Some(2.0);
        fx.dispatch(N2kMessage::WindData(WindData::new_apparent(8.0, 1.0)), 0);
        assert!(fx.state.tws.is_some());
        assert!(fx.state.awd.is_none());
        assert!(fx.state.twd.is_none());
        assert_eq!(fx.codes(), vec!["IIMWV", "IIMWV", "GPMWD"]);
    }

    #[test]
    fn test_true_wind_reading_is_forwarded() {
        let mut fx = Fixture::new();
        let wind = WindData::new(Some(7.0), Some(0.3), WindReference::TrueBoat);
        fx.dispatch(N2kMessage::WindData(wind), 0);
        assert_eq!(fx.codes(), vec!["IIMWV"]);
        assert!(fx.sent.borrow()[0].contains(",T,"));
        assert!(fx.state.aws.is_none());
        assert!(fx.state.awa.is_none());
    }

    #[test]
    fn test_wind_with_unavailable_reference_is_not_apparent() {
        let mut fx = Fixture::new();
        fx.state.sog = Some(2.0);
        let wind = WindData::from_bytes(&[0x00, 0xE8, 0x03, 0x00, 0x00, 0xFF, 0xFF, 0xFF]).unwrap();
        fx.dispatch(N2kMessage::WindData(wind), 0);

        assert!(fx.state.aws.is_none());
        assert!(fx.state.awa.is_none());
        assert!(fx.state.tws.is_none());
        assert_eq!(fx.state.max_aws, 0.0);
        assert_eq!(fx.codes(), vec!["IIMWV"]);
        assert!(fx.sent.borrow()[0].contains(",T,"));
    }

    #[test]
    fn test_distance_log_emits_vlw() {
        let mut fx = Fixture::new();
        fx.dispatch(N2kMessage::DistanceLog(DistanceLog::new(Some(18520.0), Some(1852.0))), 0);
        assert_eq!(fx.state.log, Some(18520.0));
        assert_eq!(fx.state.trip_log, Some(1852.0));
        assert_eq!(fx.codes(), vec!["GPVLW"]);
    }

    #[test]
    fn test_rudder_instance() {
        let mut fx = Fixture::new();
        let before = fx.state.clone();
        fx.dispatch(N2kMessage::Rudder(Rudder::new(1, Some(0.2))), 0);
        assert_eq!(fx.state, before);
        assert!(fx.codes().is_empty());

        fx.dispatch(N2kMessage::Rudder(Rudder::new(0, Some(0.2))), 0);
        assert_eq!(fx.state.rudder_position, Some(0.2));
        assert_eq!(fx.codes(), vec!["GPRSA"]);
    }

    #[test]
    fn test_water_temperature_emits_mtw() {
        let mut fx = Fixture::new();
        fx.dispatch(N2kMessage::EnvironmentalParameters(EnvironmentalParameters::new(Some(293.15))), 0);
        assert_eq!(fx.state.water_temperature, Some(293.15));
        assert_eq!(fx.codes(), vec!["GPMTW"]);
    }

    #[test]
    fn test_unknown_pgn_is_ignored() {
        let mut fx = Fixture::new();
        let before = fx.state.clone();
        assert_eq!(fx.dispatch(N2kMessage::Unknown(126992, vec![0; 8]), 0), Dispatch::Ignored);
        assert_eq!(fx.state, before);
        assert!(fx.codes().is_empty());
    }
}
