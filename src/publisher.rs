use nmea2k::{MessageHandler, N2kMessage};
use tracing::debug;

use crate::config::Config;
use crate::emitter::{SentenceEmitter, SentenceListener};
use crate::router::{Dispatch, MessageRouter};
use crate::snapshot::BoatDataSnapshot;
use crate::staleness::StalenessMonitor;
use crate::state::SensorState;
use crate::wind::WindResolver;

/// Owns the sensor state and everything that mutates it.
///
/// Decoded messages go in through [`on_decoded_message`](Self::on_decoded_message);
/// [`update`](Self::update) is called once per loop tick and hands back a
/// snapshot in display units.
pub struct BoatDataPublisher {
    state: SensorState,
    staleness: StalenessMonitor,
    wind: WindResolver,
    emitter: SentenceEmitter,
    log_meters_per_mile: f64,
    routed: u64,
}

impl BoatDataPublisher {
    pub fn new(config: &Config, listeners: Vec<Box<dyn SentenceListener>>) -> Self {
        debug!(
            "Publisher created with {} listeners, RMC every {} ms",
            listeners.len(),
            config.gateway.rmc_interval_ms
        );
        Self {
            state: SensorState::new(config.gateway.default_variation_rad()),
            staleness: StalenessMonitor::new(&config.staleness),
            wind: WindResolver::new(),
            emitter: SentenceEmitter::new(config.gateway.rmc_interval_ms, listeners),
            log_meters_per_mile: config.gateway.log_meters_per_mile,
            routed: 0,
        }
    }

    pub fn on_decoded_message(&mut self, message: &N2kMessage, now_ms: u32) -> Dispatch {
        let dispatch = MessageRouter::new(&mut self.state, &mut self.staleness, &mut self.wind, &mut self.emitter)
            .dispatch(message, now_ms);
        if let Dispatch::Handled(_) = dispatch {
            self.routed += 1;
        }
        dispatch
    }

    /// Run one publish pass and return the snapshot with its epoch seconds
    /// (0 when date or time is not available).
    pub fn update(&mut self, now_ms: u32) -> (BoatDataSnapshot, i64) {
        self.emitter.send_rmc_if_due(&self.state, now_ms);
        self.staleness.apply(&mut self.state, now_ms);
        let snapshot = BoatDataSnapshot::from_state(&self.state, self.log_meters_per_mile);
        let timestamp = snapshot.epoch_seconds();
        (snapshot, timestamp)
    }

    pub fn state(&self) -> &SensorState {
        &self.state
    }

    pub fn sentences_sent(&self) -> u64 {
        self.emitter.sentences_sent()
    }

    pub fn messages_routed(&self) -> u64 {
        self.routed
    }
}

impl MessageHandler for BoatDataPublisher {
    fn handle_message(&mut self, message: &N2kMessage, now_ms: u32) {
        self.on_decoded_message(message, now_ms);
    }
}
