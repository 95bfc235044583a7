use tracing::{info, trace};

use crate::clock::elapsed_ms;
use crate::nmea0183::{self, RmcFields, Sentence};
use crate::state::SensorState;

/// Something that accepts completed NMEA0183 sentences.
pub trait SentenceListener {
    fn send_sentence(&mut self, sentence: &Sentence);
}

/// Listener backed by a closure.
pub struct CallbackListener<F> {
    callback: F,
}

impl<F: FnMut(&Sentence)> CallbackListener<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(&Sentence)> SentenceListener for CallbackListener<F> {
    fn send_sentence(&mut self, sentence: &Sentence) {
        (self.callback)(sentence)
    }
}

/// Writes every sentence to the log under the `nmea0183` target.
pub struct LogListener;

impl SentenceListener for LogListener {
    fn send_sentence(&mut self, sentence: &Sentence) {
        info!(target: "nmea0183", "{}", sentence);
    }
}

/// Builds NMEA0183 sentences from the sensor state and hands them to every
/// registered listener.
pub struct SentenceEmitter {
    listeners: Vec<Box<dyn SentenceListener>>,
    rmc_interval_ms: u32,
    last_rmc_ms: Option<u32>,
    sent: u64,
    discarded: u64,
}

impl SentenceEmitter {
    pub fn new(rmc_interval_ms: u32, listeners: Vec<Box<dyn SentenceListener>>) -> Self {
        Self {
            listeners,
            rmc_interval_ms,
            last_rmc_ms: None,
            sent: 0,
            discarded: 0,
        }
    }

    /// Number of sentences handed to the listeners so far.
    pub fn sentences_sent(&self) -> u64 {
        self.sent
    }

    /// Number of sentences the encoder refused.
    pub fn sentences_discarded(&self) -> u64 {
        self.discarded
    }

    /// Send a built sentence; a sentence that failed to build is dropped.
    pub fn emit(&mut self, sentence: Option<Sentence>) -> bool {
        let Some(sentence) = sentence else {
            self.discarded += 1;
            trace!("Discarding sentence that could not be built");
            return false;
        };
        for listener in self.listeners.iter_mut() {
            listener.send_sentence(&sentence);
        }
        self.sent += 1;
        true
    }

    pub fn emit_heading(&mut self, state: &SensorState) {
        self.emit(nmea0183::build_hdg(state.heading, Some(0.0), state.variation));
    }

    pub fn emit_boat_speed(&mut self, state: &SensorState) {
        self.emit(nmea0183::build_vhw(state.heading, state.magnetic_heading(), state.stw));
    }

    pub fn emit_depth(&mut self, depth_below_transducer: Option<f64>, offset: Option<f64>) {
        self.emit(nmea0183::build_dpt(depth_below_transducer, offset));
        self.emit(nmea0183::build_dbx(depth_below_transducer, offset));
    }

    pub fn emit_cog_sog(&mut self, state: &SensorState, magnetic_cog: Option<f64>) {
        self.emit(nmea0183::build_vtg(state.cog, magnetic_cog, state.sog));
    }

    pub fn emit_wind(&mut self, angle: Option<f64>, apparent: bool, speed: Option<f64>) {
        self.emit(nmea0183::build_mwv(angle, apparent, speed));
    }

    /// True wind MWV followed by MWD.
    pub fn emit_true_wind(&mut self, state: &SensorState) {
        self.emit(nmea0183::build_mwv(state.twa, false, state.tws));
        self.emit(nmea0183::build_mwd(state.awd, state.tws));
    }

    pub fn emit_log(&mut self, state: &SensorState) {
        self.emit(nmea0183::build_vlw(state.log, state.trip_log));
    }

    pub fn emit_rudder(&mut self, state: &SensorState) {
        self.emit(nmea0183::build_rsa(state.rudder_position));
    }

    pub fn emit_water_temperature(&mut self, state: &SensorState) {
        self.emit(nmea0183::build_mtw(state.water_temperature));
    }

    /// Send RMC when a position is known and the interval has elapsed since
    /// the previous one. Returns true when the timer fired.
    pub fn send_rmc_if_due(&mut self, state: &SensorState, now_ms: u32) -> bool {
        if !state.has_position() {
            return false;
        }
        let due = match self.last_rmc_ms {
            Some(last) => elapsed_ms(now_ms, last) >= self.rmc_interval_ms,
            None => true,
        };
        if !due {
            return false;
        }
        let fields = RmcFields {
            seconds_since_midnight: state.seconds_since_midnight,
            latitude: state.latitude,
            longitude: state.longitude,
            cog: state.cog,
            sog: state.sog,
            days_since_1970: state.days_since_1970,
            variation: state.variation,
        };
        self.emit(nmea0183::build_rmc(&fields));
        self.last_rmc_ms = Some(now_ms);
        true
    }
}
