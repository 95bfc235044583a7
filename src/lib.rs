//! NMEA2000 to NMEA0183 gateway core.
//!
//! Decoded NMEA2000 messages are routed into a [`state::SensorState`], turned
//! into NMEA0183 sentences for the registered listeners and published once per
//! loop tick as a [`snapshot::BoatDataSnapshot`] in display units.

pub mod app_metrics;
pub mod clock;
pub mod config;
pub mod emitter;
pub mod frame_filter;
pub mod nmea0183;
pub mod publisher;
pub mod router;
pub mod snapshot;
pub mod staleness;
pub mod state;
pub mod udp_broadcaster;
pub mod units;
pub mod wind;

pub use config::Config;
pub use emitter::{CallbackListener, LogListener, SentenceEmitter, SentenceListener};
pub use publisher::BoatDataPublisher;
pub use router::Dispatch;
pub use snapshot::BoatDataSnapshot;
