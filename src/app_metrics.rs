use std::time::{Duration, Instant};
use tracing::info;

/// Gateway counters logged and reset on every metrics interval
pub struct AppMetrics {
    /// Number of CAN frames received
    pub can_frames: u64,
    /// Number of complete NMEA2000 messages assembled
    pub nmea_messages: u64,
    /// Number of messages a handler accepted
    pub routed_messages: u64,
    /// Number of NMEA0183 sentences sent to the listeners
    pub sentences: u64,
    /// Number of CAN bus errors encountered
    pub can_errors: u64,
}

impl AppMetrics {
    /// Create a new AppMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self {
            can_frames: 0,
            nmea_messages: 0,
            routed_messages: 0,
            sentences: 0,
            can_errors: 0,
        }
    }

    /// Reset all counters to zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Log current metrics to the info log
    pub fn log(&self) {
        info!(
            "[Metrics] CAN frames: {}, NMEA2000 messages: {}, Routed: {}, NMEA0183 sentences: {}, CAN errors: {}",
            self.can_frames, self.nmea_messages, self.routed_messages, self.sentences, self.can_errors
        );
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Manages periodic logging of application metrics
pub struct MetricsLogger {
    last_log: Instant,
    log_interval: Duration,
}

impl MetricsLogger {
    /// Create a new MetricsLogger with the specified logging interval
    pub fn new(log_interval: Duration) -> Self {
        Self {
            last_log: Instant::now(),
            log_interval,
        }
    }

    /// Check if it's time to log metrics, and if so, log them and reset
    /// Returns true if metrics were logged
    pub fn check_and_log(&mut self, metrics: &mut AppMetrics) -> bool {
        if self.last_log.elapsed() >= self.log_interval {
            metrics.log();
            metrics.reset();
            self.last_log = Instant::now();
            true
        } else {
            false
        }
    }
}
