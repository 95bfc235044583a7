use crate::N2kMessage;

/// Trait for components that handle NMEA2000 messages
///
/// Implementations receive every decoded message and decide internally
/// which ones they are interested in, ignoring the others.
pub trait MessageHandler {
    /// Process an incoming NMEA2000 message
    ///
    /// `now_ms` is a wrapping monotonic millisecond counter.
    fn handle_message(&mut self, message: &N2kMessage, now_ms: u32);
}
