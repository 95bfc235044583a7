use nmea2k::Identifier;
use crate::config::Config;

/// Filters NMEA2000 frames based on application configuration using only the Identifier
/// Use this filter early in the processing pipeline before full message assembly.
/// # Arguments
/// * `config` - Application configuration containing filter rules
/// * `id` - The NMEA2000 Identifier to filter
/// # Returns
/// true if frame should be processed, false if it should be skipped
pub fn should_process_frame_by_id(config: &Config, id: Identifier) -> bool {
    config.source_filter.should_accept(id.pgn(), id.source())
}
