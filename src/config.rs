use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::state::FieldGroup;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub can_interface: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub staleness: StalenessConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub source_filter: SourceFilterConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory where log files will be stored
    pub directory: String,
    /// Log file name prefix (date will be appended)
    pub file_prefix: String,
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: "./logs".to_string(),
            file_prefix: "nmea_gateway".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceFilterConfig {
    /// Map of PGN to allowed source address
    /// If a PGN is present in this map, only messages from the specified source will be accepted
    /// If a PGN is not in the map, all sources are accepted
    #[serde(default)]
    pub pgn_source_map: std::collections::HashMap<u32, u8>,
}

impl SourceFilterConfig {
    /// Check if a message should be accepted based on its PGN and source
    pub fn should_accept(&self, pgn: u32, source: u8) -> bool {
        match self.pgn_source_map.get(&pgn) {
            Some(&allowed_source) => source == allowed_source,
            None => true, // No filter for this PGN, accept all sources
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Period of the RMC sentence while a position is known
    pub rmc_interval_ms: u32,
    /// Period of the publish tick
    pub update_interval_ms: u32,
    /// Magnetic variation used until a variation message arrives, degrees east
    pub default_variation_deg: f64,
    /// Mile length used for the odometer values of the published snapshot.
    /// 1852 is the nautical mile; some older log transducers count 1825 m miles.
    pub log_meters_per_mile: f64,
    pub can_read_timeout_ms: u64,
    pub can_retry_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rmc_interval_ms: 1000,
            update_interval_ms: 100,
            default_variation_deg: 7.0,
            log_meters_per_mile: 1852.0,
            can_read_timeout_ms: 50,
            can_retry_seconds: 10,
        }
    }
}

impl GatewayConfig {
    pub fn default_variation_rad(&self) -> f64 {
        self.default_variation_deg.to_radians()
    }

    pub fn can_read_timeout(&self) -> Duration {
        Duration::from_millis(self.can_read_timeout_ms)
    }

    pub fn can_retry_delay(&self) -> Duration {
        Duration::from_secs(self.can_retry_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StalenessConfig {
    pub heading_timeout_ms: u32,
    pub cog_sog_timeout_ms: u32,
    pub position_timeout_ms: u32,
    pub wind_timeout_ms: u32,
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            heading_timeout_ms: 2000,
            cog_sog_timeout_ms: 2000,
            position_timeout_ms: 4000,
            wind_timeout_ms: 2000,
        }
    }
}

impl StalenessConfig {
    pub fn timeout_ms(&self, group: FieldGroup) -> u32 {
        match group {
            FieldGroup::Heading => self.heading_timeout_ms,
            FieldGroup::CogSog => self.cog_sog_timeout_ms,
            FieldGroup::Position => self.position_timeout_ms,
            FieldGroup::Wind => self.wind_timeout_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub udp: UdpConfig,
    /// Log every sentence sent at info level
    #[serde(default)]
    pub log_sentences: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UdpConfig {
    pub enabled: bool,
    /// e.g. "192.168.1.255:10110"
    pub destination: String,
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            destination: "255.255.255.255:10110".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.can_interface.trim().is_empty() {
            return Err("CAN interface must not be empty".into());
        }
        if self.gateway.rmc_interval_ms == 0 {
            return Err("gateway.rmc_interval_ms must be greater than zero".into());
        }
        let mile = self.gateway.log_meters_per_mile;
        if mile.is_nan() || mile <= 0.0 {
            return Err("gateway.log_meters_per_mile must be positive".into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            can_interface: "vcan0".to_string(),
            gateway: GatewayConfig::default(),
            staleness: StalenessConfig::default(),
            output: OutputConfig::default(),
            source_filter: SourceFilterConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.rmc_interval_ms, 1000);
        assert_eq!(config.default_variation_deg, 7.0);
        assert_eq!(config.log_meters_per_mile, 1852.0);
        assert_eq!(config.can_read_timeout(), Duration::from_millis(50));
        assert_eq!(config.can_retry_delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_staleness_config_default() {
        let config = StalenessConfig::default();
        assert_eq!(config.timeout_ms(FieldGroup::Heading), 2000);
        assert_eq!(config.timeout_ms(FieldGroup::CogSog), 2000);
        assert_eq!(config.timeout_ms(FieldGroup::Position), 4000);
        assert_eq!(config.timeout_ms(FieldGroup::Wind), 2000);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.can_interface, "vcan0");
        assert!(!config.output.udp.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_filter_no_filter() {
        let filter = SourceFilterConfig::default();
        assert!(filter.should_accept(129025, 10));
        assert!(filter.should_accept(130306, 22));
    }

    #[test]
    fn test_source_filter_with_filter() {
        let mut filter = SourceFilterConfig::default();
        filter.pgn_source_map.insert(129025, 22);
        filter.pgn_source_map.insert(127250, 5);

        assert!(filter.should_accept(129025, 22));
        assert!(!filter.should_accept(129025, 10));
        assert!(filter.should_accept(127250, 5));
        assert!(!filter.should_accept(127250, 22));

        // PGN 130306 has no filter, should accept all sources
        assert!(filter.should_accept(130306, 10));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("vcan0"));
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.gateway.rmc_interval_ms, 1000);
        assert_eq!(back.staleness.position_timeout_ms, 4000);
    }

    #[test]
    fn test_config_partial_deserialization() {
        let json = r#"{
            "can_interface": "can0",
            "gateway": { "rmc_interval_ms": 2000, "log_meters_per_mile": 1825.0 },
            "staleness": { "wind_timeout_ms": 3000 },
            "output": { "udp": { "enabled": true, "destination": "192.168.1.255:10110" } },
            "source_filter": { "pgn_source_map": { "129025": 22 } }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.can_interface, "can0");
        assert_eq!(config.gateway.rmc_interval_ms, 2000);
        assert_eq!(config.gateway.update_interval_ms, 100);
        assert_eq!(config.gateway.log_meters_per_mile, 1825.0);
        assert_eq!(config.staleness.wind_timeout_ms, 3000);
        assert_eq!(config.staleness.heading_timeout_ms, 2000);
        assert!(config.output.udp.enabled);
        assert!(!config.source_filter.should_accept(129025, 1));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.gateway.rmc_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_config_default() {
        let log_config = LogConfig::default();
        assert_eq!(log_config.directory, "./logs");
        assert_eq!(log_config.file_prefix, "nmea_gateway");
        assert_eq!(log_config.level, "info");
    }
}
