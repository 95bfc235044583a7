use std::{error::Error, time::Duration};
use tracing::{debug, info, warn};

use nmea_gateway::app_metrics::{AppMetrics, MetricsLogger};
use nmea_gateway::clock::{MonotonicClock, elapsed_ms};
use nmea_gateway::config::{self, Config};
use nmea_gateway::frame_filter::should_process_frame_by_id;
use nmea_gateway::udp_broadcaster::UdpBroadcaster;
use nmea_gateway::{BoatDataPublisher, LogListener, SentenceListener};

// Import from nmea2k crate
use nmea2k::{CanBus, N2kStreamReader};

// ========== Logging Setup ==========

fn init_logging(log_config: &config::LogConfig) -> Result<(), Box<dyn Error>> {
    use tracing_appender::rolling;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create log directory if it doesn't exist
    std::fs::create_dir_all(&log_config.directory)?;

    // Create daily rolling file appender
    let file_appender = rolling::daily(&log_config.directory, &log_config.file_prefix);

    // Build subscriber with both console and file output
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_timer(fmt::time::OffsetTime::local_rfc_3339().unwrap_or_else(|_| {
            fmt::time::OffsetTime::new(time::UtcOffset::UTC, time::format_description::well_known::Rfc3339)
        }));

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_timer(fmt::time::OffsetTime::local_rfc_3339().unwrap_or_else(|_| {
            fmt::time::OffsetTime::new(time::UtcOffset::UTC, time::format_description::well_known::Rfc3339)
        }));

    // Parse log level from config
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn build_listeners(config: &Config) -> Vec<Box<dyn SentenceListener>> {
    let mut listeners: Vec<Box<dyn SentenceListener>> = Vec::new();
    if config.output.udp.enabled {
        let udp = UdpBroadcaster::new(config.output.udp.destination.clone(), true);
        if udp.is_enabled() {
            info!("Sending NMEA0183 sentences to {}", config.output.udp.destination);
            listeners.push(Box::new(udp));
        }
    }
    if config.output.log_sentences {
        listeners.push(Box::new(LogListener));
    }
    if listeners.is_empty() {
        warn!("No NMEA0183 output configured, sentences will be dropped");
    }
    listeners
}

fn open_can(config: &Config) -> Result<socketcan::CanSocket, Box<dyn Error>> {
    let mut socket = CanBus::open_can_socket_with_retry(&config.can_interface, config.gateway.can_retry_delay());
    CanBus::configure_nmea2k_socket(&mut socket, config.gateway.can_read_timeout())?;
    Ok(socket)
}

// ========== Main Application ==========

fn main() -> Result<(), Box<dyn Error>> {
    // Check for command-line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for help flag
    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        println!("NMEA2000 to NMEA0183 Gateway");
        println!();
        println!("USAGE:");
        println!("    nmea_gateway [OPTIONS]");
        println!();
        println!("OPTIONS:");
        println!("    --validate-config, --validate, -v    Validate configuration and exit");
        println!("    --help, -h                           Show this help message");
        println!();
        println!("Configuration file: config.json (in current directory)");
        std::process::exit(0);
    }

    let validate_only = args.contains(&"--validate-config".to_string())
        || args.contains(&"--validate".to_string())
        || args.contains(&"-v".to_string());

    // Load configuration
    let config = match Config::from_file("config.json") {
        Ok(cfg) => {
            if validate_only {
                println!("✓ Configuration validation successful");
                println!("  CAN interface: {}", cfg.can_interface);
                println!(
                    "  RMC interval: {} ms, publish interval: {} ms",
                    cfg.gateway.rmc_interval_ms, cfg.gateway.update_interval_ms
                );
                println!(
                    "  Default variation: {:.1}°, log mile: {} m",
                    cfg.gateway.default_variation_deg, cfg.gateway.log_meters_per_mile
                );
                println!("  UDP output: {} ({})", cfg.output.udp.enabled, cfg.output.udp.destination);
                println!("  PGN source filters: {} entries", cfg.source_filter.pgn_source_map.len());
                std::process::exit(0);
            }
            cfg
        }
        Err(e) => {
            let err_msg = e.to_string();
            if validate_only {
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
            if err_msg.contains("CAN interface") {
                eprintln!("Fatal configuration error: {}", e);
                eprintln!("Please fix the CAN interface configuration and try again.");
                std::process::exit(1);
            }
            eprintln!("Warning: Could not load config.json: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    // Initialize logging
    init_logging(&config.logging)?;
    info!("NMEA gateway starting...");

    info!("Opening CAN interface: {}", config.can_interface);
    let mut socket = open_can(&config)?;
    info!("Listening for NMEA2000 messages");

    let mut reader = N2kStreamReader::new();
    let mut publisher = BoatDataPublisher::new(&config, build_listeners(&config));
    let clock = MonotonicClock::new();

    // Application metrics tracking
    let mut metrics = AppMetrics::new();
    let mut metrics_logger = MetricsLogger::new(Duration::from_secs(60));
    let mut last_update = clock.now_ms();
    let mut sentences_reported = 0;
    let mut routed_reported = 0;

    loop {
        match CanBus::read_nmea2k_frame(&socket) {
            Ok((extended_id, data)) => {
                metrics.can_frames += 1;

                if let Some(n2k_frame) = reader.process_frame(extended_id, &data) {
                    metrics.nmea_messages += 1;

                    if should_process_frame_by_id(&config, n2k_frame.identifier) {
                        publisher.on_decoded_message(&n2k_frame.message, clock.now_ms());
                    }
                }
            }
            Err(e) if CanBus::is_timeout(&e) => {
                // Expected on a quiet bus, keeps the publish tick running
            }
            Err(e) => {
                metrics.can_errors += 1;
                warn!("Error reading CAN frame: {}", e);
                warn!("CAN bus connection lost. Attempting to reconnect...");

                match open_can(&config) {
                    Ok(s) => {
                        socket = s;
                        info!("Reconnected to CAN bus. Resuming operation");
                    }
                    Err(e) => warn!("Failed to configure CAN socket: {}", e),
                }

                // Wait before resuming to allow bus to stabilize
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        let now = clock.now_ms();
        if elapsed_ms(now, last_update) >= config.gateway.update_interval_ms {
            last_update = now;
            let (snapshot, timestamp) = publisher.update(now);
            if tracing::enabled!(tracing::Level::DEBUG) {
                match serde_json::to_string(&snapshot) {
                    Ok(json) => debug!("Boat data at {}: {}", timestamp, json),
                    Err(e) => warn!("Failed to serialize boat data: {}", e),
                }
            }
        }

        let sent = publisher.sentences_sent();
        metrics.sentences += sent - sentences_reported;
        sentences_reported = sent;
        let routed = publisher.messages_routed();
        metrics.routed_messages += routed - routed_reported;
        routed_reported = routed;

        // Log metrics periodically
        metrics_logger.check_and_log(&mut metrics);
    }
}
