//! NMEA2000 Protocol Library
//!
//! The NMEA2000 side of the NMEA0183 gateway:
//! - CAN bus interface utilities
//! - NMEA2000 stream reader with fast packet assembly
//! - PGN decoders for the navigation messages the gateway translates
//! - Message handler trait for processing NMEA2000 messages
//!
//! Every decoded field is an `Option`: the NMEA2000 "data not available"
//! raw values never leave this crate as numbers.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use nmea2k::{CanBus, N2kStreamReader};
//!
//! let mut socket = CanBus::open_can_socket_with_retry("can0", Duration::from_secs(10));
//! CanBus::configure_nmea2k_socket(&mut socket, Duration::from_millis(100)).unwrap();
//!
//! let mut reader = N2kStreamReader::new();
//! loop {
//!     match CanBus::read_nmea2k_frame(&socket) {
//!         Ok((id, data)) => {
//!             if let Some(frame) = reader.process_frame(id, &data) {
//!                 println!("PGN: {}", frame.identifier.pgn());
//!             }
//!         }
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod pgns;
pub mod stream_reader;
pub mod message_handler;
pub mod canbus;

// Re-export commonly used types
pub use stream_reader::{N2kStreamReader, N2kFrame};
pub use message_handler::MessageHandler;
pub use pgns::N2kMessage;
pub use canbus as CanBus;

// Re-export external types for convenience
pub use nmea2000::Identifier;
pub use socketcan::ExtendedId;
