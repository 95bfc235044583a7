use std::net::UdpSocket;
use tracing::{debug, error, warn};

use crate::emitter::SentenceListener;
use crate::nmea0183::Sentence;

/// UDP broadcaster for NMEA0183 sentences
///
/// Sends every sentence, terminated by CR LF, as one datagram to the
/// configured destination address.
pub struct UdpBroadcaster {
    socket: Option<UdpSocket>,
    destination: String,
    error_count: u64,
    sentence_count: u64,
}

impl UdpBroadcaster {
    /// Create a new UDP broadcaster
    ///
    /// # Arguments
    /// * `destination` - UDP destination address (e.g., "192.168.1.255:10110")
    /// * `enabled` - Whether UDP broadcasting is enabled
    pub fn new(destination: String, enabled: bool) -> Self {
        let socket = if enabled {
            match Self::create_socket(&destination) {
                Ok(sock) => {
                    debug!("UDP broadcaster initialized: {}", destination);
                    Some(sock)
                }
                Err(e) => {
                    error!("Failed to create UDP socket: {}. Broadcasting disabled.", e);
                    None
                }
            }
        } else {
            debug!("UDP broadcaster disabled in configuration");
            None
        };

        Self {
            socket,
            destination,
            error_count: 0,
            sentence_count: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.socket.is_some()
    }

    /// Create and configure a UDP socket
    fn create_socket(destination: &str) -> Result<UdpSocket, std::io::Error> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;

        // Enable broadcast if destination is a broadcast address
        if destination.contains(".255") {
            socket.set_broadcast(true)?;
        }

        // Set non-blocking mode to prevent blocking the main loop
        socket.set_nonblocking(true)?;

        Ok(socket)
    }

    /// Returns (sentence_count, error_count)
    pub fn stats(&self) -> (u64, u64) {
        (self.sentence_count, self.error_count)
    }
}

impl SentenceListener for UdpBroadcaster {
    fn send_sentence(&mut self, sentence: &Sentence) {
        let Some(ref socket) = self.socket else {
            return;
        };

        let line = format!("{}\r\n", sentence);
        match socket.send_to(line.as_bytes(), &self.destination) {
            Ok(_) => {
                self.sentence_count += 1;
                if self.sentence_count % 1000 == 0 {
                    debug!("Broadcasted {} sentences via UDP", self.sentence_count);
                }
            }
            Err(e) => {
                if self.error_count < 10 {
                    warn!("Failed to send UDP packet: {}", e);
                }
                self.error_count += 1;
            }
        }
    }
}
