use nmea2000::Identifier;
use socketcan::ExtendedId;
use std::collections::HashMap;
use tracing::trace;

use crate::pgns::N2kMessage;

/// NMEA2000 Stream Reader
///
/// Stateful reader for NMEA2000 CAN frames. It handles:
/// - Single-frame messages (decoded immediately)
/// - Fast packet messages (assembled from multiple frames)
///
/// # Usage
///
/// ```no_run
/// use nmea2k::{N2kStreamReader, ExtendedId};
///
/// let mut reader = N2kStreamReader::new();
/// let can_id = ExtendedId::new(0x09F11205).unwrap();
/// let data = [0u8; 8];
/// if let Some(complete_message) = reader.process_frame(can_id, &data) {
///     println!("PGN: {}", complete_message.identifier.pgn());
///     println!("Message: {}", complete_message.message);
/// }
/// ```
// Key for tracking multi-frame messages: (PGN, Source)
type FastPacketKey = (u32, u8);

struct FastPacketBuffer {
    sequence: u8,
    next_index: u8,
    data: Vec<u8>,
    total_len: usize,
}

impl FastPacketBuffer {
    fn new(sequence: u8, total_len: usize) -> Self {
        Self {
            sequence,
            next_index: 1,
            data: Vec::with_capacity(total_len),
            total_len,
        }
    }

    fn add_payload(&mut self, payload: &[u8]) {
        self.data.extend_from_slice(payload);
    }

    fn is_complete(&self) -> bool {
        self.data.len() >= self.total_len
    }

    fn into_complete_data(mut self) -> Vec<u8> {
        // Truncate to actual message length, the last frame is padded with 0xFF
        self.data.truncate(self.total_len);
        self.data
    }
}

/// A decoded NMEA2000 message with metadata
pub struct N2kFrame {
    pub identifier: Identifier,
    pub message: N2kMessage,
    #[allow(dead_code)]
    pub is_fast_packet: bool,
}

/// NMEA2000 stream reader that processes CAN frames and assembles fast packets
pub struct N2kStreamReader {
    fast_packet_buffers: HashMap<FastPacketKey, FastPacketBuffer>,
}

impl N2kStreamReader {
    pub fn new() -> Self {
        Self {
            fast_packet_buffers: HashMap::new(),
        }
    }

    /// Process a CAN frame and return a complete message if available
    ///
    /// # Returns
    /// `Some(N2kFrame)` if a complete message is ready, `None` otherwise
    pub fn process_frame(&mut self, can_id: ExtendedId, data: &[u8]) -> Option<N2kFrame> {
        let identifier = Identifier::from_can_id(can_id);
        let pgn = identifier.pgn();

        if is_fast_packet_pgn(pgn) && data.len() == 8 {
            self.process_fast_packet(identifier, data)
        } else {
            // Regular single-frame message
            let message = N2kMessage::from_pgn(pgn, data);
            Some(N2kFrame {
                identifier,
                message,
                is_fast_packet: false,
            })
        }
    }

    fn process_fast_packet(&mut self, identifier: Identifier, data: &[u8]) -> Option<N2kFrame> {
        let pgn = identifier.pgn();
        let key = (pgn, identifier.source());
        let sequence = data[0] >> 5;
        let index = data[0] & 0x1F;

        let buffer = if index == 0 {
            // First frame: byte 1 carries the total length, 6 payload bytes follow
            let mut buffer = FastPacketBuffer::new(sequence, data[1] as usize);
            buffer.add_payload(&data[2..]);
            self.fast_packet_buffers.insert(key, buffer);
            self.fast_packet_buffers.get_mut(&key)?
        } else {
            let buffer = self.fast_packet_buffers.get_mut(&key)?;
            if buffer.sequence != sequence || buffer.next_index != index {
                trace!("Dropping out of order fast packet frame for PGN {} (seq {}, index {})", pgn, sequence, index);
                self.fast_packet_buffers.remove(&key);
                return None;
            }
            buffer.next_index += 1;
            buffer.add_payload(&data[1..]);
            buffer
        };

        if !buffer.is_complete() {
            return None;
        }
        let complete_data = self.fast_packet_buffers.remove(&key)?.into_complete_data();
        let message = N2kMessage::from_pgn(pgn, &complete_data);
        Some(N2kFrame {
            identifier,
            message,
            is_fast_packet: true,
        })
    }
}

fn is_fast_packet_pgn(pgn: u32) -> bool {
    matches!(
        pgn,
        126996 | 127233 | 127237 | 127489 | 127493 | 127505 | 128275 | 129029
            | 129038 | 129039 | 129540 | 129794 | 129809 | 129810
    )
}

impl Default for N2kStreamReader {
    fn default() -> Self {
        Self::new()
    }
}
