use socketcan::{CanSocket, EmbeddedFrame, ExtendedId, Frame, Socket};
use std::{error::Error, time::Duration};
use tracing::{info, warn};

/// Opens a CAN socket with automatic retry on failure
///
/// # Arguments
/// * `interface` - Name of the CAN interface (e.g., "can0", "vcan0")
/// * `retry_delay` - Pause between attempts
pub fn open_can_socket_with_retry(interface: &str, retry_delay: Duration) -> CanSocket {
    loop {
        match CanSocket::open(interface) {
            Ok(socket) => {
                info!("Successfully opened CAN interface: {}", interface);
                return socket;
            }
            Err(e) => {
                warn!("Failed to open CAN interface '{}': {}", interface, e);
                warn!("Retrying in {} seconds...", retry_delay.as_secs());
                std::thread::sleep(retry_delay);
            }
        }
    }
}

/// Configures a CAN socket for the gateway control loop
///
/// The read timeout bounds how long a read may block, so that periodic
/// publishing keeps running while the bus is silent.
pub fn configure_nmea2k_socket(socket: &mut CanSocket, read_timeout: Duration) -> Result<(), Box<dyn Error>> {
    socket.set_read_timeout(read_timeout)?;
    Ok(())
}

/// Reads a CAN frame and converts it to NMEA2000 extended ID format
pub fn read_nmea2k_frame(socket: &CanSocket) -> Result<(ExtendedId, Vec<u8>), std::io::Error> {
    let frame = socket.read_frame()?;

    // NMEA2000 uses 29-bit extended CAN identifiers
    let can_id = frame.can_id();
    let extended_id = ExtendedId::new(can_id.as_raw())
        .ok_or_else(|| std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid CAN ID for NMEA2000"
        ))?;

    let data = frame.data().to_vec();

    Ok((extended_id, data))
}

/// True when a read error only means no frame arrived before the timeout
pub fn is_timeout(error: &std::io::Error) -> bool {
    matches!(error.kind(), std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut)
}
