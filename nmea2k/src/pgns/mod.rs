pub mod fields;
pub mod message;
pub mod nmea2000_date_time;
pub mod pgn127245;
pub mod pgn127250;
pub mod pgn127258;
pub mod pgn128259;
pub mod pgn128267;
pub mod pgn128275;
pub mod pgn129025;
pub mod pgn129026;
pub mod pgn129029;
pub mod pgn130306;
pub mod pgn130310;

// Re-export commonly used types
pub use message::N2kMessage;
pub use nmea2000_date_time::N2kDateTime;
pub use pgn127245::{Rudder, RudderDirectionOrder};
pub use pgn127250::{HeadingReference, VesselHeading};
pub use pgn127258::{MagneticVariation, VariationSource};
pub use pgn128259::SpeedWaterReferenced;
pub use pgn128267::WaterDepth;
pub use pgn128275::DistanceLog;
pub use pgn129025::PositionRapidUpdate;
pub use pgn129026::CogSogRapidUpdate;
pub use pgn129029::{GnssMethod, GnssPositionData, GnssType};
pub use pgn130306::{WindData, WindReference};
pub use pgn130310::EnvironmentalParameters;
