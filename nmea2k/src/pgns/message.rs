use std::fmt;

use super::pgn127245::Rudder;
use super::pgn127250::VesselHeading;
use super::pgn127258::MagneticVariation;
use super::pgn128259::SpeedWaterReferenced;
use super::pgn128267::WaterDepth;
use super::pgn128275::DistanceLog;
use super::pgn129025::PositionRapidUpdate;
use super::pgn129026::CogSogRapidUpdate;
use super::pgn129029::GnssPositionData;
use super::pgn130306::WindData;
use super::pgn130310::EnvironmentalParameters;

fn format_data_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

// Enum to hold any decoded message type
#[derive(Debug, Clone)]
pub enum N2kMessage {
    Rudder(Rudder),
    VesselHeading(VesselHeading),
    MagneticVariation(MagneticVariation),
    SpeedWaterReferenced(SpeedWaterReferenced),
    WaterDepth(WaterDepth),
    DistanceLog(DistanceLog),
    PositionRapidUpdate(PositionRapidUpdate),
    CogSogRapidUpdate(CogSogRapidUpdate),
    GnssPositionData(GnssPositionData),
    WindData(WindData),
    EnvironmentalParameters(EnvironmentalParameters),
    Unknown(u32, Vec<u8>),
}

impl N2kMessage {
    /// Decode `data` as the payload of `pgn`.
    ///
    /// Unsupported PGNs and payloads too short for their PGN become `Unknown`.
    pub fn from_pgn(pgn: u32, data: &[u8]) -> Self {
        let decoded = match pgn {
            127245 => Rudder::from_bytes(data).map(N2kMessage::Rudder),
            127250 => VesselHeading::from_bytes(data).map(N2kMessage::VesselHeading),
            127258 => MagneticVariation::from_bytes(data).map(N2kMessage::MagneticVariation),
            128259 => SpeedWaterReferenced::from_bytes(data).map(N2kMessage::SpeedWaterReferenced),
            128267 => WaterDepth::from_bytes(data).map(N2kMessage::WaterDepth),
            128275 => DistanceLog::from_bytes(data).map(N2kMessage::DistanceLog),
            129025 => PositionRapidUpdate::from_bytes(data).map(N2kMessage::PositionRapidUpdate),
            129026 => CogSogRapidUpdate::from_bytes(data).map(N2kMessage::CogSogRapidUpdate),
            129029 => GnssPositionData::from_bytes(data).map(N2kMessage::GnssPositionData),
            130306 => WindData::from_bytes(data).map(N2kMessage::WindData),
            130310 => EnvironmentalParameters::from_bytes(data).map(N2kMessage::EnvironmentalParameters),
            _ => None,
        };
        decoded.unwrap_or_else(|| N2kMessage::Unknown(pgn, data.to_vec()))
    }

    pub fn pgn(&self) -> u32 {
        match self {
            N2kMessage::Rudder(_) => 127245,
            N2kMessage::VesselHeading(_) => 127250,
            N2kMessage::MagneticVariation(_) => 127258,
            N2kMessage::SpeedWaterReferenced(_) => 128259,
            N2kMessage::WaterDepth(_) => 128267,
            N2kMessage::DistanceLog(_) => 128275,
            N2kMessage::PositionRapidUpdate(_) => 129025,
            N2kMessage::CogSogRapidUpdate(_) => 129026,
            N2kMessage::GnssPositionData(_) => 129029,
            N2kMessage::WindData(_) => 130306,
            N2kMessage::EnvironmentalParameters(_) => 130310,
            N2kMessage::Unknown(pgn, _) => *pgn,
        }
    }
}

impl fmt::Display for N2kMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            N2kMessage::Rudder(msg) => write!(f, "{}", msg),
            N2kMessage::VesselHeading(msg) => write!(f, "{}", msg),
            N2kMessage::MagneticVariation(msg) => write!(f, "{}", msg),
            N2kMessage::SpeedWaterReferenced(msg) => write!(f, "{}", msg),
            N2kMessage::WaterDepth(msg) => write!(f, "{}", msg),
            N2kMessage::DistanceLog(msg) => write!(f, "{}", msg),
            N2kMessage::PositionRapidUpdate(msg) => write!(f, "{}", msg),
            N2kMessage::CogSogRapidUpdate(msg) => write!(f, "{}", msg),
            N2kMessage::GnssPositionData(msg) => write!(f, "{}", msg),
            N2kMessage::WindData(msg) => write!(f, "{}", msg),
            N2kMessage::EnvironmentalParameters(msg) => write!(f, "{}", msg),
            N2kMessage::Unknown(_pgn, data) => {
                write!(f, "      Raw data: [{}]", format_data_bytes(data))
            }
        }
    }
}
