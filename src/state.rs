/// Field groups sharing one staleness timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Heading,
    CogSog,
    Position,
    Wind,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 4] = [
        FieldGroup::Heading,
        FieldGroup::CogSog,
        FieldGroup::Position,
        FieldGroup::Wind,
    ];

    pub fn index(self) -> usize {
        match self {
            FieldGroup::Heading => 0,
            FieldGroup::CogSog => 1,
            FieldGroup::Position => 2,
            FieldGroup::Wind => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldGroup::Heading => "heading",
            FieldGroup::CogSog => "cog_sog",
            FieldGroup::Position => "position",
            FieldGroup::Wind => "wind",
        }
    }
}

/// Latest decoded value of every field, in SI units with angles in radians.
///
/// `None` means not available.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorState {
    pub heading: Option<f64>,
    pub variation: Option<f64>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub stw: Option<f64>,
    pub aws: Option<f64>,
    pub tws: Option<f64>,
    pub max_aws: f64,
    pub max_tws: f64,
    pub awa: Option<f64>,
    pub twa: Option<f64>,
    pub awd: Option<f64>,
    pub twd: Option<f64>,
    pub trip_log: Option<f64>, // meters
    pub log: Option<f64>,      // meters
    pub rudder_position: Option<f64>,
    pub water_temperature: Option<f64>, // Kelvin
    pub water_depth: Option<f64>,       // meters below surface
    pub latitude: Option<f64>,          // degrees
    pub longitude: Option<f64>,         // degrees
    pub altitude: Option<f64>,          // meters
    pub seconds_since_midnight: Option<f64>,
    pub days_since_1970: Option<u16>,
}

impl SensorState {
    pub fn new(default_variation: f64) -> Self {
        Self {
            heading: None,
            variation: Some(default_variation),
            cog: None,
            sog: None,
            stw: None,
            aws: None,
            tws: None,
            max_aws: 0.0,
            max_tws: 0.0,
            awa: None,
            twa: None,
            awd: None,
            twd: None,
            trip_log: None,
            log: None,
            rudder_position: None,
            water_temperature: None,
            water_depth: None,
            latitude: None,
            longitude: None,
            altitude: None,
            seconds_since_midnight: None,
            days_since_1970: None,
        }
    }

    /// Force every field of `group` to not available.
    pub fn clear_group(&mut self, group: FieldGroup) {
        match group {
            FieldGroup::Heading => {
                self.heading = None;
            }
            FieldGroup::CogSog => {
                self.cog = None;
                self.sog = None;
            }
            FieldGroup::Position => {
                self.latitude = None;
                self.longitude = None;
                self.altitude = None;
            }
            FieldGroup::Wind => {
                self.aws = None;
                self.awa = None;
                self.tws = None;
                self.twa = None;
                self.awd = None;
                self.twd = None;
            }
        }
    }

    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Heading converted to magnetic with the current variation.
    pub fn magnetic_heading(&self) -> Option<f64> {
        Some(self.heading? - self.variation?)
    }
}
