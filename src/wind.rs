use crate::units::{RAD_TO_DEG, normalize0_360};

/// True wind relative to the bow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueWind {
    pub speed: f64,     // same unit as the inputs
    pub angle_deg: f64, // [0, 360)
}

impl TrueWind {
    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }
}

/// Calculate true wind speed and angle from apparent wind and speed over ground.
///
/// The apparent wind is resolved into components along and across the bow,
/// the boat's own motion is subtracted from the forward component.
///
/// # Arguments
/// * `aws` - Apparent wind speed
/// * `awa_rad` - Apparent wind angle in radians (relative to bow)
/// * `sog` - Speed over ground, same unit as `aws`
pub fn calculate_true_wind(aws: f64, awa_rad: f64, sog: f64) -> TrueWind {
    // Resolve apparent wind into components
    let x = aws * awa_rad.cos();
    let y = aws * awa_rad.sin();

    // Subtract boat speed from the x component
    let tw_x = x - sog;

    let speed = (y * y + tw_x * tw_x).sqrt();
    let angle_deg = normalize0_360(y.atan2(tw_x) * RAD_TO_DEG);

    TrueWind { speed, angle_deg }
}

/// Earth referenced direction of a bow relative angle, in degrees.
pub fn wind_direction_deg(angle_rad: f64, heading_rad: f64) -> f64 {
    normalize0_360((angle_rad + heading_rad) * RAD_TO_DEG)
}

/// Derives true wind from apparent wind samples and keeps the session maxima.
#[derive(Debug, Clone, Default)]
pub struct WindResolver {
    max_aws: f64,
    max_tws: f64,
}

impl WindResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_aws(&self) -> f64 {
        self.max_aws
    }

    pub fn max_tws(&self) -> f64 {
        self.max_tws
    }

    pub fn record_apparent(&mut self, aws: f64) {
        self.max_aws = self.max_aws.max(aws);
    }

    /// Resolve one apparent sample against speed over ground.
    ///
    /// Returns `None` when any input is not available; the caller keeps its
    /// previous true wind in that case.
    pub fn resolve(&mut self, aws: Option<f64>, awa: Option<f64>, sog: Option<f64>) -> Option<TrueWind> {
        let true_wind = calculate_true_wind(aws?, awa?, sog?);
        self.max_tws = self.max_tws.max(true_wind.speed);
        Some(true_wind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const KNOT: f64 = 1852.0 / 3600.0;

    #[test]
    fn test_true_wind_headwind() {
        let tw = calculate_true_wind(10.0 * KNOT, 0.0, 5.0 * KNOT);
        assert_abs_diff_eq!(tw.speed / KNOT, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tw.angle_deg, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_true_wind_zero_boat_speed() {
        let tw = calculate_true_wind(10.0, 45.0_f64.to_radians(), 0.0);
        assert_abs_diff_eq!(tw.speed, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tw.angle_deg, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_true_wind_beam_reach() {
        let tw = calculate_true_wind(12.0, 90.0_f64.to_radians(), 6.0);
        assert!(tw.speed > 12.0);
        // the wind moves towards the bow, so the true angle is wider than 90
        assert!(tw.angle_deg > 90.0);
    }

    #[test]
    fn test_true_wind_from_port_is_wrapped() {
        let tw = calculate_true_wind(10.0, (-45.0_f64).to_radians(), 5.0);
        assert!(tw.angle_deg > 180.0 && tw.angle_deg < 360.0);
        assert_abs_diff_eq!(tw.angle_rad(), tw.angle_deg.to_radians());
    }

    #[test]
    fn test_true_wind_triangle_inequality() {
        for aws in [0.0, 1.0, 4.5, 12.0, 30.0] {
            for sog in [0.0, 0.5, 3.0, 9.0] {
                for step in 0..36 {
                    let awa = (step as f64 * 10.0).to_radians();
                    let tw = calculate_true_wind(aws, awa, sog);
                    assert!(tw.speed >= (aws - sog).abs() - 1e-9);
                    assert!(tw.speed <= aws + sog + 1e-9);
                    assert!((0.0..360.0).contains(&tw.angle_deg));
                }
            }
        }
    }

    #[test]
    fn test_resolve_requires_sog() {
        let mut resolver = WindResolver::new();
        assert!(resolver.resolve(Some(10.0), Some(0.0), None).is_none());
        assert_eq!(resolver.max_tws(), 0.0);
    }

    #[test]
    fn test_maxima_are_monotonic() {
        let mut resolver = WindResolver::new();
        let samples = [(8.0, 2.0), (12.0, 2.0), (3.0, 0.0), (11.0, 6.0)];
        let mut last_aws = 0.0;
        let mut last_tws = 0.0;
        for (aws, sog) in samples {
            resolver.record_apparent(aws);
            resolver.resolve(Some(aws), Some(0.5), Some(sog));
            assert!(resolver.max_aws() >= last_aws);
            assert!(resolver.max_tws() >= last_tws);
            last_aws = resolver.max_aws();
            last_tws = resolver.max_tws();
        }
        assert_eq!(resolver.max_aws(), 12.0);
    }

    #[test]
    fn test_wind_direction_wraps() {
        assert_abs_diff_eq!(
            wind_direction_deg(90.0_f64.to_radians(), 300.0_f64.to_radians()),
            30.0,
            epsilon = 1e-9
        );
    }
}
