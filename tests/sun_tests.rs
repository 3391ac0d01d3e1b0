use liberty_lens::sun::{sun_position, Lighting, SUN_DISTANCE};

#[cfg(test)]
mod sun_tests {
    use super::*;

    #[test]
    fn test_sun_stays_on_sphere() {
        for azimuth in (0..=360).step_by(15) {
            for elevation in (0..=90).step_by(5) {
                let p = sun_position(azimuth as f32, elevation as f32);
                assert!(
                    (p.length() - SUN_DISTANCE).abs() < 1e-2,
                    "azimuth {} elevation {} gave |p| = {}",
                    azimuth,
                    elevation,
                    p.length()
                );
            }
        }
    }

    #[test]
    fn test_sun_never_below_horizon_in_control_range() {
        for azimuth in (0..=360).step_by(10) {
            for elevation in 0..=90 {
                let p = sun_position(azimuth as f32, elevation as f32);
                assert!(p.y >= -1e-3, "azimuth {} elevation {} y {}", azimuth, elevation, p.y);
            }
        }
    }

    #[test]
    fn test_default_sun_position() {
        let p = sun_position(135.0, 45.0);
        assert!((p.x - 50.0).abs() < 1e-3);
        assert!((p.y - 70.71).abs() < 1e-2);
        assert!((p.z + 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_higher_sun_raises_light() {
        let low = Lighting::from_angles(135.0, 10.0);
        let high = Lighting::from_angles(135.0, 80.0);
        assert!(high.sun.position.y > low.sun.position.y);
        assert!(high.stars.visibility <= low.stars.visibility);
    }
}
