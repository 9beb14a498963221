//! Great-circle distance on a spherical Earth.

/// Mean Earth radius in meters. Spherical, not WGS-84.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two (lat, lon) pairs in degrees.
///
/// Never fails: out-of-range coordinates give a finite but meaningless value.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a few ULPs outside [0, 1].
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        for &(lat, lon) in &[(0.0, 0.0), (33.6844, 73.0479), (-89.9, 179.9), (90.0, -180.0)] {
            assert_eq!(distance_meters(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_one_degree_at_equator() {
        let d = distance_meters(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 50.0, "got {}", d);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((33.6844, 73.0479), (33.7, 73.06)),
            ((52.52, 13.405), (48.8566, 2.3522)),
            ((-33.87, 151.21), (40.71, -74.0)),
        ];
        for ((a_lat, a_lon), (b_lat, b_lon)) in pairs {
            let ab = distance_meters(a_lat, a_lon, b_lat, b_lon);
            let ba = distance_meters(b_lat, b_lon, a_lat, a_lon);
            assert!((ab - ba).abs() <= ab * 1e-6);
        }
    }

    #[test]
    fn test_antipodal_stays_finite() {
        let d = distance_meters(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);

        let d = distance_meters(90.0, 0.0, -90.0, 0.0);
        assert!(d.is_finite());
    }

    #[test]
    fn test_out_of_domain_does_not_panic() {
        let d = distance_meters(120.0, 400.0, -95.0, -720.0);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }
}
