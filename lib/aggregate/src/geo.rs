use serde::Serialize;

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Great-circle distance in kilometres via the spherical law of cosines.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    let cosine = a.lat.to_radians().sin() * b.lat.to_radians().sin()
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (a.lon - b.lon).to_radians().cos();
    // Rounding can push the cosine just past ±1 for near-identical points.
    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}

/// Parses a WKT `POINT(lon lat)` literal into a coordinate pair.
///
/// Anything before the opening parenthesis is ignored, so plain
/// `POINT(...)` and typed variants with a leading CRS IRI both work.
pub fn parse_point(value: &str) -> Option<LatLon> {
    let open = value.find('(')?;
    let close = value.rfind(')')?;
    let mut parts = value.get(open + 1..close)?.split_whitespace();
    let lon = parts.next()?.parse().ok()?;
    let lat = parts.next()?.parse().ok()?;
    Some(LatLon { lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: LatLon = LatLon {
        lat: 51.5,
        lon: -0.12,
    };
    const PARIS: LatLon = LatLon {
        lat: 48.85,
        lon: 2.35,
    };

    #[test]
    fn test_distance_is_symmetric() {
        let there = distance_km(LONDON, PARIS);
        let back = distance_km(PARIS, LONDON);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_self_is_negligible() {
        // The law of cosines is ill-conditioned near zero, so allow a metre.
        assert!(distance_km(LONDON, LONDON) < 1e-3);
        assert!(distance_km(PARIS, PARIS) < 1e-3);
    }

    #[test]
    fn test_london_to_paris_baseline() {
        let distance = distance_km(LONDON, PARIS);
        assert!((distance - 344.0).abs() < 1.0, "got {distance} km");
    }

    #[test]
    fn test_parse_point_swaps_into_lat_lon() {
        let point = parse_point("POINT(-1.8447 50.7188)").unwrap();
        assert_eq!(point.lat, 50.7188);
        assert_eq!(point.lon, -1.8447);
    }

    #[test]
    fn test_parse_point_rejects_malformed_input() {
        assert!(parse_point("no coordinates here").is_none());
        assert!(parse_point("POINT(1.0)").is_none());
        assert!(parse_point("POINT(a b)").is_none());
    }

    #[test]
    fn test_parse_point_round_trips() {
        for &(lon, lat) in &[(0.0, 0.0), (-180.0, -90.0), (180.0, 90.0), (2.35, 48.85)] {
            let point = parse_point(&format!("POINT({lon} {lat})")).unwrap();
            assert_eq!((point.lat, point.lon), (lat, lon));
        }
    }
}
