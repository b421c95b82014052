use serde::{Serialize, Serializer};
use std::fmt;

/// Distance in kilometers
/// Ordering uses the full-precision value; only the wire form is rounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DistanceKm(pub f64);

impl DistanceKm {
    /// Get the raw kilometers value
    pub fn as_km(self) -> f64 {
        self.0
    }

    /// Total order over distances, NaN sorting last
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (false, false) => self.0.total_cmp(&other.0),
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
        }
    }
}

impl fmt::Display for DistanceKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km", self.0)
    }
}

/// Serialized as the display string, e.g. `"1.3 km"`
impl Serialize for DistanceKm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_distance_km_display() {
        assert_eq!(DistanceKm(5.123).to_string(), "5.1 km");
        assert_eq!(DistanceKm(0.0).to_string(), "0.0 km");
        assert_eq!(DistanceKm(12.96).to_string(), "13.0 km");
    }

    #[test]
    fn test_distance_km_serializes_as_string() {
        let json = serde_json::to_value(DistanceKm(3.249)).unwrap();
        assert_eq!(json, serde_json::json!("3.2 km"));
    }

    #[test]
    fn test_ordering_uses_full_precision() {
        // Both render as "1.2 km" but must not compare equal
        let a = DistanceKm(1.21);
        let b = DistanceKm(1.24);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.total_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_nan_sorts_last() {
        let mut distances = vec![DistanceKm(f64::NAN), DistanceKm(2.0), DistanceKm(1.0)];
        distances.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(distances[0].as_km(), 1.0);
        assert_eq!(distances[1].as_km(), 2.0);
        assert!(distances[2].as_km().is_nan());
    }
}
