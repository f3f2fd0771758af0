//! # Geo-Distance Filter
//!
//! Users, stores and warehouses sit on a flat `[0,100] × [0,100]` plane.
//! Distance is plain Euclidean distance on that plane; it is not a
//! great-circle distance and carries no unit.
//!
//! ## Delivery Radius
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            store B (10,45)  ✗  distance 35 > 30                         │
//! │                                                                         │
//! │            store S (10,35)  ✓  distance 25                              │
//! │                  ·                                                      │
//! │                  ·   radius 30 (inclusive)                              │
//! │            user  (10,10)                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Maximum distance at which a customer can see and order from a store.
pub const DELIVERY_RADIUS: f64 = 30.0;

/// A point on the coordinate plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        calculate_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// `sqrt((lat1-lat2)^2 + (lon1-lon2)^2)`.
///
/// ## Example
/// ```rust
/// use retail_core::geo::calculate_distance;
///
/// assert_eq!(calculate_distance(10.0, 10.0, 10.0, 35.0), 25.0);
/// assert_eq!(calculate_distance(0.0, 0.0, 3.0, 4.0), 5.0);
/// ```
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let t1 = (lat1 - lat2) * (lat1 - lat2);
    let t2 = (lon1 - lon2) * (lon1 - lon2);
    (t1 + t2).sqrt()
}

/// Whether `target` is within [`DELIVERY_RADIUS`] of `origin`.
/// The boundary is included.
pub fn is_within_radius(origin: &Coordinates, target: &Coordinates) -> bool {
    origin.distance_to(target) <= DELIVERY_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(12.5, 40.0);
        let b = Coordinates::new(80.0, 3.25);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let user = Coordinates::new(10.0, 10.0);

        assert!(is_within_radius(&user, &Coordinates::new(10.0, 40.0)));
        assert!(is_within_radius(&user, &Coordinates::new(40.0, 10.0)));
        // 18-24-30 triangle
        assert!(is_within_radius(&user, &Coordinates::new(28.0, 34.0)));

        assert!(!is_within_radius(&user, &Coordinates::new(10.0, 40.001)));
        assert!(!is_within_radius(&user, &Coordinates::new(31.3, 31.3)));
    }

    #[test]
    fn test_scenario_store_distance() {
        let user = Coordinates::new(10.0, 10.0);
        let store = Coordinates::new(10.0, 35.0);
        assert_eq!(user.distance_to(&store), 25.0);
        assert!(is_within_radius(&user, &store));
    }
}
