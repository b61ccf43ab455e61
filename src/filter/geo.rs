//! Geographical value types used by location filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SedgeError};

/// An immutable coordinate pair with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SedgeError::other(format!(
                "Invalid latitude: {lat} (must be between -90 and 90)"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(SedgeError::other(format!(
                "Invalid longitude: {lng} (must be between -180 and 180)"
            )));
        }

        Ok(LatLng { lat, lng })
    }

    /// Calculate the Haversine distance to another point in kilometers.
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for LatLng {
    type Err = SedgeError;

    /// Parse a coordinate pair from a `"lat,lng"` string.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| SedgeError::other(format!("Invalid coordinate pair: '{s}'")))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| SedgeError::other(format!("Invalid latitude: '{lat}'")))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| SedgeError::other(format!("Invalid longitude: '{lng}'")))?;
        LatLng::new(lat, lng)
    }
}
