//! Safety zones between two places, built on the geocoding collaborator.
//!
//! Routing is not computed here. The survey geocodes both endpoints, asks the
//! geocoder for points of interest inside the region spanning them, and labels
//! each point as a hospital, police station or public building.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result, flow::FlowError};

/// Padding added around the endpoints when querying points of interest.
pub const REGION_PADDING_DEG: f64 = 0.1;

/// Maximum number of points of interest requested per survey.
pub const POI_LIMIT: usize = 15;

const EARTH_RADIUS_KM: f64 = 6371.0;

// ─── Geometry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub lat: f64,
  pub lon: f64,
}

/// Great-circle distance in kilometres (haversine).
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
  let d_lat = (b.lat - a.lat).to_radians();
  let d_lon = (b.lon - a.lon).to_radians();
  let h = (d_lat / 2.0).sin().powi(2)
    + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
  2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
  pub min_lat: f64,
  pub min_lon: f64,
  pub max_lat: f64,
  pub max_lon: f64,
}

impl BoundingBox {
  /// The smallest box containing both points, grown by `padding` degrees.
  pub fn spanning(a: Coordinates, b: Coordinates, padding: f64) -> Self {
    Self {
      min_lat: a.lat.min(b.lat) - padding,
      min_lon: a.lon.min(b.lon) - padding,
      max_lat: a.lat.max(b.lat) + padding,
      max_lon: a.lon.max(b.lon) + padding,
    }
  }
}

// ─── Geocoder ────────────────────────────────────────────────────────────────

/// A geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
  /// Full display name as returned by the service.
  pub display_name: String,
  pub coordinates:  Coordinates,
  /// Service-specific category, e.g. `"hospital"` or `"police"`.
  pub category:     Option<String>,
}

impl Place {
  /// The first component of the display name.
  pub fn short_name(&self) -> &str {
    self.display_name.split(',').next().unwrap_or_default().trim()
  }
}

/// Abstraction over the geocoding and points-of-interest service.
pub trait Geocoder: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Places matching a free-text name, best match first.
  fn search<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Place>, Self::Error>> + Send + 'a;

  /// Hospitals, police stations and public buildings inside `region`.
  fn points_of_interest(
    &self,
    region: BoundingBox,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Place>, Self::Error>> + Send + '_;
}

// ─── Zones ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
  Hospital,
  Police,
  Public,
}

impl ZoneKind {
  pub fn classify(category: Option<&str>) -> Self {
    match category {
      Some("hospital" | "clinic" | "doctors") => Self::Hospital,
      Some("police") => Self::Police,
      _ => Self::Public,
    }
  }

  pub fn landmark(self, name: &str) -> String {
    match self {
      Self::Hospital => format!("{name} Medical Center"),
      Self::Police => format!("{name} Police Station"),
      Self::Public => format!("{name} Community Center"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyZone {
  pub id:          usize,
  pub name:        String,
  pub kind:        ZoneKind,
  pub coordinates: Coordinates,
  pub landmark:    String,
}

impl SafetyZone {
  fn from_place(id: usize, place: &Place) -> Self {
    let kind = ZoneKind::classify(place.category.as_deref());
    let name = place.short_name().to_owned();
    Self {
      id,
      landmark: kind.landmark(&name),
      name,
      kind,
      coordinates: place.coordinates,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSurvey {
  pub origin:      Place,
  pub destination: Place,
  pub distance_km: f64,
  pub zones:       Vec<SafetyZone>,
}

/// Geocode both endpoints and collect safety zones between them.
///
/// Either endpoint having no match is an error; an empty points-of-interest
/// result is not.
pub async fn survey<G: Geocoder>(
  geocoder: &G,
  city: &str,
  destination: &str,
) -> Result<ZoneSurvey> {
  let (city, destination) = (city.trim(), destination.trim());
  if city.is_empty() || destination.is_empty() {
    return Err(FlowError::MissingRoute.into());
  }

  let origin = locate(geocoder, city).await?;
  let destination = locate(geocoder, destination).await?;

  let region = BoundingBox::spanning(
    origin.coordinates,
    destination.coordinates,
    REGION_PADDING_DEG,
  );
  let places = geocoder
    .points_of_interest(region, POI_LIMIT)
    .await
    .map_err(|e| Error::Geocoding(Box::new(e)))?;
  debug!(count = places.len(), "points of interest found");

  let zones = places
    .iter()
    .enumerate()
    .map(|(id, place)| SafetyZone::from_place(id, place))
    .collect();

  Ok(ZoneSurvey {
    distance_km: distance_km(origin.coordinates, destination.coordinates),
    origin,
    destination,
    zones,
  })
}

async fn locate<G: Geocoder>(geocoder: &G, name: &str) -> Result<Place> {
  geocoder
    .search(name)
    .await
    .map_err(|e| Error::Geocoding(Box::new(e)))?
    .into_iter()
    .next()
    .ok_or_else(|| Error::PlaceNotFound(name.to_owned()))
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use super::*;

  struct Fixed {
    places: Vec<(&'static str, Place)>,
    pois:   Vec<Place>,
  }

  fn place(name: &str, lat: f64, lon: f64, category: Option<&str>) -> Place {
    Place {
      display_name: name.to_owned(),
      coordinates:  Coordinates { lat, lon },
      category:     category.map(str::to_owned),
    }
  }

  impl Geocoder for Fixed {
    type Error = Infallible;

    async fn search(&self, query: &str) -> Result<Vec<Place>, Infallible> {
      Ok(
        self
          .places
          .iter()
          .filter(|(q, _)| *q == query)
          .map(|(_, p)| p.clone())
          .collect(),
      )
    }

    async fn points_of_interest(
      &self,
      region: BoundingBox,
      limit: usize,
    ) -> Result<Vec<Place>, Infallible> {
      Ok(
        self
          .pois
          .iter()
          .filter(|p| {
            (region.min_lat..=region.max_lat).contains(&p.coordinates.lat)
              && (region.min_lon..=region.max_lon).contains(&p.coordinates.lon)
          })
          .take(limit)
          .cloned()
          .collect(),
      )
    }
  }

  fn geocoder() -> Fixed {
    Fixed {
      places: vec![
        ("Mangalore", place("Mangalore, Dakshina Kannada, Karnataka", 12.87, 74.88, None)),
        ("Udupi", place("Udupi, Karnataka", 13.34, 74.74, None)),
      ],
      pois:   vec![
        place("Wenlock Hospital, Hampankatta", 12.87, 74.84, Some("hospital")),
        place("Surathkal Police Station, NH66", 13.0, 74.79, Some("police")),
        place("Town Hall, Udupi", 13.34, 74.75, Some("townhall")),
        place("Far Away Clinic, Bengaluru", 12.97, 77.59, Some("clinic")),
      ],
    }
  }

  #[test]
  fn haversine_distance() {
    let a = Coordinates { lat: 12.9716, lon: 77.5946 };
    let b = Coordinates { lat: 12.2958, lon: 76.6394 };
    let d = distance_km(a, b);
    assert!((d - 127.0).abs() < 3.0, "distance was {d}");
    assert_eq!(distance_km(a, a), 0.0);
  }

  #[test]
  fn bounding_box_is_ordered_and_padded() {
    let bb = BoundingBox::spanning(
      Coordinates { lat: 13.0, lon: 75.0 },
      Coordinates { lat: 12.0, lon: 74.0 },
      0.1,
    );
    assert!((bb.min_lat - 11.9).abs() < 1e-9);
    assert!((bb.max_lon - 75.1).abs() < 1e-9);
  }

  #[tokio::test]
  async fn survey_labels_points_inside_the_region() {
    let survey = survey(&geocoder(), "Mangalore", "Udupi").await.unwrap();
    assert_eq!(survey.zones.len(), 3);
    assert_eq!(survey.zones[0].name, "Wenlock Hospital");
    assert_eq!(survey.zones[0].kind, ZoneKind::Hospital);
    assert_eq!(survey.zones[0].landmark, "Wenlock Hospital Medical Center");
    assert_eq!(survey.zones[1].landmark, "Surathkal Police Station Police Station");
    assert_eq!(survey.zones[2].kind, ZoneKind::Public);
    assert!(survey.distance_km > 40.0);
  }

  #[tokio::test]
  async fn unknown_destination_is_an_error() {
    let err = survey(&geocoder(), "Mangalore", "Atlantis").await.unwrap_err();
    assert!(matches!(err, Error::PlaceNotFound(name) if name == "Atlantis"));
  }

  #[tokio::test]
  async fn blank_input_is_a_validation_error() {
    let err = survey(&geocoder(), " ", "Udupi").await.unwrap_err();
    assert!(matches!(err, Error::Validation(FlowError::MissingRoute)));
  }
}
