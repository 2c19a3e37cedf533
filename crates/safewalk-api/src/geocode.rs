//! Nominatim client implementing [`Geocoder`].

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use safewalk_core::geo::{BoundingBox, Coordinates, Geocoder, Place};

const POI_QUERY: &str = "hospital,police,public building";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
  pub endpoint:   String,
  /// Nominatim's usage policy requires an identifying agent.
  pub user_agent: String,
  /// Appended to every place search, e.g. `"Karnataka,India"`.
  pub region:     String,
}

impl Default for GeocoderConfig {
  fn default() -> Self {
    Self {
      endpoint:   "https://nominatim.openstreetmap.org".to_owned(),
      user_agent: concat!("safewalk/", env!("CARGO_PKG_VERSION")).to_owned(),
      region:     "Karnataka,India".to_owned(),
    }
  }
}

#[derive(Debug, Error)]
pub enum GeocodeError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("bad coordinate in response: {0:?}")]
  Coordinate(String),
}

/// One element of Nominatim's `format=json` response. Coordinates arrive as
/// strings.
#[derive(Debug, Deserialize)]
struct RawPlace {
  display_name: String,
  lat:          String,
  lon:          String,
  #[serde(rename = "type")]
  kind:         Option<String>,
}

impl TryFrom<RawPlace> for Place {
  type Error = GeocodeError;

  fn try_from(raw: RawPlace) -> Result<Self, Self::Error> {
    let parse = |s: &str| {
      s.parse::<f64>()
        .map_err(|_| GeocodeError::Coordinate(s.to_owned()))
    };
    Ok(Place {
      coordinates:  Coordinates { lat: parse(&raw.lat)?, lon: parse(&raw.lon)? },
      display_name: raw.display_name,
      category:     raw.kind,
    })
  }
}

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeocodeClient {
  client: Client,
  config: GeocoderConfig,
}

impl GeocodeClient {
  pub fn new(config: GeocoderConfig) -> reqwest::Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent(config.user_agent.clone())
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/search", self.config.endpoint.trim_end_matches('/'))
  }

  fn query(&self, name: &str) -> String {
    if self.config.region.is_empty() {
      name.to_owned()
    } else {
      format!("{name},{}", self.config.region)
    }
  }

  async fn fetch(&self, params: &[(&str, String)]) -> Result<Vec<Place>, GeocodeError> {
    let raw: Vec<RawPlace> = self
      .client
      .get(self.url())
      .query(params)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;
    raw.into_iter().map(Place::try_from).collect()
  }
}

impl Geocoder for GeocodeClient {
  type Error = GeocodeError;

  async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
    self
      .fetch(&[("format", "json".to_owned()), ("q", self.query(query))])
      .await
  }

  async fn points_of_interest(
    &self,
    region: BoundingBox,
    limit: usize,
  ) -> Result<Vec<Place>, GeocodeError> {
    let viewbox = format!(
      "{},{},{},{}",
      region.min_lon, region.min_lat, region.max_lon, region.max_lat
    );
    self
      .fetch(&[
        ("format", "json".to_owned()),
        ("q", POI_QUERY.to_owned()),
        ("viewbox", viewbox),
        ("bounded", "1".to_owned()),
        ("limit", limit.to_string()),
      ])
      .await
  }
}
