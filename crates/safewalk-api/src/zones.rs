//! Handler for `GET /zones?city=<city>&destination=<place>`.

use axum::{
  Json,
  extract::State,
};
use safewalk_core::{
  geo::{self, ZoneSurvey},
  store::KeyValueStore,
};
use serde::Deserialize;

use crate::{AppState, auth::UserSession, error::ApiError, extract::ApiQuery};

#[derive(Debug, Deserialize)]
pub struct RouteParams {
  #[serde(default)]
  pub city:        String,
  #[serde(default)]
  pub destination: String,
}

pub async fn survey<S>(
  State(state): State<AppState<S>>,
  _session: UserSession,
  ApiQuery(params): ApiQuery<RouteParams>,
) -> Result<Json<ZoneSurvey>, ApiError>
where
  S: KeyValueStore,
{
  let survey =
    geo::survey(state.geocoder.as_ref(), &params.city, &params.destination).await?;
  Ok(Json(survey))
}
