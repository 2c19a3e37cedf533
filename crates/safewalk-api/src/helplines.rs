//! Handlers for `/helplines`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/helplines` | The whole directory |
//! | `GET`  | `/helplines/{name}` | One helpline, name matched ignoring case; 404 otherwise |

use axum::{Json, extract::Path};
use safewalk_core::helplines::{self, HELPLINES, Helpline};

use crate::{auth::UserSession, error::ApiError};

pub async fn list(_session: UserSession) -> Json<&'static [Helpline]> {
  Json(HELPLINES)
}

pub async fn get(
  _session: UserSession,
  Path(name): Path<String>,
) -> Result<Json<&'static Helpline>, ApiError> {
  helplines::find(&name)
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("helpline {name:?}")))
}
