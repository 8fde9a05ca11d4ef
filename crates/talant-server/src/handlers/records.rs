//! Record endpoints, shared by every [`RecordKind`].
//!
//! Each handler is generic over the kind; the router mounts one set per kind.
//! Reads are public, writes need a session and act on behalf of its identity.

use axum::{
  Json,
  extract::{Form, Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use talant_core::{
  record::{Record, RecordKind},
  store::RecordStore,
};

use super::parse_id;
use crate::{AppState, auth::CurrentUser, error::Error};

/// `GET /show…`: every record of the kind.
pub async fn list<S, K>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Record<K>>>, Error>
where
  S: RecordStore<K> + 'static,
  K: RecordKind,
{
  Ok(Json(RecordStore::<K>::list(&*state.store).await?))
}

/// `GET /job/{id}`, `GET /ankety/{id}`
pub async fn open<S, K>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Record<K>>, Error>
where
  S: RecordStore<K> + 'static,
  K: RecordKind,
{
  let id = parse_id(&id)?;
  Ok(Json(RecordStore::<K>::open(&*state.store, id).await?))
}

/// `GET /my…`: the caller's own records.
pub async fn mine<S, K>(
  State(state): State<AppState<S>>,
  CurrentUser(who): CurrentUser,
) -> Result<Json<Vec<Record<K>>>, Error>
where
  S: RecordStore<K> + 'static,
  K: RecordKind,
{
  Ok(Json(RecordStore::<K>::owned_by(&*state.store, who.user_id).await?))
}

/// `POST /create…`
pub async fn create<S, K>(
  State(state): State<AppState<S>>,
  CurrentUser(who): CurrentUser,
  WithRejection(Form(fields), _): WithRejection<Form<K>, Error>,
) -> Result<impl IntoResponse, Error>
where
  S: RecordStore<K> + 'static,
  K: RecordKind,
{
  let record = RecordStore::<K>::create(&*state.store, who.user_id, fields).await?;
  tracing::info!(kind = K::NAME, id = %record.id, owner = %who.user_id, "created");
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /job/{id}`, `PUT /ankety/{id}`
pub async fn update<S, K>(
  State(state): State<AppState<S>>,
  CurrentUser(who): CurrentUser,
  Path(id): Path<String>,
  WithRejection(Form(fields), _): WithRejection<Form<K>, Error>,
) -> Result<Json<Record<K>>, Error>
where
  S: RecordStore<K> + 'static,
  K: RecordKind,
{
  let id = parse_id(&id)?;
  let record = RecordStore::<K>::update(&*state.store, id, who.user_id, fields).await?;
  Ok(Json(record))
}

/// `DELETE /job/{id}`, `DELETE /ankety/{id}`
pub async fn delete<S, K>(
  State(state): State<AppState<S>>,
  CurrentUser(who): CurrentUser,
  Path(id): Path<String>,
) -> Result<StatusCode, Error>
where
  S: RecordStore<K> + 'static,
  K: RecordKind,
{
  let id = parse_id(&id)?;
  RecordStore::<K>::delete(&*state.store, id, who.user_id).await?;
  tracing::info!(kind = K::NAME, %id, owner = %who.user_id, "deleted");
  Ok(StatusCode::NO_CONTENT)
}
