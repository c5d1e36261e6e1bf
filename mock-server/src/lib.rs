//! In-memory stand-in for the Pakk back-office API.
//!
//! Serves the list, update and create endpoints under a configurable API
//! root and checks the `Authorization` header against one expected value.
//! Records are stored as raw JSON objects keyed by resource name, so any
//! entity shape the client sends is accepted.

use std::{collections::HashMap, mem, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{patch, post},
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub mod query;

use query::ListQuery;

pub const DEFAULT_API_ROOT: &str = "scriptapi/v1";
pub const VALIDATION_FAILED: &str = "validation failed";

/// Records per resource name.
pub type Db = Arc<RwLock<HashMap<String, Vec<Value>>>>;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Clone)]
struct AppState {
    db: Db,
    authorization: Arc<str>,
}

/// A database holding `records` under `resource`.
pub fn seed(resource: &str, records: Vec<Value>) -> Db {
    let mut map = HashMap::new();
    map.insert(resource.to_string(), records);
    Arc::new(RwLock::new(map))
}

/// Empty server under the default root.
pub fn app(authorization: &str) -> Router {
    router(DEFAULT_API_ROOT, authorization, Db::default())
}

pub fn router(api_root: &str, authorization: &str, db: Db) -> Router {
    let state = AppState {
        db,
        authorization: Arc::from(authorization),
    };
    let api = Router::new()
        .route("/get/{resource}", post(list_records))
        .route("/{resource}", post(create_record))
        .route("/{resource}/{id}", patch(update_record))
        .with_state(state);
    Router::new().nest(&format!("/{}", api_root.trim_matches('/')), api)
}

pub async fn run(
    listener: TcpListener,
    api_root: &str,
    authorization: &str,
    db: Db,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router(api_root, authorization, db)).await
}

async fn list_records(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<Json<Vec<Value>>> {
    authorize(&state, &headers)?;
    let query: ListQuery = serde_json::from_str(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid list query: {e}")))?;

    let db = state.db.read().await;
    let records = db.get(&resource).map(Vec::as_slice).unwrap_or_default();
    let page = query::apply(&query, records).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    debug!(%resource, total = records.len(), returned = page.len(), "list");
    Ok(Json(page))
}

async fn update_record(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<Json<Value>> {
    authorize(&state, &headers)?;
    let patch = parse_object(&body)?;
    if patch
        .get("_id")
        .is_some_and(|new_id| new_id.as_str() != Some(id.as_str()))
    {
        return Err(validation_failed());
    }

    let mut db = state.db.write().await;
    let record = db
        .get_mut(&resource)
        .and_then(|records| {
            records
                .iter_mut()
                .find(|record| record["_id"].as_str() == Some(id.as_str()))
        })
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("{resource} not found")))?;

    let Value::Object(fields) = &mut *record else {
        return Err(validation_failed());
    };
    // A patched field must keep its JSON type.
    let type_change = patch.iter().any(|(key, new)| {
        fields
            .get(key)
            .is_some_and(|old| !old.is_null() && !new.is_null() && mem::discriminant(old) != mem::discriminant(new))
    });
    if type_change {
        return Err(validation_failed());
    }
    fields.extend(patch);

    info!(%resource, %id, "updated");
    Ok(Json(record.clone()))
}

async fn create_record(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<(StatusCode, Json<Value>)> {
    authorize(&state, &headers)?;
    let mut fields = parse_object(&body)?;
    if fields.contains_key("_id") {
        return Err(validation_failed());
    }

    let id = new_object_id();
    fields.insert("_id".to_string(), Value::String(id.clone()));
    let record = Value::Object(fields);
    state
        .db
        .write()
        .await
        .entry(resource.clone())
        .or_default()
        .push(record.clone());

    info!(%resource, %id, "created");
    Ok((StatusCode::CREATED, Json(record)))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(&*state.authorization) {
        return Ok(());
    }
    warn!("rejected request with missing or wrong credentials");
    Err((StatusCode::UNAUTHORIZED, "unauthorized".to_string()))
}

fn parse_object(body: &str) -> ApiResult<Map<String, Value>> {
    match serde_json::from_str(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(validation_failed()),
    }
}

fn validation_failed() -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_FAILED.to_string())
}

/// 24 lowercase hex characters, the same shape the real API hands out.
fn new_object_id() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(24);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_object_id_is_24_hex_chars() {
        let id = new_object_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, new_object_id());
    }

    #[test]
    fn parse_object_accepts_only_objects() {
        assert!(parse_object(r#"{"status":"paid"}"#).is_ok());
        for body in ["[1,2]", "\"text\"", "not json", ""] {
            let (status, message) = parse_object(body).unwrap_err();
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(message, VALIDATION_FAILED);
        }
    }

    #[test]
    fn seed_stores_records_under_resource() {
        let db = seed("order", vec![json!({"_id": "a"})]);
        let map = db.try_read().unwrap();
        assert_eq!(map["order"].len(), 1);
        assert!(!map.contains_key("customer"));
    }

    #[test]
    fn authorize_compares_exact_header() {
        let state = AppState {
            db: Db::default(),
            authorization: Arc::from("Bearer s3cret"),
        };
        let mut headers = HeaderMap::new();
        assert!(authorize(&state, &headers).is_err());
        headers.insert(header::AUTHORIZATION, "s3cret".parse().unwrap());
        assert!(authorize(&state, &headers).is_err());
        headers.insert(header::AUTHORIZATION, "Bearer s3cret".parse().unwrap());
        assert!(authorize(&state, &headers).is_ok());
    }
}
