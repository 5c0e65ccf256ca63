//! API Handlers
//!
//! HTTP request handlers exposing the cache facade and its diagnostics.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{decode_bytes, decode_float, decode_int, decode_str, Cache, Lookup};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CallsResponse, DecodeAs, GetQuery, GetResponse, HealthResponse, ReplayResponse, StoreRequest,
    StoreResponse,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache facade over the shared backing store
    pub cache: Arc<Cache<MemoryStore>>,
    /// Largest text or bytes payload accepted by `PUT /store`
    pub max_value_size: usize,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache<MemoryStore>, max_value_size: usize) -> Self {
        Self {
            cache: Arc::new(cache),
            max_value_size,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds a fresh in-memory backing store and the cache over it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::new(Arc::new(MemoryStore::new()))?;
        Ok(Self::new(cache, config.max_value_size))
    }
}

/// Handler for PUT /store
///
/// Stores a tagged value through the instrumented store operation.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate(state.max_value_size) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = state.cache.store(req.into_value())?;

    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Reads a value, decoding it when `decode` is given.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    let cache = &state.cache;
    let value = match query.decode {
        Some(DecodeAs::Int) => cache.get_with(&key, decode_int)?.map(Value::from),
        Some(DecodeAs::Str) => cache.get_with(&key, decode_str)?.map(Value::from),
        Some(DecodeAs::Float) => cache.get_with(&key, decode_float)?.map(Value::from),
        Some(DecodeAs::Bytes) | None => cache.get_with(&key, decode_bytes)?.map(Value::from),
    };

    match value {
        Lookup::Found(value) => Ok(Json(GetResponse::new(key, value))),
        Lookup::NotFound => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /calls/:name
///
/// Returns the call counter of an instrumented operation.
pub async fn calls_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CallsResponse>> {
    let calls = state.cache.call_count(&name)?;

    Ok(Json(CallsResponse { name, calls }))
}

/// Handler for GET /replay/:name
///
/// Returns the recorded history of an instrumented operation.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ReplayResponse>> {
    let replay = state.cache.replay(&name)?;

    Ok(Json(ReplayResponse::from(replay)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
