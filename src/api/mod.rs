//! API Module
//!
//! HTTP handlers and routing for the cache facade.
//!
//! # Endpoints
//! - `PUT /store` - Store a tagged value
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /calls/:name` - Call counter of an operation
//! - `GET /replay/:name` - Call history of an operation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
