//! SSE HTTP handler for the web layer.
//!
//! This module contains only the Axum handler for the incremental endpoint.
//! The producer task and event conversion live in the `sse` crate.

pub(crate) mod handler;
