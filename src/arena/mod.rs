//! Remote channel API: data shapes, item classification and the HTTP gateway.

pub mod api;
pub mod classify;
pub mod models;
