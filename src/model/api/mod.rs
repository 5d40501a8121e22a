//! API-compatible types: request bodies and response shapes that are not
//! simply canonical records.

pub mod auth;
pub mod ballot;
