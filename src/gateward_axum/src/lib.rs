//! Axum bindings for the authentication gateway: credential extraction
//! from headers/query/cookies, the wire DTOs, and one route per operation.

pub mod extract;
pub mod responses;
pub mod routes;
