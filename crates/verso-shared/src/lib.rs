//! # Verso Shared
//!
//! Wire types shared between the API server and its clients: request
//! payloads, response projections, and the error document format.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
