//! Identity-provider integration.

mod jwt;

pub use jwt::{JwtConfig, JwtTokenService};
