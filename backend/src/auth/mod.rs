//! Authentication module
//!
//! Verifies bearer tokens issued by the external auth provider.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtKeys, JwtService};
pub use middleware::AuthUser;
