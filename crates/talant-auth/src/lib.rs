//! Session tokens and password hashing for Talant.
//!
//! - [`TokenService`] issues and validates HS256-signed session tokens. It
//!   holds no session table: a token's validity is computed from its bytes,
//!   the signing secret and the clock.
//! - [`password`] wraps argon2 for hashing and verifying account passwords.

pub mod error;
pub mod password;
pub mod token;

pub use error::{PasswordError, TokenError};
pub use token::{Claims, SessionIdentity, TokenService};
