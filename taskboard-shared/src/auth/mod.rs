//! Authentication and authorization utilities.
//!
//! - [`password`]: Argon2id hashing and verification (the opaque
//!   credential verifier)
//! - [`jwt`]: bearer token issuance and validation (the opaque credential
//!   issuer)
//! - [`authorization`]: board/task/comment access checks built on the
//!   membership model

pub mod authorization;
pub mod jwt;
pub mod password;
