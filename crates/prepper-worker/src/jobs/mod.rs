//! Built-in job implementations.

pub mod expiration;

pub use expiration::ExpirationDigestJob;
