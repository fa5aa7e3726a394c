//! Auth gate: bearer tokens, salted password hashes, and the route
//! middleware guarding the protected namespace.

pub mod middleware;
pub mod password;
pub mod token;

pub use token::{Claims, TokenIssuer};
