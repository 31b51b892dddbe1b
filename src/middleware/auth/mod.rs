//! Request gatekeeping: service key first, then session token.

pub mod service_key;
pub mod session;
