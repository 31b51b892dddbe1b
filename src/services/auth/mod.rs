pub mod claims;
pub mod clock;
pub mod codec;
pub mod factory;
pub mod service_key;
pub mod session_tokens;

pub use claims::UserId;
pub use factory::{build_service_key, build_session_tokens};
pub use service_key::ServiceKey;
pub use session_tokens::SessionTokens;
