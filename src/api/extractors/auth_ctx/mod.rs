/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the identity attached by the session-token gate to handlers
 * - axum wiring lives in core, the plain types in types
 *
 * Public API:
 * - RequestIdentity
 * - AuthUser
 */

mod core;
mod types;

pub use core::AuthUser;
pub use types::RequestIdentity;
