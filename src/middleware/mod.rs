/*
 * Responsibility
 * - middleware entry points (re-export)
 * - auth gates + HTTP-level hygiene
 */
pub mod auth;
pub mod http;
