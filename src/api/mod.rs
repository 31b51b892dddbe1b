/*
 * Responsibility
 * - HTTP surface: routes, handlers, DTOs, extractors, landing page
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod landing;
mod routes;

pub use routes::routes;
