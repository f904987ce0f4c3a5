//! Request handlers, grouped per resource.

pub mod event_handler;
pub mod user_handler;

pub use event_handler::event_routes;
pub use user_handler::user_routes;
