//! Shared types reused across list endpoints.

mod pagination;

pub use pagination::{EventPageResponse, PageParams, PageResponse};
