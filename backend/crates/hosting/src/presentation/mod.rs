//! Presentation Layer
//!
//! HTTP handlers and routing.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use dto::OneOrMany;
pub use extract::PathScope;
pub use handlers::HostingAppState;
pub use router::{entity_routes, hosting_router, hosting_router_generic};
