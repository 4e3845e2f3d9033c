//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the recommendation engine. They provide a clean boundary
//! between the MCP handlers and the data access layer.

mod recommendation_service;

pub use recommendation_service::{RecommendationService, RecommendationServiceImpl};
