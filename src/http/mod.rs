//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with all service endpoints
//! - Extraction handlers (single and batch)
//! - LRU caption result cache with memory limits
//! - JSON error bodies shared by every endpoint
//! - CORS middleware

pub mod cache;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
