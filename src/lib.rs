// Shared components
pub mod config;
pub mod error;
pub mod metrics;

// Engine (business logic)
pub mod aggregate;
pub mod alert;
pub mod device;
pub mod template;

// Application layer
pub mod api;
pub mod server;
