//! Request handler module
//!
//! Routes requests to the home page, the contact endpoint, static assets
//! and health probes.

pub mod contact;
pub mod home;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
