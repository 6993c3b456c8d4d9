//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and response hardening.

pub mod security_headers;
pub mod trace;

pub use security_headers::SecurityHeaders;
pub use trace::Trace;
