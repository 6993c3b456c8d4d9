//! Vidensbank: a Danish knowledge base on food, climate and organic
//! farming, with a CO2 calculator, member accounts and a contact form.
//!
//! The crate follows a hexagonal layout: `domain` holds types, services
//! and ports; `inbound` adapts HTTP onto the driving ports; `outbound`
//! implements the driven ports over PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
