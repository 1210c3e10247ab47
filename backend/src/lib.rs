//! Orbital Market backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and the SSR page
//! composer; [`inbound`] adapts HTTP requests; [`outbound`] implements the
//! ports and the typed product API client; [`server`] wires it all together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
