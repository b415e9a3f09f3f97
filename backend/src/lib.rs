//! Learning-platform backend library.
//!
//! Users progress through paths of modules, track learned concepts, manage
//! characters, and maintain friendships, all through a single GraphQL
//! endpoint. Modules follow a hexagonal split: `domain` holds entities,
//! services, and ports; `inbound` the GraphQL/HTTP adapters; `outbound` the
//! PostgreSQL and credential adapters.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
