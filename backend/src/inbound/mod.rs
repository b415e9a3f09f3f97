//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The GraphQL schema lives under [`graphql`]; the actix handlers mounting
//! it (and the health probes) live under [`http`].

pub mod graphql;
pub mod http;
