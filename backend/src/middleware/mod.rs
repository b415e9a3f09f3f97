//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
