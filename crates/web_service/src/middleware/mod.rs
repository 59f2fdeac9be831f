pub mod request_context;
pub mod tracing_middleware;

pub use request_context::RequestContext;
pub use tracing_middleware::{extract_trace_id, TraceId, TracingMiddleware};
