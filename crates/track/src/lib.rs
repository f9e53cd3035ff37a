//! Track analysis: classification segments, stroke spans, and resolution
//! of the point that represents a storm at a given moment.

pub mod segment;
pub mod temporal;

pub use segment::{segment, spans, Segment, Span, SpanStyle};
pub use temporal::{resolve_current, TimeCursor};
