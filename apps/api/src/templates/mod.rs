//! Template catalog: a fixed, closed set of resume templates served read-only.

pub mod catalog;
pub mod handlers;
