//! Multi-step workflows behind the thin route handlers.

pub mod discovery;
pub mod scan;
