//! Cross-cutting helpers for embedding the evaluator in a host application.

pub mod session_cache;

pub use session_cache::SessionCache;
