//! json-vet-util - Structural helpers over `serde_json::Value`.
//!
//! Deep equality and deep cloning as the validation engine needs them:
//! object comparison is key-order independent, and clones never alias the
//! source tree.

pub mod json_clone;
pub mod json_equal;

// Re-exports for convenience
pub use json_clone::deep_clone;
pub use json_equal::deep_equal;
