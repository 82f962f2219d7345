//! json-vet — schema-driven JSON validation with path-addressed diagnostics.
//!
//! Given a JSON-like value and a declarative schema document, the engine
//! decides whether the value conforms and, if not, produces a flat,
//! ordered list of violations, each addressed to the exact sub-instance
//! that failed (`instance.items[2].name`).
//!
//! Validation failures are values in a [`ValidationResult`]; defects in the
//! schema document itself ([`SchemaError`]) are raised immediately instead,
//! so a malformed schema can never silently report "valid".
//!
//! Validation may write a sub-schema's declared `default` into the instance
//! it is given; that is the engine's only side effect and can be switched
//! off via [`ValidatorOptions::apply_defaults`].
//!
//! # Example
//!
//! ```
//! use json_vet::validate;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "properties": {
//!         "name": {"type": "string", "required": true},
//!         "port": {"type": "integer", "minimum": 1, "maximum": 65535}
//!     }
//! });
//!
//! let mut instance = json!({"name": "gateway", "port": 70000});
//! let result = validate(&mut instance, &schema).unwrap();
//! assert!(!result.valid());
//! assert_eq!(result.errors()[0].property, "instance.port");
//! ```

pub mod context;
pub mod error;
pub mod formats;
mod keywords;
pub mod result;
pub mod types;
pub mod validator;

// Re-export the core public API
pub use context::Context;
pub use error::SchemaError;
pub use formats::{Format, FormatRegistry, FormatVerdict};
pub use result::{ErrorKind, ValidationError, ValidationResult};
pub use types::matches_primitive;
pub use validator::{validate, Validator, ValidatorOptions};
