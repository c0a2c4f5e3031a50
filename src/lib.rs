//! Formwise: constraint-based validation of untrusted input
//!
//! Raw input (strings, string lists and file upload descriptors) is coerced
//! into typed values, assigned to named fields, and checked against ordered
//! constraints. Failed checks are reported as structured data rather than
//! errors, so a host can branch on the outcome and render its own messages.
//!
//! # Core Concepts
//!
//! - **Value**: typed input, a scalar, a list or an upload
//! - **Constraint**: one rule checked against a value, reporting a `Violation`
//! - **Field**: a named value with constraints; stops at the first violation
//! - **Form**: fields validated together; collects every field's violation
//!
//! # Example
//!
//! ```rust
//! use formwise::constraints::{ConstraintKind, ViolationKind};
//! use formwise::{Field, Form};
//!
//! let password = Field::password("password").required().min_length(8);
//! let confirm = Field::password("confirm").required().matches(&password);
//! let mut form = Form::new([
//!     Field::text("email").required().email(),
//!     password,
//!     confirm,
//!     Field::text("website").honey_pot(),
//! ]);
//!
//! form.assign([
//!     ("email", "ada@example.com"),
//!     ("password", "analytical"),
//!     ("confirm", "analytic"),
//! ]);
//!
//! assert!(!form.is_valid());
//! let violation = form.violation("confirm").unwrap();
//! assert_eq!(violation.kind, ViolationKind::InvalidValue);
//! assert_eq!(violation.constraint_kind(), ConstraintKind::Matches);
//! assert_eq!(form.violations().len(), 1);
//! ```

pub mod bytes;
pub mod constraints;
pub mod fields;
pub mod form;
pub mod registry;
pub mod values;

// Re-export commonly used types
pub use constraints::{Constraint, ConstraintKind, Violation, ViolationKind};
pub use fields::{Field, FieldKind};
pub use form::Form;
pub use registry::FormSpec;
pub use values::{PlainValue, UploadDescriptor, UploadErrorCode, Value, ValueKind};
