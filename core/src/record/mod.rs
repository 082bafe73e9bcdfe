//! record/mod.rs
//! Spool record value types shared by the tag codec and the payload normalizer.

pub mod material;
pub mod color;
pub mod types;
pub mod validate;

pub use material::*;
pub use color::*;
pub use types::*;
pub use validate::{FieldIssue, FieldIssueKind, FloatSpec, IntSpec, StrSpec, specs};
