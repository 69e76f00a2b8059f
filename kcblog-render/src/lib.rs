//! # kcblog-render
//!
//! Page rendering for kcblog.
//!
//! Pages are rendered by substituting named placeholders (`$name` or
//! `${name}`) in a plain HTML template. There is no logic in templates.

pub mod templates;

pub use templates::{PageTemplate, Template, TemplateError};
