//! Shared types for the bloc compiler.
//!
//! This crate defines the vocabulary model (categories, entries, fields),
//! the host-facing block capabilities (widgets, lifecycle hooks, code
//! generators), and the structured diagnostics used by every stage.

mod error;
mod origin;
pub mod generator;
pub mod hooks;
pub mod vocab;
pub mod widget;

pub use error::{BlocError, Diagnostics, ErrorCategory, ErrorCode, Severity, MAX_ERRORS};
pub use generator::{CodeGenerator, Generator, TemplateGenerator};
pub use hooks::{BlockView, Mutable};
pub use origin::Origin;
pub use vocab::{
    Category, ConnectionField, Entry, Field, TextField, TypedConnection, WidgetField,
    DEFAULT_COLOR,
};
pub use widget::{FieldWidget, WidgetFactory, WidgetSource};
