//! bloc layout: turns an entry's field template into input rows.
//!
//! ```text
//! [Field] → ConnectionType resolution → row state machine → [Row] + connection names
//! ```

pub mod connection;
pub mod engine;
pub mod error;
pub mod row;

pub use connection::{ConnectionType, SUPPORTED_TAGS};
pub use engine::{
    lay_out, Cursor, Layout, LayoutConfig, LayoutEngine, UnknownFieldPolicy, DEFAULT_HELP_ICON,
};
pub use error::{LayoutError, LayoutResult};
pub use row::{Fragment, Row, RowInput, Shadow};
