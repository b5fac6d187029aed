//! The template layout engine.
//!
//! A single left-to-right pass over an entry's fields with one cursor that
//! is either [`Cursor::NoCurrentRow`] or [`Cursor::HasCurrentRow`]:
//!
//! ```text
//! text     → open dummy row if none; first segment continues the row,
//!            every further '\n' segment commits it and opens a new dummy row
//! widget   → open dummy row if none; append a fresh widget instance
//! any/typed connection
//!          → commit row; emit value row; current = fresh dummy row
//! void connection
//!          → commit row; current = statement row (later fields continue it)
//! end      → open dummy row if none; append help; commit
//! ```

use bloc_types::{Field, TypedConnection, WidgetField};
use serde::{Deserialize, Serialize};

use crate::connection::ConnectionType;
use crate::error::{LayoutError, LayoutResult};
use crate::row::{Row, Shadow};

/// Asset shown by the help affordance unless configured otherwise.
pub const DEFAULT_HELP_ICON: &str = "media/help.svg";

/// What to do with a template element that is not a known field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Abort the entry.
    #[default]
    FailFast,
    /// Skip the element and keep going; the index is reported in
    /// [`Layout::skipped`].
    Permissive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub help_icon: String,
    pub unknown_fields: UnknownFieldPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            help_icon: DEFAULT_HELP_ICON.to_string(),
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }
}

/// The laid-out template of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub rows: Vec<Row>,
    /// Connection names in template order, duplicates included.
    pub connections: Vec<String>,
    /// Template indices skipped under [`UnknownFieldPolicy::Permissive`].
    pub skipped: Vec<usize>,
}

/// Lay out a whole template.
pub fn lay_out(template: &[Field], config: &LayoutConfig) -> LayoutResult<Layout> {
    let mut engine = LayoutEngine::new(config);
    for (index, field) in template.iter().enumerate() {
        engine.feed(index, field)?;
    }
    Ok(engine.finish())
}

// ══════════════════════════════════════════════════════════════════════════════
// Cursor
// ══════════════════════════════════════════════════════════════════════════════

/// The row currently receiving labels and widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Cursor {
    NoCurrentRow,
    HasCurrentRow(Row),
}

impl Cursor {
    /// The current row, opening a dummy row first if there is none.
    fn row(&mut self) -> &mut Row {
        if let Cursor::NoCurrentRow = self {
            *self = Cursor::HasCurrentRow(Row::dummy());
        }
        match self {
            Cursor::HasCurrentRow(row) => row,
            Cursor::NoCurrentRow => unreachable!("a row was just opened"),
        }
    }

    fn take(&mut self) -> Option<Row> {
        match std::mem::replace(self, Cursor::NoCurrentRow) {
            Cursor::HasCurrentRow(row) => Some(row),
            Cursor::NoCurrentRow => None,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// LayoutEngine
// ══════════════════════════════════════════════════════════════════════════════

/// Incremental form of [`lay_out`], fed one field at a time.
pub struct LayoutEngine<'c> {
    config: &'c LayoutConfig,
    cursor: Cursor,
    /// Committed rows.
    rows: Vec<Row>,
    connections: Vec<String>,
    skipped: Vec<usize>,
}

impl<'c> LayoutEngine<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            cursor: Cursor::NoCurrentRow,
            rows: Vec::new(),
            connections: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Rows committed so far; excludes the current row.
    pub fn committed(&self) -> &[Row] {
        &self.rows
    }

    /// Process the field at template position `index`.
    pub fn feed(&mut self, index: usize, field: &Field) -> LayoutResult<()> {
        match field {
            Field::Text(text) => self.text(&text.text),
            Field::Widget(widget) => self.widget(widget),
            Field::Connection(conn) => self
                .connection(&conn.blockly_input)
                .map_err(|e| e.at_field(index))?,
            Field::Unrecognized(_) => match self.config.unknown_fields {
                UnknownFieldPolicy::FailFast => {
                    return Err(LayoutError::UnknownField { field: index })
                }
                UnknownFieldPolicy::Permissive => self.skipped.push(index),
            },
        }
        Ok(())
    }

    /// Close the pass: the help affordance goes on the current row.
    pub fn finish(mut self) -> Layout {
        self.cursor.row().push_help(self.config.help_icon.as_str());
        self.commit();
        Layout {
            rows: self.rows,
            connections: self.connections,
            skipped: self.skipped,
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────

    fn text(&mut self, text: &str) {
        let mut segments = text.split('\n').map(|s| s.strip_suffix('\r').unwrap_or(s));
        if let Some(first) = segments.next() {
            self.cursor.row().push_label(first);
        }
        for segment in segments {
            self.open(Row::dummy());
            self.cursor.row().push_label(segment);
        }
    }

    fn widget(&mut self, widget: &WidgetField) {
        let instance = widget.field.create();
        self.cursor.row().push_widget(widget.name.as_str(), instance);
    }

    fn connection(&mut self, connection: &TypedConnection) -> LayoutResult<()> {
        let ty = ConnectionType::resolve(connection)?;
        let shadow = connection.shadow.as_ref().map(|block_type| Shadow {
            block_type: block_type.clone(),
        });
        self.connections.push(connection.name.clone());

        if ty.is_statement() {
            self.open(Row::statement(connection.name.as_str(), shadow));
        } else {
            self.commit();
            self.rows
                .push(Row::value(connection.name.as_str(), ty.check(), shadow));
            self.cursor = Cursor::HasCurrentRow(Row::dummy());
        }
        Ok(())
    }

    // ── Row bookkeeping ──────────────────────────────────────────────────

    fn commit(&mut self) {
        if let Some(row) = self.cursor.take() {
            self.rows.push(row);
        }
    }

    fn open(&mut self, row: Row) {
        self.commit();
        self.cursor = Cursor::HasCurrentRow(row);
    }
}
