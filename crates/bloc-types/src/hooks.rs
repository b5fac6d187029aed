//! Host-facing block capabilities.
//!
//! The compiler never calls these; it only carries them from an entry to its
//! block schema so the editor runtime can.

use serde_json::Value;

/// Read access to a live block in the host editor.
pub trait BlockView {
    /// The block type (the entry name it was compiled from).
    fn block_type(&self) -> &str;

    /// Current value of the named widget, rendered as text.
    fn field_value(&self, name: &str) -> Option<String>;

    /// Generated code of the block attached to the named input, if any.
    fn input_code(&self, name: &str) -> Option<String>;
}

/// Lifecycle hooks of a block whose state or shape can change at runtime.
///
/// A block without hooks persists no extra state and cannot be reshaped
/// by the user. Every hook defaults to a no-op, so implementors override
/// only what their block needs.
pub trait Mutable: Send + Sync {
    /// Extra state to persist with the block, beyond its field values.
    fn save_extra_state(&self, _block: &dyn BlockView) -> Option<Value> {
        None
    }

    /// Restore state previously produced by [`Mutable::save_extra_state`].
    fn load_extra_state(&self, _block: &mut dyn BlockView, _state: &Value) {}

    /// Rebuild the block's inputs after its state changed.
    fn update_shape(&self, _block: &mut dyn BlockView) {}

    /// Remember which blocks are attached before the shape is recomposed.
    fn save_connections(&self, _container: &dyn BlockView) {}

    /// Apply an edited mutator container to the block.
    fn compose(&self, _block: &mut dyn BlockView, _container: &dyn BlockView) {}

    /// Describe the mutator container to show for the block.
    fn decompose(&self, _block: &dyn BlockView) -> Option<Value> {
        None
    }

    /// React to a workspace event touching the block.
    fn on_change(&self, _block: &mut dyn BlockView, _event: &Value) {}
}
