#![forbid(unsafe_code)]

mod seen_set;
mod selection;

pub use seen_set::SeenSet;
pub use selection::Selection;

/// Tracking state owned by the reconciliation engine for the whole run.
#[derive(Debug, Default)]
pub struct EngineState {
    pub seen: SeenSet,
    pub selection: Selection,
}
