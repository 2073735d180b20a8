//! Declarative relevance-pruning rules for the root node.
//!
//! Each per-data-type slot is tied to the `data_type` value that keeps it
//! alive; every other value nulls it. Keeping the rules in one table makes
//! the pruning pass testable independently of the node tree, and pruning
//! is one-directional: a nulled slot is never resurrected within a load.

use super::data::DataType;

/// The prunable per-data-type slots of the root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Tabular,
    Microbiome,
    Metabolomic,
    GeneExpression,
}

/// Which `data_type` value keeps each slot alive.
pub const SLOT_DISCRIMINANTS: &[(Slot, DataType)] = &[
    (Slot::Tabular, DataType::Tabular),
    (Slot::Microbiome, DataType::Microbiome),
    (Slot::Metabolomic, DataType::Metabolomic),
    (Slot::GeneExpression, DataType::GeneExpression),
];

/// Slots to null for the given data type.
pub fn slots_to_clear(data_type: DataType) -> impl Iterator<Item = Slot> {
    SLOT_DISCRIMINANTS
        .iter()
        .filter(move |(_, keep_for)| *keep_for != data_type)
        .map(|(slot, _)| *slot)
}
