use tosqla_core::Index;

use crate::model::ColumnRecord;

/// Folds single-column indexes into column flags.
///
/// Works over an immutable view of the table's indexes and records which
/// ones were consumed; the leftovers come back from [`IndexReconciler::remaining`].
#[derive(Debug)]
pub struct IndexReconciler<'a> {
    indexes: &'a [Index],
    consumed: Vec<bool>,
}

impl<'a> IndexReconciler<'a> {
    pub fn new(indexes: &'a [Index]) -> Self {
        Self {
            indexes,
            consumed: vec![false; indexes.len()],
        }
    }

    /// Consume the first unconsumed single-column index on `column`.
    ///
    /// Returns `true` when an index was folded into the column flags. Later
    /// single-column indexes on the same column are left alone.
    pub fn reconcile(&mut self, column: &mut ColumnRecord) -> bool {
        let indexes = self.indexes;
        let matched = indexes.iter().enumerate().find(|(pos, index)| {
            !self.consumed[*pos] && index.single_column() == Some(column.name.as_str())
        });

        match matched {
            Some((pos, index)) => {
                column.index = true;
                column.unique = index.is_unique;
                self.consumed[pos] = true;
                true
            }
            None => false,
        }
    }

    /// Indexes that were not folded into any column, in input order.
    pub fn remaining(self) -> Vec<Index> {
        self.indexes
            .iter()
            .zip(self.consumed)
            .filter(|(_, consumed)| !consumed)
            .map(|(index, _)| index.clone())
            .collect()
    }
}
