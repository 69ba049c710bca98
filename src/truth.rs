//! Copies ground-truth quality labels onto matching table entries.

use tracing::info;

use crate::corpus::TokenId;
use crate::table::PatternTable;

/// A labeled phrase from a ground-truth list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthPattern {
    pub tokens: Vec<TokenId>,
    pub label: bool,
}

impl TruthPattern {
    pub fn new(tokens: Vec<TokenId>, label: bool) -> Self {
        Self { tokens, label }
    }
}

/// Label every table entry that appears in `truth` and return how many truth
/// entries were found. Entries the miner never kept are skipped.
pub fn recognize(table: &mut PatternTable, truth: &[TruthPattern]) -> usize {
    info!(loaded = truth.len(), "loaded truth patterns");
    let mut recognized = 0;
    for entry in truth {
        if let Some(id) = table.lookup(&entry.tokens) {
            table.get_mut(id).label = Some(entry.label);
            recognized += 1;
        }
    }
    info!(recognized, "recognized truth patterns");
    recognized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fixture;

    #[test]
    fn test_labels_copied_for_known_patterns() {
        let mut fx = fixture(&["support vector machine", "the machine"], 3);
        let truth = vec![
            TruthPattern::new(fx.ids("support vector"), true),
            TruthPattern::new(fx.ids("the machine"), false),
            TruthPattern::new(vec![1000, 1001], true),
        ];
        let found = recognize(&mut fx.table, &truth);
        assert_eq!(found, 2);
        assert!(found <= truth.len());
        assert_eq!(fx.table.get(fx.id_of("support vector")).label, Some(true));
        assert_eq!(fx.table.get(fx.id_of("the machine")).label, Some(false));
        assert_eq!(fx.table.get(fx.id_of("vector machine")).label, None);
    }

    #[test]
    fn test_empty_truth_set() {
        let mut fx = fixture(&["a b c"], 2);
        assert_eq!(recognize(&mut fx.table, &[]), 0);
        assert!(fx.table.patterns().iter().all(|p| p.label.is_none()));
    }
}
