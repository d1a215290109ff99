//! Confirmed supplies

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::supplies::SupplyId;

/// Supply ids this client has marked delivered.
///
/// Advisory only: the backend's `ready` flag stays the source of truth. Insertion
/// order is preserved so the persisted array stays stable across saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SupplyId>", into = "Vec<SupplyId>")]
pub struct ConfirmedSupplies {
    ordered: Vec<SupplyId>,
    members: FxHashSet<SupplyId>,
}

impl ConfirmedSupplies {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a supply id. Returns `false` when it was already present.
    pub fn insert(&mut self, supply: SupplyId) -> bool {
        if !self.members.insert(supply) {
            return false;
        }

        self.ordered.push(supply);

        true
    }

    /// Whether the supply has been confirmed.
    pub fn contains(&self, supply: SupplyId) -> bool {
        self.members.contains(&supply)
    }

    /// Confirmed ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = SupplyId> + '_ {
        self.ordered.iter().copied()
    }

    /// Number of confirmed supplies.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether nothing has been confirmed.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl From<Vec<SupplyId>> for ConfirmedSupplies {
    fn from(ids: Vec<SupplyId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<ConfirmedSupplies> for Vec<SupplyId> {
    fn from(confirmed: ConfirmedSupplies) -> Self {
        confirmed.ordered
    }
}

impl FromIterator<SupplyId> for ConfirmedSupplies {
    fn from_iter<I: IntoIterator<Item = SupplyId>>(iter: I) -> Self {
        let mut confirmed = Self::new();

        for supply in iter {
            confirmed.insert(supply);
        }

        confirmed
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut confirmed = ConfirmedSupplies::new();

        assert!(confirmed.insert(SupplyId::new(1)));
        assert!(!confirmed.insert(SupplyId::new(1)));

        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed.iter().collect::<Vec<_>>(), vec![SupplyId::new(1)]);
    }

    #[test]
    fn persists_as_json_array_in_insertion_order() -> TestResult {
        let confirmed: ConfirmedSupplies = [3, 1, 2].into_iter().map(SupplyId::new).collect();

        assert_eq!(serde_json::to_string(&confirmed)?, "[3,1,2]");

        Ok(())
    }

    #[test]
    fn duplicate_ids_in_storage_collapse() -> TestResult {
        let confirmed: ConfirmedSupplies = serde_json::from_str("[5,5,6]")?;

        assert_eq!(confirmed.len(), 2);
        assert!(confirmed.contains(SupplyId::new(5)));
        assert!(confirmed.contains(SupplyId::new(6)));

        Ok(())
    }
}
