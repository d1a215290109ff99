//! Supply board

use jiff::civil::DateTime;

use crate::{
    supplies::{ConfirmedSupplies, Supply, SupplyId, SupplyStatus},
    time::is_overdue,
};

/// A supply on a board, with its derived status and screen-specific details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry<D = ()> {
    /// Supply record
    pub supply: Supply,

    /// Derived status
    pub status: SupplyStatus,

    /// Enrichment attached by the screen (address, driver contact, ...)
    pub details: D,
}

impl<D> BoardEntry<D> {
    /// Whether the "confirm delivery" action is offered for this entry.
    pub fn can_confirm(&self) -> bool {
        self.status.can_confirm()
    }
}

/// The supplies a screen shows: derived, filtered and ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyBoard<D = ()> {
    entries: Vec<BoardEntry<D>>,
}

impl<D> SupplyBoard<D> {
    /// Build a board from supplies and their details.
    ///
    /// Confirmed supplies scheduled a day or more before `now` are dropped. The
    /// rest are ordered overdue first, then today's, then everything else, each
    /// group by ascending time.
    pub fn build<I>(rows: I, confirmed: &ConfirmedSupplies, now: DateTime) -> Self
    where
        I: IntoIterator<Item = (Supply, D)>,
    {
        let mut entries: Vec<BoardEntry<D>> = rows
            .into_iter()
            .filter_map(|(supply, details)| {
                let is_confirmed = confirmed.contains(supply.id);

                if is_confirmed && is_overdue(supply.time, now) {
                    return None;
                }

                Some(BoardEntry {
                    status: SupplyStatus::derive(supply.time, is_confirmed, now),
                    supply,
                    details,
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.status
                .sort_rank()
                .cmp(&b.status.sort_rank())
                .then_with(|| a.supply.time.cmp(&b.supply.time))
        });

        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[BoardEntry<D>] {
        &self.entries
    }

    /// Find the entry for a supply.
    pub fn get(&self, supply: SupplyId) -> Option<&BoardEntry<D>> {
        self.entries.iter().find(|entry| entry.supply.id == supply)
    }

    /// Flip an entry to [`SupplyStatus::Confirmed`] in place, keeping its position.
    ///
    /// Returns `false` when the supply is not on the board.
    pub fn mark_confirmed(&mut self, supply: SupplyId) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.supply.id == supply)
        else {
            return false;
        };

        entry.status = SupplyStatus::Confirmed;

        true
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D> Default for SupplyBoard<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}
