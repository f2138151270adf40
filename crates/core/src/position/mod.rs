#![forbid(unsafe_code)]

//! Dense integer ordering within a parent scope.
//!
//! Every ordered entity (lists on a board, cards in a list, checklists on a
//! card, items in a checklist) carries an integer `position`. Live rows of one
//! scope hold exactly the positions `0..count` once a mutation commits. The
//! functions here compute which siblings shift, and by how much, so the
//! storage layer can apply the result as a handful of range updates.

/// Position assigned to a freshly created item: one past the current maximum
/// among live rows, or `0` in an empty scope.
pub fn append_position(current_max: Option<i64>) -> i64 {
    match current_max {
        Some(max) => max + 1,
        None => 0,
    }
}

/// Band of sibling positions displaced by one slot when a single item is
/// reordered within its scope. The moving item itself is never in the band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftBand {
    /// Item moved toward the end: `source < position <= dest` steps back.
    TowardEnd { source: i64, dest: i64 },
    /// Item moved toward the start: `dest <= position < source` steps forward.
    TowardStart { source: i64, dest: i64 },
}

impl ShiftBand {
    /// Offset applied to every position inside the band.
    pub fn delta(self) -> i64 {
        match self {
            ShiftBand::TowardEnd { .. } => -1,
            ShiftBand::TowardStart { .. } => 1,
        }
    }

    /// Whether a sibling resting at `position` is displaced by this shift.
    pub fn contains(self, position: i64) -> bool {
        match self {
            ShiftBand::TowardEnd { source, dest } => position > source && position <= dest,
            ShiftBand::TowardStart { source, dest } => position >= dest && position < source,
        }
    }
}

/// Band for moving one item from `source` to `dest` inside one scope.
/// `None` when the indices coincide and nothing may be written.
pub fn delta_shift(source: i64, dest: i64) -> Option<ShiftBand> {
    match dest.cmp(&source) {
        std::cmp::Ordering::Greater => Some(ShiftBand::TowardEnd { source, dest }),
        std::cmp::Ordering::Less => Some(ShiftBand::TowardStart { source, dest }),
        std::cmp::Ordering::Equal => None,
    }
}

/// A card relocation, resolved once at the request boundary.
///
/// The single move entry point accepts both same-list and cross-list drags;
/// which algorithm runs is decided here, not inside the shift logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardMove {
    /// Source and destination coincide; no row may change.
    Stay { card_id: i64, list_id: i64, position: i64 },
    /// Reorder within one list via a band shift.
    Within {
        card_id: i64,
        list_id: i64,
        source: i64,
        dest: i64,
    },
    /// Relocate across lists: close the source gap, open a destination slot,
    /// rewrite the card strictly last.
    Across {
        card_id: i64,
        source_list_id: i64,
        dest_list_id: i64,
        source: i64,
        dest: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    NonPositiveId,
    NegativePosition,
}

impl CardMove {
    pub fn classify(
        card_id: i64,
        source_list_id: i64,
        dest_list_id: i64,
        source: i64,
        dest: i64,
    ) -> Result<Self, MoveError> {
        if card_id <= 0 || source_list_id <= 0 || dest_list_id <= 0 {
            return Err(MoveError::NonPositiveId);
        }
        if source < 0 || dest < 0 {
            return Err(MoveError::NegativePosition);
        }
        if source_list_id != dest_list_id {
            return Ok(CardMove::Across {
                card_id,
                source_list_id,
                dest_list_id,
                source,
                dest,
            });
        }
        if source == dest {
            return Ok(CardMove::Stay {
                card_id,
                list_id: dest_list_id,
                position: dest,
            });
        }
        Ok(CardMove::Within {
            card_id,
            list_id: dest_list_id,
            source,
            dest,
        })
    }
}

/// One `(id, position)` pair of a caller-supplied complete ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderEntry {
    pub id: i64,
    pub position: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkOrderError {
    Empty,
    NonPositiveId { index: usize },
    NegativePosition { index: usize },
}

/// Shape check for a bulk reorder payload. The caller is trusted to submit a
/// dense permutation covering the whole scope; no recomputation happens here.
pub fn validate_bulk_order(entries: &[OrderEntry]) -> Result<(), BulkOrderError> {
    if entries.is_empty() {
        return Err(BulkOrderError::Empty);
    }
    for (index, entry) in entries.iter().enumerate() {
        if entry.id <= 0 {
            return Err(BulkOrderError::NonPositiveId { index });
        }
        if entry.position < 0 {
            return Err(BulkOrderError::NegativePosition { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
