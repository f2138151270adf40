use super::*;

// Applies a band shift plus the final placement to an in-memory scope,
// mirroring what the storage layer does with range updates.
fn apply_within(order: &mut [(char, i64)], moving: char, source: i64, dest: i64) {
    let band = delta_shift(source, dest);
    for (name, position) in order.iter_mut() {
        if *name == moving {
            *position = dest;
        } else if let Some(band) = band
            && band.contains(*position)
        {
            *position += band.delta();
        }
    }
}

fn sorted(order: &[(char, i64)]) -> Vec<(char, i64)> {
    let mut out = order.to_vec();
    out.sort_by_key(|(_, position)| *position);
    out
}

#[test]
fn append_lands_last() {
    assert_eq!(append_position(None), 0);
    assert_eq!(append_position(Some(0)), 1);
    assert_eq!(append_position(Some(6)), 7);
}

#[test]
fn equal_indices_produce_no_band() {
    assert_eq!(delta_shift(2, 2), None);
}

#[test]
fn band_toward_end_covers_strictly_after_source_through_dest() {
    let band = delta_shift(1, 3).unwrap();
    assert_eq!(band, ShiftBand::TowardEnd { source: 1, dest: 3 });
    assert_eq!(band.delta(), -1);
    assert!(!band.contains(0));
    assert!(!band.contains(1));
    assert!(band.contains(2));
    assert!(band.contains(3));
    assert!(!band.contains(4));
}

#[test]
fn band_toward_start_covers_dest_through_strictly_before_source() {
    let band = delta_shift(3, 0).unwrap();
    assert_eq!(band, ShiftBand::TowardStart { source: 3, dest: 0 });
    assert_eq!(band.delta(), 1);
    assert!(band.contains(0));
    assert!(band.contains(1));
    assert!(band.contains(2));
    assert!(!band.contains(3));
}

#[test]
fn moving_later_reorders_like_a_drag_down() {
    let mut order = [('a', 0), ('b', 1), ('c', 2), ('d', 3)];
    apply_within(&mut order, 'b', 1, 3);
    assert_eq!(sorted(&order), vec![('a', 0), ('c', 1), ('d', 2), ('b', 3)]);
}

#[test]
fn moving_earlier_reorders_like_a_drag_up() {
    let mut order = [('a', 0), ('b', 1), ('c', 2), ('d', 3)];
    apply_within(&mut order, 'd', 3, 0);
    assert_eq!(sorted(&order), vec![('d', 0), ('a', 1), ('b', 2), ('c', 3)]);
}

#[test]
fn classify_branches_on_scope_equality() {
    assert_eq!(
        CardMove::classify(7, 1, 1, 2, 2).unwrap(),
        CardMove::Stay {
            card_id: 7,
            list_id: 1,
            position: 2
        }
    );
    assert_eq!(
        CardMove::classify(7, 1, 1, 0, 2).unwrap(),
        CardMove::Within {
            card_id: 7,
            list_id: 1,
            source: 0,
            dest: 2
        }
    );
    assert_eq!(
        CardMove::classify(7, 1, 2, 0, 0).unwrap(),
        CardMove::Across {
            card_id: 7,
            source_list_id: 1,
            dest_list_id: 2,
            source: 0,
            dest: 0
        }
    );
}

#[test]
fn classify_rejects_malformed_requests() {
    assert_eq!(
        CardMove::classify(0, 1, 2, 0, 0).unwrap_err(),
        MoveError::NonPositiveId
    );
    assert_eq!(
        CardMove::classify(7, -1, 2, 0, 0).unwrap_err(),
        MoveError::NonPositiveId
    );
    assert_eq!(
        CardMove::classify(7, 1, 2, -1, 0).unwrap_err(),
        MoveError::NegativePosition
    );
    assert_eq!(
        CardMove::classify(7, 1, 2, 0, -3).unwrap_err(),
        MoveError::NegativePosition
    );
}

#[test]
fn bulk_order_shape_checks() {
    assert_eq!(validate_bulk_order(&[]).unwrap_err(), BulkOrderError::Empty);
    assert_eq!(
        validate_bulk_order(&[
            OrderEntry { id: 1, position: 0 },
            OrderEntry { id: 0, position: 1 }
        ])
        .unwrap_err(),
        BulkOrderError::NonPositiveId { index: 1 }
    );
    assert_eq!(
        validate_bulk_order(&[OrderEntry { id: 1, position: -1 }]).unwrap_err(),
        BulkOrderError::NegativePosition { index: 0 }
    );
    assert!(
        validate_bulk_order(&[
            OrderEntry { id: 3, position: 0 },
            OrderEntry { id: 1, position: 1 },
            OrderEntry { id: 2, position: 2 }
        ])
        .is_ok()
    );
}
