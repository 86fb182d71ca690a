//! Property-based tests for the sequence API, checked against a `Vec` model.

use linked_sequence::{Sequence, SequenceError};
use proptest::prelude::*;

// =============================================================================
// Test helpers
// =============================================================================

/// A random sequence operation, with positions and counts drawn from ranges
/// wide enough to land out of bounds regularly.
#[derive(Clone, Debug)]
enum SeqOp {
    PushBack(i32),
    PopBack,
    Insert { position: usize, value: i32 },
    Erase { position: usize, count: usize },
    Set { position: usize, value: i32 },
    Clear,
}

fn arbitrary_seq_op() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        4 => any::<i32>().prop_map(SeqOp::PushBack),
        2 => Just(SeqOp::PopBack),
        3 => (0usize..40, any::<i32>())
            .prop_map(|(position, value)| SeqOp::Insert { position, value }),
        3 => (0usize..40, 0usize..8)
            .prop_map(|(position, count)| SeqOp::Erase { position, count }),
        2 => (0usize..40, any::<i32>())
            .prop_map(|(position, value)| SeqOp::Set { position, value }),
        1 => Just(SeqOp::Clear),
    ]
}

/// Apply `op` to the sequence and to the model, asserting that the sequence
/// accepts exactly the operations the model's bounds allow.
fn apply_seq_op(seq: &mut Sequence<i32>, model: &mut Vec<i32>, op: &SeqOp) {
    let len = model.len();
    match *op {
        SeqOp::PushBack(value) => {
            seq.push_back(value);
            model.push(value);
        }
        SeqOp::PopBack => match model.pop() {
            Some(value) => assert_eq!(seq.pop_back(), Ok(value)),
            None => assert_eq!(seq.pop_back(), Err(SequenceError::Empty)),
        },
        SeqOp::Insert { position, value } => {
            let result = seq.insert(position, value);
            if position <= len {
                assert_eq!(result, Ok(()));
                model.insert(position, value);
            } else {
                assert_eq!(
                    result,
                    Err(SequenceError::OutOfRange { position, len })
                );
            }
        }
        SeqOp::Erase { position, count } => {
            let result = seq.erase(position, count);
            if position < len && position + count <= len {
                assert_eq!(result, Ok(()));
                model.drain(position..position + count);
            } else {
                assert_eq!(
                    result,
                    Err(SequenceError::OutOfRange { position, len })
                );
            }
        }
        SeqOp::Set { position, value } => match seq.at_mut(position) {
            Ok(element) => {
                assert!(position < len);
                *element = value;
                model[position] = value;
            }
            Err(err) => {
                assert!(position >= len);
                assert_eq!(err, SequenceError::OutOfRange { position, len });
            }
        },
        SeqOp::Clear => {
            seq.clear();
            model.clear();
        }
    }
}

fn render_model(model: &[i32]) -> String {
    let inner = model
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("<{inner}>")
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Random operation sequences keep the sequence in lockstep with a `Vec`
    /// model: same contents, same length, same rendering.
    #[test]
    fn behaves_like_vec_model(ops in prop::collection::vec(arbitrary_seq_op(), 0..64)) {
        let mut seq = Sequence::new();
        let mut model = Vec::new();

        for op in &ops {
            apply_seq_op(&mut seq, &mut model, op);
        }

        prop_assert_eq!(seq.len(), model.len());
        prop_assert_eq!(seq.is_empty(), model.is_empty());
        prop_assert_eq!(Vec::from_iter(seq.iter().copied()), model.clone());
        prop_assert_eq!(seq.render(), render_model(&model));
    }

    /// `len() == 0` iff `is_empty()`.
    #[test]
    fn empty_iff_len_zero(values in prop::collection::vec(any::<i32>(), 0..32)) {
        let seq = Sequence::from_iter(values);
        prop_assert_eq!(seq.len() == 0, seq.is_empty());
    }

    /// A clone has the same length and elements, and mutating either side
    /// never changes the other.
    #[test]
    fn clone_round_trip_is_independent(
        values in prop::collection::vec(any::<i32>(), 0..32),
        value in any::<i32>(),
    ) {
        let original = Sequence::from_iter(values.iter().copied());
        let mut copy = original.clone();

        prop_assert_eq!(copy.len(), original.len());
        for (position, expected) in values.iter().enumerate() {
            prop_assert_eq!(copy.at(position), Ok(expected));
        }

        copy.push_back(value);
        if let Ok(element) = copy.at_mut(0) {
            *element = element.wrapping_add(1);
        }
        prop_assert_eq!(Vec::from_iter(original.iter().copied()), values);
    }

    /// `clear` is idempotent: both calls leave the sequence empty, no error.
    #[test]
    fn clear_twice(values in prop::collection::vec(any::<i32>(), 0..32)) {
        let mut seq = Sequence::from_iter(values);
        seq.clear();
        prop_assert_eq!(seq.len(), 0);
        seq.clear();
        prop_assert_eq!(seq.len(), 0);
    }

    /// `insert(p, v)` followed by `erase(p, 1)` restores the original
    /// contents, for every valid position.
    #[test]
    fn insert_then_erase_restores(
        values in prop::collection::vec(any::<i32>(), 0..32),
        position_pct in 0.0..=1.0f64,
        value in any::<i32>(),
    ) {
        let original = Sequence::from_iter(values.iter().copied());
        let mut seq = original.clone();
        let position = ((position_pct * values.len() as f64) as usize).min(values.len());

        seq.insert(position, value).unwrap();
        seq.erase(position, 1).unwrap();
        prop_assert_eq!(seq, original);
    }

    /// Boundary behavior: `at(len)` and `erase(len, 0)` are out of range for
    /// every sequence, while `erase(p, 0)` at a valid position is a no-op.
    #[test]
    fn boundary_positions(values in prop::collection::vec(any::<i32>(), 0..32)) {
        let mut seq = Sequence::from_iter(values.iter().copied());
        let len = seq.len();

        prop_assert_eq!(seq.at(len), Err(SequenceError::OutOfRange { position: len, len }));
        prop_assert_eq!(
            seq.erase(len, 0),
            Err(SequenceError::OutOfRange { position: len, len })
        );

        for position in 0..len {
            prop_assert_eq!(seq.erase(position, 0), Ok(()));
            prop_assert_eq!(seq.len(), len);
        }
        prop_assert_eq!(Vec::from_iter(seq.iter().copied()), values);
    }

    /// A failed call never mutates the sequence.
    #[test]
    fn failed_calls_leave_sequence_untouched(
        values in prop::collection::vec(any::<i32>(), 0..16),
        offset in 1usize..10,
        value in any::<i32>(),
    ) {
        let mut seq = Sequence::from_iter(values.iter().copied());
        let len = seq.len();

        prop_assert!(seq.insert(len + offset, value).is_err());
        prop_assert!(seq.erase(len, offset).is_err());
        prop_assert!(seq.at(len + offset).is_err());
        prop_assert_eq!(Vec::from_iter(seq.iter().copied()), values);
    }
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn scenario_push_back_renders_in_order() {
    let mut seq = Sequence::new();
    seq.push_back(4);
    seq.push_back(8);
    seq.push_back(15);
    assert_eq!(seq.render(), "<4, 8, 15>");
    assert_eq!(seq.len(), 3);
}

#[test]
fn scenario_insert_interior() {
    let mut seq = Sequence::from_iter([4, 8, 15]);
    seq.insert(1, 99).unwrap();
    assert_eq!(seq.render(), "<4, 99, 8, 15>");
}

#[test]
fn scenario_erase_run() {
    let mut seq = Sequence::from_iter([4, 99, 8, 15]);
    seq.erase(1, 2).unwrap();
    assert_eq!(seq.render(), "<4, 15>");
    assert_eq!(seq.len(), 2);
}

#[test]
fn scenario_pop_back_past_empty() {
    let mut seq = Sequence::from_iter([4, 8, 15]);
    assert_eq!(seq.pop_back(), Ok(15));
    assert_eq!(seq.pop_back(), Ok(8));
    assert_eq!(seq.pop_back(), Ok(4));
    assert_eq!(seq.pop_back(), Err(SequenceError::Empty));
}

#[test]
fn scenario_default_fill() {
    let seq = Sequence::<i32>::with_len(3);
    assert_eq!(seq.render(), "<0, 0, 0>");
}
