//! This crate provides an indexable, mutable sequence backed by a
//! doubly-linked list with owned nodes.
//!
//! The [`Sequence`] supports positional access, insertion, and removal:
//! reaching a position takes *O*(*n*) traversal, but once a position is
//! known, splicing a node in or out only relinks its two neighbours instead
//! of shifting the rest of the elements.
//!
//! Here is a quick example showing how the sequence works.
//!
//! ```
//! use linked_sequence::Sequence;
//!
//! let mut seq = Sequence::new();
//!
//! seq.push_back(4);
//! seq.push_back(8);
//! seq.push_back(15);
//! assert_eq!(seq.render(), "<4, 8, 15>");
//!
//! seq.insert(1, 99)?; // becomes <4, 99, 8, 15>
//! seq.erase(1, 2)?; // becomes <4, 15>
//! assert_eq!(seq.render(), "<4, 15>");
//!
//! *seq.at_mut(0)? = 16; // mutate in place
//! assert_eq!(seq.render(), "<16, 15>");
//! # Ok::<(), linked_sequence::SequenceError>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the sequence is like the following graph:
//! ```text
//!    ╔═══════════╗      ╔═══════════╗           ╔═══════════╗
//! ┌→ ║   next    ║ ───→ ║   next    ║ ─┄┄┄┄┄┄─→ ║   next    ║ ─→ ∅
//! │  ╟───────────╢      ╟───────────╢           ╟───────────╢
//! │  ║   prev    ║ ←─── ║   prev    ║ ←─┄┄┄┄┄┄─ ║   prev    ║ ←┐
//! │  ╟───────────╢      ╟───────────╢           ╟───────────╢  │
//! │  ║ element T ║      ║ element T ║           ║ element T ║  │
//! │  ╚═══════════╝      ╚═══════════╝           ╚═══════════╝  │
//! │      Node 0             Node 1                Node n - 1   │
//! │  ╔═══════════╗                                             │
//! └─ ║   head    ║  ∅ ←─ prev of Node 0                        │
//!    ╟───────────╢                                             │
//! ┌─ ║   tail    ║ ────────────────────────────────────────────┘
//! │  ╟───────────╢
//! │  ║    len    ║
//! └→ ╚═══════════╝
//!      Sequence
//! ```
//! The `Sequence` contains:
//! - a pointer `head` to the first node, `None` when the sequence is empty;
//! - a pointer `tail` to the last node, `None` when the sequence is empty;
//! - a length field `len`, always equal to the number of nodes in the chain.
//!
//! Each node of a `Sequence<T>` is allocated on the heap and contains:
//! - the `next` pointer to the following node, `None` for the last node;
//! - the `prev` pointer to the preceding node, `None` for the first node;
//! - the actual payload `T`.
//!
//! No node is ever shared between sequences: [`Clone`] deep-copies the chain,
//! and dropping a `Sequence` releases every node it owns.
//!
//! # Fallible operations
//!
//! The bounded operations return [`SequenceError`] instead of panicking:
//! [`at`](Sequence::at), [`insert`](Sequence::insert), and
//! [`erase`](Sequence::erase) reject out-of-range positions, while
//! [`pop_back`](Sequence::pop_back), [`front`](Sequence::front), and
//! [`back`](Sequence::back) reject the empty sequence. A failed call never
//! mutates the sequence.
//!
//! ```
//! use linked_sequence::{Sequence, SequenceError};
//!
//! let mut seq = Sequence::from_iter([1, 2, 3]);
//! assert_eq!(
//!     seq.at(3),
//!     Err(SequenceError::OutOfRange { position: 3, len: 3 }),
//! );
//!
//! seq.clear();
//! assert_eq!(seq.pop_back(), Err(SequenceError::Empty));
//! ```
//!
//! # Iteration
//!
//! Iterating over a sequence is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended, fused iterators; [`IterMut`] provides mutability
//! of the elements (but not of the linked structure).
//!
//! ```
//! use linked_sequence::Sequence;
//!
//! let mut seq = Sequence::from_iter([1, 2, 3]);
//! seq.iter_mut().for_each(|element| *element *= 2);
//! assert_eq!(Vec::from_iter(seq), vec![2, 4, 6]);
//! ```

#[doc(inline)]
pub use sequence::error::SequenceError;
#[doc(inline)]
pub use sequence::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use sequence::Sequence;

pub mod sequence;
