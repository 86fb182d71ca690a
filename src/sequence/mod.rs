use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use crate::sequence::error::SequenceError;
use crate::{IntoIter, Iter, IterMut};

pub mod error;
pub mod iterator;

mod algorithms;

/// The `Sequence` is an ordered container backed by a doubly-linked list with
/// owned nodes. It allows inserting and removing elements at any position by
/// relinking a constant number of neighbours, but reaching a position takes
/// *O*(*n*) traversal.
///
/// The `Sequence` contains:
/// - a pointer `head` to the first node (`None` when empty);
/// - a pointer `tail` to the last node (`None` when empty);
/// - a length field `len`, always equal to the number of nodes reachable by
///   walking forward from `head`.
///
/// Every bounded operation validates its position before touching the chain,
/// so a failed call leaves the sequence untouched. See [`SequenceError`] for
/// the two failure kinds.
pub struct Sequence<T> {
    pub(crate) head: Option<NonNull<Node<T>>>,
    pub(crate) tail: Option<NonNull<Node<T>>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: Option<NonNull<Node<T>>>,
    pub(crate) prev: Option<NonNull<Node<T>>>,
    pub(crate) element: T,
}

// private methods
impl<T> Sequence<T> {
    /// Walk to the node at `index`, starting from whichever end is nearer.
    ///
    /// Requires `index < self.len`.
    pub(crate) fn node_at(&self, index: usize) -> NonNull<Node<T>> {
        debug_assert!(index < self.len, "node_at index within bounds");
        if index <= self.len / 2 {
            let mut node = self.head.expect("non-empty sequence has a head");
            for _ in 0..index {
                // SAFETY: `node` is a live node owned by this sequence, and
                // the first `len - 1` forward links are all populated.
                node = unsafe { node.as_ref().next }.expect("forward link inside the chain");
            }
            node
        } else {
            let mut node = self.tail.expect("non-empty sequence has a tail");
            for _ in 0..(self.len - 1 - index) {
                // SAFETY: same as above, mirrored for the backward links.
                node = unsafe { node.as_ref().prev }.expect("backward link inside the chain");
            }
            node
        }
    }

    /// Attach the detached node `node` directly before `next`, relinking both
    /// neighbours (or `head` when `next` is the first node).
    ///
    /// It is unsafe because it does not check whether `next` belongs to this
    /// sequence, or whether `node` is detached. Violating either makes the
    /// chain ill-formed.
    unsafe fn attach_before(&mut self, mut next: NonNull<Node<T>>, mut node: NonNull<Node<T>>) {
        let prev = next.as_ref().prev;
        node.as_mut().prev = prev;
        node.as_mut().next = Some(next);
        next.as_mut().prev = Some(node);
        match prev {
            Some(mut prev) => prev.as_mut().next = Some(node),
            None => self.head = Some(node),
        }
        self.len += 1;
    }

    /// Detach a single node `node` from the chain and return it as a box,
    /// relinking its neighbours (or `head`/`tail` when it is at an end).
    ///
    /// It is unsafe because it does not check whether `node` belongs to this
    /// sequence. If it does not, this call makes both chains ill-formed.
    pub(crate) unsafe fn detach(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        let node = Box::from_raw(node.as_ptr());
        match node.prev {
            Some(mut prev) => prev.as_mut().next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(mut next) => next.as_mut().prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node
    }
}

impl<T> Sequence<T> {
    /// Create an empty `Sequence`.
    ///
    /// # Examples
    /// ```
    /// use linked_sequence::Sequence;
    /// let seq: Sequence<i32> = Sequence::new();
    /// assert!(seq.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `Sequence` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert!(seq.is_empty());
    ///
    /// seq.push_back("foo");
    /// assert!(!seq.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the `Sequence`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_back(2);
    /// assert_eq!(seq.len(), 1);
    ///
    /// seq.push_back(3);
    /// assert_eq!(seq.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Provides a reference to the element at `position`, or an
    /// [`OutOfRange`](SequenceError::OutOfRange) error if
    /// `position >= self.len()`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*position*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let seq = Sequence::from_iter([4, 8, 15]);
    /// assert_eq!(seq.at(1), Ok(&8));
    /// assert_eq!(
    ///     seq.at(3),
    ///     Err(SequenceError::OutOfRange { position: 3, len: 3 }),
    /// );
    /// ```
    pub fn at(&self, position: usize) -> Result<&T, SequenceError> {
        if position >= self.len {
            return Err(SequenceError::OutOfRange {
                position,
                len: self.len,
            });
        }
        // SAFETY: the node at a valid position is a live node owned by this
        // sequence, and the returned borrow keeps the sequence borrowed.
        Ok(unsafe { &self.node_at(position).as_ref().element })
    }

    /// Provides a mutable reference to the element at `position`, or an
    /// [`OutOfRange`](SequenceError::OutOfRange) error if
    /// `position >= self.len()`.
    ///
    /// The reference aliases the live node, so assigning through it mutates
    /// the sequence in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter([4, 8, 15]);
    /// *seq.at_mut(2).unwrap() = 16;
    /// assert_eq!(seq.at(2), Ok(&16));
    /// ```
    pub fn at_mut(&mut self, position: usize) -> Result<&mut T, SequenceError> {
        if position >= self.len {
            return Err(SequenceError::OutOfRange {
                position,
                len: self.len,
            });
        }
        // SAFETY: same as `at`, and the mutable borrow of `self` guarantees
        // exclusive access to the node.
        Ok(unsafe { &mut self.node_at(position).as_mut().element })
    }

    /// Appends an element to the back of the sequence. Never fails.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push_back(1);
    /// seq.push_back(3);
    /// assert_eq!(seq.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, value: T) {
        let mut node = Node::new_detached(value);
        // SAFETY: `node` is freshly allocated and `tail` (when present) is a
        // live node owned by this sequence.
        unsafe {
            node.as_mut().prev = self.tail;
            match self.tail {
                Some(mut tail) => tail.as_mut().next = Some(node),
                None => self.head = Some(node),
            }
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes the last element and returns it, or an
    /// [`Empty`](SequenceError::Empty) error if the sequence has no elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from_iter([1, 3]);
    /// assert_eq!(seq.pop_back(), Ok(3));
    /// assert_eq!(seq.pop_back(), Ok(1));
    /// assert_eq!(seq.pop_back(), Err(SequenceError::Empty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, SequenceError> {
        let tail = self.tail.ok_or(SequenceError::Empty)?;
        // SAFETY: `tail` is a live node owned by this sequence.
        let node = unsafe { self.detach(tail) };
        Ok(Node::into_element(node))
    }

    /// Inserts `value` at `position`, shifting the elements from `position`
    /// onward one place toward the back. `position == self.len()` appends.
    /// Fails with [`OutOfRange`](SequenceError::OutOfRange) if
    /// `position > self.len()`, without mutating the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*position*) time; only the two
    /// neighbouring nodes are relinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter([4, 8, 15]);
    /// seq.insert(1, 99).unwrap();
    /// assert_eq!(seq.render(), "<4, 99, 8, 15>");
    ///
    /// seq.insert(4, 16).unwrap(); // position == len appends
    /// assert_eq!(seq.render(), "<4, 99, 8, 15, 16>");
    ///
    /// assert!(seq.insert(9, 23).is_err());
    /// ```
    pub fn insert(&mut self, position: usize, value: T) -> Result<(), SequenceError> {
        if position > self.len {
            return Err(SequenceError::OutOfRange {
                position,
                len: self.len,
            });
        }
        if position == self.len {
            self.push_back(value);
            return Ok(());
        }
        let next = self.node_at(position);
        let node = Node::new_detached(value);
        // SAFETY: `next` is a live node owned by this sequence and `node` is
        // freshly allocated.
        unsafe { self.attach_before(next, node) };
        Ok(())
    }

    /// Removes the `count` contiguous elements starting at `position`,
    /// relinking the node before the removed run directly to the node after
    /// it. Fails with [`OutOfRange`](SequenceError::OutOfRange) unless
    /// `position < self.len()` and `position + count <= self.len()`, without
    /// mutating the sequence.
    ///
    /// `count == 0` at a valid position removes nothing, but `position` must
    /// itself index an existing element: `erase(seq.len(), 0)` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter([4, 99, 8, 15]);
    /// seq.erase(1, 2).unwrap();
    /// assert_eq!(seq.render(), "<4, 15>");
    ///
    /// seq.erase(0, 0).unwrap(); // a no-op
    /// assert_eq!(seq.len(), 2);
    ///
    /// assert!(seq.erase(2, 0).is_err()); // position == len is rejected
    /// ```
    pub fn erase(&mut self, position: usize, count: usize) -> Result<(), SequenceError> {
        let in_range = match position.checked_add(count) {
            Some(end) => position < self.len && end <= self.len,
            None => false,
        };
        if !in_range {
            return Err(SequenceError::OutOfRange {
                position,
                len: self.len,
            });
        }
        if count == 0 {
            return Ok(());
        }
        let mut current = self.node_at(position);
        for _ in 0..count {
            // SAFETY: the bounds check keeps the whole run inside the chain,
            // so `current` is a live node owned by this sequence.
            let node = unsafe { self.detach(current) };
            match node.next {
                Some(next) => current = next,
                // Only reachable on the last iteration, when the run ends at
                // the old tail.
                None => break,
            }
        }
        Ok(())
    }

    /// Provides a reference to the first element, or an
    /// [`Empty`](SequenceError::Empty) error if the sequence has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.front(), Err(SequenceError::Empty));
    ///
    /// seq.push_back(1);
    /// assert_eq!(seq.front(), Ok(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Result<&T, SequenceError> {
        let head = self.head.ok_or(SequenceError::Empty)?;
        // SAFETY: `head` is a live node owned by this sequence.
        Ok(unsafe { &head.as_ref().element })
    }

    /// Provides a mutable reference to the first element, or an
    /// [`Empty`](SequenceError::Empty) error if the sequence has no elements.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, SequenceError> {
        let mut head = self.head.ok_or(SequenceError::Empty)?;
        // SAFETY: `head` is a live node owned by this sequence, and `self`
        // is borrowed mutably.
        Ok(unsafe { &mut head.as_mut().element })
    }

    /// Provides a reference to the last element, or an
    /// [`Empty`](SequenceError::Empty) error if the sequence has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.back(), Err(SequenceError::Empty));
    ///
    /// seq.push_back(1);
    /// assert_eq!(seq.back(), Ok(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Result<&T, SequenceError> {
        let tail = self.tail.ok_or(SequenceError::Empty)?;
        // SAFETY: `tail` is a live node owned by this sequence.
        Ok(unsafe { &tail.as_ref().element })
    }

    /// Provides a mutable reference to the last element, or an
    /// [`Empty`](SequenceError::Empty) error if the sequence has no elements.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, SequenceError> {
        let mut tail = self.tail.ok_or(SequenceError::Empty)?;
        // SAFETY: `tail` is a live node owned by this sequence, and `self`
        // is borrowed mutably.
        Ok(unsafe { &mut tail.as_mut().element })
    }

    /// Removes all elements from the `Sequence`, releasing every node.
    /// Calling it on an already-empty sequence is a no-op.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter([1, 2]);
    /// seq.clear();
    /// assert!(seq.is_empty());
    ///
    /// seq.clear(); // still fine
    /// assert_eq!(seq.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        self.tail = None;
        self.len = 0;
        // Walking through owned boxes keeps the release iterative; there is
        // no recursive drop through the links.
        while let Some(node) = current {
            // SAFETY: every node in the chain was allocated by
            // `Node::new_detached` and is owned exclusively by this sequence.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            current = node.next;
        }
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from_iter([0, 1, 2]);
    ///
    /// let mut iter = seq.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter([0, 1, 2]);
    ///
    /// for element in seq.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// assert_eq!(Vec::from_iter(seq), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

impl<T: Default> Sequence<T> {
    /// Create a `Sequence` of `len` default-valued elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::<i32>::with_len(3);
    /// assert_eq!(seq.render(), "<0, 0, 0>");
    ///
    /// let empty = Sequence::<i32>::with_len(0);
    /// assert!(empty.is_empty());
    /// ```
    pub fn with_len(len: usize) -> Self {
        let mut sequence = Self::new();
        for _ in 0..len {
            sequence.push_back(T::default());
        }
        sequence
    }
}

impl<T: Display> Sequence<T> {
    /// Renders the sequence as a comma-and-space-separated list of elements
    /// enclosed in angle brackets. An empty sequence renders as `<>`.
    ///
    /// This is the [`Display`] form, returned as an owned string.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from_iter([4, 8, 15]);
    /// assert_eq!(seq.render(), "<4, 8, 15>");
    /// assert_eq!(Sequence::<i32>::new().render(), "<>");
    /// ```
    #[inline]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: Display> Display for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
            for element in iter {
                write!(f, ", {element}")?;
            }
        }
        f.write_str(">")
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional access in the style of `Vec`, panicking on invalid positions.
/// Use [`Sequence::at`] for the non-panicking form.
impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    fn index(&self, position: usize) -> &T {
        match self.at(position) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    fn index_mut(&mut self, position: usize) -> &mut T {
        match self.at_mut(position) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Node<T> {
    /// Allocate a node that is not linked into any chain yet.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: None,
            element,
        })))
    }

    pub(crate) fn into_element(node: Box<Node<T>>) -> T {
        node.element
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for Sequence<T> {}

unsafe impl<T: Sync> Sync for Sequence<T> {}

// Ensure that `Sequence` and its read-only iterators are covariant in their
// type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: Sequence<&'static str>) -> Sequence<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
impl<T> Sequence<T> {
    /// Walk the chain in both directions and assert every structural
    /// invariant: link symmetry, terminal links, and the length field.
    pub(crate) fn assert_well_formed(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(node) = current {
            assert_eq!(unsafe { node.as_ref().prev }, prev);
            prev = current;
            current = unsafe { node.as_ref().next };
            count += 1;
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len);

        let mut count = 0;
        let mut next = None;
        let mut current = self.tail;
        while let Some(node) = current {
            assert_eq!(unsafe { node.as_ref().next }, next);
            next = current;
            current = unsafe { node.as_ref().prev };
            count += 1;
        }
        assert_eq!(next, self.head);
        assert_eq!(count, self.len);

        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);
    }
}
