use crate::sequence::{Node, Sequence};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `Sequence`.
///
/// It keeps the pair of nodes `head..=tail` still to be yielded, plus the
/// number of elements between them, and shrinks the range from either end.
///
/// Though the `Iter` does not hold a reference to the sequence, it *borrows*
/// (immutably) from it, so a phantom marker of `&'a Sequence<T>` is added to
/// protect the sequence from being written.
///
/// # Examples
///
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut seq = Sequence::from_iter([1, 2, 3]);
/// let mut iter = seq.iter();
///
/// // Won't compile, because the sequence is already borrowed immutably.
/// seq.push_back(4);
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a Sequence<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(sequence: &'a Sequence<T>) -> Self {
        Self {
            head: sequence.head,
            tail: sequence.tail,
            len: sequence.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        let mut current = self.head;
        for _ in 0..self.len {
            // SAFETY: the first `len` nodes from `head` are live nodes of the
            // borrowed sequence.
            let node = unsafe { current.expect("iterator length matches the chain").as_ref() };
            f.field(&node.element);
            current = node.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Yield `*head` and shrink the range to `(head.next)..=tail`, or return
    /// `None` if the range is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: a non-empty range starts at a live node of the borrowed
        // sequence, which outlives 'a.
        let node = unsafe { self.head?.as_ref() };
        self.head = node.next;
        self.len -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Yield `*tail` and shrink the range to `head..=(tail.prev)`, or return
    /// `None` if the range is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: same as `next`, mirrored for the back of the range.
        let node = unsafe { self.tail?.as_ref() };
        self.tail = node.prev;
        self.len -= 1;
        Some(&node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Sequence`.
///
/// `head..=tail` denotes the subrange still to be yielded.
///
/// Though the `IterMut` does not hold a reference to the sequence, it
/// *borrows* (mutably) from it, so a phantom marker of `&'a mut Sequence<T>`
/// is added to protect the sequence from being read.
///
/// # Examples
///
/// The sequence is not readable while an `IterMut` is live.
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut seq = Sequence::from_iter([1, 2, 3]);
/// let mut iter = seq.iter_mut();
/// println!("{:?}", seq.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a mut Sequence<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(sequence: &'a mut Sequence<T>) -> Self {
        Self {
            head: sequence.head,
            tail: sequence.tail,
            len: sequence.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut current = self.head;
        for _ in 0..self.len {
            // SAFETY: the first `len` nodes from `head` are live nodes of the
            // borrowed sequence, and no mutable reference to them is live
            // while formatting.
            let node = unsafe { current.expect("iterator length matches the chain").as_ref() };
            f.field(&node.element);
            current = node.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    /// Yield `*head` and shrink the range to `(head.next)..=tail`, or return
    /// `None` if the range is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: a non-empty range starts at a live node of the mutably
        // borrowed sequence; each node is yielded at most once, so the
        // references never alias.
        let node = unsafe { self.head?.as_mut() };
        self.head = node.next;
        self.len -= 1;
        Some(&mut node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    /// Yield `*tail` and shrink the range to `head..=(tail.prev)`, or return
    /// `None` if the range is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: same as `next`, mirrored for the back of the range.
        let node = unsafe { self.tail?.as_mut() };
        self.tail = node.prev;
        self.len -= 1;
        Some(&mut node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `Sequence`.
///
/// This `struct` is created by the [`into_iter`] method on [`Sequence`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: Sequence::into_iter
pub struct IntoIter<T> {
    sequence: Sequence<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.sequence.head?;
        // SAFETY: `head` is a live node owned by the drained sequence.
        let node = unsafe { self.sequence.detach(head) };
        Some(Node::into_element(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.sequence.len;
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.sequence.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::Sequence;

    #[test]
    fn iter_forward_and_back() {
        let seq = Sequence::from_iter(0..5);

        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![0, 1, 2, 3, 4]);
        assert_eq!(
            Vec::from_iter(seq.iter().rev().copied()),
            vec![4, 3, 2, 1, 0]
        );

        let mut iter = seq.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None); // fused
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut seq = Sequence::from_iter(0..3);
        for element in seq.iter_mut() {
            *element += 10;
        }
        assert_eq!(seq.render(), "<10, 11, 12>");

        assert_eq!(seq.iter_mut().next_back(), Some(&mut 12));
    }

    #[test]
    fn into_iter_drains_both_ends() {
        let seq = Sequence::from_iter(0..4);
        let mut iter = seq.into_iter();
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn empty_iterators() {
        let seq = Sequence::<i32>::new();
        assert_eq!(seq.iter().next(), None);
        assert_eq!(seq.iter().next_back(), None);
        assert_eq!(seq.iter().len(), 0);
        assert_eq!(seq.into_iter().next(), None);
    }

    #[test]
    fn from_iter_and_extend() {
        let mut seq = Sequence::from_iter([1, 2]);
        seq.extend(3..5);
        seq.extend(&[5, 6]);
        assert_eq!(seq.render(), "<1, 2, 3, 4, 5, 6>");
        assert_eq!(seq.len(), 6);
    }
}
