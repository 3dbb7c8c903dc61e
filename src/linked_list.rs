//! LinkedList: singly linked sequence behind a virtual head link.
//!
//! The list owns its first node through `head`, which plays the role of a
//! sentinel's `next` pointer: every positional edit rewrites exactly one
//! `Link`, so position 0 needs no special case. Each node exclusively owns
//! its successor; removal breaks ownership at a single edge.

use crate::error::{Error, Result};
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// Walk `steps` links forward and return the link reached.
///
/// Stops early at the end of the chain; callers bound `steps` by the
/// number of reachable nodes.
fn link_at<T>(mut cursor: &mut Link<T>, steps: usize) -> &mut Link<T> {
    for _ in 0..steps {
        match cursor {
            Some(node) => cursor = &mut node.next,
            None => break,
        }
    }
    cursor
}

/// Singly linked list with O(1) front operations and O(index)
/// positional access.
///
/// `len` always equals the number of nodes reachable from `head`.
/// Positional calls fail with `IndexOutOfRange` for `index >= len` and
/// leave the list unchanged.
pub struct LinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    /// Insert `value` ahead of the current first element. O(1).
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Append `value` after the current last element. O(n): the list keeps
    /// no tail pointer.
    pub fn push_back(&mut self, value: T) {
        let tail = link_at(&mut self.head, self.len);
        *tail = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Unlink and return the first element.
    pub fn pop_front(&mut self) -> Result<T> {
        let mut node = self.head.take().ok_or(Error::EmptyCollection)?;
        self.head = node.next.take();
        self.len -= 1;
        Ok(node.value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let err = self.out_of_range(index);
        self.iter().nth(index).ok_or(err)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let err = self.out_of_range(index);
        self.iter_mut().nth(index).ok_or(err)
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Unlink the node at `index` and return its element. A failed call
    /// leaves the list untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let err = self.out_of_range(index);
        let link = link_at(&mut self.head, index);
        let mut node = link.take().ok_or(err)?;
        *link = node.next.take();
        self.len -= 1;
        Ok(node.value)
    }

    /// Unlink the first element matching `pred` in a single pass.
    pub fn remove_first_where<P>(&mut self, mut pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| !pred(&node.value)) {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    /// Drop every element. Runs iteratively so long chains cannot exhaust
    /// the stack.
    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// Stable in-place merge sort ordered by `key(item)` ascending.
    ///
    /// Nodes are relinked, never copied; equal keys keep their original
    /// relative order.
    pub fn merge_sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.merge_sort_by(|a, b| key(a).cmp(&key(b)));
    }

    /// Stable in-place merge sort under `cmp`.
    pub fn merge_sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len <= 1 {
            return;
        }
        tracing::trace!(len = self.len, "merge sorting linked list");
        let head = self.head.take();
        self.head = sort_run(head, self.len, &mut cmp);
    }
}

/// Top-down merge sort of the `len`-node chain starting at `head`.
fn sort_run<T, F>(mut head: Link<T>, len: usize, cmp: &mut F) -> Link<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if len <= 1 {
        return head;
    }
    let left_len = len / 2;
    let right = link_at(&mut head, left_len).take();
    let left = sort_run(head, left_len, cmp);
    let right = sort_run(right, len - left_len, cmp);
    merge(left, right, cmp)
}

/// Relink two sorted chains into one. Ties take from `left`.
fn merge<T, F>(mut left: Link<T>, mut right: Link<T>, cmp: &mut F) -> Link<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged: Link<T> = None;
    let mut tail = &mut merged;
    loop {
        let take_left = match (&left, &right) {
            (Some(l), Some(r)) => cmp(&l.value, &r.value) != Ordering::Greater,
            _ => break,
        };
        let source = if take_left { &mut left } else { &mut right };
        if let Some(mut node) = source.take() {
            *source = node.next.take();
            tail = &mut tail.insert(node).next;
        }
    }
    *tail = if left.is_some() { left } else { right };
    merged
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut tail = link_at(&mut self.head, self.len);
        let mut added = 0;
        for value in iter {
            tail = &mut tail.insert(Box::new(Node { value, next: None })).next;
            added += 1;
        }
        self.len += added;
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Iterator over shared references, first to last.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over mutable references, first to last.
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops from the front.
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<T> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
