//! Array sorts over a caller-supplied comparator.
//!
//! All three operate in place on a slice and treat lengths 0 and 1 as
//! no-ops. Only `merge_sort` is stable.

use crate::error::Error;
use core::cmp::Ordering;
use core::fmt;
use core::mem;
use core::str::FromStr;

/// O(n²) selection sort: swap the minimum of the unsorted suffix into
/// place. Unstable.
pub fn selection_sort<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n <= 1 {
        return;
    }
    tracing::trace!(algorithm = "selection", len = n, "sorting");
    for i in 0..n - 1 {
        let mut min = i;
        for j in i + 1..n {
            if cmp(&v[j], &v[min]) == Ordering::Less {
                min = j;
            }
        }
        v.swap(i, min);
    }
}

/// Top-down merge sort. Stable: on ties the left run wins.
///
/// Each merge fills a fresh buffer of clones sized to the merged span and
/// copies it back, hence the `T: Clone` bound.
pub fn merge_sort<T, F>(v: &mut [T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }
    tracing::trace!(algorithm = "merge", len = v.len(), "sorting");
    merge_sort_slice(v, &mut cmp);
}

fn merge_sort_slice<T, F>(v: &mut [T], cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }
    // left run keeps the middle element on odd lengths
    let mid = (v.len() + 1) / 2;
    merge_sort_slice(&mut v[..mid], cmp);
    merge_sort_slice(&mut v[mid..], cmp);
    merge_runs(v, mid, cmp);
}

/// Merge the sorted runs `v[..mid]` and `v[mid..]`.
fn merge_runs<T, F>(v: &mut [T], mid: usize, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(v.len());
    {
        let (left, right) = v.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if cmp(&left[i], &right[j]) != Ordering::Greater {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    v.clone_from_slice(&merged);
}

/// Quicksort with a Lomuto partition around the last element.
///
/// No pivot randomization: already-sorted input takes O(n²) comparisons,
/// but recursion depth stays O(log n). Unstable.
pub fn quick_sort<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }
    tracing::trace!(algorithm = "quick", len = v.len(), "sorting");
    quick_sort_slice(v, &mut cmp);
}

/// Recurses into the shorter side and loops on the longer one, so the
/// stack stays O(log n) deep even when every pivot is an extreme.
fn quick_sort_slice<T, F>(mut v: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while v.len() > 1 {
        let p = partition(v, cmp);
        let (left, right) = mem::take(&mut v).split_at_mut(p);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quick_sort_slice(left, cmp);
            v = right;
        } else {
            quick_sort_slice(right, cmp);
            v = left;
        }
    }
}

/// Move everything `<=` the last element to the front, then drop the pivot
/// right after them. Returns the pivot's final index.
fn partition<T, F>(v: &mut [T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let high = v.len() - 1;
    let mut i = 0;
    for j in 0..high {
        if cmp(&v[j], &v[high]) != Ordering::Greater {
            if i != j {
                v.swap(i, j);
            }
            i += 1;
        }
    }
    if i != high {
        v.swap(i, high);
    }
    i
}

/// `true` when every adjacent pair is ordered under `cmp`.
pub fn is_sorted_by<T, F>(v: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.windows(2).all(|w| cmp(&w[0], &w[1]) != Ordering::Greater)
}

/// The three array sorts, selectable at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SortAlgorithm {
    Selection,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }

    pub fn is_stable(self) -> bool {
        matches!(self, SortAlgorithm::Merge)
    }

    /// Run this algorithm over `v`.
    ///
    /// `T: Clone` is required because `Merge` buffers clones. Callers with
    /// non-`Clone` data call [`selection_sort`] or [`quick_sort`] directly.
    pub fn sort<T, F>(self, v: &mut [T], cmp: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            SortAlgorithm::Selection => selection_sort(v, cmp),
            SortAlgorithm::Merge => merge_sort(v, cmp),
            SortAlgorithm::Quick => quick_sort(v, cmp),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortAlgorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(Error::InvalidArgument("unknown sort algorithm"))
    }
}
