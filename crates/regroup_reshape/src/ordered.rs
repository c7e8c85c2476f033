//! Ordered sequences of unique elements with O(1) position lookup.

use std::fmt;
use std::hash::Hash;

use regroup_foundation::{Error, Result};

/// An ordered sequence of unique elements with constant-time position
/// lookup.
///
/// The forward sequence and the element-to-position reverse index are kept
/// in bijective correspondence: positions are dense integers `0..n-1` and
/// `position_of(get(i)) == i` for every valid `i`. Cloning is O(1).
#[derive(Clone)]
pub struct IndexedSeq<T>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    forward: im::Vector<T>,
    positions: im::HashMap<T, usize>,
}

impl<T> IndexedSeq<T>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    /// Builds an indexed sequence from elements.
    ///
    /// Fails with a duplicate element error if any element repeats.
    pub fn new<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut seq = Self {
            forward: im::Vector::new(),
            positions: im::HashMap::new(),
        };
        for element in elements {
            seq.push(element)?;
        }
        Ok(seq)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Gets the element at a position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.forward.get(position)
    }

    /// Returns the first element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.forward.front()
    }

    /// Returns the last element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.forward.back()
    }

    /// Returns true if the sequence contains the value.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    /// Returns an iterator over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.forward.iter()
    }

    /// Appends an element.
    ///
    /// Fails with a duplicate element error if it is already present.
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.contains(&value) {
            return Err(Error::duplicate_element(format!("{value:?}")));
        }
        self.positions.insert(value.clone(), self.forward.len());
        self.forward.push_back(value);
        Ok(())
    }

    /// Inserts an element.
    ///
    /// Contract: the position argument is not honored — insertion always
    /// appends, matching the established behavior of this structure. Use
    /// [`IndexedSeq::push`] for the honest spelling.
    pub fn insert(&mut self, _position: usize, value: T) -> Result<()> {
        self.push(value)
    }

    /// Replaces the element at a position, keeping the reverse index
    /// consistent.
    ///
    /// Fails out-of-range on a bad position and with a duplicate element
    /// error if `value` already lives at another position (which would
    /// break the bijection).
    pub fn set(&mut self, position: usize, value: T) -> Result<()> {
        let Some(previous) = self.forward.get(position).cloned() else {
            return Err(self.out_of_range(position));
        };
        if previous == value {
            return Ok(());
        }
        if self.contains(&value) {
            return Err(Error::duplicate_element(format!("{value:?}")));
        }
        self.positions.remove(&previous);
        self.positions.insert(value.clone(), position);
        self.forward.set(position, value);
        Ok(())
    }

    /// Removes and returns the element at a position.
    ///
    /// Positions of all later elements shift down by one to stay dense.
    /// Deleting the tail is O(1); anywhere else costs a walk over the
    /// elements after it.
    pub fn delete(&mut self, position: usize) -> Result<T> {
        if position >= self.forward.len() {
            return Err(self.out_of_range(position));
        }
        if position == self.forward.len() - 1 {
            let removed = self.forward.pop_back().expect("checked non-empty");
            self.positions.remove(&removed);
            return Ok(removed);
        }
        let removed = self.forward.remove(position);
        self.positions.remove(&removed);
        for (shifted, element) in self.forward.iter().enumerate().skip(position) {
            self.positions.insert(element.clone(), shifted);
        }
        Ok(removed)
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let removed = self.forward.pop_back()?;
        self.positions.remove(&removed);
        Some(removed)
    }

    /// The dense position of a value.
    ///
    /// Fails with a missing value error if the value is absent.
    pub fn position_of(&self, value: &T) -> Result<usize> {
        self.positions
            .get(value)
            .copied()
            .ok_or_else(|| Error::missing_value(format!("{value:?}")))
    }

    /// The element `offset` positions after `value`.
    pub fn next(&self, value: &T, offset: usize) -> Result<&T> {
        self.step(value, i64::try_from(offset).unwrap_or(i64::MAX))
    }

    /// The element `offset` positions before `value`.
    pub fn prev(&self, value: &T, offset: usize) -> Result<&T> {
        self.step(value, -i64::try_from(offset).unwrap_or(i64::MAX))
    }

    fn step(&self, value: &T, offset: i64) -> Result<&T> {
        #[allow(clippy::cast_possible_wrap)]
        let target = self.position_of(value)? as i64 + offset;
        usize::try_from(target)
            .ok()
            .and_then(|t| self.forward.get(t))
            .ok_or_else(|| Error::out_of_range(target, self.len()))
    }

    /// Signed distance from `value1` to `value2`:
    /// `position_of(value2) - position_of(value1)`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn distance(&self, value1: &T, value2: &T) -> Result<i64> {
        Ok(self.position_of(value2)? as i64 - self.position_of(value1)? as i64)
    }

    /// The inclusive range of elements from `value1`'s position to
    /// `value2`'s position. Empty when `value1` sits after `value2`.
    pub fn between(&self, value1: &T, value2: &T) -> Result<Vec<T>> {
        let start = self.position_of(value1)?;
        let end = self.position_of(value2)?;
        if start > end {
            return Ok(Vec::new());
        }
        Ok((start..=end)
            .filter_map(|i| self.forward.get(i).cloned())
            .collect())
    }

    #[allow(clippy::cast_possible_wrap)]
    fn out_of_range(&self, position: usize) -> Error {
        Error::out_of_range(position as i64, self.len())
    }
}

impl<T> fmt::Debug for IndexedSeq<T>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for IndexedSeq<T>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<T> Eq for IndexedSeq<T> where T: Clone + Eq + Hash + fmt::Debug {}
