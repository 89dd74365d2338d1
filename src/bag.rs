//! Bag
//!
//! A fixed-capacity, unordered multiset. Elements are compared by value
//! (`PartialEq`), duplicates are allowed and removal is swap-with-last, so
//! slot order is never stable across a removal.

use std::slice;

use thiserror::Error;

/// Number of slots a bag gets when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10;

/// Errors returned by bag operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BagError {
    /// Every slot is occupied.
    #[error("bag is full (capacity {capacity})")]
    Full {
        /// Number of slots in the bag
        capacity: usize,
    },

    /// The element is not in the bag.
    #[error("item not found in bag")]
    NotFound,

    /// The slot index is past the last occupied slot.
    #[error("slot {0} is not occupied")]
    IndexOutOfBounds(usize),
}

/// Fixed-capacity multiset.
#[derive(Debug, Clone)]
pub struct Bag<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Bag<T> {
    /// Create an empty bag with room for `capacity` elements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Bag {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a bag holding `items`.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Full`] if there are more items than slots.
    pub fn with_items(items: impl Into<Vec<T>>, capacity: usize) -> Result<Self, BagError> {
        let mut items = items.into();

        if items.len() > capacity {
            return Err(BagError::Full { capacity });
        }

        items.reserve_exact(capacity - items.len());

        Ok(Bag { items, capacity })
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no slots are occupied.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Put an element into the next free slot.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Full`] without touching the bag if there is no free slot.
    pub fn add(&mut self, item: T) -> Result<(), BagError> {
        if self.is_full() {
            return Err(BagError::Full {
                capacity: self.capacity,
            });
        }

        self.items.push(item);

        Ok(())
    }

    /// Remove the element in slot `index`, moving the last element into its place.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::IndexOutOfBounds`] if the slot is not occupied.
    pub fn remove_at(&mut self, index: usize) -> Result<T, BagError> {
        if index >= self.items.len() {
            return Err(BagError::IndexOutOfBounds(index));
        }

        Ok(self.items.swap_remove(index))
    }

    /// Empty the bag. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get the element in slot `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Get the element in slot `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Iterate over the occupied slots.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The occupied slots as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> Bag<T> {
    /// Slot of the first element equal to `target`.
    pub fn index_of(&self, target: &T) -> Option<usize> {
        self.items.iter().position(|item| item == target)
    }

    /// Check if an element equal to `target` is in the bag.
    pub fn contains(&self, target: &T) -> bool {
        self.index_of(target).is_some()
    }

    /// Remove one element equal to `target` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::NotFound`] if no element matches.
    pub fn remove(&mut self, target: &T) -> Result<T, BagError> {
        let index = self.index_of(target).ok_or(BagError::NotFound)?;

        self.remove_at(index)
    }

    /// Number of elements equal to `target`.
    pub fn frequency_of(&self, target: &T) -> usize {
        self.items.iter().filter(|item| *item == target).count()
    }

    /// Remove one occurrence from this bag for every element of `other`.
    ///
    /// Elements of `other` that are not here are ignored. Returns the number removed.
    pub fn difference_with(&mut self, other: &Bag<T>) -> usize {
        let mut removed = 0;

        for item in other {
            if self.remove(item).is_ok() {
                removed += 1;
            }
        }

        removed
    }

    /// Drop every element that `other` does not contain. Returns the number removed.
    pub fn intersect_with(&mut self, other: &Bag<T>) -> usize {
        let mut removed = 0;
        let mut index = 0;

        // A removal moves the last element into `index`, so only advance on a keep.
        while let Some(item) = self.items.get(index) {
            if other.contains(item) {
                index += 1;
            } else {
                self.items.swap_remove(index);
                removed += 1;
            }
        }

        removed
    }
}

impl<T: PartialEq + Clone> Bag<T> {
    /// Add every element of `other` that this bag does not already contain.
    ///
    /// Stops at the first element that does not fit; a partial union is not an
    /// error. Returns the number of elements added.
    pub fn union_with(&mut self, other: &Bag<T>) -> usize {
        let mut added = 0;

        for item in other {
            if self.contains(item) {
                continue;
            }

            if self.add(item.clone()).is_err() {
                break;
            }

            added += 1;
        }

        added
    }
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Bag::new(DEFAULT_CAPACITY)
    }
}

impl<T> TryFrom<Vec<T>> for Bag<T> {
    type Error = BagError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Bag::with_items(items, DEFAULT_CAPACITY)
    }
}

impl<'b, T> IntoIterator for &'b Bag<T> {
    type Item = &'b T;
    type IntoIter = slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two bags are equal when they hold the same number of elements and every
/// element occurs equally often in both. Capacity and slot order are ignored.
impl<T: PartialEq> PartialEq for Bag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|item| self.frequency_of(item) == other.frequency_of(item))
    }
}

impl<T: Eq> Eq for Bag<T> {}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn bag_of(items: &[i32]) -> Result<Bag<i32>, BagError> {
        Bag::with_items(items.to_vec(), DEFAULT_CAPACITY)
    }

    #[test]
    fn new_bag_is_empty() {
        let bag = Bag::<i32>::new(4);

        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
        assert_eq!(bag.capacity(), 4);
    }

    #[test]
    fn default_uses_default_capacity() {
        let bag = Bag::<i32>::default();

        assert_eq!(bag.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn add_until_full() -> TestResult {
        let mut bag = Bag::new(2);

        bag.add("a")?;
        bag.add("b")?;

        assert!(bag.is_full());
        assert_eq!(bag.add("c"), Err(BagError::Full { capacity: 2 }));
        assert_eq!(bag.len(), 2);
        assert!(!bag.contains(&"c"));

        Ok(())
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut bag = Bag::new(0);

        assert_eq!(bag.add(1), Err(BagError::Full { capacity: 0 }));
        assert!(bag.is_empty());
    }

    #[test]
    fn with_items_too_many_errors() {
        let result = Bag::with_items(vec![1, 2, 3], 2);

        assert!(matches!(result, Err(BagError::Full { capacity: 2 })));
    }

    #[test]
    fn try_from_vec() -> TestResult {
        let bag = Bag::try_from(vec![1, 2, 2])?;

        assert_eq!(bag.len(), 3);
        assert_eq!(bag.capacity(), DEFAULT_CAPACITY);

        Ok(())
    }

    #[test]
    fn index_of_returns_first_match() -> TestResult {
        let bag = bag_of(&[5, 7, 7, 9])?;

        assert_eq!(bag.index_of(&7), Some(1));
        assert_eq!(bag.index_of(&4), None);

        Ok(())
    }

    #[test]
    fn contains_follows_index_of() -> TestResult {
        let bag = bag_of(&[1, 2])?;

        assert!(bag.contains(&2));
        assert!(!bag.contains(&3));

        Ok(())
    }

    #[test]
    fn remove_swaps_last_into_hole() -> TestResult {
        let mut bag = bag_of(&[1, 2, 3, 4])?;

        assert_eq!(bag.remove(&2)?, 2);
        assert_eq!(bag.as_slice(), &[1, 4, 3]);

        Ok(())
    }

    #[test]
    fn remove_missing_leaves_bag_alone() -> TestResult {
        let mut bag = bag_of(&[1, 2])?;

        assert_eq!(bag.remove(&3), Err(BagError::NotFound));
        assert_eq!(bag.as_slice(), &[1, 2]);

        Ok(())
    }

    #[test]
    fn remove_only_takes_one_occurrence() -> TestResult {
        let mut bag = bag_of(&[3, 3, 3])?;

        bag.remove(&3)?;

        assert_eq!(bag.frequency_of(&3), 2);

        Ok(())
    }

    #[test]
    fn remove_at_out_of_bounds() -> TestResult {
        let mut bag = bag_of(&[1])?;

        assert_eq!(bag.remove_at(1), Err(BagError::IndexOutOfBounds(1)));
        assert_eq!(bag.remove_at(0)?, 1);
        assert!(bag.is_empty());

        Ok(())
    }

    #[test]
    fn frequency_of_counts_duplicates() -> TestResult {
        let bag = bag_of(&[1, 2, 1, 1, 3])?;

        assert_eq!(bag.frequency_of(&1), 3);
        assert_eq!(bag.frequency_of(&2), 1);
        assert_eq!(bag.frequency_of(&4), 0);

        Ok(())
    }

    #[test]
    fn clear_keeps_capacity() -> TestResult {
        let mut bag = bag_of(&[1, 2, 3])?;

        bag.clear();

        assert!(bag.is_empty());
        assert_eq!(bag.capacity(), DEFAULT_CAPACITY);
        assert!(!bag.contains(&1));

        Ok(())
    }

    #[test]
    fn get_mut_updates_in_place() -> TestResult {
        let mut bag = bag_of(&[1, 2])?;

        if let Some(slot) = bag.get_mut(1) {
            *slot = 20;
        }

        assert_eq!(bag.get(1), Some(&20));
        assert_eq!(bag.get(2), None);

        Ok(())
    }

    #[test]
    fn union_skips_elements_already_present() -> TestResult {
        let mut a = bag_of(&[1, 2])?;
        let b = bag_of(&[2, 3, 3])?;

        let added = a.union_with(&b);

        assert_eq!(added, 1);
        assert_eq!(a.frequency_of(&2), 1);
        assert_eq!(a.frequency_of(&3), 1);

        Ok(())
    }

    #[test]
    fn union_stops_at_capacity() -> TestResult {
        let mut a = Bag::with_items(vec![1], 3)?;
        let b = bag_of(&[2, 3, 4, 5])?;

        let added = a.union_with(&b);

        assert_eq!(added, 2);
        assert!(a.is_full());
        assert!(a.contains(&2));
        assert!(a.contains(&3));
        assert!(!a.contains(&4));

        Ok(())
    }

    #[test]
    fn difference_removes_one_per_occurrence() -> TestResult {
        let mut a = bag_of(&[1, 1, 1, 2])?;
        let b = bag_of(&[1, 1, 5])?;

        let removed = a.difference_with(&b);

        assert_eq!(removed, 2);
        assert_eq!(a.frequency_of(&1), 1);
        assert_eq!(a.frequency_of(&2), 1);

        Ok(())
    }

    #[test]
    fn intersect_rechecks_swapped_slot() -> TestResult {
        // 3 and 4 are both dropped; 4 is swapped into 3's slot before being checked
        let mut a = bag_of(&[1, 3, 2, 4])?;
        let b = bag_of(&[1, 2])?;

        let removed = a.intersect_with(&b);

        assert_eq!(removed, 2);
        assert_eq!(a.len(), 2);
        assert!(a.iter().all(|item| b.contains(item)));

        Ok(())
    }

    #[test]
    fn intersect_with_empty_empties() -> TestResult {
        let mut a = bag_of(&[1, 2, 3])?;

        a.intersect_with(&Bag::default());

        assert!(a.is_empty());

        Ok(())
    }

    #[test]
    fn equality_ignores_order_and_capacity() -> TestResult {
        let a = bag_of(&[1, 2, 2])?;
        let b = Bag::with_items(vec![2, 1, 2], 3)?;

        assert_eq!(a, b);

        Ok(())
    }

    #[test]
    fn equality_checks_frequency() -> TestResult {
        let a = bag_of(&[1, 2, 2])?;
        let b = bag_of(&[1, 1, 2])?;

        assert_ne!(a, b);

        Ok(())
    }

    #[test]
    fn equality_checks_size() -> TestResult {
        // every element of `a` occurs equally often in `b`, but `b` has more
        let a = bag_of(&[1])?;
        let b = bag_of(&[1, 2])?;

        assert_ne!(a, b);
        assert_ne!(b, a);

        Ok(())
    }

    #[test]
    fn empty_bags_are_equal() {
        assert_eq!(Bag::<i32>::new(1), Bag::<i32>::new(5));
    }
}
