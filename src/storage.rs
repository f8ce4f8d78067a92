//! Append-only block arena.
//!
//! Values are stored in blocks of `2^bits` cells. A new block is allocated
//! only when the last one is full, and no block is ever released: indices
//! handed out by [`Storage::add`] stay valid for the lifetime of the storage.

use log::debug;

pub struct Storage<T> {
    blocks: Vec<Vec<T>>,
    bits: usize,
    /// Number of stored values.
    size: usize,
}

impl<T> Storage<T> {
    /// Create an empty storage with blocks of `2^bits` cells.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        Self {
            blocks: Vec::new(),
            bits,
            size: 0,
        }
    }

    /// Get the number of cells in a single block.
    pub fn block_size(&self) -> usize {
        1 << self.bits
    }
    /// Get the number of allocated blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
    /// Get the total number of cells in the allocated blocks.
    pub fn capacity(&self) -> usize {
        self.blocks.len() << self.bits
    }
    /// Get the number of stored values.
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn locate(&self, index: usize) -> (usize, usize) {
        (index >> self.bits, index & (self.block_size() - 1))
    }

    /// Add a new value and return its index.
    pub fn add(&mut self, value: T) -> usize {
        if self.size == self.capacity() {
            debug!(
                "storage: allocating block #{} of {} cells",
                self.blocks.len(),
                self.block_size()
            );
            self.blocks.push(Vec::with_capacity(self.block_size()));
        }

        let index = self.size;
        let (block, _) = self.locate(index);
        self.blocks[block].push(value);
        self.size += 1;
        index
    }

    /// Get the reference to the value at the given index.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }
        let (block, offset) = self.locate(index);
        self.blocks[block].get(offset)
    }

    /// Get the reference to the value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if nothing is stored at `index`.
    pub fn value(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("Index {} is not occupied", index),
        }
    }
}

impl<T> std::ops::Index<usize> for Storage<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let mut storage = Storage::new(2);
        assert!(storage.is_empty());
        assert_eq!(storage.add(10), 0);
        assert_eq!(storage.add(20), 1);
        assert_eq!(storage.add(30), 2);
        assert_eq!(storage[1], 20);
        assert_eq!(storage.size(), 3);
    }

    #[test]
    fn test_grows_by_blocks() {
        let mut storage = Storage::new(2);
        assert_eq!(storage.num_blocks(), 0);
        for i in 0..4 {
            storage.add(i);
        }
        assert_eq!(storage.num_blocks(), 1);
        assert_eq!(storage.capacity(), 4);

        storage.add(4);
        assert_eq!(storage.num_blocks(), 2);
        assert_eq!(storage.capacity(), 8);
        assert_eq!(storage[4], 4);
        assert_eq!(storage[3], 3);
    }

    #[test]
    fn test_indices_are_stable() {
        let mut storage = Storage::new(1);
        let indices: Vec<usize> = (0..100).map(|i| storage.add(i * 7)).collect();
        for (i, &index) in indices.iter().enumerate() {
            assert_eq!(storage[index], i * 7);
        }
        assert_eq!(storage.size(), 100);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut storage = Storage::new(3);
        storage.add('a');
        assert_eq!(storage.get(0), Some(&'a'));
        assert_eq!(storage.get(1), None);
    }

    #[test]
    #[should_panic(expected = "Index 5 is not occupied")]
    fn test_value_out_of_range() {
        let storage = Storage::<u8>::new(3);
        storage.value(5);
    }
}
