use crate::error::SnakeFull;

/// Fixed-capacity queue with wraparound indexing.
///
/// Elements are pushed at the back and popped from the front; the backing
/// storage is allocated once and never grows.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    begin: usize,
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        RingBuffer { slots: vec![T::default(); capacity], begin: 0, len: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn push_back(&mut self, item: T) -> Result<(), SnakeFull> {
        if self.is_full() {
            return Err(SnakeFull);
        }

        let at = self.slot(self.len);
        self.slots[at] = item;
        self.len += 1;
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots[self.begin];
        self.begin = (self.begin + 1) % self.capacity();
        self.len -= 1;
        Some(item)
    }

    pub fn back(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[self.slot(self.len - 1)])
        }
    }

    /// Oldest to newest.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.slots[self.slot(i)])
    }

    ///////////////////////////////////////////////////////////////////////////

    fn slot(&self, offset: usize) -> usize {
        (self.begin + offset) % self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_fails_once_full() {
        let mut ring = RingBuffer::with_capacity(2);
        assert_eq!(ring.push_back(1), Ok(()));
        assert_eq!(ring.push_back(2), Ok(()));
        assert!(ring.is_full());
        assert_eq!(ring.push_back(3), Err(SnakeFull));
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut ring: RingBuffer<u8> = RingBuffer::with_capacity(3);
        assert_eq!(ring.pop_front(), None);
        assert!(ring.back().is_none());
    }

    #[test]
    fn wraps_past_the_end_of_storage() {
        let mut ring = RingBuffer::with_capacity(3);
        for i in 0..3 {
            ring.push_back(i).unwrap();
        }
        assert_eq!(ring.pop_front(), Some(0));
        assert_eq!(ring.pop_front(), Some(1));
        ring.push_back(3).unwrap();
        ring.push_back(4).unwrap();

        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(ring.back(), Some(4));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn len_tracks_pushes_minus_pops() {
        let mut ring = RingBuffer::with_capacity(5);
        let (mut pushes, mut pops) = (0, 0);

        for step in 0..40 {
            if step % 3 == 2 {
                if ring.pop_front().is_some() {
                    pops += 1;
                }
            } else if ring.push_back(step).is_ok() {
                pushes += 1;
            }
            assert_eq!(ring.len(), pushes - pops);
        }
    }
}
