//! Bounded cart ledger.

use std::collections::VecDeque;

use playreg_core::Item;

/// Ordered list of scanned items, oldest first, capped at the number of
/// rows the screen can show.
///
/// ```
/// use playreg_core::Item;
/// use playreg_register::Cart;
///
/// let mut cart = Cart::new(2);
/// cart.push(Item::new("a", 100));
/// cart.push(Item::new("b", 200));
/// let evicted = cart.push(Item::new("c", 300));
///
/// assert_eq!(evicted, Some(Item::new("a", 100)));
/// assert_eq!(cart.total(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: VecDeque<Item>,
    capacity: usize,
}

impl Cart {
    /// Create an empty cart. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append an item, evicting and returning the oldest one when full.
    pub fn push(&mut self, item: Item) -> Option<Item> {
        self.items.push_back(item);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of item prices, computed on every call.
    pub fn total(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.price)).sum()
    }

    /// Items in scan order.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &Item> + ExactSizeIterator {
        self.items.iter()
    }

    /// Items newest first, the order the screen lists them.
    pub fn newest_first(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
