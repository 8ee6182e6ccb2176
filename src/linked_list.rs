//! Singly linked list backed by an index arena.
//!
//! Nodes live in a `Vec` of slots and link to each other by slot index, so
//! the list needs no raw pointers. Vacated slots go on a free list and are
//! reused by later insertions. `head`, `tail` and the length are cached:
//! pushing at either end is O(1), removing the tail walks from the head to
//! find its predecessor.

/// A node stored in the arena
#[derive(Debug, Clone)]
struct Node<T> {
    /// The element held by this node
    value: T,
    /// Slot index of the following node
    next: Option<usize>,
}

/// Singly linked list with cached head and tail
#[derive(Debug, Clone)]
pub struct LinkedList<T> {
    /// Arena of nodes; `None` marks a vacant slot
    slots: Vec<Option<Node<T>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    /// Slot of the first node
    head: Option<usize>,
    /// Slot of the last node
    tail: Option<usize>,
    /// Number of nodes in the list
    len: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), head: None, tail: None, len: 0 }
    }

    /// Returns the number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Stores a node in a vacant slot, or a new one, and returns its index
    fn allocate(&mut self, node: Node<T>) -> usize {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = Some(node);
                return index;
            }
        }
        self.slots.push(Some(node));
        self.slots.len().saturating_sub(1)
    }

    /// Takes the node out of a slot and marks the slot vacant
    fn release(&mut self, index: usize) -> Option<Node<T>> {
        let node = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        self.len = self.len.saturating_sub(1);
        Some(node)
    }

    /// Returns the node in a slot
    fn node(&self, index: usize) -> Option<&Node<T>> {
        self.slots.get(index)?.as_ref()
    }

    /// Returns the node in a slot, mutably
    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Inserts an element before the current head
    pub fn add_first(&mut self, value: T) {
        let index = self.allocate(Node { value, next: self.head });
        if self.tail.is_none() {
            self.tail = Some(index);
        }
        self.head = Some(index);
        self.len = self.len.saturating_add(1);
    }

    /// Inserts an element after the current tail
    pub fn add_last(&mut self, value: T) {
        let index = self.allocate(Node { value, next: None });
        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len = self.len.saturating_add(1);
    }

    /// Removes and returns the first element
    pub fn remove_first(&mut self) -> Option<T> {
        let head = self.head?;
        let node = self.release(head)?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(node.value)
    }

    /// Removes and returns the last element
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        let previous = self.predecessor(tail);
        self.unlink(previous, tail)
    }

    /// Removes the first element equal to `search` and returns it
    pub fn remove(&mut self, search: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut previous = None;
        let mut current = self.head;
        while let Some(index) = current {
            let node = self.node(index)?;
            if node.value == *search {
                return self.unlink(previous, index);
            }
            previous = current;
            current = node.next;
        }
        None
    }

    /// Returns true if some element equals `search`
    pub fn contains(&self, search: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|value| value == search)
    }

    /// Returns the first element
    #[must_use]
    pub fn peek_first(&self) -> Option<&T> {
        self.node(self.head?).map(|node| &node.value)
    }

    /// Returns the last element
    #[must_use]
    pub fn peek_last(&self) -> Option<&T> {
        self.node(self.tail?).map(|node| &node.value)
    }

    /// Returns an iterator from head to tail
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { list: self, current: self.head }
    }

    /// Finds the slot whose node links to `target`
    fn predecessor(&self, target: usize) -> Option<usize> {
        let mut current = self.head;
        while let Some(index) = current {
            let next = self.node(index)?.next;
            if next == Some(target) {
                return Some(index);
            }
            current = next;
        }
        None
    }

    /// Detaches `index`, whose predecessor is `previous`, and returns its element
    fn unlink(&mut self, previous: Option<usize>, index: usize) -> Option<T> {
        let node = self.release(index)?;
        match previous.and_then(|previous| self.node_mut(previous)) {
            Some(previous) => previous.next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(index) {
            self.tail = previous;
        }
        Some(node.value)
    }
}

/// Iterator over the elements of a [`LinkedList`]
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    /// The list being traversed
    list: &'a LinkedList<T>,
    /// Slot of the next node to yield
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?)?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.add_last(value);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_empty_list() {
        let mut list: LinkedList<i32> = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.peek_first(), None);
        assert_eq!(list.peek_last(), None);
        assert_eq!(list.remove_first(), None);
        assert_eq!(list.remove_last(), None);
        assert_eq!(list.remove(&1), None);
    }

    #[test]
    fn test_add_first_and_last() {
        let mut list = LinkedList::new();
        list.add_first(2);
        list.add_first(1);
        list.add_last(3);

        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.peek_first(), Some(&1));
        assert_eq!(list.peek_last(), Some(&3));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_single_element_sets_head_and_tail() {
        let mut list = LinkedList::new();
        list.add_first("only");
        assert_eq!(list.peek_first(), list.peek_last());

        assert_eq!(list.remove_last(), Some("only"));
        assert!(list.is_empty());
        assert_eq!(list.peek_last(), None);

        list.add_last("again");
        assert_eq!(list.peek_first(), Some(&"again"));
    }

    #[test]
    fn test_remove_first_and_last() {
        let mut list: LinkedList<i32> = (1..=4).collect();

        assert_eq!(list.remove_first(), Some(1));
        assert_eq!(list.remove_last(), Some(4));
        assert_eq!(collect(&list), vec![2, 3]);
        assert_eq!(list.peek_last(), Some(&3));

        list.add_last(5);
        assert_eq!(collect(&list), vec![2, 3, 5]);
    }

    #[test]
    fn test_remove_by_value() {
        let mut list: LinkedList<i32> = vec![1, 2, 3, 2, 4].into_iter().collect();

        assert_eq!(list.remove(&2), Some(2));
        assert_eq!(collect(&list), vec![1, 3, 2, 4]);

        // tail
        assert_eq!(list.remove(&4), Some(4));
        assert_eq!(list.peek_last(), Some(&2));
        list.add_last(6);
        assert_eq!(collect(&list), vec![1, 3, 2, 6]);

        // head
        assert_eq!(list.remove(&1), Some(1));
        assert_eq!(list.peek_first(), Some(&3));

        assert_eq!(list.remove(&42), None);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_contains() {
        let list: LinkedList<&str> = ["a", "b"].into_iter().collect();
        assert!(list.contains(&"a"));
        assert!(list.contains(&"b"));
        assert!(!list.contains(&"c"));
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = LinkedList::new();
        for i in 0..8 {
            list.add_last(i);
        }
        for _ in 0..8 {
            list.remove_first();
        }
        for i in 0..8 {
            list.add_first(i);
        }

        assert_eq!(list.slots.len(), 8);
        assert_eq!(collect(&list), vec![7, 6, 5, 4, 3, 2, 1, 0]);
    }
}
