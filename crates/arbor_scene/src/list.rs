//! Insertion-ordered ownership lists threaded through an arena.
//!
//! Elements live in a `SlotMap`; each element stores its own `prev`/`next`
//! links, so appending and unlinking a known element are O(1) and the list
//! header is just `head`, `tail` and a count. The same list type backs a
//! node's children and an object's components.
//!
//! Unlinking does not free anything: the caller decides whether the element
//! is dropped from the arena or relinked into another list.

use std::iter::FusedIterator;

use slotmap::{Key, SlotMap};

/// Neighbour links embedded in every list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links<K> {
    prev: Option<K>,
    next: Option<K>,
}

impl<K> Links<K> {
    pub const fn new() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

impl<K> Default for Links<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena elements that can be threaded into an [`OwnedList`].
pub trait Linked<K: Key> {
    fn links(&self) -> &Links<K>;
    fn links_mut(&mut self) -> &mut Links<K>;
}

/// Header of a doubly-linked list whose elements live in an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedList<K: Key> {
    head: Option<K>,
    tail: Option<K>,
    len: usize,
}

impl<K: Key> Default for OwnedList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> OwnedList<K> {
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn head(&self) -> Option<K> {
        self.head
    }

    pub fn tail(&self) -> Option<K> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `key` at the tail.
    ///
    /// Returns false if `key` is not in the arena. The element must not
    /// currently belong to any list.
    pub fn push_back<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>, key: K) -> bool {
        if !arena.contains_key(key) {
            return false;
        }
        let prev = self.tail;
        match prev.and_then(|tail| arena.get_mut(tail)) {
            Some(tail) => tail.links_mut().next = Some(key),
            None => self.head = Some(key),
        }
        if let Some(element) = arena.get_mut(key) {
            *element.links_mut() = Links { prev, next: None };
        }
        self.tail = Some(key);
        self.len += 1;
        true
    }

    /// Unlink `key` from this list, patching its neighbours and the ends.
    ///
    /// Returns false when `key` is not an element of this list.
    pub fn unlink<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>, key: K) -> bool {
        let Some(element) = arena.get(key) else {
            return false;
        };
        let Links { prev, next } = *element.links();

        // An element without a predecessor must be our head (same for tail)
        if (prev.is_none() && self.head != Some(key)) || (next.is_none() && self.tail != Some(key))
        {
            return false;
        }

        match prev.and_then(|p| arena.get_mut(p)) {
            Some(p) => p.links_mut().next = next,
            None => self.head = next,
        }
        match next.and_then(|n| arena.get_mut(n)) {
            Some(n) => n.links_mut().prev = prev,
            None => self.tail = prev,
        }
        if let Some(element) = arena.get_mut(key) {
            *element.links_mut() = Links::new();
        }
        self.len -= 1;
        true
    }

    /// Unlink and return the first element.
    pub fn pop_front<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>) -> Option<K> {
        let head = self.head?;
        self.unlink(arena, head).then_some(head)
    }

    /// Unlink and return the last element.
    pub fn pop_back<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>) -> Option<K> {
        let tail = self.tail?;
        self.unlink(arena, tail).then_some(tail)
    }

    /// Iterate the element keys in insertion order (reversible).
    pub fn iter<'a, T: Linked<K>>(&self, arena: &'a SlotMap<K, T>) -> Iter<'a, K, T> {
        Iter {
            arena,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }
}

/// Borrowing cursor over an [`OwnedList`]; released when dropped.
pub struct Iter<'a, K: Key, T> {
    arena: &'a SlotMap<K, T>,
    front: Option<K>,
    back: Option<K>,
    remaining: usize,
}

impl<K: Key, T: Linked<K>> Iterator for Iter<'_, K, T> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.front?;
        self.front = self.arena.get(key).and_then(|e| e.links().next);
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Key, T: Linked<K>> DoubleEndedIterator for Iter<'_, K, T> {
    fn next_back(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.back?;
        self.back = self.arena.get(key).and_then(|e| e.links().prev);
        self.remaining -= 1;
        Some(key)
    }
}

impl<K: Key, T: Linked<K>> ExactSizeIterator for Iter<'_, K, T> {}

impl<K: Key, T: Linked<K>> FusedIterator for Iter<'_, K, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::DefaultKey;

    struct Node {
        value: u32,
        links: Links<DefaultKey>,
    }

    impl Linked<DefaultKey> for Node {
        fn links(&self) -> &Links<DefaultKey> {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links<DefaultKey> {
            &mut self.links
        }
    }

    fn fixture(n: u32) -> (SlotMap<DefaultKey, Node>, OwnedList<DefaultKey>, Vec<DefaultKey>) {
        let mut arena = SlotMap::new();
        let mut list = OwnedList::new();
        let keys: Vec<_> = (0..n)
            .map(|value| {
                let key = arena.insert(Node {
                    value,
                    links: Links::new(),
                });
                assert!(list.push_back(&mut arena, key));
                key
            })
            .collect();
        (arena, list, keys)
    }

    fn values(list: &OwnedList<DefaultKey>, arena: &SlotMap<DefaultKey, Node>) -> Vec<u32> {
        list.iter(arena).map(|k| arena[k].value).collect()
    }

    #[test]
    fn test_push_back_preserves_order() {
        let (arena, list, keys) = fixture(4);
        assert_eq!(list.len(), 4);
        assert_eq!(list.head(), Some(keys[0]));
        assert_eq!(list.tail(), Some(keys[3]));
        assert_eq!(values(&list, &arena), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reverse_iteration() {
        let (arena, list, _) = fixture(3);
        let reversed: Vec<u32> = list.iter(&arena).rev().map(|k| arena[k].value).collect();
        assert_eq!(reversed, vec![2, 1, 0]);
    }

    #[test]
    fn test_iteration_meets_in_the_middle() {
        let (arena, list, keys) = fixture(3);
        let mut it = list.iter(&arena);
        assert_eq!(it.next(), Some(keys[0]));
        assert_eq!(it.next_back(), Some(keys[2]));
        assert_eq!(it.next(), Some(keys[1]));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_unlink_middle_and_ends() {
        let (mut arena, mut list, keys) = fixture(5);

        assert!(list.unlink(&mut arena, keys[2]));
        assert_eq!(values(&list, &arena), vec![0, 1, 3, 4]);

        assert!(list.unlink(&mut arena, keys[0]));
        assert_eq!(list.head(), Some(keys[1]));

        assert!(list.unlink(&mut arena, keys[4]));
        assert_eq!(list.tail(), Some(keys[3]));
        assert_eq!(values(&list, &arena), vec![1, 3]);
        assert_eq!(list.len(), 2);

        // Unlinked element keeps living in the arena with cleared links
        assert_eq!(arena[keys[2]].links, Links::new());
    }

    #[test]
    fn test_unlink_foreign_element_is_refused() {
        let (mut arena, mut list, _) = fixture(2);
        let stray = arena.insert(Node {
            value: 99,
            links: Links::new(),
        });

        assert!(!list.unlink(&mut arena, stray));
        assert_eq!(list.len(), 2);
        assert_eq!(values(&list, &arena), vec![0, 1]);
    }

    #[test]
    fn test_relink_into_other_list() {
        let (mut arena, mut a, keys) = fixture(3);
        let mut b = OwnedList::new();

        assert!(a.unlink(&mut arena, keys[1]));
        assert!(b.push_back(&mut arena, keys[1]));

        assert_eq!(values(&a, &arena), vec![0, 2]);
        assert_eq!(values(&b, &arena), vec![1]);
    }

    #[test]
    fn test_pop_front_and_back() {
        let (mut arena, mut list, keys) = fixture(3);
        assert_eq!(list.pop_back(&mut arena), Some(keys[2]));
        assert_eq!(list.pop_front(&mut arena), Some(keys[0]));
        assert_eq!(list.pop_front(&mut arena), Some(keys[1]));
        assert_eq!(list.pop_front(&mut arena), None);
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
    }
}
