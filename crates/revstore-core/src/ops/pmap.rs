//! Persistent map from object identity to per-revision state
//!
//! A 32-way radix trie of `Arc` nodes. Cloning the map is O(1); mutating a
//! clone copies only the nodes on the path to the touched key
//! (`Arc::make_mut`), so untouched subtrees stay shared between revisions.
//! Empty nodes are pruned on removal, and the root grows by wrapping itself
//! in slot 0 of a new branch when a key does not fit under the current height.

use std::fmt;
use std::sync::Arc;

const BITS: u32 = 5;
const WIDTH: usize = 1 << BITS;
const MASK: u64 = (WIDTH as u64) - 1;

#[derive(Clone)]
enum Node<V> {
    Branch([Option<Arc<Node<V>>>; WIDTH]),
    Leaf([Option<V>; WIDTH]),
}

impl<V> Node<V> {
    fn empty(shift: u32) -> Self {
        if shift == 0 {
            Node::Leaf(std::array::from_fn(|_| None))
        } else {
            Node::Branch(std::array::from_fn(|_| None))
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Node::Branch(children) => children.iter().all(Option::is_none),
            Node::Leaf(values) => values.iter().all(Option::is_none),
        }
    }
}

fn index(key: u64, shift: u32) -> usize {
    ((key >> shift) & MASK) as usize
}

/// Whether a trie whose root sits at `shift` can hold `key`
fn covers(shift: u32, key: u64) -> bool {
    let bits = shift + BITS;
    bits >= u64::BITS || key >> bits == 0
}

/// Persistent, structurally shared map keyed by `u64`
pub struct PersistentMap<V> {
    root: Option<Arc<Node<V>>>,
    shift: u32,
    len: usize,
}

impl<V> Default for PersistentMap<V> {
    fn default() -> Self {
        Self {
            root: None,
            shift: 0,
            len: 0,
        }
    }
}

impl<V> Clone for PersistentMap<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            shift: self.shift,
            len: self.len,
        }
    }
}

impl<V> PersistentMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: u64) -> Option<&V> {
        if !covers(self.shift, key) {
            return None;
        }
        let mut node = self.root.as_deref()?;
        let mut shift = self.shift;
        loop {
            let idx = index(key, shift);
            match node {
                Node::Branch(children) => {
                    node = children[idx].as_deref()?;
                    shift -= BITS;
                }
                Node::Leaf(values) => return values[idx].as_ref(),
            }
        }
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.get(key).is_some()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> Iter<'_, V> {
        let stack = match self.root.as_deref() {
            Some(node) => vec![Frame {
                node,
                shift: self.shift,
                prefix: 0,
                next: 0,
            }],
            None => Vec::new(),
        };
        Iter {
            stack,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Report every key present in `self` or `other`, except where both maps
    /// hold the very same subtree
    ///
    /// The callback receives the key with its value in `self` and in `other`.
    /// Shared subtrees are skipped without being visited, so a map compared
    /// with a lightly edited clone costs time proportional to the edits.
    pub fn diff<'a, F>(&'a self, other: &'a Self, mut visit: F)
    where
        F: FnMut(u64, Option<&'a V>, Option<&'a V>),
    {
        diff_nodes(
            self.root.as_deref(),
            self.shift,
            other.root.as_deref(),
            other.shift,
            0,
            &mut visit,
        );
    }
}

impl<V: Clone> PersistentMap<V> {
    /// Insert or replace; returns the previous value
    pub fn insert(&mut self, key: u64, value: V) -> Option<V> {
        if self.root.is_none() {
            self.shift = 0;
        }
        while !covers(self.shift, key) {
            self.grow();
        }
        let shift = self.shift;
        let root = self
            .root
            .get_or_insert_with(|| Arc::new(Node::empty(shift)));
        let previous = insert_at(root, shift, key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Mutable access; copies the path to `key` if it is shared
    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        if !self.contains_key(key) {
            return None;
        }
        let shift = self.shift;
        get_mut_at(self.root.as_mut()?, shift, key)
    }

    pub fn remove(&mut self, key: u64) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        let shift = self.shift;
        let removed = remove_at(self.root.as_mut()?, shift, key);
        if removed.is_some() {
            self.len -= 1;
            if self.len == 0 {
                self.root = None;
                self.shift = 0;
            }
        }
        removed
    }

    fn grow(&mut self) {
        if let Some(root) = self.root.take() {
            let mut children: [Option<Arc<Node<V>>>; WIDTH] = std::array::from_fn(|_| None);
            children[0] = Some(root);
            self.root = Some(Arc::new(Node::Branch(children)));
        }
        self.shift += BITS;
    }
}

fn insert_at<V: Clone>(node: &mut Arc<Node<V>>, shift: u32, key: u64, value: V) -> Option<V> {
    let idx = index(key, shift);
    match Arc::make_mut(node) {
        Node::Branch(children) => {
            let child = children[idx].get_or_insert_with(|| Arc::new(Node::empty(shift - BITS)));
            insert_at(child, shift - BITS, key, value)
        }
        Node::Leaf(values) => values[idx].replace(value),
    }
}

fn get_mut_at<V: Clone>(node: &mut Arc<Node<V>>, shift: u32, key: u64) -> Option<&mut V> {
    let idx = index(key, shift);
    match Arc::make_mut(node) {
        Node::Branch(children) => get_mut_at(children[idx].as_mut()?, shift - BITS, key),
        Node::Leaf(values) => values[idx].as_mut(),
    }
}

fn remove_at<V: Clone>(node: &mut Arc<Node<V>>, shift: u32, key: u64) -> Option<V> {
    let idx = index(key, shift);
    match Arc::make_mut(node) {
        Node::Branch(children) => {
            let child = children[idx].as_mut()?;
            let removed = remove_at(child, shift - BITS, key);
            if child.is_empty() {
                children[idx] = None;
            }
            removed
        }
        Node::Leaf(values) => values[idx].take(),
    }
}

/// Child `idx` of a node seen from level `shift`
///
/// A node sitting lower than `shift` lives entirely under slot 0 of the
/// (virtual) node at `shift`, because a grown root is always wrapped in slot 0.
fn child_at<V>(node: Option<&Node<V>>, node_shift: u32, shift: u32, idx: usize) -> (Option<&Node<V>>, u32) {
    match node {
        None => (None, 0),
        Some(n) if node_shift < shift => {
            if idx == 0 {
                (Some(n), node_shift)
            } else {
                (None, 0)
            }
        }
        Some(Node::Branch(children)) => (children[idx].as_deref(), shift - BITS),
        Some(Node::Leaf(_)) => (None, 0),
    }
}

fn leaf_value<V>(node: Option<&Node<V>>, idx: usize) -> Option<&V> {
    match node {
        Some(Node::Leaf(values)) => values[idx].as_ref(),
        _ => None,
    }
}

fn diff_nodes<'a, V, F>(
    a: Option<&'a Node<V>>,
    a_shift: u32,
    b: Option<&'a Node<V>>,
    b_shift: u32,
    prefix: u64,
    visit: &mut F,
) where
    F: FnMut(u64, Option<&'a V>, Option<&'a V>),
{
    let shift = match (a, b) {
        (None, None) => return,
        (Some(x), Some(y)) if a_shift == b_shift && std::ptr::eq(x, y) => return,
        (Some(_), Some(_)) => a_shift.max(b_shift),
        (Some(_), None) => a_shift,
        (None, Some(_)) => b_shift,
    };

    if shift == 0 {
        for idx in 0..WIDTH {
            let va = leaf_value(a, idx);
            let vb = leaf_value(b, idx);
            if va.is_some() || vb.is_some() {
                visit(prefix | idx as u64, va, vb);
            }
        }
        return;
    }

    for idx in 0..WIDTH {
        let (ca, ca_shift) = child_at(a, a_shift, shift, idx);
        let (cb, cb_shift) = child_at(b, b_shift, shift, idx);
        diff_nodes(
            ca,
            ca_shift,
            cb,
            cb_shift,
            prefix | ((idx as u64) << shift),
            visit,
        );
    }
}

struct Frame<'a, V> {
    node: &'a Node<V>,
    shift: u32,
    prefix: u64,
    next: usize,
}

/// Ascending-key iterator over a [`PersistentMap`]
pub struct Iter<'a, V> {
    stack: Vec<Frame<'a, V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.last_mut() {
            if frame.next >= WIDTH {
                self.stack.pop();
                continue;
            }
            let idx = frame.next;
            frame.next += 1;
            let node = frame.node;
            let shift = frame.shift;
            let key = frame.prefix | ((idx as u64) << shift);
            match node {
                Node::Leaf(values) => {
                    if let Some(value) = values[idx].as_ref() {
                        self.remaining -= 1;
                        return Some((key, value));
                    }
                }
                Node::Branch(children) => {
                    if let Some(child) = children[idx].as_deref() {
                        self.stack.push(Frame {
                            node: child,
                            shift: shift - BITS,
                            prefix: key,
                            next: 0,
                        });
                    }
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for PersistentMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
