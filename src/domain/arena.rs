//! Arena-backed binary search tree holding the course catalog.

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::{Course, DomainError, DomainResult};

/// Stable reference to a node in a [`CourseTree`].
///
/// Valid until that node is removed. Generation checking makes a removed
/// handle fail with [`DomainError::StaleHandle`] instead of aliasing a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseHandle(Index);

/// Tree node in the arena. Owns its course record.
#[derive(Debug)]
pub struct CourseNode {
    /// Course record owned by this node
    pub course: Course,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Subtree with ids `<=` this node's id
    pub left: Option<Index>,
    /// Subtree with ids `>=` this node's id
    pub right: Option<Index>,
}

impl CourseNode {
    fn new(course: Course) -> Self {
        Self {
            course,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn id(&self) -> &str {
        self.course.id()
    }
}

/// Unbalanced binary search tree keyed by course id.
///
/// Equal ids are routed left, so duplicates nest below the first entry and
/// lookups return the first match found top-down. Promoting a successor on
/// removal can leave an equal id in its right subtree. No rebalancing is
/// done; sorted input degrades to a linked list.
#[derive(Debug)]
pub struct CourseTree {
    /// Arena storage for all tree nodes
    arena: Arena<CourseNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
    /// Number of live nodes
    size: usize,
}

impl Default for CourseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            size: 0,
        }
    }

    /// Insert a course and return the handle of its node.
    #[instrument(level = "trace", skip(self, course), fields(id = course.id()))]
    pub fn insert(&mut self, course: Course) -> CourseHandle {
        let Some(mut current) = self.root else {
            let idx = self.arena.insert(CourseNode::new(course));
            self.root = Some(idx);
            self.size += 1;
            return CourseHandle(idx);
        };

        loop {
            let node = &self.arena[current];
            let go_left = course.id() <= node.id();
            let next = if go_left { node.left } else { node.right };

            match next {
                Some(child) => current = child,
                None => {
                    let mut new_node = CourseNode::new(course);
                    new_node.parent = Some(current);
                    let idx = self.arena.insert(new_node);
                    let parent = &mut self.arena[current];
                    if go_left {
                        parent.left = Some(idx);
                    } else {
                        parent.right = Some(idx);
                    }
                    self.size += 1;
                    return CourseHandle(idx);
                }
            }
        }
    }

    /// Remove the node behind `handle` and hand back its course.
    ///
    /// The node is spliced out and replaced by its successor: nothing for a
    /// leaf, the only child, or the left-most node of the right subtree when
    /// both children exist. Handles to all other nodes stay valid.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, handle: CourseHandle) -> DomainResult<Course> {
        let idx = handle.0;
        let (parent, left, right) = {
            let node = self.arena.get(idx).ok_or(DomainError::StaleHandle)?;
            (node.parent, node.left, node.right)
        };
        let successor = self.successor(idx);

        if let (Some(left), Some(right), Some(succ)) = (left, right, successor) {
            if succ != right {
                // Detach the successor; it has no left child by construction.
                let succ_parent = self.arena[succ].parent;
                let succ_right = self.arena[succ].right;
                if let Some(sp) = succ_parent {
                    self.arena[sp].left = succ_right;
                }
                if let Some(sr) = succ_right {
                    self.arena[sr].parent = succ_parent;
                }
                self.arena[succ].right = Some(right);
                self.arena[right].parent = Some(succ);
            }
            self.arena[succ].left = Some(left);
            self.arena[left].parent = Some(succ);
        }

        self.replace_child(parent, idx, successor);

        let node = self.arena.remove(idx).ok_or(DomainError::StaleHandle)?;
        self.size -= 1;
        debug!(id = node.course.id(), "removed course node");
        Ok(node.course)
    }

    /// Remove every node, root first, until the tree is empty.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        while let Some(root) = self.root {
            if self.remove(CourseHandle(root)).is_err() {
                break;
            }
        }
    }

    /// Node that takes over `idx`'s position when it is removed.
    fn successor(&self, idx: Index) -> Option<Index> {
        let node = &self.arena[idx];
        match (node.left, node.right) {
            (None, None) => None,
            (Some(left), None) => Some(left),
            (None, Some(right)) => Some(right),
            (Some(_), Some(right)) => {
                let mut current = right;
                while let Some(left) = self.arena[current].left {
                    current = left;
                }
                Some(current)
            }
        }
    }

    /// Point `parent`'s link to `old` (or the root slot) at `new`.
    fn replace_child(&mut self, parent: Option<Index>, old: Index, new: Option<Index>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = &mut self.arena[p];
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
        if let Some(n) = new {
            self.arena[n].parent = parent;
        }
    }

    /// Handle of the first node matching `id`, searching top-down.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &str) -> Option<CourseHandle> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            if node.id() == id {
                return Some(CourseHandle(idx));
            }
            current = if id < node.id() { node.left } else { node.right };
        }
        None
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Full detail text of the course with `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_details(&self, id: &str) -> DomainResult<String> {
        self.find(id)
            .and_then(|handle| self.get(handle))
            .map(|course| course.to_string())
            .ok_or_else(|| DomainError::CourseNotFound(id.to_string()))
    }

    pub fn get(&self, handle: CourseHandle) -> Option<&Course> {
        self.arena.get(handle.0).map(|node| &node.course)
    }

    pub fn get_node(&self, idx: Index) -> Option<&CourseNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Visit every course in ascending id order.
    pub fn traverse_ascending<F>(&self, mut visit: F)
    where
        F: FnMut(&Course),
    {
        for (_, course) in self.iter() {
            visit(course);
        }
    }

    /// In-order iterator over `(handle, course)` pairs.
    pub fn iter(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.arena[idx];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        max_depth
    }

    /// Check ordering, parent links and the node count.
    ///
    /// Every left descendant must be `<=` its ancestor and every right
    /// descendant `>=`; every child must point back at its parent.
    #[instrument(level = "debug", skip(self))]
    pub fn verify(&self) -> DomainResult<()> {
        let Some(root) = self.root else {
            return if self.size == 0 && self.arena.len() == 0 {
                Ok(())
            } else {
                Err(DomainError::Corrupt(format!(
                    "empty root but size {}",
                    self.size
                )))
            };
        };
        if self.arena[root].parent.is_some() {
            return Err(DomainError::Corrupt("root has a parent".to_string()));
        }

        // (node, lower bound, upper bound), both inclusive
        let mut stack: Vec<(Index, Option<&str>, Option<&str>)> = vec![(root, None, None)];
        let mut visited = 0usize;
        while let Some((idx, lower, upper)) = stack.pop() {
            visited += 1;
            if visited > self.arena.len() {
                return Err(DomainError::Corrupt("cycle in tree links".to_string()));
            }
            let node = self
                .arena
                .get(idx)
                .ok_or_else(|| DomainError::Corrupt("dangling child link".to_string()))?;
            let id = node.id();
            if lower.is_some_and(|lo| id < lo) || upper.is_some_and(|hi| id > hi) {
                return Err(DomainError::Corrupt(format!("{id} violates key order")));
            }
            for child in [node.left, node.right].into_iter().flatten() {
                let child_parent = self.arena.get(child).and_then(|c| c.parent);
                if child_parent != Some(idx) {
                    return Err(DomainError::Corrupt(format!(
                        "child of {id} does not point back to it"
                    )));
                }
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some(id)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(id), upper));
            }
        }

        if visited != self.size || visited != self.arena.len() {
            return Err(DomainError::Corrupt(format!(
                "reachable nodes {visited}, size {}, arena {}",
                self.size,
                self.arena.len()
            )));
        }
        Ok(())
    }
}

/// Stack-based in-order walk; yields ids in non-decreasing order.
pub struct InOrderIterator<'a> {
    tree: &'a CourseTree,
    stack: Vec<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a CourseTree) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Index>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.tree.arena[idx].left;
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (CourseHandle, &'a Course);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.arena[idx];
        self.push_left_spine(node.right);
        Some((CourseHandle(idx), &node.course))
    }
}
