//! Pre-order traversal over named nodes.
//!
//! `Preorder` is a plain iterator with an explicit `skip_subtree()` switch,
//! so "stop descending here" is decided by the consumer instead of a
//! callback's return value.

use arborium_tree_sitter::Node;

/// Depth-first, pre-order iterator over named nodes (comments included).
pub struct Preorder<'t> {
    stack: Vec<Node<'t>>,
    last: Option<Node<'t>>,
    skip: bool,
}

impl<'t> Preorder<'t> {
    pub fn new(root: Node<'t>) -> Self {
        Self {
            stack: vec![root],
            last: None,
            skip: false,
        }
    }

    /// Do not visit the descendants of the node returned last.
    pub fn skip_subtree(&mut self) {
        self.skip = true;
    }
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let skip = std::mem::take(&mut self.skip);
        if let Some(last) = self.last.take()
            && !skip
        {
            let mut cursor = last.walk();
            let kids: Vec<_> = last.named_children(&mut cursor).collect();
            self.stack.extend(kids.into_iter().rev());
        }

        let node = self.stack.pop()?;
        self.last = Some(node);
        Some(node)
    }
}

/// Lazily yields `f`'s matches, never looking inside a matched subtree.
pub struct FindPruned<'t, F> {
    walk: Preorder<'t>,
    f: F,
}

impl<'t, T, F> Iterator for FindPruned<'t, F>
where
    F: FnMut(Node<'t>) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some(node) = self.walk.next() {
            if let Some(found) = (self.f)(node) {
                self.walk.skip_subtree();
                return Some(found);
            }
        }
        None
    }
}

pub fn find_pruned<'t, T, F>(root: Node<'t>, f: F) -> FindPruned<'t, F>
where
    F: FnMut(Node<'t>) -> Option<T>,
{
    FindPruned {
        walk: Preorder::new(root),
        f,
    }
}

/// Every node of `kind` under `root` (inclusive), nested matches included.
pub fn descendants_of_kind<'t>(root: Node<'t>, kind: &'static str) -> impl Iterator<Item = Node<'t>> {
    Preorder::new(root).filter(move |n| n.kind() == kind)
}
