/*!
The decision-diagram kernel: a hash-consed, reference-counted node table.

No zero-suppressed decision diagram crate exists on crates.io with the shape
this library needs, so the kernel is implemented here, in the same plain,
safe Rust the rest of the crate is written in. Nodes are [Rc]-backed rather
than arena-indexed: holding a clone of a [Node] *is* the "protect" half of
the protect/unprotect discipline used by decision-diagram packages such as
Sylvan or CUDD, and dropping the clone is "unprotect" — ordinary ownership
does the bookkeeping, so no explicit calls are needed (see
[crate::generic::lru] for the one place this matters, the operation caches).

The kernel deliberately does not implement garbage collection of the
hash-consing table: nodes are retained for the lifetime of the process. A
long-running consumer that constructs very many distinct diagrams should
expect the table to grow; this is an explicit non-goal (see `SPEC_FULL.md`),
matching the batch, non-incremental nature of the preprocessor this crate
implements.
*/

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

use crate::misc::log::targets;

/// A node variable in the decision diagram. Not to be confused with a CNF
/// [Literal](crate::zdd::Literal) — see [crate::zdd::literal] for the mapping
/// between the two.
pub type Var = u32;

#[derive(Debug)]
enum Inner {
    False,
    True,
    Branch { var: Var, low: Node, high: Node },
}

/// A handle to a canonical decision-diagram node.
///
/// Two `Node`s are equal iff they are the same node: structurally-equal
/// subgraphs are always hash-consed to a single shared handle, so identity
/// comparison (a pointer compare, via [Rc::ptr_eq]) suffices in place of deep
/// structural equality everywhere in this crate.
#[derive(Clone, Debug)]
pub struct Node(Rc<Inner>);

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl Node {
    pub fn is_false(&self) -> bool {
        matches!(*self.0, Inner::False)
    }

    pub fn is_true(&self) -> bool {
        matches!(*self.0, Inner::True)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(*self.0, Inner::False | Inner::True)
    }

    /// The node variable at the root of this node, or `None` on a terminal.
    pub fn topvar(&self) -> Option<Var> {
        match &*self.0 {
            Inner::Branch { var, .. } => Some(*var),
            _ => None,
        }
    }

    /// The low child (sets excluding this node's variable). Terminals are
    /// their own low child, which keeps restriction/recursion code from
    /// needing a special case at the leaves.
    pub fn low(&self) -> Node {
        match &*self.0 {
            Inner::Branch { low, .. } => low.clone(),
            _ => self.clone(),
        }
    }

    /// The high child (sets including this node's variable).
    ///
    /// # Panics
    ///
    /// Panics on a terminal: a terminal has no high child, and unlike `low`
    /// there is no sensible default (the zero-suppression rule forbids a
    /// node whose high child is `False`, so silently returning `False` would
    /// mask a caller bug rather than degrade gracefully).
    pub fn high(&self) -> Node {
        match &*self.0 {
            Inner::Branch { high, .. } => high.clone(),
            _ => panic!("high() called on a terminal node"),
        }
    }

    fn ptr_key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

struct Table {
    entries: HashMap<(Var, usize, usize), Node>,
    false_node: Node,
    true_node: Node,
}

impl Table {
    fn new() -> Self {
        let false_node = Node(Rc::new(Inner::False));
        let true_node = Node(Rc::new(Inner::True));
        Self {
            entries: HashMap::new(),
            false_node,
            true_node,
        }
    }
}

thread_local! {
    static TABLE: RefCell<Table> = RefCell::new(Table::new());
}

/// The unique `False` terminal: the empty family of clauses.
pub fn zero() -> Node {
    TABLE.with(|t| t.borrow().false_node.clone())
}

/// The unique `True` terminal: the family containing only the empty clause.
pub fn one() -> Node {
    TABLE.with(|t| t.borrow().true_node.clone())
}

/// Builds (or retrieves the canonical instance of) the node `var -< low,
/// high >-`, applying the zero-suppression rule: a node whose high child is
/// `False` contributes nothing (no set of the family selects `var`) and so
/// is elided in favour of its low child directly.
///
/// Callers are responsible for the variable-ordering invariant: `low` and
/// `high` must either be terminal or have `topvar() > var`.
pub fn make_node(var: Var, low: Node, high: Node) -> Node {
    if high.is_false() {
        return low;
    }
    debug_assert!(low.topvar().is_none_or(|v| v > var));
    debug_assert!(high.topvar().is_none_or(|v| v > var));

    let key = (var, low.ptr_key(), high.ptr_key());
    TABLE.with(|t| {
        let mut t = t.borrow_mut();
        if let Some(existing) = t.entries.get(&key) {
            return existing.clone();
        }
        let node = Node(Rc::new(Inner::Branch {
            var,
            low: low.clone(),
            high: high.clone(),
        }));
        t.entries.insert(key, node.clone());
        trace!(target: targets::KERNEL, "hash-consed new node for var {var}, table size {}", t.entries.len());
        node
    })
}

/// Number of distinct nodes currently hash-consed. Exposed for diagnostics
/// and tests; not meaningful as a stable API guarantee.
pub fn table_size() -> usize {
    TABLE.with(|t| t.borrow().entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_consing_is_canonical() {
        let a = make_node(4, zero(), one());
        let b = make_node(4, zero(), one());
        assert_eq!(a, b);
    }

    #[test]
    fn zero_suppression_elides_dead_high() {
        let low = make_node(6, zero(), one());
        let elided = make_node(4, low.clone(), zero());
        assert_eq!(elided, low);
    }

    #[test]
    fn distinct_structure_is_distinct() {
        let a = make_node(4, zero(), one());
        let b = make_node(5, zero(), one());
        assert_ne!(a, b);
    }
}
