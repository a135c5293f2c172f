/*!
CNF-specific rewrites of a ZDD: tautology removal and subsumed-clause
removal.

Both exploit structure specific to the [literal encoding](crate::zdd::literal)
and are memoised the same way as [crate::cnf::algebra]'s operators.
*/

use std::cell::RefCell;

use crate::cnf::algebra::intersect;
use crate::cnf::queries::contains_empty_clause;
use crate::generic::LruCache;
use crate::zdd::{make_node, zero, Node};

const DEFAULT_CACHE_CAPACITY: usize = 32;

thread_local! {
    static TAUTOLOGY_CACHE: RefCell<LruCache<Node, Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static SUBSUMED_CACHE: RefCell<LruCache<Node, Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static SUPERSETS_CACHE: RefCell<LruCache<(Node, Node), Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
}

/// Resizes every transform cache. See [crate::cnf::algebra::set_cache_capacity].
pub fn set_cache_capacity(capacity: usize) {
    TAUTOLOGY_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
    SUBSUMED_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
    SUPERSETS_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
}

/// Removes every clause containing a complementary literal pair.
///
/// A node and its high child are complementary on the same clause-variable
/// exactly when their node variables agree once the polarity bit is masked
/// off (`topvar / 2`) — the literal encoding guarantees `+v` and `-v` are
/// consecutive node variables, so this is a single comparison rather than a
/// search.
pub fn remove_tautologies(node: &Node) -> Node {
    if node.is_terminal() {
        return node.clone();
    }
    if let Some(hit) = TAUTOLOGY_CACHE.with(|c| c.borrow_mut().try_get(node).cloned()) {
        return hit;
    }

    let var = node.topvar().unwrap();
    let low = remove_tautologies(&node.low());
    let high_reduced = remove_tautologies(&node.high());

    let result = match high_reduced.topvar() {
        Some(hvar) if hvar / 2 == var / 2 => {
            // `high_reduced`'s top node is the complementary literal of this
            // clause-variable: any clause reaching it already committed to
            // `+v` (via this node's high edge) and would commit to `-v` too
            // (via `high_reduced`'s high edge) — drop that branch.
            make_node(var, low, high_reduced.low())
        }
        _ => make_node(var, low, high_reduced),
    };

    TAUTOLOGY_CACHE.with(|c| c.borrow_mut().add(node.clone(), result.clone()));
    result
}

/// Removes every clause that is a strict superset of some other clause in
/// the family (i.e. every subsumed clause).
pub fn remove_subsumed_clauses(node: &Node) -> Node {
    if node.is_terminal() {
        return node.clone();
    }
    if let Some(hit) = SUBSUMED_CACHE.with(|c| c.borrow_mut().try_get(node).cloned()) {
        return hit;
    }

    let var = node.topvar().unwrap();
    let low = remove_subsumed_clauses(&node.low());
    let high = remove_subsumed_clauses(&node.high());
    // Clauses reached through `high` contain `var`; they are supersets of
    // whatever shares their remaining literals with a clause in `low` (which
    // by construction does not contain `var`), so any such clause is
    // subsumed and dropped.
    let new_high = remove_supersets(&high, &low);
    let result = make_node(var, low, new_high);

    SUBSUMED_CACHE.with(|c| c.borrow_mut().add(node.clone(), result.clone()));
    result
}

/// `{ p ∈ P : no q ∈ Q with q ⊆ p }`.
pub fn remove_supersets(p: &Node, q: &Node) -> Node {
    if p.is_false() {
        return zero();
    }
    if contains_empty_clause(q) {
        // The empty clause is a subset of every clause.
        return zero();
    }
    if p == q {
        return zero();
    }
    if q.is_false() {
        return p.clone();
    }
    if let Some(hit) = SUPERSETS_CACHE.with(|c| c.borrow_mut().try_get(&(p.clone(), q.clone())).cloned())
    {
        return hit;
    }

    let t = match (p.topvar(), q.topvar()) {
        (Some(tp), Some(tq)) => tp.min(tq),
        (Some(tp), None) => tp,
        (None, Some(tq)) => tq,
        (None, None) => unreachable!("both-terminal case handled by p == q / q.is_false() above"),
    };

    let (p0, p1) = split_on(p, t);
    let (q0, q1) = split_on(q, t);

    let low = remove_supersets(&p0, &q0);
    let high = intersect(&remove_supersets(&p1, &q0), &remove_supersets(&p1, &q1));
    let result = make_node(t, low, high);

    SUPERSETS_CACHE.with(|c| c.borrow_mut().add((p.clone(), q.clone()), result.clone()));
    result
}

fn split_on(node: &Node, target: crate::zdd::Var) -> (Node, Node) {
    match node.topvar() {
        Some(v) if v == target => (node.low(), node.high()),
        _ => (node.clone(), zero()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::enumerate::{from_vector, to_vector};

    #[test]
    fn tautologies_are_dropped() {
        let clauses = vec![vec![], vec![1, -1], vec![-1, 2, 3], vec![-2, 3, -3]];
        let node = from_vector(&clauses);
        let mut result = to_vector(&remove_tautologies(&node));
        result.iter_mut().for_each(|c| c.sort());
        result.sort();
        let mut expected = vec![vec![], vec![-1, 2, 3]];
        expected.iter_mut().for_each(|c| c.sort());
        expected.sort();
        assert_eq!(result, expected);
    }

    #[test]
    fn subsumed_clauses_are_dropped() {
        let clauses = vec![vec![1, -2, 3], vec![-1], vec![-2, 3], vec![-1, -2, -3]];
        let node = from_vector(&clauses);
        let mut result = to_vector(&remove_subsumed_clauses(&node));
        result.iter_mut().for_each(|c| c.sort());
        result.sort();
        let mut expected = vec![vec![-1], vec![-2, 3]];
        expected.iter_mut().for_each(|c| c.sort());
        expected.sort();
        assert_eq!(result, expected);
    }

    #[test]
    fn subsumed_removal_is_idempotent() {
        let clauses = vec![vec![1, 2], vec![1], vec![3, 4, 5], vec![3, 4]];
        let node = from_vector(&clauses);
        let once = remove_subsumed_clauses(&node);
        let twice = remove_subsumed_clauses(&once);
        assert_eq!(once, twice);
    }
}
