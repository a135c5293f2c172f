/*!
Set-algebra primitives over the ZDD representation of a CNF: restriction,
union, intersection, difference, and the clause-resolution product.

Each binary operator recurses on the pair of root nodes and is memoised in a
thread-local [LruCache], following the same pattern as the kernel's node
table: because every node is hash-consed, a `(Node, Node)` key pair is a
stable, cheap-to-compare identity for "the operation applied to exactly
these two formulas".
*/

use std::cell::RefCell;

use crate::generic::LruCache;
use crate::zdd::{make_node, one, zero, Node, Var};

const DEFAULT_CACHE_CAPACITY: usize = 32;

thread_local! {
    static UNIFY_CACHE: RefCell<LruCache<(Node, Node), Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static INTERSECT_CACHE: RefCell<LruCache<(Node, Node), Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static SUBTRACT_CACHE: RefCell<LruCache<(Node, Node), Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static MULTIPLY_CACHE: RefCell<LruCache<(Node, Node), Node>> =
        RefCell::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
}

/// Resizes every algebra operation cache. Intended to be called once, from
/// [crate::config::Config] application, before any formula manipulation.
pub fn set_cache_capacity(capacity: usize) {
    UNIFY_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
    INTERSECT_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
    SUBTRACT_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
    MULTIPLY_CACHE.with(|c| *c.borrow_mut() = LruCache::new(capacity));
}

/// Restricts `node` to the clauses not containing the literal encoded by
/// `var`.
pub fn subset0(node: &Node, var: Var) -> Node {
    restrict(node, var, false)
}

/// Restricts `node` to the clauses containing the literal encoded by `var`,
/// with that literal removed from each clause.
pub fn subset1(node: &Node, var: Var) -> Node {
    restrict(node, var, true)
}

fn restrict(node: &Node, target: Var, want_high: bool) -> Node {
    let Some(var) = node.topvar() else {
        return node.clone();
    };
    if var > target {
        return if want_high { zero() } else { node.clone() };
    }
    if var == target {
        return if want_high { node.high() } else { node.low() };
    }
    let low = restrict(&node.low(), target, want_high);
    let high = restrict(&node.high(), target, want_high);
    make_node(var, low, high)
}

/// Set union of the two clause families.
pub fn unify(a: &Node, b: &Node) -> Node {
    if a.is_false() {
        return b.clone();
    }
    if b.is_false() || a == b {
        return a.clone();
    }
    if let Some(hit) = UNIFY_CACHE.with(|c| c.borrow_mut().try_get(&(a.clone(), b.clone())).cloned()) {
        return hit;
    }

    let result = match (a.topvar(), b.topvar()) {
        (Some(va), Some(vb)) if va == vb => {
            make_node(va, unify(&a.low(), &b.low()), unify(&a.high(), &b.high()))
        }
        (Some(va), Some(vb)) if va < vb => make_node(va, unify(&a.low(), b), a.high()),
        (Some(_), Some(vb)) => make_node(vb, unify(a, &b.low()), b.high()),
        (Some(va), None) => make_node(va, unify(&a.low(), b), a.high()),
        (None, Some(vb)) => make_node(vb, unify(a, &b.low()), b.high()),
        (None, None) => unreachable!("both terminal and distinct: impossible, terminals are singletons"),
    };

    UNIFY_CACHE.with(|c| c.borrow_mut().add((a.clone(), b.clone()), result.clone()));
    result
}

/// Set intersection of the two clause families.
pub fn intersect(a: &Node, b: &Node) -> Node {
    if a.is_false() || b.is_false() {
        return zero();
    }
    if a == b {
        return a.clone();
    }
    if let Some(hit) =
        INTERSECT_CACHE.with(|c| c.borrow_mut().try_get(&(a.clone(), b.clone())).cloned())
    {
        return hit;
    }

    let result = match (a.topvar(), b.topvar()) {
        (Some(va), Some(vb)) if va == vb => {
            make_node(va, intersect(&a.low(), &b.low()), intersect(&a.high(), &b.high()))
        }
        (Some(va), Some(vb)) if va < vb => intersect(&a.low(), b),
        (Some(_), Some(_)) => intersect(a, &b.low()),
        (Some(_), None) => intersect(&a.low(), b),
        (None, Some(_)) => intersect(a, &b.low()),
        (None, None) => unreachable!("both terminal and distinct: impossible, terminals are singletons"),
    };

    INTERSECT_CACHE.with(|c| c.borrow_mut().add((a.clone(), b.clone()), result.clone()));
    result
}

/// Set difference `a \ b`.
pub fn subtract(a: &Node, b: &Node) -> Node {
    if a.is_false() || b.is_false() {
        return if b.is_false() { a.clone() } else { zero() };
    }
    if a == b {
        return zero();
    }
    if let Some(hit) =
        SUBTRACT_CACHE.with(|c| c.borrow_mut().try_get(&(a.clone(), b.clone())).cloned())
    {
        return hit;
    }

    let result = match (a.topvar(), b.topvar()) {
        (Some(va), Some(vb)) if va == vb => {
            make_node(va, subtract(&a.low(), &b.low()), subtract(&a.high(), &b.high()))
        }
        (Some(va), Some(vb)) if va < vb => make_node(va, subtract(&a.low(), b), a.high()),
        (Some(_), Some(_)) => subtract(a, &b.low()),
        (Some(va), None) => make_node(va, subtract(&a.low(), b), a.high()),
        (None, Some(_)) => subtract(a, &b.low()),
        (None, None) => unreachable!("both terminal and distinct: impossible, terminals are singletons"),
    };

    SUBTRACT_CACHE.with(|c| c.borrow_mut().add((a.clone(), b.clone()), result.clone()));
    result
}

/// The clause-resolution product: `{c_p ∪ c_q : c_p ∈ p, c_q ∈ q}` as a set
/// of sets (duplicate resulting clauses collapse, since the result is itself
/// a ZDD family).
pub fn multiply(p: &Node, q: &Node) -> Node {
    if p.is_false() || q.is_false() {
        return zero();
    }
    if p.is_true() {
        return q.clone();
    }
    if q.is_true() {
        return p.clone();
    }

    // Canonicalise argument order so the cache sees a single entry per
    // unordered pair regardless of call-site order.
    let (p, q) = if p.topvar().unwrap() > q.topvar().unwrap() {
        (q, p)
    } else {
        (p, q)
    };

    if let Some(hit) = MULTIPLY_CACHE.with(|c| c.borrow_mut().try_get(&(p.clone(), q.clone())).cloned())
    {
        return hit;
    }

    let x = p.topvar().unwrap();
    let (p0, p1) = (p.low(), p.high());
    let (q0, q1) = if q.topvar() == Some(x) {
        (q.low(), q.high())
    } else {
        (q.clone(), zero())
    };

    let low = multiply(&p0, &q0);
    let cross_a = multiply(&p0, &q1);
    let cross_b = multiply(&p1, &q0);
    let both = multiply(&p1, &q1);
    let high = unify(&unify(&cross_a, &cross_b), &both);
    let result = make_node(x, low, high);

    MULTIPLY_CACHE.with(|c| c.borrow_mut().add((p.clone(), q.clone()), result.clone()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::enumerate::{from_clause_vars, to_var_vector};

    #[test]
    fn multiply_identity_with_unit_family() {
        let s = from_clause_vars(&[vec![2, 4], vec![6]]);
        assert_eq!(multiply(&s, &one()), s);
        assert_eq!(multiply(&s, &zero()), zero());
    }

    #[test]
    fn multiply_resolves_clauses() {
        // {{2}} * {{4}} = {{2,4}}
        let p = from_clause_vars(&[vec![2]]);
        let q = from_clause_vars(&[vec![4]]);
        let result = multiply(&p, &q);
        let mut clauses = to_var_vector(&result);
        clauses.sort();
        assert_eq!(clauses, vec![vec![2, 4]]);
    }

    #[test]
    fn unify_is_set_union() {
        let a = from_clause_vars(&[vec![2]]);
        let b = from_clause_vars(&[vec![4]]);
        let mut clauses = to_var_vector(&unify(&a, &b));
        clauses.sort();
        assert_eq!(clauses, vec![vec![2], vec![4]]);
    }

    #[test]
    fn subtract_removes_exact_clause() {
        let a = from_clause_vars(&[vec![2], vec![4]]);
        let b = from_clause_vars(&[vec![4]]);
        let clauses = to_var_vector(&subtract(&a, &b));
        assert_eq!(clauses, vec![vec![2]]);
    }
}
