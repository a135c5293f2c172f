/*!
Building a ZDD from, and walking one back out to, clause vectors.
*/

use crate::zdd::literal::{decode, encode};
use crate::zdd::{make_node, one, zero, Literal, Node, Var};

/// Builds a node representing the family of clauses in `clauses`, each given
/// as a sorted-ascending list of node variables (not literals). Internal
/// helper shared by [from_vector] and the unit tests in [super::algebra].
pub fn from_clause_vars(clauses: &[Vec<Var>]) -> Node {
    clauses
        .iter()
        .map(|clause| single_clause_var(clause))
        .fold(zero(), |acc, clause_node| {
            crate::cnf::algebra::unify(&acc, &clause_node)
        })
}

fn single_clause_var(clause: &[Var]) -> Node {
    let mut sorted = clause.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.iter().rev().fold(one(), |acc, &var| make_node(var, zero(), acc))
}

/// Depth-first enumeration of every clause in `root`, reporting each as a
/// vector of node variables in increasing order. Traversal order: descend
/// `low` first (the literal excluded), then `high` (the literal included).
/// `visit` returning `false` stops the traversal early.
pub fn for_all_clause_vars<F: FnMut(&[Var]) -> bool>(root: &Node, visit: &mut F) -> bool {
    let mut path = Vec::new();
    walk(root, &mut path, visit)
}

fn walk<F: FnMut(&[Var]) -> bool>(node: &Node, path: &mut Vec<Var>, visit: &mut F) -> bool {
    if node.is_false() {
        return true;
    }
    if node.is_true() {
        return visit(path);
    }
    let var = node.topvar().unwrap();
    if !walk(&node.low(), path, visit) {
        return false;
    }
    path.push(var);
    let keep_going = walk(&node.high(), path, visit);
    path.pop();
    keep_going
}

/// Collects every clause of `root` as node-variable vectors.
pub fn to_var_vector(root: &Node) -> Vec<Vec<Var>> {
    let mut out = Vec::new();
    for_all_clause_vars(root, &mut |path| {
        out.push(path.to_vec());
        true
    });
    out
}

/// Builds a node representing the CNF formula `clauses`, given as literal
/// vectors.
pub fn from_vector(clauses: &[Vec<Literal>]) -> Node {
    let encoded: Vec<Vec<Var>> = clauses
        .iter()
        .map(|clause| clause.iter().map(|&l| encode(l)).collect())
        .collect();
    from_clause_vars(&encoded)
}

/// Collects every clause of `root` as literal vectors, in the diagram's
/// internal variable order (so complementary literals of the same variable
/// are adjacent).
pub fn to_vector(root: &Node) -> Vec<Vec<Literal>> {
    to_var_vector(root)
        .into_iter()
        .map(|vars| vars.into_iter().map(decode).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_vector() {
        let clauses = vec![vec![1, 2], vec![-1, 3], vec![2, -3]];
        let node = from_vector(&clauses);
        let mut back = to_vector(&node);
        back.iter_mut().for_each(|c| c.sort());
        back.sort();
        let mut expected = clauses;
        expected.iter_mut().for_each(|c| c.sort());
        expected.sort();
        assert_eq!(back, expected);
    }

    #[test]
    fn empty_clause_is_true_terminal() {
        let node = from_vector(&[vec![]]);
        assert!(node.is_true());
    }
}
