/*!
Read-only queries over a ZDD-encoded CNF formula.
*/

use std::collections::HashMap;

use crate::zdd::literal::{decode, is_positive, variable_of};
use crate::zdd::{Literal, Node};

/// Whether `node` represents the empty family of clauses (an unsatisfiable
/// formula over zero clauses cannot occur; an empty family is a *vacuously
/// true* formula).
pub fn is_empty(node: &Node) -> bool {
    node.is_false()
}

/// Whether the family contains the empty clause (an immediate
/// contradiction), found by following the `low` spine — the path that
/// selects no literals — down to its terminal.
pub fn contains_empty_clause(node: &Node) -> bool {
    let mut cur = node.clone();
    while cur.topvar().is_some() {
        cur = cur.low();
    }
    cur.is_true()
}

/// Number of clauses (paths to the `True` terminal) in the family.
pub fn count_clauses(node: &Node) -> usize {
    fn count(node: &Node, memo: &mut HashMap<Node, usize>) -> usize {
        if node.is_false() {
            return 0;
        }
        if node.is_true() {
            return 1;
        }
        if let Some(&n) = memo.get(node) {
            return n;
        }
        let total = count(&node.low(), memo) + count(&node.high(), memo);
        memo.insert(node.clone(), total);
        total
    }
    count(node, &mut HashMap::new())
}

/// The smallest underlying variable id occurring anywhere in the family, or
/// `0` if the family is empty or contains only the empty clause.
pub fn smallest_variable(node: &Node) -> u32 {
    node.topvar().map(variable_of).unwrap_or(0)
}

/// The largest underlying variable id occurring anywhere in the family, or
/// `0` if the family is empty or contains only the empty clause.
pub fn largest_variable(node: &Node) -> u32 {
    fn walk(node: &Node, memo: &mut HashMap<Node, u32>) -> u32 {
        let Some(var) = node.topvar() else {
            return 0;
        };
        if let Some(&v) = memo.get(node) {
            return v;
        }
        let here = variable_of(var);
        let result = here.max(walk(&node.low(), memo)).max(walk(&node.high(), memo));
        memo.insert(node.clone(), result);
        result
    }
    walk(node, &mut HashMap::new())
}

/// The literal at the root node (the smallest literal present in the
/// family), or `0` on a terminal.
pub fn root_literal(node: &Node) -> Literal {
    node.topvar().map(decode).unwrap_or(0)
}

/// Descends `low` edges only, returning the first literal whose `high`
/// child contains the empty clause — i.e. the literal of a unit clause
/// reachable without any prior commitment. Returns `0` if none exists.
pub fn unit_literal(node: &Node) -> Literal {
    let mut cur = node.clone();
    while let Some(var) = cur.topvar() {
        if contains_empty_clause(&cur.high()) {
            return decode(var);
        }
        cur = cur.low();
    }
    0
}

/// A literal `l` such that `-l` never occurs in any clause of the family.
/// Returns `0` if every occurring variable is mixed-polarity.
pub fn clear_literal(node: &Node) -> Literal {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Polarity {
        Pos,
        Neg,
        Mixed,
    }

    fn walk(node: &Node, seen: &mut HashMap<u32, Polarity>, visited: &mut std::collections::HashSet<Node>) {
        let Some(var) = node.topvar() else {
            return;
        };
        if !visited.insert(node.clone()) {
            return;
        }
        let v = variable_of(var);
        let polarity = if is_positive(var) { Polarity::Pos } else { Polarity::Neg };
        seen.entry(v)
            .and_modify(|p| {
                if *p != polarity {
                    *p = Polarity::Mixed;
                }
            })
            .or_insert(polarity);
        walk(&node.low(), seen, visited);
        walk(&node.high(), seen, visited);
    }

    let mut seen = HashMap::new();
    let mut visited = std::collections::HashSet::new();
    walk(node, &mut seen, &mut visited);

    for (var, polarity) in &seen {
        match polarity {
            Polarity::Pos => return *var as Literal,
            Polarity::Neg => return -(*var as Literal),
            Polarity::Mixed => {}
        }
    }
    0
}

/// Per-variable occurrence counts across a formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VariableStats {
    pub pos_count: u32,
    pub neg_count: u32,
}

/// Per-variable occurrence counts for every variable in `[index_shift,
/// index_shift + stats.len())`.
#[derive(Clone, Debug, Default)]
pub struct FormulaStats {
    pub index_shift: u32,
    pub stats: Vec<VariableStats>,
}

impl FormulaStats {
    /// Looks up the stats for `var`, if it falls within the collected range.
    pub fn get(&self, var: u32) -> Option<VariableStats> {
        if var < self.index_shift {
            return None;
        }
        self.stats.get((var - self.index_shift) as usize).copied()
    }
}

/// Computes [FormulaStats] by enumerating every clause of the family.
pub fn formula_statistics(node: &Node) -> FormulaStats {
    let min_var = smallest_variable(node);
    let max_var = largest_variable(node);
    if node.is_false() || node.is_true() || max_var < min_var {
        return FormulaStats {
            index_shift: min_var,
            stats: Vec::new(),
        };
    }
    let mut stats = vec![VariableStats::default(); (max_var - min_var + 1) as usize];
    crate::cnf::enumerate::for_all_clause_vars(node, &mut |clause_vars| {
        for &var in clause_vars {
            let idx = (variable_of(var) - min_var) as usize;
            if is_positive(var) {
                stats[idx].pos_count += 1;
            } else {
                stats[idx].neg_count += 1;
            }
        }
        true
    });
    FormulaStats {
        index_shift: min_var,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::enumerate::from_vector;

    #[test]
    fn unit_literal_finds_singleton_clause() {
        let node = from_vector(&[vec![1, 2], vec![3]]);
        assert_eq!(unit_literal(&node), 3);
    }

    #[test]
    fn clear_literal_ignores_mixed_variables() {
        let node = from_vector(&[vec![1, 2], vec![-1, 3]]);
        // 1 is mixed; 2 and 3 are each single-polarity.
        let lit = clear_literal(&node);
        assert!(lit == 2 || lit == 3);
    }

    #[test]
    fn stats_count_polarities() {
        let node = from_vector(&[vec![1, 2], vec![1, -2], vec![-1]]);
        let stats = formula_statistics(&node);
        let v1 = stats.get(1).unwrap();
        assert_eq!(v1.pos_count, 2);
        assert_eq!(v1.neg_count, 1);
    }
}
