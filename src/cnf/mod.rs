/*!
A CNF formula represented as a zero-suppressed decision diagram.

[Cnf] is a thin, `Clone`-cheap value wrapping a canonical [Node](crate::zdd::Node);
equality of two `Cnf` values is equality of the sets of clauses they denote,
checked in O(1) via hash-consing. The actual algorithms live in sibling
modules, grouped the way `SPEC_FULL.md` groups them:

- [algebra]: restriction, union, intersection, difference, clause-resolution
  product.
- [transforms]: tautology removal, subsumed-clause removal.
- [queries]: the read-only predicates and statistics the elimination driver
  and heuristics consult.
- [enumerate]: conversion to/from clause vectors.
*/

pub mod algebra;
pub mod enumerate;
pub mod queries;
pub mod transforms;

pub use queries::{FormulaStats, VariableStats};

use log::trace;

use crate::misc::log::targets;
use crate::zdd::{one, zero, Literal, Node};

/// A CNF formula, as a family of clauses.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cnf(Node);

impl Cnf {
    /// The vacuously true formula: zero clauses.
    pub fn empty() -> Self {
        Cnf(zero())
    }

    /// The formula containing only the empty clause: an immediate
    /// contradiction.
    pub fn unsatisfiable_unit() -> Self {
        Cnf(one())
    }

    /// Builds a formula from clause vectors.
    pub fn from_vector(clauses: &[Vec<Literal>]) -> Self {
        Cnf(enumerate::from_vector(clauses))
    }

    /// Collects every clause as a literal vector.
    pub fn to_vector(&self) -> Vec<Vec<Literal>> {
        enumerate::to_vector(&self.0)
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn from_node(node: Node) -> Self {
        Cnf(node)
    }

    pub fn is_empty(&self) -> bool {
        queries::is_empty(&self.0)
    }

    pub fn contains_empty_clause(&self) -> bool {
        queries::contains_empty_clause(&self.0)
    }

    pub fn count_clauses(&self) -> usize {
        queries::count_clauses(&self.0)
    }

    pub fn smallest_variable(&self) -> u32 {
        queries::smallest_variable(&self.0)
    }

    pub fn largest_variable(&self) -> u32 {
        queries::largest_variable(&self.0)
    }

    pub fn root_literal(&self) -> Literal {
        queries::root_literal(&self.0)
    }

    pub fn unit_literal(&self) -> Literal {
        queries::unit_literal(&self.0)
    }

    pub fn clear_literal(&self) -> Literal {
        queries::clear_literal(&self.0)
    }

    pub fn formula_statistics(&self) -> FormulaStats {
        queries::formula_statistics(&self.0)
    }

    pub fn subset0(&self, lit: Literal) -> Self {
        Cnf(algebra::subset0(&self.0, crate::zdd::literal::encode(lit)))
    }

    pub fn subset1(&self, lit: Literal) -> Self {
        Cnf(algebra::subset1(&self.0, crate::zdd::literal::encode(lit)))
    }

    pub fn unify(&self, other: &Self) -> Self {
        Cnf(algebra::unify(&self.0, &other.0))
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Cnf(algebra::intersect(&self.0, &other.0))
    }

    pub fn subtract(&self, other: &Self) -> Self {
        Cnf(algebra::subtract(&self.0, &other.0))
    }

    pub fn multiply(&self, other: &Self) -> Self {
        trace!(target: targets::ALGEBRA, "multiplying {} clauses by {} clauses", self.count_clauses(), other.count_clauses());
        Cnf(algebra::multiply(&self.0, &other.0))
    }

    pub fn remove_tautologies(&self) -> Self {
        let result = Cnf(transforms::remove_tautologies(&self.0));
        trace!(target: targets::REDUCTION, "tautology removal: {} -> {} clauses", self.count_clauses(), result.count_clauses());
        result
    }

    pub fn remove_subsumed_clauses(&self) -> Self {
        let result = Cnf(transforms::remove_subsumed_clauses(&self.0));
        trace!(target: targets::REDUCTION, "subsumption removal: {} -> {} clauses", self.count_clauses(), result.count_clauses());
        result
    }

    /// Davis-Putnam elimination of the variable underlying `lit`: resolves
    /// every clause containing `lit` against every clause containing `-lit`,
    /// drops both, and folds in the clauses mentioning neither.
    ///
    /// Order is contractual: tautology removal precedes both subsumption
    /// passes, and a final subsumption pass runs after the clauses
    /// mentioning neither polarity are folded back in, since either side can
    /// subsume the other.
    pub fn eliminate(&self, lit: Literal) -> Self {
        let with_pos = self.subset1(lit);
        let with_neg = self.subset1(-lit);
        let without = self.subset0(lit).subset0(-lit);
        let resolvents = with_pos.multiply(&with_neg);
        let cleaned = resolvents.remove_tautologies().remove_subsumed_clauses();
        cleaned.unify(&without).remove_subsumed_clauses()
    }

    /// Visits every clause; `visit` returning `false` stops early.
    pub fn for_all_clauses<F: FnMut(&[Literal]) -> bool>(&self, mut visit: F) {
        enumerate::for_all_clause_vars(&self.0, &mut |vars| {
            let literals: Vec<Literal> = vars.iter().map(|&v| crate::zdd::literal::decode(v)).collect();
            visit(&literals)
        });
    }
}

/// Resizes every ZDD operation cache (algebra and transforms alike). See
/// [crate::config::Config].
pub fn set_cache_capacity(capacity: usize) {
    algebra::set_cache_capacity(capacity);
    transforms::set_cache_capacity(capacity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eliminate_example_from_testable_properties() {
        // eliminate({{1,2},{-1,-2}}, 1) = ∅
        let s = Cnf::from_vector(&[vec![1, 2], vec![-1, -2]]);
        let with_pos = s.subset1(1);
        let with_neg = s.subset1(-1);
        let without = s.subset0(1).subset0(-1);
        let resolvents = with_pos.multiply(&with_neg);
        let cleaned = resolvents.remove_tautologies().remove_subsumed_clauses();
        let result = cleaned.unify(&without).remove_subsumed_clauses();
        assert!(result.is_empty());
    }

    #[test]
    fn eliminate_unit_conflict_yields_empty_clause() {
        // eliminate({{1},{-1}}, 1) contains the empty clause.
        let s = Cnf::from_vector(&[vec![1], vec![-1]]);
        let with_pos = s.subset1(1);
        let with_neg = s.subset1(-1);
        let without = s.subset0(1).subset0(-1);
        let resolvents = with_pos.multiply(&with_neg);
        let cleaned = resolvents.remove_tautologies().remove_subsumed_clauses();
        let result = cleaned.unify(&without).remove_subsumed_clauses();
        assert!(result.contains_empty_clause());
    }
}
