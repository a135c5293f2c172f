/*!
Heuristics for choosing which literal the [driver](crate::driver) eliminates
next.

Each heuristic returns a [HeuristicResult] rather than signalling failure
out-of-band: the driver stops eliminating when `success` is `false`, or when
`score` is positive (the heuristic judges further elimination to be net
harmful).
*/

use crate::cnf::{Cnf, VariableStats};
use crate::types::err::ConfigError;
use crate::zdd::Literal;

/// The outcome of consulting a heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeuristicResult {
    /// Whether a literal was found at all.
    pub success: bool,
    /// The chosen literal (meaningless unless `success`).
    pub literal: Literal,
    /// An estimate of the cost of eliminating `literal`; the driver stops
    /// when this is positive.
    pub score: i64,
}

impl HeuristicResult {
    pub fn failure() -> Self {
        HeuristicResult { success: false, literal: 0, score: 0 }
    }

    pub fn found(literal: Literal, score: i64) -> Self {
        HeuristicResult { success: true, literal, score }
    }
}

/// Selects the next elimination literal.
pub trait Heuristic {
    fn next(&self, cnf: &Cnf) -> HeuristicResult;
}

/// Always the smallest literal present (the ZDD's root literal).
pub struct Simple;

impl Heuristic for Simple {
    fn next(&self, cnf: &Cnf) -> HeuristicResult {
        let lit = cnf.root_literal();
        if lit == 0 {
            HeuristicResult::failure()
        } else {
            HeuristicResult::found(lit, 0)
        }
    }
}

/// Prefers a unit literal (elimination is free: resolution against the
/// empty complement clause just drops it), falling back to [Simple].
pub struct UnitLiteral;

impl Heuristic for UnitLiteral {
    fn next(&self, cnf: &Cnf) -> HeuristicResult {
        let unit = cnf.unit_literal();
        if unit != 0 {
            return HeuristicResult::found(unit, 0);
        }
        Simple.next(cnf)
    }
}

/// Prefers a clear literal (a variable occurring with only one polarity:
/// elimination removes every clause containing it and adds none), falling
/// back to [Simple].
pub struct ClearLiteral;

impl Heuristic for ClearLiteral {
    fn next(&self, cnf: &Cnf) -> HeuristicResult {
        let clear = cnf.clear_literal();
        if clear != 0 {
            return HeuristicResult::found(clear, 0);
        }
        Simple.next(cnf)
    }
}

/// The change in clause count from resolving every `+v` clause against every
/// `-v` clause: `pos * neg` new clauses produced, `pos + neg` old clauses
/// dropped.
pub fn bloat_score(stats: VariableStats) -> i64 {
    let pos = stats.pos_count as i64;
    let neg = stats.neg_count as i64;
    pos * neg - (pos + neg)
}

/// Picks the variable in `[min_var, max_var]` minimising a scoring function
/// over its [VariableStats], breaking ties toward the smaller variable.
pub struct MinimalScore<E: Fn(VariableStats) -> i64> {
    pub min_var: u32,
    pub max_var: u32,
    pub score: E,
}

impl<E: Fn(VariableStats) -> i64> MinimalScore<E> {
    /// Builds a [MinimalScore] over `[min_var, max_var]`.
    ///
    /// # Errors
    ///
    /// Returns [ConfigError::EmptyVariableRange] if `min_var > max_var`.
    pub fn new(min_var: u32, max_var: u32, score: E) -> Result<Self, ConfigError> {
        if min_var > max_var {
            return Err(ConfigError::EmptyVariableRange);
        }
        Ok(MinimalScore { min_var, max_var, score })
    }
}

impl<E: Fn(VariableStats) -> i64> Heuristic for MinimalScore<E> {
    fn next(&self, cnf: &Cnf) -> HeuristicResult {
        let stats = cnf.formula_statistics();
        let mut best: Option<(u32, i64)> = None;
        for var in self.min_var..=self.max_var {
            let Some(vs) = stats.get(var) else { continue };
            if vs.pos_count == 0 && vs.neg_count == 0 {
                continue;
            }
            let score = (self.score)(vs);
            match best {
                Some((_, best_score)) if best_score <= score => {}
                _ => best = Some((var, score)),
            }
        }
        match best {
            Some((var, score)) => HeuristicResult::found(var as Literal, score),
            None => HeuristicResult::failure(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bloat_score_matches_scenario_eight() {
        let stats = VariableStats { pos_count: 5, neg_count: 12 };
        assert_eq!(bloat_score(stats), 43);
    }

    #[test]
    fn unit_literal_heuristic_prefers_units() {
        let cnf = Cnf::from_vector(&[vec![1, 2], vec![3]]);
        let result = UnitLiteral.next(&cnf);
        assert!(result.success);
        assert_eq!(result.literal, 3);
    }

    #[test]
    fn minimal_score_picks_smallest_bloat() {
        // var 1: pos=1,neg=1 -> bloat = 1*1-2 = -1
        // var 2: pos=2,neg=2 -> bloat = 2*2-4 = 0
        let cnf = Cnf::from_vector(&[vec![1, 2], vec![-1, 2], vec![1, -2]]);
        let heuristic = MinimalScore::new(1, 2, bloat_score).unwrap();
        let result = heuristic.next(&cnf);
        assert!(result.success);
        assert_eq!(result.literal.unsigned_abs(), 1);
    }

    #[test]
    fn minimal_score_rejects_an_empty_variable_range() {
        assert_eq!(MinimalScore::new(3, 1, bloat_score).unwrap_err(), ConfigError::EmptyVariableRange);
    }
}
