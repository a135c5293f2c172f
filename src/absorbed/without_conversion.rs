/*!
Absorbed-clause detection carried out directly on the ZDD representation,
with no conversion to a clause vector.

Unit propagation is simulated symbolically: fixing literal `u` true removes
every clause containing `u` (satisfied) and drops `-u` from every clause
that contains it, which [unit_propagation_step] realises as
`subset0(S, u) ∪ subset1(S, -u)`.
*/

use log::trace;

use crate::cnf::Cnf;
use crate::misc::log::targets;
use crate::zdd::Literal;

fn is_tautological(clause: &[Literal]) -> bool {
    clause.iter().any(|&l| clause.contains(&-l))
}

/// One step of symbolic unit propagation: fixes `u` true in `s`.
pub fn unit_propagation_step(s: &Cnf, u: Literal) -> Cnf {
    s.subset0(u).unify(&s.subset1(-u))
}

/// Whether `clause` is absorbed by `formula \ {clause}`.
///
/// A tautological candidate is trivially absorbed: this backend cannot
/// detect tautology via the node-pair structure the
/// [with-conversion backend](crate::absorbed::with_conversion) exploits, so
/// it is special-cased here rather than requiring every caller to pre-filter
/// (in practice the driver always does, via
/// [remove_tautologies](crate::cnf::transforms::remove_tautologies), but this
/// keeps the function correct standalone).
pub fn is_clause_absorbed(formula: &Cnf, clause: &[Literal]) -> bool {
    if is_tautological(clause) {
        return true;
    }
    let candidate = Cnf::from_vector(&[clause.to_vec()]);
    let rest = formula.subtract(&candidate);

    for &lit in clause {
        let mut propagated = rest.clone();
        let mut derived = propagated.subset1(lit).contains_empty_clause();
        if !derived {
            for &other in clause {
                if other == lit {
                    continue;
                }
                propagated = unit_propagation_step(&propagated, -other);
                if propagated.contains_empty_clause() || propagated.subset1(lit).contains_empty_clause() {
                    derived = true;
                    break;
                }
            }
        }
        if !derived {
            return false;
        }
    }
    true
}

/// Removes every absorbed clause from `formula`.
///
/// Mirrors the with-conversion backend's traversal order: clause `i` is
/// tested against every other clause, where clauses before `i` use their
/// already-decided retained/dropped status and clauses after `i` are
/// assumed present.
pub fn remove_absorbed(formula: &Cnf) -> Cnf {
    let clauses = formula.to_vector();
    let n = clauses.len();
    let mut retained = vec![true; n];

    for i in 0..n {
        let rest_vec: Vec<Vec<Literal>> = clauses
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i && (j >= i || retained[j]))
            .map(|(_, c)| c.clone())
            .collect();
        let rest = Cnf::from_vector(&rest_vec);
        if is_clause_absorbed(&rest, &clauses[i]) {
            trace!(target: targets::ABSORBED, "clause {:?} is absorbed", clauses[i]);
            retained[i] = false;
        }
    }

    let kept: Vec<Vec<Literal>> = clauses
        .into_iter()
        .zip(retained)
        .filter(|(_, keep)| *keep)
        .map(|(c, _)| c)
        .collect();
    Cnf::from_vector(&kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorbed_clause_is_dropped() {
        let formula = Cnf::from_vector(&[vec![1, -2], vec![-1, 2, 3], vec![-1, 2], vec![-1, 2, -4]]);
        let cleaned = remove_absorbed(&formula);
        let mut result = cleaned.to_vector();
        result.iter_mut().for_each(|c| c.sort());
        result.sort();
        let mut expected = vec![vec![1, -2], vec![-1, 2]];
        expected.iter_mut().for_each(|c| c.sort());
        expected.sort();
        assert_eq!(result, expected);
    }

    #[test]
    fn tautological_candidate_is_trivially_absorbed() {
        let formula = Cnf::from_vector(&[vec![1, 2]]);
        assert!(is_clause_absorbed(&formula, &[1, -1, 2]));
    }

    #[test]
    fn a_derived_literal_is_found_even_behind_a_smaller_unit_clause() {
        // Propagating -9 against {{1},{9,8}} newly derives the unit clause
        // {8}; that must register as literal 8 being derived even though
        // {1} is also a unit clause present in the same family.
        let formula = Cnf::from_vector(&[vec![1], vec![9, 8], vec![8, 9, -1]]);
        assert!(is_clause_absorbed(&formula, &[8, 9, -1]));
    }
}
