/*!
Absorbed-clause detection backed by the [watched-literals engine](crate::watch).

Materialises the formula to a clause vector, then tests each clause in turn
by deactivating it and everything not-yet-decided while seeing whether
propagation against the rest of the (still-active) clauses re-derives every
literal of the clause under test.
*/

use std::collections::HashSet;

use crate::watch::{Assignment, WatchEngine};
use crate::zdd::Literal;

fn variable_range(clauses: &[Vec<Literal>]) -> (u32, u32) {
    let mut min_var = u32::MAX;
    let mut max_var = 0u32;
    for clause in clauses {
        for &lit in clause {
            let v = lit.unsigned_abs();
            min_var = min_var.min(v);
            max_var = max_var.max(v);
        }
    }
    if min_var == u32::MAX {
        (1, 1)
    } else {
        (min_var, max_var)
    }
}

/// Whether `clause` is absorbed by the other currently-active clauses of
/// `engine`. Leaves the engine at decision level 0 on return.
fn is_clause_absorbed(engine: &mut WatchEngine, clause: &[Literal]) -> bool {
    if clause.is_empty() {
        return false;
    }
    for &lit in clause {
        engine.backtrack_to(0).expect("base level always reachable");
        if engine.get_assignment(lit) == Assignment::Positive {
            // Already forced true regardless of this clause: not empowered.
            continue;
        }
        let mut derived = false;
        for &other in clause {
            if other == lit {
                continue;
            }
            if !engine.assign_value(-other) {
                derived = true;
                break;
            }
        }
        derived = derived || engine.get_assignment(lit) == Assignment::Positive;
        if !derived {
            engine.backtrack_to(0).expect("base level always reachable");
            return false;
        }
    }
    engine.backtrack_to(0).expect("base level always reachable");
    true
}

/// Removes every absorbed clause from `clauses`, preserving the order of
/// retained clauses.
pub fn remove_absorbed(clauses: &[Vec<Literal>]) -> Vec<Vec<Literal>> {
    if clauses.is_empty() {
        return Vec::new();
    }
    let (min_var, max_var) = variable_range(clauses);
    let mut deactivated = HashSet::new();
    deactivated.insert(0);
    let mut engine = WatchEngine::new(clauses, min_var, max_var, &deactivated);

    let n = clauses.len();
    let mut retained = vec![true; n];
    for i in 0..n {
        let absorbed = is_clause_absorbed(&mut engine, &clauses[i]);
        retained[i] = !absorbed;
        if i + 1 < n {
            let activate: Vec<usize> = if retained[i] { vec![i] } else { Vec::new() };
            engine
                .change_active_clauses(&activate, &[i + 1])
                .expect("always called at base level");
        }
    }

    clauses
        .iter()
        .zip(retained)
        .filter(|(_, keep)| *keep)
        .map(|(c, _)| c.clone())
        .collect()
}

/// Tests `candidates` for absorption against `stable ∪ candidates`, with
/// `stable` always active. Returns the candidates that survive, in order.
pub fn unify_with_non_absorbed(stable: &[Vec<Literal>], candidates: &[Vec<Literal>]) -> Vec<Vec<Literal>> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let mut all = stable.to_vec();
    all.extend(candidates.iter().cloned());
    let (min_var, max_var) = variable_range(&all);
    let n_stable = stable.len();

    let mut deactivated = HashSet::new();
    deactivated.insert(n_stable);
    let mut engine = WatchEngine::new(&all, min_var, max_var, &deactivated);

    let n = all.len();
    let mut retained = vec![true; n];
    for i in n_stable..n {
        let absorbed = is_clause_absorbed(&mut engine, &all[i]);
        retained[i] = !absorbed;
        if i + 1 < n {
            let activate: Vec<usize> = if retained[i] { vec![i] } else { Vec::new() };
            engine
                .change_active_clauses(&activate, &[i + 1])
                .expect("always called at base level");
        }
    }

    all.into_iter()
        .zip(retained)
        .skip(n_stable)
        .filter(|(_, keep)| *keep)
        .map(|(c, _)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorbed_clause_is_dropped() {
        // {-1,2,3} is absorbed by {-1,2}: both are satisfied once 1 or 2 is
        // set, and 3 is never needed. {-1,2,-4} is absorbed the same way.
        let clauses = vec![vec![1, -2], vec![-1, 2, 3], vec![-1, 2], vec![-1, 2, -4]];
        let mut result = remove_absorbed(&clauses);
        result.iter_mut().for_each(|c| c.sort());
        result.sort();
        let mut expected = vec![vec![1, -2], vec![-1, 2]];
        expected.iter_mut().for_each(|c| c.sort());
        expected.sort();
        assert_eq!(result, expected);
    }

    #[test]
    fn non_absorbed_clauses_survive() {
        let clauses = vec![vec![1, 2], vec![1, 3], vec![2, 3]];
        let result = remove_absorbed(&clauses);
        assert_eq!(result.len(), 3);
    }
}
