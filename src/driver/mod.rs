/*!
The Davis-Putnam elimination driver.

[eliminate_vars] repeatedly asks a [Heuristic] for a literal, resolves it out
of the formula, and periodically compacts the result via
[absorbed-clause removal](crate::absorbed). [is_sat] is the degenerate case:
eliminate until the formula is trivially satisfiable or unsatisfiable.
*/

use log::{debug, trace};

use crate::absorbed;
use crate::cnf::Cnf;
use crate::config::Config;
use crate::heuristics::Heuristic;
use crate::misc::log::targets;

/// Eliminates variables from `cnf` until the heuristic gives up, reports a
/// non-improving score, `stop` fires, or the formula is resolved to trivial.
///
/// `stop` is consulted once per outer iteration, after the previous
/// elimination and before the next heuristic call, so cancellation is
/// granular to one variable.
pub fn eliminate_vars<H: Heuristic>(
    mut cnf: Cnf,
    heuristic: &H,
    config: &Config,
    mut stop: impl FnMut(&Cnf) -> bool,
) -> Cnf {
    let mut i = 0usize;
    loop {
        if cnf.is_empty() || cnf.contains_empty_clause() {
            break;
        }
        let decision = heuristic.next(&cnf);
        trace!(target: targets::HEURISTIC, "heuristic proposed {:?}", decision);
        if !decision.success || decision.score > 0 || stop(&cnf) {
            break;
        }

        cnf = cnf.eliminate(decision.literal);
        debug!(
            target: targets::DRIVER,
            "eliminated variable {}, {} clauses remain",
            decision.literal.unsigned_abs(),
            cnf.count_clauses(),
        );

        if config.absorbed_schedule.is_due(i, config.absorbed_interval) {
            cnf = absorbed::remove_absorbed(&cnf, config.absorbed_backend);
        }
        i += 1;
    }

    if config.absorbed_interval > 0 {
        cnf = absorbed::remove_absorbed(&cnf, config.absorbed_backend);
    }
    cnf
}

/// The degenerate elimination loop: resolves literals out of `cnf` until it
/// is empty (satisfiable) or contains the empty clause (unsatisfiable).
///
/// # Panics
///
/// Panics if `heuristic` fails to find a literal while the formula is
/// neither empty nor contradictory — by construction every nonterminal ZDD
/// node has a root literal, so [crate::heuristics::Simple] (the universal
/// fallback of every heuristic in this crate) never fails on such a formula.
pub fn is_sat<H: Heuristic>(mut cnf: Cnf, heuristic: &H) -> bool {
    loop {
        if cnf.is_empty() {
            return true;
        }
        if cnf.contains_empty_clause() {
            return false;
        }
        let decision = heuristic.next(&cnf);
        assert!(decision.success, "heuristic failed on a nontrivial formula");
        cnf = cnf.eliminate(decision.literal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::Simple;

    #[test]
    fn is_sat_detects_satisfiable() {
        assert!(is_sat(Cnf::from_vector(&[vec![1, 2]]), &Simple));
    }

    #[test]
    fn is_sat_detects_unsatisfiable() {
        assert!(!is_sat(Cnf::from_vector(&[vec![1], vec![-1]]), &Simple));
    }

    #[test]
    fn eliminate_vars_stops_on_stop_predicate() {
        let cnf = Cnf::from_vector(&[vec![1, 2, 3], vec![-1, 4], vec![-2, -4]]);
        let config = Config::default();
        let mut calls = 0;
        let before = cnf.count_clauses();
        let result = eliminate_vars(cnf, &Simple, &config, |_| {
            calls += 1;
            true
        });
        assert_eq!(calls, 1);
        assert_eq!(result.count_clauses(), before);
    }

    #[test]
    fn eliminate_vars_runs_to_completion_without_stop() {
        let cnf = Cnf::from_vector(&[vec![1, 2], vec![-1, -2]]);
        let config = Config::default();
        let result = eliminate_vars(cnf, &Simple, &config, |_| false);
        assert!(result.is_empty());
    }
}
