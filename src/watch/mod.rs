/*!
A watched-literals propagation engine.

This is not a general CDCL solver: there is no learning, no decision
heuristic, no restart policy. It exists to answer one question cheaply and
repeatedly — "does propagating these literals against this clause database
reach a contradiction, or derive literal `l`?" — which is exactly what
[absorbed-clause detection](crate::absorbed::with_conversion) needs.

Clauses may be deactivated and reactivated (at the base decision level only)
so the same database can be reused to test many candidate clauses in turn
without rebuilding the watch structure from scratch each time.
*/

use std::collections::HashSet;

use log::trace;

use crate::misc::log::targets;
use crate::types::err::WatchError;
use crate::zdd::Literal;

/// The current value assigned to a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Assignment {
    #[default]
    Unassigned,
    Positive,
    Negative,
}

impl Assignment {
    pub fn negate(self) -> Self {
        match self {
            Assignment::Unassigned => Assignment::Unassigned,
            Assignment::Positive => Assignment::Negative,
            Assignment::Negative => Assignment::Positive,
        }
    }
}

#[derive(Clone, Debug)]
struct ClauseData {
    literals: Vec<Literal>,
    w1: usize,
    w2: usize,
    active: bool,
}

#[derive(Clone, Debug, Default)]
struct VarData {
    watched_pos: HashSet<usize>,
    watched_neg: HashSet<usize>,
    assignment: Assignment,
}

/// Determines the `[min_var, max_var]` covered by a clause vector.
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

/// A clause database with watched-literal propagation.
pub struct WatchEngine {
    min_var: u32,
    clauses: Vec<ClauseData>,
    vars: Vec<VarData>,
    /// One entry per decision level; level 0 is the base level and is never
    /// popped.
    stack: Vec<Vec<Literal>>,
    /// Clause indices currently believed to be unit (exactly one unfalsified
    /// watched literal) and not yet propagated.
    unit_clauses: HashSet<usize>,
    empty_count: usize,
    initial_unit_clauses: HashSet<usize>,
    initial_empty_count: usize,
}

impl WatchEngine {
    /// Builds an engine over `clauses`, with the clauses named by
    /// `deactivated` installed but inactive.
    pub fn new(clauses: &[Vec<Literal>], min_var: u32, max_var: u32, deactivated: &HashSet<usize>) -> Self {
        let mut engine = WatchEngine {
            min_var,
            clauses: Vec::with_capacity(clauses.len()),
            vars: vec![VarData::default(); (max_var - min_var + 1) as usize],
            stack: vec![Vec::new()],
            unit_clauses: HashSet::new(),
            empty_count: 0,
            initial_unit_clauses: HashSet::new(),
            initial_empty_count: 0,
        };
        for (idx, clause) in clauses.iter().enumerate() {
            engine.add_clause_impl(clause.clone(), !deactivated.contains(&idx));
        }
        engine.propagate();
        engine.initial_unit_clauses = engine.unit_clauses.clone();
        engine.initial_empty_count = engine.empty_count;
        engine
    }

    /// Builds an engine over `clauses` with every clause active.
    pub fn from_vector(clauses: &[Vec<Literal>]) -> Self {
        let (min_var, max_var) = variable_range(clauses);
        Self::new(clauses, min_var, max_var, &HashSet::new())
    }

    fn var_index(&self, lit: Literal) -> usize {
        (lit.unsigned_abs() - self.min_var) as usize
    }

    fn register_watch(&mut self, clause_idx: usize, pos: usize) {
        let lit = self.clauses[clause_idx].literals[pos];
        let idx = self.var_index(lit);
        if lit > 0 {
            self.vars[idx].watched_pos.insert(clause_idx);
        } else {
            self.vars[idx].watched_neg.insert(clause_idx);
        }
    }

    fn unregister_watch(&mut self, clause_idx: usize, pos: usize) {
        let lit = self.clauses[clause_idx].literals[pos];
        let idx = self.var_index(lit);
        if lit > 0 {
            self.vars[idx].watched_pos.remove(&clause_idx);
        } else {
            self.vars[idx].watched_neg.remove(&clause_idx);
        }
    }

    fn add_clause_impl(&mut self, literals: Vec<Literal>, active: bool) {
        let idx = self.clauses.len();
        let w1 = 0;
        let w2 = if literals.len() > 1 { 1 } else { 0 };
        let is_unit = literals.len() == 1;
        let is_empty = literals.is_empty();
        self.clauses.push(ClauseData { literals, w1, w2, active });
        if !active {
            return;
        }
        if is_empty {
            self.empty_count += 1;
            return;
        }
        self.register_watch(idx, w1);
        if w2 != w1 {
            self.register_watch(idx, w2);
        }
        if is_unit {
            self.unit_clauses.insert(idx);
        }
    }

    fn activate_clause(&mut self, clause_idx: usize, skip_if_active: bool) {
        if self.clauses[clause_idx].active {
            if skip_if_active {
                return;
            }
        }
        self.clauses[clause_idx].active = true;
        let len = self.clauses[clause_idx].literals.len();
        if len == 0 {
            self.empty_count += 1;
            return;
        }
        self.clauses[clause_idx].w1 = 0;
        self.clauses[clause_idx].w2 = if len > 1 { 1 } else { 0 };
        self.register_watch(clause_idx, 0);
        if len > 1 {
            self.register_watch(clause_idx, 1);
        }
        if len == 1 {
            self.unit_clauses.insert(clause_idx);
        }
    }

    fn deactivate_clause(&mut self, clause_idx: usize, skip_if_not_active: bool) {
        if !self.clauses[clause_idx].active {
            if skip_if_not_active {
                return;
            }
        }
        let len = self.clauses[clause_idx].literals.len();
        if len == 0 {
            self.empty_count = self.empty_count.saturating_sub(1);
        } else {
            let (w1, w2) = (self.clauses[clause_idx].w1, self.clauses[clause_idx].w2);
            self.unregister_watch(clause_idx, w1);
            if w2 != w1 {
                self.unregister_watch(clause_idx, w2);
            }
        }
        self.unit_clauses.remove(&clause_idx);
        self.clauses[clause_idx].active = false;
    }

    /// The current value of `lit`'s variable, negated if `lit` is negative.
    pub fn get_assignment(&self, lit: Literal) -> Assignment {
        let idx = self.var_index(lit);
        let a = self.vars[idx].assignment;
        if lit < 0 {
            a.negate()
        } else {
            a
        }
    }

    /// Current decision level (0 is the base level).
    pub fn get_assignment_level(&self) -> usize {
        self.stack.len() - 1
    }

    /// Whether any active clause is currently falsified.
    pub fn contains_empty(&self) -> bool {
        self.empty_count > 0
    }

    fn assign_literal(&mut self, lit: Literal) {
        let idx = self.var_index(lit);
        self.vars[idx].assignment = if lit > 0 {
            Assignment::Positive
        } else {
            Assignment::Negative
        };
        self.stack.last_mut().unwrap().push(lit);

        let watching: Vec<usize> = if lit > 0 {
            self.vars[idx].watched_neg.iter().copied().collect()
        } else {
            self.vars[idx].watched_pos.iter().copied().collect()
        };
        for clause_idx in watching {
            self.update_watched_literal(clause_idx, idx);
        }
    }

    /// Assigns `lit` true, pushing a new decision level, and propagates to
    /// fixpoint. Returns `false` iff the assignment (directly or via
    /// propagation) falsifies some active clause.
    ///
    /// Re-asserting a literal whose variable already holds the same value is
    /// a no-op beyond draining any still-pending unit clauses. Asserting a
    /// literal whose variable already holds the *opposite* value is treated
    /// as an immediate conflict, consistent with that variable's prior
    /// forcing clause now being falsified.
    pub fn assign_value(&mut self, lit: Literal) -> bool {
        let idx = self.var_index(lit);
        let wanted = if lit > 0 { Assignment::Positive } else { Assignment::Negative };
        let current = self.vars[idx].assignment;

        self.stack.push(Vec::new());
        if current != Assignment::Unassigned {
            if current != wanted {
                trace!(target: targets::WATCH, "{lit} conflicts with existing assignment");
                self.empty_count += 1;
                return false;
            }
            return self.propagate();
        }
        self.assign_literal(lit);
        self.propagate()
    }

    /// Reacts to a variable becoming falsified: relocate `clause_idx`'s
    /// watch away from `falsified_var`, or mark it unit/empty if no
    /// replacement exists.
    fn update_watched_literal(&mut self, clause_idx: usize, falsified_var: usize) {
        if !self.clauses[clause_idx].active {
            return;
        }
        let (mut w1, mut w2) = (self.clauses[clause_idx].w1, self.clauses[clause_idx].w2);
        let l1 = self.clauses[clause_idx].literals[w1];
        if self.var_index(l1) != falsified_var {
            std::mem::swap(&mut w1, &mut w2);
        }
        let len = self.clauses[clause_idx].literals.len();
        let l1 = self.clauses[clause_idx].literals[w1];
        let l2 = self.clauses[clause_idx].literals[w2];
        let a1 = self.get_assignment(l1);
        let a2 = self.get_assignment(l2);

        if a1 == Assignment::Positive || a2 == Assignment::Positive {
            return;
        }
        if len == 1 || a2 == Assignment::Negative {
            self.empty_count += 1;
            return;
        }

        // a2 is unassigned: scan forward from w1, wrapping, skipping w2, for
        // a literal that is not falsified.
        let mut i = (w1 + 1) % len;
        let mut replacement = None;
        while i != w1 {
            if i != w2 {
                let lit = self.clauses[clause_idx].literals[i];
                if self.get_assignment(lit) != Assignment::Negative {
                    replacement = Some(i);
                    break;
                }
            }
            i = (i + 1) % len;
        }

        match replacement {
            Some(i) => {
                self.unregister_watch(clause_idx, w1);
                self.clauses[clause_idx].w1 = i;
                self.clauses[clause_idx].w2 = w2;
                self.register_watch(clause_idx, i);
            }
            None => {
                self.unit_clauses.insert(clause_idx);
            }
        }
    }

    /// Propagates pending unit clauses to fixpoint. Returns `false` iff a
    /// conflict (an empty clause) is reached.
    fn propagate(&mut self) -> bool {
        while self.empty_count == 0 {
            let Some(&idx) = self.unit_clauses.iter().next() else {
                break;
            };
            self.unit_clauses.remove(&idx);
            if !self.clauses[idx].active {
                continue;
            }
            let (w1, w2) = (self.clauses[idx].w1, self.clauses[idx].w2);
            let l1 = self.clauses[idx].literals[w1];
            let l2 = self.clauses[idx].literals[w2];
            let a1 = self.get_assignment(l1);
            let a2 = self.get_assignment(l2);
            if a1 == Assignment::Positive || a2 == Assignment::Positive {
                continue;
            }
            let implied = match (a1, a2) {
                (Assignment::Unassigned, _) => l1,
                (_, Assignment::Unassigned) => l2,
                _ => continue,
            };
            if self.get_assignment(implied) == Assignment::Unassigned {
                self.assign_literal(implied);
            }
        }
        self.empty_count == 0
    }

    /// Pops `levels` decision levels, unassigning every literal they hold.
    /// The base level (0) can never be popped.
    pub fn backtrack(&mut self, levels: usize) -> Result<(), WatchError> {
        if levels > self.stack.len() - 1 {
            return Err(WatchError::BacktrackUnderflow);
        }
        for _ in 0..levels {
            let level = self.stack.pop().unwrap();
            for lit in level {
                let idx = self.var_index(lit);
                self.vars[idx].assignment = Assignment::Unassigned;
            }
        }
        Ok(())
    }

    /// Backtracks to `target_level`. Backtracking to level 0 additionally
    /// restores the unit-clause/empty-clause snapshot captured at
    /// construction (or the last [WatchEngine::change_active_clauses] call),
    /// since general backtracking does not attempt to replay the watch
    /// updates that produced that snapshot in reverse.
    pub fn backtrack_to(&mut self, target_level: usize) -> Result<(), WatchError> {
        let current = self.get_assignment_level();
        if target_level > current {
            return Err(WatchError::BacktrackUnderflow);
        }
        self.backtrack(current - target_level)?;
        if target_level == 0 {
            self.unit_clauses = self.initial_unit_clauses.clone();
            self.empty_count = self.initial_empty_count;
        }
        Ok(())
    }

    /// Toggles which clauses are active. Only permitted at the base level,
    /// since the unit/empty snapshot restored by `backtrack_to(0)` is
    /// refreshed as part of this call.
    pub fn change_active_clauses(&mut self, activate: &[usize], deactivate: &[usize]) -> Result<(), WatchError> {
        if self.get_assignment_level() != 0 {
            return Err(WatchError::NotAtBaseLevel);
        }
        for &idx in deactivate {
            self.deactivate_clause(idx, true);
        }
        for &idx in activate {
            self.activate_clause(idx, true);
        }
        self.propagate();
        self.initial_unit_clauses = self.unit_clauses.clone();
        self.initial_empty_count = self.empty_count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_propagation_detects_conflict() {
        let engine = WatchEngine::from_vector(&[vec![1], vec![-1]]);
        assert!(engine.contains_empty());
    }

    #[test]
    fn unit_propagation_satisfies_clauses() {
        let engine = WatchEngine::from_vector(&[vec![1], vec![1, 2]]);
        assert!(!engine.contains_empty());
        assert_eq!(engine.get_assignment(1), Assignment::Positive);
    }

    #[test]
    fn assign_value_implies_chain() {
        let mut engine = WatchEngine::from_vector(&[vec![-1, 2], vec![-2, 3]]);
        assert!(engine.assign_value(1));
        assert_eq!(engine.get_assignment(2), Assignment::Positive);
        assert_eq!(engine.get_assignment(3), Assignment::Positive);
    }

    #[test]
    fn backtrack_to_zero_restores_initial_state() {
        let mut engine = WatchEngine::from_vector(&[vec![-1, 2], vec![-2, 3]]);
        engine.assign_value(1);
        engine.backtrack_to(0).unwrap();
        assert_eq!(engine.get_assignment_level(), 0);
        assert_eq!(engine.get_assignment(1), Assignment::Unassigned);
        assert!(!engine.contains_empty());
    }

    #[test]
    fn change_active_clauses_requires_base_level() {
        let mut engine = WatchEngine::from_vector(&[vec![1, 2], vec![-1, 2]]);
        engine.assign_value(1);
        assert_eq!(
            engine.change_active_clauses(&[], &[0]),
            Err(WatchError::NotAtBaseLevel)
        );
    }

    #[test]
    fn deactivated_clause_does_not_propagate() {
        let mut deactivated = HashSet::new();
        deactivated.insert(0usize);
        let mut engine = WatchEngine::new(&[vec![1], vec![-1]], 1, 1, &deactivated);
        assert!(!engine.contains_empty());
        engine.change_active_clauses(&[0], &[]).unwrap();
        assert!(engine.contains_empty());
    }
}
