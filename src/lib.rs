/*!
A library for eliminating variables from a CNF formula by Davis-Putnam
resolution, using a zero-suppressed decision diagram to represent the
formula symbolically.

dp_elim takes a formula in conjunctive normal form and removes a bounded set
of variables by resolving every clause containing `+v` against every clause
containing `-v` for each eliminated variable `v`, periodically compacting
the result by removing tautologies, subsumed clauses, and absorbed clauses.
The output is a logically equivalent (with respect to satisfiability over
the remaining variables) CNF, typically of different shape and size.

# Orientation

The library is built around three layers, leaves first:

- [zdd]: the decision-diagram kernel — a hash-consed, reference-counted node
  table — and the literal encoding built on top of it.
- [cnf]: a CNF formula as a ZDD, with the set-algebra primitives
  ([cnf::algebra]), CNF-specific rewrites ([cnf::transforms]), read-only
  queries ([cnf::queries]), and clause-vector conversion ([cnf::enumerate])
  that the rest of the crate is built from.
- [watch] and [absorbed]: a watched-literals propagation engine and the two
  interchangeable absorbed-clause detectors built on it (or, for
  [absorbed::without_conversion], built directly on [cnf] instead).

[heuristics] selects which literal [driver] eliminates next; [driver] is the
orchestrating loop; [dimacs] is the external text format; [config] ties the
knobs together.

# Examples

```rust
use dp_elim::cnf::Cnf;
use dp_elim::driver::{eliminate_vars, is_sat};
use dp_elim::heuristics::Simple;
use dp_elim::config::Config;

let formula = Cnf::from_vector(&[vec![1, 2], vec![-1, -2]]);
let config = Config::default();
let result = eliminate_vars(formula, &Simple, &config, |_| false);
assert!(result.is_empty());

assert!(is_sat(Cnf::from_vector(&[vec![1, 2]]), &Simple));
assert!(!is_sat(Cnf::from_vector(&[vec![1], vec![-1]]), &Simple));
```

# Logs

Calls to [log!](log) are made throughout the library, under the targets
listed in [misc::log::targets]. For example, with
[env_logger](https://docs.rs/env_logger):
- `RUST_LOG=driver=debug` traces the elimination loop's progress.
- `RUST_LOG=dimacs=warn` surfaces parser warnings (out-of-range literals,
  clause-count mismatches) without other noise.
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::derivable_impls)]

pub mod absorbed;
pub mod cnf;
pub mod config;
pub mod dimacs;
pub mod driver;
pub mod generic;
pub mod heuristics;
pub mod misc;
pub mod types;
pub mod watch;
pub mod zdd;
