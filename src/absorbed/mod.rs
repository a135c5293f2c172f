/*!
Absorbed-clause detection: a clause `c` is absorbed by a formula `F` iff no
literal of `c` is empowered relative to `F \ {c}` — a stronger notion of
redundancy than subsumption.

Two interchangeable back-ends compute the same predicate:

- [with_conversion] materialises the formula and uses the
  [watched-literals engine](crate::watch).
- [without_conversion] stays on the ZDD and propagates symbolically.

[Backend] selects between them; [remove_absorbed] dispatches accordingly.
*/

pub mod with_conversion;
pub mod without_conversion;

use crate::cnf::Cnf;

/// Which absorbed-clause detection strategy to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Materialise to a clause vector and use the watched-literals engine.
    WithConversion,
    /// Propagate symbolically over the ZDD.
    WithoutConversion,
}

/// Removes every absorbed clause from `formula`, using `backend`.
pub fn remove_absorbed(formula: &Cnf, backend: Backend) -> Cnf {
    match backend {
        Backend::WithConversion => {
            let cleaned = with_conversion::remove_absorbed(&formula.to_vector());
            Cnf::from_vector(&cleaned)
        }
        Backend::WithoutConversion => without_conversion::remove_absorbed(formula),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_backends_agree_on_tautology_free_input() {
        let formula = Cnf::from_vector(&[vec![1, -2], vec![-1, 2, 3], vec![-1, 2], vec![-1, 2, -4]]);
        let a = remove_absorbed(&formula, Backend::WithConversion);
        let b = remove_absorbed(&formula, Backend::WithoutConversion);

        let mut va = a.to_vector();
        va.iter_mut().for_each(|c| c.sort());
        va.sort();
        let mut vb = b.to_vector();
        vb.iter_mut().for_each(|c| c.sort());
        vb.sort();
        assert_eq!(va, vb);
    }
}
