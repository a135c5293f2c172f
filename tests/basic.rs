use dp_elim::cnf::Cnf;
use dp_elim::driver::is_sat;
use dp_elim::heuristics::Simple;

mod basic {
    use super::*;

    fn sorted(cnf: &Cnf) -> Vec<Vec<i32>> {
        let mut v = cnf.to_vector();
        v.iter_mut().for_each(|c| c.sort());
        v.sort();
        v
    }

    #[test]
    fn eliminate_drops_the_variable_and_folds_unrelated_clauses() {
        let formula = Cnf::from_vector(&[
            vec![1, 2, 3],
            vec![2, 4],
            vec![1, 3, 4],
            vec![2, 5, 6],
            vec![-4],
        ]);
        let result = formula.eliminate(4);
        assert_eq!(sorted(&result), vec![vec![1, 3], vec![2]]);
    }

    #[test]
    fn eliminate_of_complementary_units_resolves_to_empty() {
        let formula = Cnf::from_vector(&[vec![1, 2], vec![-1, -2]]);
        assert!(formula.eliminate(1).is_empty());
    }

    #[test]
    fn eliminate_of_a_direct_conflict_yields_the_empty_clause() {
        let formula = Cnf::from_vector(&[vec![1], vec![-1]]);
        assert!(formula.eliminate(1).contains_empty_clause());
    }

    #[test]
    fn is_sat_agrees_with_manual_elimination() {
        assert!(!is_sat(Cnf::from_vector(&[vec![1], vec![-1]]), &Simple));
        assert!(is_sat(Cnf::from_vector(&[vec![1, 2]]), &Simple));
    }
}
