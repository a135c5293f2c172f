use dp_elim::cnf::Cnf;

mod dimacs_roundtrip {
    use super::*;

    #[test]
    fn writing_then_reading_back_preserves_the_clause_set() {
        let original = Cnf::from_vector(&[vec![1, 2, -3], vec![-1, 3], vec![2]]);

        let mut buf = Vec::new();
        original.to_dimacs(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let (parsed, report) = Cnf::from_dimacs(&text).unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(parsed, original);
    }

    #[test]
    fn reader_warns_but_still_parses_an_out_of_range_literal() {
        let text = "p cnf 2 1\n1 3 0\n";
        let (cnf, report) = Cnf::from_dimacs(text).unwrap();
        assert_eq!(cnf.count_clauses(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn reader_rejects_a_file_with_no_header() {
        let text = "1 2 0\n";
        assert!(Cnf::from_dimacs(text).is_err());
    }
}
