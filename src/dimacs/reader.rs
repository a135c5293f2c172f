/*!
Parsing DIMACS CNF text.
*/

use log::warn;

use crate::misc::log::targets;
use crate::types::err::{ErrorKind, ParseError};
use crate::zdd::Literal;

/// Non-fatal issues noticed while parsing, collected for the caller to
/// surface however it likes (the CLI prints them; a library caller may
/// ignore them).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub warnings: Vec<String>,
}

/// Parses a DIMACS CNF document into clause vectors.
///
/// Blank lines, `c` comment lines, and a bare `\r` are skipped. A `p cnf
/// <vars> <clauses>` header is required before any clause line. A trailing
/// clause without a terminating `0` is accepted, with a warning. Literals
/// outside the declared variable range, and a clause count that disagrees
/// with the header, are reported as warnings rather than errors.
pub fn read_dimacs(input: &str) -> Result<(Vec<Vec<Literal>>, ParseReport), ErrorKind> {
    let mut warnings = Vec::new();
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<Literal>> = Vec::new();
    let mut current: Vec<Literal> = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('p') {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() != 3 || parts[0] != "cnf" {
                return Err(ParseError::MalformedHeader { line: line_no }.into());
            }
            let nvars: usize = parts[1]
                .parse()
                .map_err(|_| ParseError::MalformedHeader { line: line_no })?;
            let nclauses: usize = parts[2]
                .parse()
                .map_err(|_| ParseError::MalformedHeader { line: line_no })?;
            header = Some((nvars, nclauses));
            continue;
        }

        let Some((nvars, _)) = header else {
            return Err(ParseError::MissingHeader.into());
        };

        for token in trimmed.split_whitespace() {
            let lit: i64 = token
                .parse()
                .map_err(|_| ParseError::MalformedClause { line: line_no })?;
            if lit == 0 {
                clauses.push(std::mem::take(&mut current));
                continue;
            }
            let lit = lit as Literal;
            if (lit.unsigned_abs() as usize) > nvars {
                let msg = format!("line {line_no}: literal {lit} exceeds declared variable count {nvars}");
                warn!(target: targets::DIMACS, "{msg}");
                warnings.push(msg);
            }
            current.push(lit);
        }
    }

    let Some((_, nclauses)) = header else {
        return Err(ParseError::MissingHeader.into());
    };

    if !current.is_empty() {
        let msg = "trailing clause without terminating 0".to_string();
        warn!(target: targets::DIMACS, "{msg}");
        warnings.push(msg);
        clauses.push(current);
    }

    if clauses.len() != nclauses {
        let msg = format!("declared {nclauses} clauses, found {}", clauses.len());
        warn!(target: targets::DIMACS, "{msg}");
        warnings.push(msg);
    }

    Ok((clauses, ParseReport { warnings }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_file() {
        let text = "c a comment\np cnf 3 2\n1 2 0\n-1 3 0\n";
        let (clauses, report) = read_dimacs(text).unwrap();
        assert_eq!(clauses, vec![vec![1, 2], vec![-1, 3]]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_header_is_an_error() {
        let text = "1 2 0\n";
        assert_eq!(read_dimacs(text), Err(ParseError::MissingHeader.into()));
    }

    #[test]
    fn trailing_clause_without_terminator_warns() {
        let text = "p cnf 2 1\n1 2";
        let (clauses, report) = read_dimacs(text).unwrap();
        assert_eq!(clauses, vec![vec![1, 2]]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn clause_count_mismatch_warns() {
        let text = "p cnf 2 5\n1 2 0\n";
        let (_, report) = read_dimacs(text).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }
}
