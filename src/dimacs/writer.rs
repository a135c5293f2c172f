/*!
Writing DIMACS CNF text.
*/

use std::io::{self, Write};

use crate::zdd::Literal;

/// Writes `clauses` as a DIMACS CNF document: a `p cnf <vars> <clauses>`
/// header, then one `0`-terminated, space-separated clause per line.
pub fn write_dimacs<W: Write>(writer: &mut W, clauses: &[Vec<Literal>]) -> io::Result<()> {
    let max_var = clauses
        .iter()
        .flat_map(|c| c.iter())
        .map(|l| l.unsigned_abs())
        .max()
        .unwrap_or(0);

    writeln!(writer, "p cnf {} {}", max_var, clauses.len())?;
    for clause in clauses {
        for lit in clause {
            write!(writer, "{lit} ")?;
        }
        writeln!(writer, "0")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_clauses() {
        let mut buf = Vec::new();
        write_dimacs(&mut buf, &[vec![1, 2], vec![-1, 3]]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "p cnf 3 2\n1 2 0\n-1 3 0\n");
    }
}
