/*!
The DIMACS CNF text format: the external interface for reading a formula in
and writing one back out.
*/

pub mod reader;
pub mod writer;

pub use reader::{read_dimacs, ParseReport};
pub use writer::write_dimacs;

use std::io::{self, Write};

use crate::cnf::Cnf;
use crate::types::err::ErrorKind;

impl Cnf {
    /// Parses a DIMACS document directly into a [Cnf].
    pub fn from_dimacs(input: &str) -> Result<(Cnf, ParseReport), ErrorKind> {
        let (clauses, report) = read_dimacs(input)?;
        Ok((Cnf::from_vector(&clauses), report))
    }

    /// Writes this formula out as a DIMACS document.
    pub fn to_dimacs<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_dimacs(writer, &self.to_vector())
    }
}
