/*!
The zero-suppressed decision-diagram kernel underlying [crate::cnf].

[kernel] provides the canonical node table and primitive node construction;
[literal] provides the literal-to-node-variable encoding the CNF layer
builds on.
*/

pub mod kernel;
pub mod literal;

pub use kernel::{make_node, one, table_size, zero, Node, Var};
pub use literal::Literal;
