/*!
Miscellaneous items related to [logging](log).

Calls to the [log] macro are made throughout the library. No log
implementation is provided; pair this crate with one (e.g.
[env_logger](https://docs.rs/env_logger)) to see output.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [decision-diagram kernel](crate::zdd::kernel).
    pub const KERNEL: &str = "kernel";

    /// Logs related to [set algebra](crate::cnf::algebra) (union,
    /// intersection, difference, multiply).
    pub const ALGEBRA: &str = "algebra";

    /// Logs related to [tautology and subsumption removal](crate::cnf::transforms).
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [DP elimination driver](crate::driver).
    pub const DRIVER: &str = "driver";

    /// Logs related to [heuristic](crate::heuristics) selection.
    pub const HEURISTIC: &str = "heuristic";

    /// Logs related to the [watched-literals engine](crate::watch).
    pub const WATCH: &str = "watch";

    /// Logs related to [absorbed-clause detection](crate::absorbed).
    pub const ABSORBED: &str = "absorbed";

    /// Logs related to [DIMACS parsing and writing](crate::dimacs).
    pub const DIMACS: &str = "dimacs";
}
