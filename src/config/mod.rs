/*!
Configuration of an elimination run.

Mirrors the rest of the library's convention of a single `Config` struct with
a `Default` impl; unlike a full solver's configuration this one is small,
since almost every other knob (which heuristic to run, its variable range) is
a value passed directly to the [driver](crate::driver) rather than threaded
through configuration.
*/

use crate::absorbed::Backend;
use crate::types::err::ConfigError;

/// When absorbed-clause removal runs relative to the elimination loop's
/// iteration counter `i`.
///
/// The original implementation this crate's design is grounded on scheduled
/// absorbed-clause removal on `i % interval == 0`, which fires on the very
/// first iteration (`i = 0`) before any resolution has taken place. This is
/// rarely useful, so `ExcludeFirst` is the default; `IncludeFirst` recovers
/// the original behaviour exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsorbedSchedule {
    IncludeFirst,
    ExcludeFirst,
}

impl AbsorbedSchedule {
    /// Whether absorbed-clause removal is due at iteration `i`, given
    /// `interval` (a value of `0` means "never", handled by the caller
    /// before consulting this).
    pub fn is_due(&self, i: usize, interval: usize) -> bool {
        if interval == 0 {
            return false;
        }
        if i == 0 {
            return matches!(self, AbsorbedSchedule::IncludeFirst);
        }
        i % interval == 0
    }
}

/// The primary configuration structure for an elimination run.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Capacity of every ZDD operation cache (multiply, tautology removal,
    /// subsumed-clause removal, superset removal). The kernel's own
    /// hash-consing table provides the bulk of the caching benefit, so these
    /// can stay small.
    pub cache_capacity: usize,

    /// How often (in eliminated variables) to run absorbed-clause removal.
    /// `0` disables periodic absorbed-clause removal entirely; a final pass
    /// still runs at the end of [eliminate_vars](crate::driver::eliminate_vars)
    /// unless this is `0`.
    pub absorbed_interval: usize,

    /// Scheduling policy applied to `absorbed_interval`.
    pub absorbed_schedule: AbsorbedSchedule,

    /// Which absorbed-clause detection backend to use.
    pub absorbed_backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_capacity: 32,
            absorbed_interval: 0,
            absorbed_schedule: AbsorbedSchedule::ExcludeFirst,
            absorbed_backend: Backend::WithConversion,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }

    /// Applies `cache_capacity` to every ZDD operation cache. Call once,
    /// before manipulating any [Cnf](crate::cnf::Cnf) values, since existing
    /// cache entries are discarded.
    pub fn apply(&self) -> Result<(), ConfigError> {
        self.validate()?;
        crate::cnf::set_cache_capacity(self.cache_capacity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_include_first_fires_at_zero() {
        assert!(AbsorbedSchedule::IncludeFirst.is_due(0, 3));
        assert!(!AbsorbedSchedule::ExcludeFirst.is_due(0, 3));
    }

    #[test]
    fn schedule_fires_on_interval() {
        assert!(AbsorbedSchedule::ExcludeFirst.is_due(3, 3));
        assert!(!AbsorbedSchedule::ExcludeFirst.is_due(2, 3));
    }

    #[test]
    fn zero_interval_never_fires() {
        assert!(!AbsorbedSchedule::IncludeFirst.is_due(0, 0));
    }
}
