/*!
A simple CLI interface to the library.

# Use

```sh
dp_elim_cli [--option(=value)]* file.cnf
```

## Options

No option is required. Of note:

- `--heuristic` selects which literal to eliminate next (`simple`, `unit`,
  `clear`; default `unit`).
- `--absorbed-interval` runs absorbed-clause removal every N eliminated
  variables (`0`, the default, disables the periodic pass; a final pass
  still runs once elimination stops unless this is `0`).
- `--absorbed-backend` selects the absorbed-clause detector
  (`with-conversion`, the default, or `without-conversion`).
- `--sat-only` stops at the first trivially satisfiable or unsatisfiable
  result instead of eliminating every variable in the file.
- `-o <path>` writes the resulting CNF to `path` instead of stdout.
*/

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use dp_elim::absorbed::Backend;
use dp_elim::cnf::Cnf;
use dp_elim::config::{AbsorbedSchedule, Config};
use dp_elim::driver::{eliminate_vars, is_sat};
use dp_elim::heuristics::{ClearLiteral, Heuristic, Simple, UnitLiteral};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Simple,
    Unit,
    Clear,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    WithConversion,
    WithoutConversion,
}

impl From<BackendArg> for Backend {
    fn from(a: BackendArg) -> Self {
        match a {
            BackendArg::WithConversion => Backend::WithConversion,
            BackendArg::WithoutConversion => Backend::WithoutConversion,
        }
    }
}

/// Eliminates variables from a DIMACS CNF file by Davis-Putnam resolution.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The DIMACS CNF file to read.
    input: PathBuf,

    /// Which literal-selection heuristic to run.
    #[arg(long, value_enum, default_value_t = HeuristicArg::Unit)]
    heuristic: HeuristicArg,

    /// How often (in eliminated variables) to run absorbed-clause removal;
    /// `0` disables the periodic pass.
    #[arg(long, default_value_t = 0)]
    absorbed_interval: usize,

    /// Which absorbed-clause detection backend to use.
    #[arg(long, value_enum, default_value_t = BackendArg::WithConversion)]
    absorbed_backend: BackendArg,

    /// Capacity of every ZDD operation cache.
    #[arg(long, default_value_t = 32)]
    cache_capacity: usize,

    /// Stop as soon as the formula is trivially satisfiable or
    /// unsatisfiable, rather than eliminating every variable.
    #[arg(long)]
    sat_only: bool,

    /// Write the resulting CNF here instead of stdout. Ignored with
    /// `--sat-only`.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        cache_capacity: cli.cache_capacity,
        absorbed_interval: cli.absorbed_interval,
        absorbed_schedule: AbsorbedSchedule::ExcludeFirst,
        absorbed_backend: cli.absorbed_backend.into(),
    };
    config.apply()?;

    let text = fs::read_to_string(&cli.input)?;
    let (cnf, report) = Cnf::from_dimacs(&text)?;
    for warning in &report.warnings {
        eprintln!("c {warning}");
    }

    if cli.sat_only {
        let sat = match cli.heuristic {
            HeuristicArg::Simple => is_sat(cnf, &Simple),
            HeuristicArg::Unit => is_sat(cnf, &UnitLiteral),
            HeuristicArg::Clear => is_sat(cnf, &ClearLiteral),
        };
        println!("s {}", if sat { "SATISFIABLE" } else { "UNSATISFIABLE" });
        return Ok(());
    }

    let result = match cli.heuristic {
        HeuristicArg::Simple => eliminate_vars(cnf, &Simple, &config, |_| false),
        HeuristicArg::Unit => eliminate_vars(cnf, &UnitLiteral, &config, |_| false),
        HeuristicArg::Clear => eliminate_vars(cnf, &ClearLiteral, &config, |_| false),
    };

    if result.contains_empty_clause() {
        println!("s UNSATISFIABLE");
    } else if result.is_empty() {
        println!("s SATISFIABLE");
    } else {
        println!("s UNKNOWN");
    }

    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            result.to_dimacs(&mut file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            result.to_dimacs(&mut lock)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("c {e}");
        std::process::exit(1);
    }
}
