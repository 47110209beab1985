use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use pilotclock::cli::{parse_args, print_help};
use pilotclock::config::Config;
use pilotclock::input::parse_year;
use pilotclock::report::{Celebration, OutputFormat};
use pilotclock::Solver;

fn main() -> Result<()> {
    let args = parse_args();

    if args.help {
        print_help();
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pilotclock=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("pilotclock v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    debug!(
        "Accepting years {}..={}, default {}",
        config.min_year, config.max_year, config.default_year
    );

    // Handle --validate mode
    if args.validate {
        info!("Validating configuration...");
        match config.validate() {
            Ok(()) => {
                info!("Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    // A broken schedule is a build defect, not user error: abort loudly
    let solver = Solver::pilot().context("pilot schedule is misconfigured")?;
    let output = args.output.unwrap_or(config.output);

    let years = if args.years.is_empty() {
        vec![config.default_year.to_string()]
    } else {
        args.years
    };

    let mut rejected = 0;
    for raw in &years {
        match solve_one(&solver, &config, raw, output)? {
            Some(line) => println!("{}", line),
            None => rejected += 1,
        }
    }

    if rejected > 0 {
        warn!("{} of {} years rejected", rejected, years.len());
        std::process::exit(2);
    }

    Ok(())
}

/// Solve one raw year argument.
/// Returns None when the year was rejected as user input.
fn solve_one(
    solver: &Solver,
    config: &Config,
    raw: &str,
    output: OutputFormat,
) -> Result<Option<String>> {
    let year = match parse_year(raw, config.bounds()) {
        Ok(year) => year,
        Err(e) => {
            error!("{}", e);
            return Ok(None);
        }
    };

    let instant = match solver.celebration_instant(year) {
        Ok(instant) => instant,
        Err(e) if e.is_user_facing() => {
            error!("{}", e);
            return Ok(None);
        }
        Err(e) => return Err(e).with_context(|| format!("solving year {}", year)),
    };

    let line = Celebration::new(year, instant)
        .render(output)
        .context("rendering report")?;
    Ok(Some(line))
}
