//! Command-line argument parsing for pilotclock

use crate::report::OutputFormat;

/// Parse command line arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    /// Raw year arguments, validated later against the configured range
    pub years: Vec<String>,
    /// Overrides PILOTCLOCK_OUTPUT when set
    pub output: Option<OutputFormat>,
    pub validate: bool,
    pub help: bool,
}

pub fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

/// Parse an argv-style slice (program name first)
pub fn parse_args_from(args: &[String]) -> Args {
    let mut result = Args::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--json" => result.output = Some(OutputFormat::Json),
            "--full" => result.output = Some(OutputFormat::Full),
            "--plain" => result.output = Some(OutputFormat::Plain),
            "--validate" => result.validate = true,
            "--help" | "-h" => result.help = true,
            // Negative years are passed through for the range check to reject
            other if !other.starts_with("--") => result.years.push(other.to_string()),
            _ => {}
        }
    }

    result
}

pub fn print_help() {
    println!("pilotclock - when does the pilot celebrate new year?\n");
    println!("USAGE:");
    println!("    pilotclock [OPTIONS] [YEAR...]\n");
    println!("OPTIONS:");
    println!("    --plain             Print Moscow time as YYYY-MM-DD HH:mm:ss (default)");
    println!("    --full              Print a long, readable Moscow date");
    println!("    --json              Print one JSON object per year");
    println!("    --validate          Validate configuration and exit");
    println!("    --help, -h          Show this help message\n");
    println!("ENVIRONMENT:");
    println!("    PILOTCLOCK_MIN_YEAR      Smallest accepted year (default 2021)");
    println!("    PILOTCLOCK_MAX_YEAR      Largest accepted year (default 9999)");
    println!("    PILOTCLOCK_DEFAULT_YEAR  Year solved when none is given (default 2025)");
    println!("    PILOTCLOCK_OUTPUT        plain, full or json");
}
