//! `latency [baseline|syscall|pagefault]`
//!
//! Prints the seven-line latency report to stdout. Diagnostics, including
//! the final accumulator value, go to stderr.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tail_latency::{output, Config, Harness, HarnessError, Mode};

#[derive(Debug, Parser)]
#[command(name = "latency", version, about = "Tail latency of baseline, syscall and page-fault workloads")]
struct Cli {
    /// Workload: baseline, syscall or pagefault. Anything else runs baseline.
    mode: Option<String>,

    /// Reject unrecognized modes instead of falling back to baseline.
    #[arg(long)]
    strict: bool,

    /// Unmeasured warm-up iterations.
    #[arg(long)]
    warmup: Option<usize>,

    /// Measured iterations (page-fault mode uses --pagefault-iterations).
    #[arg(long)]
    iterations: Option<usize>,

    /// Measured iterations for the page-fault mode.
    #[arg(long)]
    pagefault_iterations: Option<usize>,

    /// Pages to reserve for the page-fault mode.
    #[arg(long)]
    pages: Option<usize>,

    /// Print a JSON report instead of the text report.
    #[arg(long)]
    json: bool,

    /// Include the ordered samples in the JSON report.
    #[arg(long, requires = "json")]
    samples: bool,

    /// Print mean latency per pass over the page-fault region to stderr.
    #[arg(long)]
    cycles: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(warmup) = self.warmup {
            config.warmup = warmup;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(iterations) = self.pagefault_iterations {
            config.pagefault_iterations = iterations;
        }
        if let Some(pages) = self.pages {
            config.pagefault_pages = Some(pages);
        }
        config
    }

    fn resolve_mode(&self) -> Result<Mode, HarnessError> {
        match (&self.mode, self.strict) {
            (Some(name), true) => Mode::parse_strict(name),
            (name, _) => Ok(Mode::from_arg(name.as_deref())),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mode = match cli.resolve_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Usage: latency [baseline|syscall|pagefault]");
            return ExitCode::from(2);
        }
    };

    let run = match Harness::from_config(cli.config()).run(mode) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("latency: {}", err);
            return ExitCode::FAILURE;
        }
    };

    eprint!("{}", output::format_warnings(&run.warnings));

    if cli.json {
        match output::to_json_pretty(&run.report(cli.samples)) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("latency: failed to serialize report: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", output::format_stats(&run.stats));
    }

    if cli.cycles {
        if let Some(means) = &run.page_cycle_means {
            eprint!("{}", output::format_page_cycles(means));
        }
    }

    eprintln!("[latency] sink={:#018x}", run.sink);
    ExitCode::SUCCESS
}
