//! homefacts - executable external fact for local accounts.
//!
//! Prints `home_<user>` and `sshpubkey_<user>` facts for the accounts selected
//! by `homedir_users` (or every account) to stdout. Diagnostics go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

#[cfg(not(unix))]
use homefacts_core::collector::accounts::DEFAULT_PASSWD_PATH;
#[cfg(unix)]
use homefacts_core::collector::accounts::SystemDatabase;
use homefacts_core::collector::accounts::AccountDatabase;
use homefacts_core::selection::{DEFAULT_FACTS_DIRS, UserSelection, load_selection};
use homefacts_core::{Collector, FactKind, FactSet, OutputFormat, RealFs};

/// Local account facts: home directories and SSH public keys.
#[derive(Parser)]
#[command(
    name = "homefacts",
    about = "Emit home directory and SSH public key facts for local users",
    version
)]
struct Args {
    /// Read accounts from this passwd-format file instead of the system
    /// account database (NSS).
    #[arg(long, value_name = "PATH")]
    passwd_file: Option<PathBuf>,

    /// External facts directory to search for `homedir_users`.
    /// Repeatable; replaces the default search list.
    #[arg(long = "facts-dir", value_name = "DIR")]
    facts_dirs: Vec<PathBuf>,

    /// Only collect facts for these users (comma-separated or repeated).
    /// Overrides `homedir_users` from facts files.
    #[arg(
        short,
        long = "user",
        value_name = "NAME",
        value_delimiter = ',',
        env = "FACTER_homedir_users"
    )]
    users: Vec<String>,

    /// Fact kinds to emit: home, sshpubkey.
    #[arg(long, value_delimiter = ',', default_values_t = FactKind::ALL)]
    facts: Vec<FactKind>,

    /// Output format: json, yaml or text (name=value lines; multi-line values are left out).
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr.
/// Default level is WARN so the fact run stays silent unless something is skipped.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["homefacts", "homefacts_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Runs the enabled collectors over whichever account database was chosen.
fn collect<A: AccountDatabase>(
    collector: Collector<RealFs, A>,
    kinds: &[FactKind],
    selection: &UserSelection,
) -> FactSet {
    collector.with_kinds(kinds).collect(selection)
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("homefacts {} starting", env!("CARGO_PKG_VERSION"));

    let facts_dirs: Vec<PathBuf> = if args.facts_dirs.is_empty() {
        DEFAULT_FACTS_DIRS.iter().map(PathBuf::from).collect()
    } else {
        args.facts_dirs.clone()
    };
    debug!(
        "Config: passwd={:?}, facts_dirs={:?}, facts={:?}, format={:?}",
        args.passwd_file,
        facts_dirs,
        args.facts,
        args.format
    );

    let fs = RealFs::new();
    let selection = load_selection(&fs, &args.users, &facts_dirs);
    info!("Selection: {}", selection);

    let facts = match &args.passwd_file {
        Some(path) => collect(Collector::new(fs, path), &args.facts, &selection),
        #[cfg(unix)]
        None => collect(
            Collector::with_accounts(fs, SystemDatabase::new()),
            &args.facts,
            &selection,
        ),
        #[cfg(not(unix))]
        None => collect(
            Collector::new(fs, DEFAULT_PASSWD_PATH),
            &args.facts,
            &selection,
        ),
    };
    info!("Collected {} facts", facts.len());

    let rendered = match facts.render(args.format) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
    {
        error!("cannot write facts: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
