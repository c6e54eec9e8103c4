//! launchpad — sample launcher CLI
//!
//! Runs one launch session against a simulated host: permission prompts are
//! answered from the command line, and the native runtime prints the
//! arguments it would receive.
//!
//! Usage:
//!   cargo run -p launchpad-cli -- sample triangle
//!   cargo run -p launchpad-cli -- --benchmark cmd test T1
//!   cargo run -p launchpad-cli -- --deny read-external-storage test T1
//!   cargo run -p launchpad-cli -- extras '{"cmd": "batch --category api"}'
//!   cargo run -p launchpad-cli -- --manifest launchpad.toml list

mod host;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use launchpad_contracts::{
    capability::CapabilityId,
    error::{LaunchError, LaunchResult},
    launch::{LaunchOutcome, ModeFlags},
    request::{LaunchRequest, RequestFields},
};
use launchpad_core::{
    traits::SampleCatalog, LaunchCoordinator, NativeBridge, PermissionChainer, PermissionLedger,
    RequestInterpreter, StoragePaths,
};
use launchpad_manifest::{LauncherManifest, TomlSampleCatalog};

use crate::host::{ConsoleRuntime, ConsoleSurface, SimulatedAccess};

// ── CLI definition ────────────────────────────────────────────────────────────

/// launchpad — permission-gated sample launcher.
#[derive(Parser)]
#[command(
    name = "launchpad",
    about = "Launch a sample, test or command through the launchpad session pipeline",
    long_about = "Runs one launcher session: requests permissions one at a time,\n\
                  interprets the request and hands the argument vector to the\n\
                  native runtime exactly once."
)]
struct Cli {
    /// Launcher manifest (TOML). Uses built-in defaults when omitted.
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Append --benchmark to the arguments.
    #[arg(long, global = true)]
    benchmark: bool,

    /// Append --headless to the arguments.
    #[arg(long, global = true)]
    headless: bool,

    /// Deny the prompt for this capability id. Repeatable.
    #[arg(long = "deny", value_name = "CAPABILITY", global = true)]
    deny: Vec<String>,

    /// Treat every capability as already granted.
    #[arg(long, global = true)]
    pre_granted: bool,

    /// Simulate a native library that fails to load.
    #[arg(long, global = true)]
    no_native: bool,

    /// Per-app external files directory, used to derive storage paths.
    #[arg(long, global = true)]
    external_dir: Option<PathBuf>,

    /// Print the outcome as JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Forward raw command tokens.
    Cmd {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Launch a sample from the catalog.
    Sample { id: String },
    /// Launch a test by id.
    Test { id: String },
    /// Run every sample in a category.
    Batch {
        #[arg(long)]
        category: String,
        /// Extra filter tokens appended after the category.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        filter: Vec<String>,
    },
    /// Resolve raw request extras given as JSON, e.g. '{"sample": "triangle"}'.
    Extras {
        #[arg(value_name = "JSON")]
        extras: String,
    },
    /// List the samples in the catalog.
    List,
}

impl Command {
    /// `Ok(None)` means the session has nothing to launch.
    fn into_request(self) -> LaunchResult<Option<LaunchRequest>> {
        let request = match self {
            Command::Cmd { tokens } => Some(LaunchRequest::CommandTokens(tokens)),
            Command::Sample { id } => Some(LaunchRequest::SampleId(id)),
            Command::Test { id } => Some(LaunchRequest::TestId(id)),
            Command::Batch { category, filter } => Some(LaunchRequest::batch(category, filter)),
            Command::Extras { extras } => {
                let fields: RequestFields =
                    serde_json::from_str(&extras).map_err(|e| LaunchError::ConfigError {
                        reason: format!("invalid request extras: {}", e),
                    })?;
                fields.into_request()
            }
            Command::List => None,
        };
        Ok(request)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("launchpad error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Session driver ────────────────────────────────────────────────────────────

fn run(cli: Cli) -> LaunchResult<i32> {
    let manifest = match &cli.manifest {
        Some(path) => LauncherManifest::from_file(path)?,
        None => LauncherManifest::default(),
    };
    let catalog = TomlSampleCatalog::from_manifest(&manifest);

    if let Command::List = cli.command {
        print_catalog(&catalog);
        return Ok(0);
    }

    let access = SimulatedAccess::new(cli.deny.iter().map(CapabilityId::new));
    if cli.pre_granted {
        access.pre_grant(&manifest.capabilities);
    }

    let mut native = NativeBridge::new(
        manifest.native_library.clone(),
        Box::new(ConsoleRuntime::new(!cli.no_native)),
    );
    if let Some(package) = manifest.package_name.as_deref() {
        let temp_dir = std::env::temp_dir();
        if let Some(paths) =
            StoragePaths::resolve(cli.external_dir.as_deref(), Some(temp_dir.as_path()), package)
        {
            native = native.with_storage(paths);
        }
    }

    let chainer = PermissionChainer::new(PermissionLedger::new(
        Box::new(access.clone()),
        manifest.capabilities.clone(),
    ));
    let interpreter = RequestInterpreter::new(Box::new(catalog));
    let flags = ModeFlags { benchmark: cli.benchmark, headless: cli.headless };
    let json = cli.json;

    let mut coordinator =
        LaunchCoordinator::new(chainer, interpreter, Arc::new(native), Box::new(ConsoleSurface))
            .with_request(cli.command.into_request()?)
            .with_flags(flags);

    info!(session_id = %coordinator.session_id().0, "session started");

    let mut outcome = settled(coordinator.start())?;
    while outcome == LaunchOutcome::AwaitingPermissions {
        let Some(code) = access.answer_next() else {
            return Err(LaunchError::StateMachineError {
                reason: "session is waiting for a permission prompt that was never shown"
                    .to_string(),
            });
        };
        outcome = settled(coordinator.on_permission_result(code))?;
    }

    if json {
        let rendered = match coordinator.dispatch_record() {
            Some(record) => serde_json::to_string_pretty(record),
            None => serde_json::to_string_pretty(&outcome),
        };
        match rendered {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("failed to render outcome: {}", e),
        }
    } else {
        print_outcome(&outcome);
    }

    Ok(match outcome {
        LaunchOutcome::Dispatched(_) | LaunchOutcome::Ready => 0,
        LaunchOutcome::AwaitingPermissions | LaunchOutcome::Rejected(_) => 1,
    })
}

/// A native dispatch failure ends the session like a rejection, so it is
/// reported through the normal outcome output. Other errors abort the run.
fn settled(result: LaunchResult<LaunchOutcome>) -> LaunchResult<LaunchOutcome> {
    match result {
        Err(err @ LaunchError::NativeDispatchFailure { .. }) => Ok(LaunchOutcome::Rejected(err)),
        other => other,
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_outcome(outcome: &LaunchOutcome) {
    match outcome {
        LaunchOutcome::Dispatched(args) => {
            let joined: Vec<&str> = args.iter().map(String::as_str).collect();
            println!("dispatched: {}", joined.join(" "));
        }
        LaunchOutcome::Ready => println!("ready: no request to launch"),
        LaunchOutcome::AwaitingPermissions => println!("waiting for permissions"),
        LaunchOutcome::Rejected(reason) => println!("rejected: {}", reason),
    }
}

fn print_catalog(catalog: &TomlSampleCatalog) {
    let samples = catalog.samples();
    if samples.is_empty() {
        println!("no samples installed");
        return;
    }
    for category in catalog.categories() {
        let heading = if category.is_empty() { "uncategorized" } else { category };
        println!("{}:", heading);
        for sample in catalog.in_category(category) {
            println!("  {:<24} {}", sample.id, sample.name);
        }
    }
}
