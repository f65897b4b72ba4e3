mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{Context, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_PREFIX_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "cellar",
    version,
    about = "Discover Steam and Battle.net games installed in a Wine prefix"
)]
struct Cli {
    /// Wine prefix to scan (default: $WINEPREFIX, then the config file, then ~/.wine).
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Path to the config file (default: ~/.config/cellar/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every launchable app installed in the prefix.
    Scan {
        /// Leave out the platform clients themselves.
        #[arg(long, default_value_t = false)]
        no_launchers: bool,
        /// Only scan this platform (steam, battlenet). Repeatable.
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// Report which platform clients are installed in the prefix.
    Detect,
    /// Show one app, matched by id or name, with its launch line.
    Show {
        /// App id or name (case-insensitive).
        query: String,
    },
    /// Print a key from a registry file.
    Reg {
        /// Hive name (system, user, userdef, HKLM, HKCU) or path to a .reg file.
        file: String,
        /// Key path with single backslashes, e.g. 'Software\Wine'.
        key_path: String,
        /// Print only this value's data.
        value: Option<String>,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("CELLAR_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let json_output = cli.json;
    let context = || Context::load(cli.prefix.as_deref(), cli.config.as_deref());

    let result = match cli.command {
        Commands::Scan {
            no_launchers,
            platforms,
        } => context().and_then(|ctx| {
            commands::scan::run(&ctx, &platforms, no_launchers, json_output, cli.verbose)
        }),
        Commands::Detect => context().and_then(|ctx| commands::detect::run(&ctx, json_output)),
        Commands::Show { query } => {
            context().and_then(|ctx| commands::show::run(&ctx, &query, json_output))
        }
        Commands::Reg {
            file,
            key_path,
            value,
        } => commands::reg::run(&file, &key_path, value.as_deref(), context, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("config error:") {
                EXIT_CONFIG_ERROR
            } else if msg.starts_with("prefix error:") {
                EXIT_PREFIX_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
