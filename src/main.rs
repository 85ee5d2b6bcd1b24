use clap::{Args, Parser as ClapParser, Subcommand};
use sophia_lang::cli::{self, CliError, RunMode, RunOptions, RunResult};
use sophia_lang::{LogSink, to_json, to_json_pretty};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sophia")]
#[command(about = "Sophia - a small expression language that runs directly or compiles to JavaScript")]
#[command(version)]
struct Cli {
    /// Log debug events (overridden by SOPHIA_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a program and print its value
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Pretty-print the result
        #[arg(short, long)]
        pretty: bool,
    },

    /// Transpile a program to JavaScript
    Compile {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the token stream as JSON
    Lex {
        #[command(flatten)]
        source: SourceArgs,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Start an interactive session
    Repl {
        /// Print generated JavaScript instead of values
        #[arg(long)]
        compile: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Source file (reads from stdin if neither a file nor -e is given)
    file: Option<PathBuf>,

    /// Expression to execute
    #[arg(short, long)]
    execute: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { source, pretty } => run(&source, RunMode::Eval, pretty),
        Commands::Compile { source } => run(&source, RunMode::Compile, false),
        Commands::Lex { source, pretty } => run(&source, RunMode::Tokens, pretty),
        Commands::Repl { compile } => {
            let mode = if compile { RunMode::Compile } else { RunMode::Eval };
            let stdin = io::stdin();
            cli::run_repl(stdin.lock(), &mut io::stdout(), &mut LogSink, mode)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SOPHIA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn read_source(args: &SourceArgs) -> Result<Vec<u8>, CliError> {
    if let Some(expr) = &args.execute {
        return Ok(expr.clone().into_bytes());
    }
    if let Some(path) = &args.file {
        return fs::read(path).map_err(CliError::Io);
    }
    if !atty::is(atty::Stream::Stdin) {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        return Ok(buffer);
    }
    Err(CliError::NoInput)
}

fn run(args: &SourceArgs, mode: RunMode, pretty: bool) -> Result<(), CliError> {
    let options = RunOptions {
        source: read_source(args)?,
        mode,
    };

    match cli::execute_run(&options, &mut LogSink)? {
        RunResult::Value(value) => {
            let out = if pretty {
                to_json_pretty(&value)
            } else {
                to_json(&value)
            };
            println!("{}", out);
        }
        RunResult::JavaScript(js) => println!("{}", js),
        RunResult::Tokens(tokens) => {
            let dump = cli::tokens_to_json(&tokens);
            let json = if pretty {
                serde_json::to_string_pretty(&dump)?
            } else {
                serde_json::to_string(&dump)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
