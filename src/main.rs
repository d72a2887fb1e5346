use clap::{Parser as ClapParser, Subcommand};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;
use xqmql::cli::{self, CliError, Emit, RunOptions, RunResult};

#[derive(ClapParser)]
#[command(name = "xqmql")]
#[command(about = "xqmql - Translate XQuery expressions into document-store find/aggregate commands")]
#[command(version)]
struct Cli {
    /// Log translation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a query into command text
    Translate {
        /// The query to translate (reads --file or stdin if not provided)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit an aggregate pipeline instead of find
        #[arg(long)]
        aggregate: bool,

        /// Compact literals instead of indented ones
        #[arg(long)]
        compact: bool,

        /// What to print
        #[arg(long, value_enum, default_value_t = Emit::Command)]
        emit: Emit,

        /// Only check that the query translates
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the detected expression shape
    Classify {
        /// The query to classify
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Translate {
            query,
            file,
            output,
            aggregate,
            compact,
            emit,
            syntax_only,
        } => read_query(query, file).and_then(|query| {
            let options = RunOptions {
                query,
                aggregate,
                compact,
                emit,
                syntax_only,
            };
            run_translate(&options, output)
        }),
        Commands::Classify { query } => xqmql::classify(query.trim())
            .map(|shape| println!("{:?}", shape))
            .map_err(CliError::from),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xqmql={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_query(query: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    match (query, file) {
        (Some(q), _) => Ok(q),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        (None, None) => Err(CliError::NoInput),
    }
}

fn run_translate(options: &RunOptions, output: Option<PathBuf>) -> Result<(), CliError> {
    match cli::execute(options)? {
        RunResult::SyntaxValid => println!("Syntax is valid"),
        RunResult::Output(text) => match output {
            Some(path) => fs::write(path, format!("{}\n", text))?,
            None => println!("{}", text),
        },
    }
    Ok(())
}
