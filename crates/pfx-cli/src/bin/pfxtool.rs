use clap::{Parser, Subcommand};

use pfx_cli::commands::{config_ops, index_ops};
use pfx_cli::trace_init::init_tracing;
use pfx_core::index::BuildStrategy;

#[derive(Parser)]
#[command(name = "pfxtool", about = "Prefix index build and query tool")]
struct Cli {
    /// Custom settings TOML file
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Build strategy override (brute-force, sorted-range)
    #[arg(long, global = true)]
    strategy: Option<BuildStrategy>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build from the built-in sample word list and run example queries
    Demo,
    /// Words starting with a prefix (case-insensitive)
    Search {
        /// Word list file (one word per line)
        words_file: String,
        /// Prefix to search for
        query: String,
        /// Maximum number of results (default: query.default_limit)
        #[arg(short = 'n', long, conflicts_with = "all")]
        limit: Option<usize>,
        /// Return every match
        #[arg(long)]
        all: bool,
        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List every stored prefix
    Prefixes {
        /// Word list file (one word per line)
        words_file: String,
    },
    /// Print every prefix with its matching words
    Dump {
        /// Word list file (one word per line)
        words_file: String,
        /// Print a JSON object
        #[arg(long)]
        json: bool,
    },
    /// Show index size and build time
    Info {
        /// Word list file (one word per line)
        words_file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Some(file) = &cli.settings {
        config_ops::load_custom(file);
    }
    let strategy = cli.strategy;

    match cli.command {
        Command::Demo => index_ops::demo(strategy),
        Command::Search {
            words_file,
            query,
            limit,
            all,
            json,
        } => index_ops::search(&words_file, &query, limit, all, json, strategy),
        Command::Prefixes { words_file } => index_ops::prefixes(&words_file, strategy),
        Command::Dump { words_file, json } => index_ops::dump(&words_file, json, strategy),
        Command::Info { words_file } => index_ops::info(&words_file, strategy),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
