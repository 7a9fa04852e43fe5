use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "taxe-vacance")]
#[command(about = "Vérifie si une commune applique la TLV ou la THLV")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List communes whose name matches a query
    Search(SearchArgs),
    /// Show the tax situation of one commune, by INSEE code or exact name
    Show(ShowArgs),
    /// Show the notice for a raw classification value (TLV, THLV, NONE)
    Explain(ExplainArgs),
    /// List every commune in the bundled dataset
    List(ListArgs),
    /// Search and select interactively on stdin
    Interactive,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    pub query: String,

    /// Maximum number of candidates (defaults to search.max_candidates)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print every match in alphabetical order instead of ranked candidates
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    pub commune: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExplainArgs {
    pub tax_type: String,

    /// Commune name used in the message
    #[arg(long, default_value = "votre commune")]
    pub commune: String,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Only list communes with this classification
    #[arg(long)]
    pub tax_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["taxe-vacance", "search", "pari", "--limit", "3", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "pari");
                assert_eq!(args.limit, Some(3));
                assert!(!args.all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
