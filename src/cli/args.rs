//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Single-variable formula compiler: check, evaluate and sample y = f(x)
#[derive(Parser, Debug)]
#[command(name = "rsgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Local config file, overrides the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate formulas
    Check {
        /// Formulas in x, e.g. "2x^2 - 3(x+1)"
        #[arg(required = true, allow_hyphen_values = true)]
        formulas: Vec<String>,
    },

    /// Evaluate a formula at the given inputs
    Eval {
        /// Formula in x
        #[arg(allow_hyphen_values = true)]
        formula: String,
        /// Input values for x
        #[arg(required = true, allow_negative_numbers = true)]
        inputs: Vec<f64>,
    },

    /// Print a table of sampled values
    Table {
        /// Formula in x
        #[arg(allow_hyphen_values = true)]
        formula: String,
        /// First input (default from config)
        #[arg(long, allow_negative_numbers = true)]
        start: Option<f64>,
        /// Upper bound, excluded (default from config)
        #[arg(long, allow_negative_numbers = true)]
        end: Option<f64>,
        /// Distance between inputs (default from config)
        #[arg(long)]
        step: Option<f64>,
        /// Print (f(y), y) instead of (x, f(x))
        #[arg(short, long)]
        inverse: bool,
    },

    /// Sample several formulas across a viewport
    Render {
        /// Formulas in x, one line each
        #[arg(required = true, allow_hyphen_values = true)]
        formulas: Vec<String>,
        /// Left edge of the viewport (default from config)
        #[arg(long, allow_negative_numbers = true)]
        min_x: Option<f64>,
        /// Right edge of the viewport (default from config)
        #[arg(long, allow_negative_numbers = true)]
        max_x: Option<f64>,
        /// Pixels per unit (default from config)
        #[arg(long)]
        scale: Option<f64>,
        /// Plot every formula as x = f(y)
        #[arg(short, long)]
        inverse: bool,
    },

    /// Show the parse tree of a formula
    Tree {
        /// Formula in x
        #[arg(allow_hyphen_values = true)]
        formula: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
