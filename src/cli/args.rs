//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical names: parse, render, compare and edit escaped, delimited names
#[derive(Parser, Debug)]
#[command(name = "hiername")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Delimiter used to parse names (default: from config, else '.')
    #[arg(short = 'D', long, global = true)]
    pub delimiter: Option<String>,

    /// Store names as component lists instead of one escaped string
    #[arg(long, global = true)]
    pub array: bool,

    /// Additional config file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show components, data string and hash of a name
    Inspect {
        /// Escaped, delimited name
        name: String,
    },

    /// Render a name for display with another delimiter
    Render {
        /// Escaped, delimited name
        name: String,
        /// Rendering delimiter (default: config render_delimiter, else the name's own)
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Compare two names component by component
    Compare {
        /// First name
        a: String,
        /// Second name
        b: String,
        /// Delimiter of the first name (default: global --delimiter)
        #[arg(long)]
        delimiter_a: Option<String>,
        /// Delimiter of the second name (default: global --delimiter)
        #[arg(long)]
        delimiter_b: Option<String>,
    },

    /// Apply a structural operation and print old and new name
    Edit {
        /// Escaped, delimited name
        name: String,
        #[command(subcommand)]
        op: EditOp,
    },

    /// Show the sample file system and search it
    Tree {
        /// Base name to search for
        #[arg(long)]
        find: Option<String>,
        /// Build the sample tree with broken file nodes
        #[arg(long)]
        buggy: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum EditOp {
    /// Replace component at index
    Set { index: usize, component: String },
    /// Insert component before index
    Insert { index: usize, component: String },
    /// Append component
    Append { component: String },
    /// Remove component at index
    Remove { index: usize },
    /// Append all components of another name (same delimiter)
    Concat { other: String },
}
