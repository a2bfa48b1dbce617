//! Command-line arguments

use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docconvert")]
#[command(
    version,
    about = "Convert images and PDFs through a CV-DocConvert server"
)]
pub struct Cli {
    /// Server origin, e.g. https://cv.example.com
    #[arg(long, global = true, env = "DOCCONVERT_BASE_URL")]
    pub base_url: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH", env = "DOCCONVERT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Combine PNG/JPEG images into one PDF
    Images {
        #[arg(required = true, value_name = "IMAGE")]
        files: Vec<PathBuf>,
    },

    /// Merge two or more PDFs, in the order given
    Merge {
        #[arg(required = true, value_name = "PDF")]
        files: Vec<PathBuf>,
    },

    /// Extract a page range from a PDF
    Split {
        #[arg(value_name = "PDF")]
        file: PathBuf,

        /// First page to keep (1-based)
        #[arg(long)]
        start: String,

        /// Last page to keep (inclusive)
        #[arg(long)]
        end: String,
    },

    /// Show page count and size of a PDF
    Info {
        #[arg(value_name = "PDF")]
        file: PathBuf,
    },

    /// Create a donation checkout session and print its URL
    #[command(group(ArgGroup::new("amount_source").required(true).args(["amount_cents", "amount"])))]
    Donate {
        /// Amount in cents
        #[arg(long)]
        amount_cents: Option<u32>,

        /// Amount in dollars, e.g. 12.50
        #[arg(long)]
        amount: Option<String>,
    },

    /// Print the publishable Stripe key
    StripeKey,
}
