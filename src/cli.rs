use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::bridge::Mode;

#[derive(Parser, Debug)]
#[command(name = "fsbridge")]
#[command(version)]
#[command(about = "A synchronous file-system bridge with safe ZIP/GZip extraction", long_about = None)]
#[command(after_help = "Every command prints one JSON result: {\"ok\":bool,\"message\":string}\n\n\
Examples:\n  \
  fsbridge unzip bundle.zip -d out       extract bundle.zip into out/\n  \
  fsbridge -b /srv/app read -m binary logo.png\n  \
  fsbridge serve < requests.jsonl        answer one JSON request per line")]
pub struct Cli {
    /// Directory that relative paths resolve against [default: working directory]
    #[arg(short = 'b', long, global = true, value_name = "DIR")]
    pub base: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a file, creating missing parent directories
    Write {
        path: String,

        /// Content to write (read from stdin when omitted)
        #[arg(short = 'c', long)]
        content: Option<String>,

        #[arg(short = 'm', long, value_enum, default_value_t = Mode::Text)]
        mode: Mode,
    },

    /// Print a file's content as text or base64
    Read {
        path: String,

        #[arg(short = 'm', long, value_enum, default_value_t = Mode::Text)]
        mode: Mode,
    },

    /// Rename a file
    Move { source: String, target: String },

    /// Remove a file or directory tree
    Remove { path: String },

    /// Copy a file's bytes
    Copy { src: String, dst: String },

    /// Create a directory and its parents
    Mkdir { path: String },

    /// List a directory as name,size,isDir records
    Ls { path: String },

    /// Print the resolved absolute path
    Abs { path: String },

    /// Extract a ZIP archive
    Unzip {
        archive: String,

        /// Extract files into exdir
        #[arg(short = 'd', value_name = "DIR", default_value = ".")]
        output: String,
    },

    /// Decompress a single-stream gzip file
    Gunzip { input: String, output: String },

    /// Check whether a path exists
    Exists { path: String },

    /// Answer JSON requests read line by line from stdin
    Serve,
}
