//! Main entry point for the fsbridge CLI application.
//!
//! Each subcommand runs one bridge call and prints its JSON result;
//! `serve` keeps answering requests from stdin.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;

use fsbridge::cli::Command;
use fsbridge::{Bridge, Cli, IOOptions, PathResolver, Request, serve};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let resolver = match cli.base {
        Some(base) => PathResolver::new(base),
        None => PathResolver::from_current_dir().context("cannot determine working directory")?,
    };
    let bridge = Bridge::new(resolver);

    let Some(request) = to_request(cli.command)? else {
        let stdin = io::stdin();
        serve(&bridge, stdin.lock(), io::stdout().lock())?;
        return Ok(());
    };

    let result = bridge.dispatch(&request);
    println!("{}", serde_json::to_string(&result)?);

    if !result.ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Map a one-shot subcommand onto its bridge request; `None` means serve mode.
fn to_request(command: Command) -> Result<Option<Request>> {
    let request = match command {
        Command::Write {
            path,
            content,
            mode,
        } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("read content from stdin")?;
                    buf
                }
            };
            Request::WriteFile {
                path,
                content,
                options: IOOptions { mode },
            }
        }
        Command::Read { path, mode } => Request::ReadFile {
            path,
            options: IOOptions { mode },
        },
        Command::Move { source, target } => Request::MoveFile { source, target },
        Command::Remove { path } => Request::RemoveFile { path },
        Command::Copy { src, dst } => Request::CopyFile { src, dst },
        Command::Mkdir { path } => Request::MakeDir { path },
        Command::Ls { path } => Request::ReadDir { path },
        Command::Abs { path } => Request::AbsolutePath { path },
        Command::Unzip { archive, output } => Request::UnzipZip {
            path: archive,
            output,
        },
        Command::Gunzip { input, output } => Request::UnzipGz {
            path: input,
            output,
        },
        Command::Exists { path } => Request::FileExists { path },
        Command::Serve => return Ok(None),
    };
    Ok(Some(request))
}
