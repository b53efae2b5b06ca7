// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkshelf", author, version, about, long_about = None)]
/// Your personal bookmark list, kept in a hosted backend
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short = 'e', long = "email")]
        email: String,
        /// Prompted for when omitted
        #[arg(short = 'p', long = "password")]
        password: Option<String>,
    },
    /// Sign out and forget the local session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List bookmarks, newest first
    List {
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Add a bookmark
    Add {
        url: String,
    },
    /// Delete a bookmark by id
    Delete {
        id: String,
    },
    /// Open a bookmark in the default browser
    Open {
        id: String,
    },
    /// Interactive bookmark page
    Page,
    /// Generates shell completion scripts
    Completion {
        /// The shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}
