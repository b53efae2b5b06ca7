// linkshelf/src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use termcolor::{StandardStream, WriteColor};

pub mod args;
pub mod bookmark_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod page;
pub mod session_commands;

pub fn execute_command(mut stderr: StandardStream, cli: Cli, settings: &Settings) -> CliResult<()> {
    match cli.command {
        Some(Commands::Completion { shell }) => handle_completion(shell),
        Some(command) => {
            let services = ServiceContainer::new(settings)?;
            execute_command_with_services(&mut stderr, command, &services)
        }
        None => Ok(()),
    }
}

pub fn execute_command_with_services<W: WriteColor>(
    out: &mut W,
    command: Commands,
    services: &ServiceContainer,
) -> CliResult<()> {
    match command {
        Commands::Login { email, password } => {
            session_commands::login(out, services, &email, password)
        }
        Commands::Logout => session_commands::logout(out, services),
        Commands::Whoami => session_commands::whoami(services),
        Commands::List { is_json } => bookmark_commands::list(out, services, is_json),
        Commands::Add { url } => bookmark_commands::add(out, services, &url),
        Commands::Delete { id } => bookmark_commands::delete(out, services, &id),
        Commands::Open { id } => bookmark_commands::open(services, &id),
        Commands::Page => page::run(out, services),
        Commands::Completion { shell } => handle_completion(shell),
    }
}

fn handle_completion(shell: String) -> CliResult<()> {
    // Write a brief comment to stderr about what's being output
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for linkshelf");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(linkshelf completion bash)\"          # one-time use");
            eprintln!("# - linkshelf completion bash >> ~/.bashrc         # add to bashrc");
            eprintln!("#");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for linkshelf");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(linkshelf completion zsh)\"           # one-time use");
            eprintln!("# - linkshelf completion zsh > ~/.zfunc/_linkshelf # save to fpath directory");
            eprintln!("#");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for linkshelf");
            eprintln!("# To use, run one of:");
            eprintln!("# - linkshelf completion fish | source             # one-time use");
            eprintln!("# - linkshelf completion fish > ~/.config/fish/completions/linkshelf.fish");
            eprintln!("#");
        }
        _ => {}
    }

    completion::generate_completion(&shell).map_err(|e| {
        error::CliError::CommandFailed(format!("Failed to generate completion script: {}", e))
    })
}
