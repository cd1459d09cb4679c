mod clipboard;
mod config;
mod error;

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use json::JsonValue;
use log::{error, info, warn};

use crate::clipboard::copy_to_clipboard;
use crate::config::{get_config, get_config_file, resolve_options, write_config_to};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(version, about = "Generate a password from the system's secure random source")]
struct Args {
    /// Total password length, at most 4096
    #[arg(short, long, value_name = "count")]
    length: Option<usize>,

    /// How many special characters (!@#$%^&*()) to include
    #[arg(short, long, value_name = "count")]
    special: Option<usize>,

    /// Copy the password to the clipboard. On Linux the command keeps
    /// running until another program takes over the clipboard
    #[arg(short, long, default_value_t = false)]
    copy: bool,

    /// Clear the clipboard after this many seconds, requires --copy
    #[arg(long, value_name = "seconds", requires = "copy")]
    clear_after: Option<u64>,

    /// Store the length and special count as the new defaults
    #[arg(long, default_value_t = false)]
    save_defaults: bool,
}

fn run<W: Write>(
    args: &Args,
    config: &JsonValue,
    config_file: Option<&Path>,
    out: &mut W,
) -> Result<(), CliError> {
    let options = resolve_options(config, args.length, args.special);

    let password = options.generate()?;
    writeln!(out, "{}", password.as_str()).map_err(|error| CliError::Output(error.to_string()))?;

    if args.save_defaults {
        let file = match config_file {
            Some(file) => file,
            None => return Err(CliError::Config(String::from("no config location"))),
        };

        write_config_to(file, &options)?;
        info!(
            "saved defaults length {} special {}",
            options.length, options.special_count
        );
    }

    if args.copy {
        let clear_after = args.clear_after.map(Duration::from_secs);
        let copied = || eprintln!("Password copied to clipboard!");
        if let Err(error) = copy_to_clipboard(password.as_str(), clear_after, copied) {
            error!("{}", error);
            eprintln!("Failed to copy password.");
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let config_file = match get_config_file() {
        Ok(file) => Some(file),
        Err(error) => {
            warn!("failed to get config: {}", error);
            None
        }
    };
    let config = get_config(config_file.as_deref());

    let mut stdout = std::io::stdout();
    if let Err(error) = run(&args, &config, config_file.as_deref(), &mut stdout) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
