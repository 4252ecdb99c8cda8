//! MicroScript CLI

use std::path::Path;

use msc::usage::{about_text, help_text, usage_text, version_text, Palette};
use msc::{init_tracing, run_file, CliError, RunOptions};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let palette = Palette::for_stdout();

    if args.len() < 2 {
        print!("{}", help_text(palette));
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => run(&args[2..]),
        "help" | "--help" | "-h" => print!("{}", help_text(palette)),
        "version" | "--version" | "-V" => println!("{}", version_text(palette)),
        "about" => println!("{}", about_text(palette)),
        _ => {
            // If it looks like a file path, try to run it; the extension is
            // checked by `run_file`.
            if !command.starts_with('-') && Path::new(command).extension().is_some() {
                run(&args[1..]);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                eprint!("{}", usage_text(Palette::new(false)));
                std::process::exit(1);
            }
        }
    }
}

fn run(args: &[String]) {
    let (options, path) = match RunOptions::from_args(args) {
        Ok((options, Some(path))) => (options, path),
        Ok((_, None)) => {
            eprintln!("error: {}", CliError::MissingPath);
            eprintln!("Usage: msc run <file.mus> [--assign=shadow|enclosing] [--max-depth=N]");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match run_file(&path, &options) {
        Ok(summary) if summary.is_success() => {}
        Ok(summary) => {
            tracing::debug!(errors = summary.errors, "run finished with errors");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
