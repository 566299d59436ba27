use botgen::prelude::*;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::time::Instant;

/// Compiles a chatbot block graph into a runnable LINE webhook program
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the blocks JSON file. Reads stdin when omitted or "-"
    input: Option<String>,

    /// Write the generated program here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Path to a compiler options JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Spaces per indentation level (overrides the options file)
    #[arg(long)]
    indent: Option<usize>,

    /// Default server port of the generated program (overrides the options file)
    #[arg(long)]
    port: Option<u16>,

    /// Map a custom event name onto a known one, e.g. --alias text=message.text
    #[arg(long = "alias", value_name = "NAME=EVENT")]
    aliases: Vec<String>,

    /// Log compiler progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let total_start = Instant::now();

    // --- 1. Input Loading ---
    let blocks_json = match cli.input.as_deref() {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to read stdin: {}", e)));
            buffer
        }
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read blocks file '{}': {}", path, e))
        }),
    };

    // --- 2. Configuration ---
    let options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read options file '{}': {}", path, e))
            });
            CompilerOptions::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid options file: {}", e)))
        }
        None => CompilerOptions::default(),
    };

    let mut builder = Compiler::builder().with_options(options);
    if let Some(width) = cli.indent {
        builder = builder.with_indent_width(width);
    }
    if let Some(port) = cli.port {
        builder = builder.with_port(port);
    }
    for alias in &cli.aliases {
        let (name, event) = alias.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!("Alias '{}' must look like NAME=EVENT", alias))
        });
        if EventType::from_tag(event).is_none() {
            exit_with_error(&format!("Alias '{}' targets unknown event '{}'", alias, event));
        }
        builder = builder.with_event_alias(name, event);
    }
    let compiler = builder.build();

    // --- 3. Compilation ---
    let compile_start = Instant::now();
    let program = compiler
        .compile_json(&blocks_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    // --- 4. Output ---
    match &cli.output {
        Some(path) => {
            fs::write(path, &program).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write program to '{}': {}", path, e))
            });
            eprintln!("Wrote generated program to '{}'", path);
        }
        None => print!("{}", program),
    }

    log::info!("Compilation:     {:?}", compile_duration);
    log::info!("Total Execution: {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
