//! Interactive Lispy prompt.
//!
//! Usage: `lispy [SCRIPT]`. A script is evaluated before the prompt opens.
//! `LISPY_TRACE=log|record` enables the evaluation trace at startup; with
//! `log`, steps appear when `RUST_LOG=lispy=trace` is set.

use lispy::repl::{self, Command, Outcome, PROMPT};
use lispy::{Config, Interpreter, TraceMode};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn config_from_env() -> Config {
    let trace = match std::env::var("LISPY_TRACE") {
        Ok(value) => TraceMode::from_name(&value).unwrap_or_else(|| {
            eprintln!("ignoring unknown LISPY_TRACE value {value:?}");
            TraceMode::Off
        }),
        Err(_) => TraceMode::Off,
    };
    Config {
        trace,
        ..Config::default()
    }
}

fn print_outcome(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn main() -> ExitCode {
    init_tracing();
    let mut interp = Interpreter::with_config(config_from_env());

    if let Some(path) = std::env::args().nth(1) {
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("cannot read {path}: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = interp.eval_str(&source) {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    }

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("cannot start line editor: {e}");
            return ExitCode::FAILURE;
        }
    };

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let command = Command::parse(&line);
                if command != Command::Empty {
                    let _ = rl.add_history_entry(line.trim());
                }
                match repl::execute(&mut interp, command) {
                    Ok(Outcome::Print(lines)) => print_outcome(&lines),
                    Ok(Outcome::Exit) => break,
                    Err(e) => {
                        print_outcome(&interp.take_trace());
                        eprintln!("error: {e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
