use std::process;

use clap::Parser;
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use sexpcalc::{
    Error, MAX_PARSE_DEPTH, ParseConfig, evaluate_with_config, parse_expression_with_config,
    read_expression_with_config,
};

/// Interactive calculator for prefix arithmetic written as S-expressions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Skip the banner printed on startup.
    #[arg(short, long)]
    quiet: bool,

    /// Report syntax errors as they are instead of as `unknown operator ERROR`.
    #[arg(short, long)]
    strict: bool,

    /// Maximum number of nested forms the reader accepts.
    #[arg(long, default_value_t = MAX_PARSE_DEPTH)]
    max_depth: usize,
}

/// What the REPL should do after a line of input
#[derive(Debug, PartialEq)]
enum LineOutcome {
    Exit,
    Blank,
    Print(String),
}

/// Per-process REPL settings. Lines are handled independently of each other.
struct Session {
    config: ParseConfig,
    strict: bool,
}

impl Session {
    fn new(args: &Args) -> Self {
        Session {
            config: ParseConfig {
                max_depth: args.max_depth,
            },
            strict: args.strict,
        }
    }

    fn calculate(&self, line: &str) -> Result<f32, Error> {
        let tree = if self.strict {
            read_expression_with_config(line, &self.config)?
        } else {
            parse_expression_with_config(line, &self.config)
        };
        debug!("evaluating {tree}");
        evaluate_with_config(&tree, &self.config)
    }

    fn handle_line(&self, line: &str) -> LineOutcome {
        match line.trim() {
            "" => LineOutcome::Blank,
            "exit" | "quit" => LineOutcome::Exit,
            expression => match self.calculate(expression) {
                Ok(value) => LineOutcome::Print(format_result(value)),
                Err(err) => {
                    debug!("{err}");
                    LineOutcome::Print(format_error(&err))
                }
            },
        }
    }
}

/// One line: the error kind and its message. Context is only logged.
fn format_error(err: &Error) -> String {
    match err {
        Error::SyntaxError(_) => format!("SyntaxError: {}", err.message()),
        Error::EvalError(_) => format!("EvaluationError: {}", err.message()),
    }
}

/// `Debug` keeps the fractional part of integral values: `Result: 30.0`
fn format_result(value: f32) -> String {
    format!("Result: {value:?}")
}

fn print_banner() {
    println!("Expression parser, exit with: exit || quit");
    println!("Valid expression examples:");
    println!("\t (+ 10 10 10)");
    println!("\t (+ 10 (* 5 2) (- 8 3) (/ 20 4))");
}

fn run_repl(args: &Args) -> Result<(), ReadlineError> {
    if !args.quiet {
        print_banner();
    }

    let session = Session::new(args);
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("> ") {
            Ok(line) => match session.handle_line(&line) {
                LineOutcome::Exit => break,
                LineOutcome::Blank => continue,
                LineOutcome::Print(output) => {
                    let _ = rl.add_history_entry(line.trim());
                    println!("{output}");
                }
            },
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run_repl(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
