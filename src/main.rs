#[macro_use]
extern crate lazy_static;
extern crate unicode_segmentation;

mod ast;
mod error;
mod interpreter;
mod parser;
mod scanner;
mod source_loc;
mod token;
mod util;
mod value;

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::io::prelude::*;
use std::process;

use argparse::{ArgumentParser, List, Print};

use crate::error::*;
use crate::interpreter::*;
use crate::value::*;

// Exit codes from sysexits.h.
const EX_USAGE: i32 = 64;
const EX_NOINPUT: i32 = 66;
const EX_SOFTWARE: i32 = 70;

enum RunError {
    RunParseError(ParseError),
    RunRuntimeError(RuntimeError),
}

fn main() {
    let mut script_filenames: Vec<String> = Vec::new();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Lox language interpreter");
        ap.add_option(
            &["--version"],
            Print(env!("CARGO_PKG_VERSION").to_string()),
            "Show version",
        );
        ap.refer(&mut script_filenames)
            .add_argument("script", List,
                          "Lox file to execute.  Omit to run an interactive REPL.");
        ap.parse_args_or_exit();
    }

    match script_filenames.as_slice() {
        [] => run_repl(),
        [script_filename] => process::exit(run_file(script_filename)),
        _ => {
            println!("Usage: treelox [script]");
            process::exit(EX_USAGE);
        }
    }
}

fn run_repl() {
    let stdin = io::stdin();
    let mut interpreter = Interpreter::new();
    loop {
        print!("> ");
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing stdout: {}", error);
            break;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            // End of input.
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                // Errors on one line don't carry over to the next.
                let result = run(&mut interpreter, &input);
                print_result(&result);
            }
            Err(error) => {
                eprintln!("Error reading stdin: {}", error);
                break;
            }
        }
    }
}

// Returns the process exit code.
fn run_file(file_path: &str) -> i32 {
    let contents = match fs::read_to_string(file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Unable to read file {}: {}", file_path, error);
            return EX_NOINPUT;
        }
    };

    let mut interpreter = Interpreter::new();
    let result = run(&mut interpreter, &contents);
    print_result(&result);

    match result {
        Ok(_) => 0,
        // Lexical and syntax errors share the usage exit code.
        Err(RunError::RunParseError(_)) => EX_USAGE,
        Err(RunError::RunRuntimeError(_)) => EX_SOFTWARE,
    }
}

fn run<W: Write>(interpreter: &mut Interpreter<W>, source: &str) -> Result<(), RunError> {
    // If there's a parse error, it's converted to a run error here and
    // nothing is executed.
    let statements = parser::parse(source)?;
    interpreter.interpret(&statements)?;

    Ok(())
}

fn print_result(result: &Result<(), RunError>) {
    match result {
        Ok(_) => (),
        Err(RunError::RunParseError(err)) => util::report_parse_error(err),
        Err(RunError::RunRuntimeError(err)) => util::report_runtime_error(err),
    }
}

impl From<ParseError> for RunError {
    fn from(err: ParseError) -> RunError {
        RunError::RunParseError(err)
    }
}

impl From<RuntimeError> for RunError {
    fn from(err: RuntimeError) -> RunError {
        RunError::RunRuntimeError(err)
    }
}
