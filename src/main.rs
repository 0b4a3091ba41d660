//! braq front end: interactive REPL and script runner
//!
//! With no arguments, reads forms from stdin one line at a time, printing
//! each top-level result (or `Error: <message>`) and continuing. Each file
//! argument is loaded the way the `load` builtin loads it. Neither mode
//! halts on a language-level error.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use braq::{eval, Function, Interpreter, NativeOp, Parser, Scanner, Value, EXIT_SENTINEL};

fn main() -> Result<()> {
    let mut interp = Interpreter::new();
    if let Err(e) = interp.load_prelude() {
        println!("Error: {}", e);
    }

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        repl(&mut interp)
    } else {
        for path in &files {
            if let Err(e) = interp.load_file(path) {
                println!("Error: {}", e);
            }
        }
        Ok(())
    }
}

fn repl(interp: &mut Interpreter) -> Result<()> {
    println!("braq {}", braq::VERSION);
    println!("Press Ctrl+c to exit\n");

    let stdin = io::stdin();
    loop {
        print!("braq> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if eval_line(interp, line) {
            break;
        }
    }

    Ok(())
}

/// Evaluates every form on the line, printing each result. Returns true
/// when the exit sentinel reached the top level.
fn eval_line(interp: &mut Interpreter, line: &str) -> bool {
    let mut scanner = Scanner::new(line);
    let program = match scanner
        .scan_tokens()
        .and_then(|tokens| Parser::new(tokens).parse())
    {
        Ok(program) => program,
        Err(e) => {
            println!("Error: {}", e);
            return false;
        }
    };

    for form in program.forms {
        match eval(interp.env(), Value::from(form)) {
            Ok(value) => {
                println!("{}", value);
                if is_exit(&value) {
                    return true;
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    false
}

fn is_exit(value: &Value) -> bool {
    match value {
        Value::Sym(s) => s == EXIT_SENTINEL,
        Value::Fun(Function::Native(NativeOp::Exit)) => true,
        _ => false,
    }
}
