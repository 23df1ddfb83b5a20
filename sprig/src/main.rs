mod cli;
mod commands;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::Args;
use commands::{exec_command, is_command};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sprig_core::evaluator::Scope;
use sprig_core::parser::parse;
use sprig_core::values::Value;
use yansi::Paint;

fn main() -> Result<()> {
    let args = Args::parse();

    match args.path {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

fn run_file(path: &str) -> Result<()> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let nodes = parse(&content).map_err(|error| anyhow!("[parse error] {}", error))?;

    let mut scope = Scope::new();
    scope.set_source(content.as_str());

    let mut result = Value::Nil;
    for node in &nodes {
        result = scope.eval(node).map_err(|error| anyhow!("{}", error))?;
    }
    println!("{}", result);
    Ok(())
}

fn repl() -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut scope = Scope::new();

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(()),
            Err(error) => return Err(error.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        if is_command(input) {
            exec_command(input);
            continue;
        }

        let nodes = match parse(&line) {
            Ok(nodes) => nodes,
            Err(error) => {
                println!("{} {}", "[parse error]".red(), error);
                continue;
            }
        };

        scope.set_source(line.as_str());
        for node in &nodes {
            match scope.eval(node) {
                Ok(value) => println!("{} {}", "=".dim(), value),
                Err(error) => {
                    println!("{}", error);
                    break;
                }
            }
        }
    }
}
