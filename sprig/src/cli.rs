use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Sprig - a small embeddable Lisp", long_about = None)]
pub struct Args {
    /// Path to a source file to run.
    pub path: Option<String>,
}
