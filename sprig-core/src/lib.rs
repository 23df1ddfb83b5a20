#[macro_use]
extern crate pest_derive;

pub mod ast;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod forms;
pub mod functions;
pub mod parser;
pub mod values;
