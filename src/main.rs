#![allow(non_snake_case)]
use RustedQuad::Examples::quadrature_examples::{NUMBER_OF_EXAMPLES, quadrature_examples};
use RustedQuad::numerical::quadrature::quadrature_task::{IntegrationTask, TaskError};
use std::env;
use std::process;

fn run(args: &[String]) -> Result<(), TaskError> {
    match args.get(1) {
        // RustedQuad <task-file>
        Some(path) => {
            let report = IntegrationTask::from_file(path)?.solve()?;
            println!("{}", report);
        }
        None => {
            for example in 0..NUMBER_OF_EXAMPLES {
                let report = quadrature_examples(example)?;
                println!("example {}: {}\n", example, report);
            }
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
