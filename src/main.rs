use std::{
    env,
    fs::read_to_string,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use log::{error, info};
use monkey::{
    ast::ast::Program,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
};

const PROMPT: &str = ">> ";
const EXIT: &str = "exit";
const TOKENS: &str = ":tokens ";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => {
            repl();
            ExitCode::SUCCESS
        }
        2 => parse_file(&args[1]),
        _ => {
            eprintln!("Usage: {} [FILE]", args[0]);
            ExitCode::FAILURE
        }
    }
}

fn parse_file(file_path: &str) -> ExitCode {
    let file_name = file_path.rsplit('/').next().unwrap_or(file_path);

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", file_path, err);
            eprintln!("Failed to read {}: {}", file_path, err);
            return ExitCode::FAILURE;
        }
    };

    info!("parsing {} ({} bytes)", file_path, source.len());
    let (program, errors) = parse(source.clone(), Some(String::from(file_name)));

    if report(&program, &errors, &source) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prints the diagnostics if there are any, otherwise the rendered program.
fn report(program: &Program, errors: &[Error], source: &str) -> bool {
    if errors.is_empty() {
        println!("{}", program);
        return true;
    }

    println!("parser errors:");
    for error in errors {
        print!("{}", render_error(error, source));
    }
    false
}

fn repl() {
    let user = env::var("USER").unwrap_or_else(|_| String::from("there"));
    println!("Hello {}, this is the Monkey programming language!", user);
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        if io::stdout().flush().is_err() {
            return;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                error!("failed to read input: {}", err);
                return;
            }
            None => return,
        };

        if line.trim() == EXIT {
            println!("Bye!");
            return;
        }

        if let Some(source) = line.strip_prefix(TOKENS) {
            for token in tokenize(source.to_string(), None) {
                token.debug();
            }
            continue;
        }

        let (program, errors) = parse(line.clone(), None);
        report(&program, &errors, &line);
    }
}
