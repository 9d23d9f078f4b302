use std::{
    io::{self, BufReader},
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::Parser;
use kaleidoscope::{
    ast::ast::AstNode,
    diagnostics::{collector::collect_errors, report::Renderer},
    errors::errors::{Error, ErrorImpl},
    framer::framer::{validate_terminator, CancelToken, DEFAULT_TERMINATOR},
    repl::repl::Repl,
    session::{
        options::{LanguageLevel, SessionOptions},
        session::{Session, DEFAULT_SOURCE_NAME},
    },
    Position,
};

/// Kaleidoscope front end: parses statements into an AST and prints it.
#[derive(Parser)]
#[command(name = "kls", version)]
struct Cli {
    /// Source file to parse as a whole; reads statements from stdin when omitted
    file: Option<PathBuf>,

    /// Language features to enable
    #[arg(short, long, value_enum, default_value_t = LanguageLevel::MutableVariables)]
    level: LanguageLevel,

    /// Character that ends a statement in interactive mode
    #[arg(short, long, default_value_t = DEFAULT_TERMINATOR, value_parser = parse_terminator)]
    terminator: char,

    /// Do not print `Ready>` prompts
    #[arg(long)]
    no_prompt: bool,

    /// Report an error when a function is defined twice
    #[arg(long)]
    strict_redefinition: bool,

    /// Disable coloured diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = SessionOptions {
        function_redefinition_is_error: cli.strict_redefinition,
        ..SessionOptions::with_level(cli.level)
    };
    let renderer = if cli.no_color {
        Renderer::without_colors()
    } else {
        Renderer::new()
    };

    let result = match &cli.file {
        Some(path) => parse_file(path, Session::new(options), &renderer),
        None => run_repl(&cli, Session::new(options), renderer.clone()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            let source_name = match &cli.file {
                Some(_) => error.get_position().1.to_string(),
                None => DEFAULT_SOURCE_NAME.to_string(),
            };
            eprint!("{}", renderer.render_error(&source_name, "", &error));
            ExitCode::FAILURE
        }
    }
}

fn parse_terminator(value: &str) -> Result<char, String> {
    let terminator = value.parse::<char>().map_err(|error| error.to_string())?;
    validate_terminator(terminator).map_err(|error| error.to_string())
}

/// Parses a whole file, printing every unit. Returns whether it was error free.
fn parse_file(path: &Path, mut session: Session, renderer: &Renderer) -> Result<bool, Error> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    session.set_source_name(file_name.clone());

    let source = std::fs::read_to_string(path).map_err(|error| io_error(error, &file_name))?;

    let start = Instant::now();
    let ast = session.parse_source(&source);
    println!("Parsed in {:?}", start.elapsed());

    let errors = collect_errors(&ast);
    if let AstNode::Root(root) = &ast {
        for unit in root.units.iter().filter(|unit| !unit.is_error()) {
            println!("PARSED: {}", unit);
        }
    }
    for error in &errors {
        print!("{}", renderer.render(&file_name, &source, error));
    }

    println!("Total time: {:?}", start.elapsed());
    Ok(errors.is_empty())
}

fn run_repl(cli: &Cli, session: Session, renderer: Renderer) -> Result<bool, Error> {
    let mut repl = Repl::new(session, io::stdout())
        .with_prompt(!cli.no_prompt)
        .with_renderer(renderer)
        .with_terminator(cli.terminator)?;

    let summary = repl.run(BufReader::new(io::stdin()), CancelToken::new())?;
    Ok(summary.failed == 0)
}

fn io_error(error: io::Error, file_name: &str) -> Error {
    Error::new(
        ErrorImpl::Io {
            message: error.to_string(),
        },
        Position(0, Rc::new(file_name.to_string())),
    )
}
