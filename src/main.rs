use std::{fs, process};

use arcanesigil::{
    Context, Event, compile,
    interpreter::{lexer::tokenize, parser::core::parse},
};
use clap::Parser;
use tracing::Level;

/// arcanesigil runs sigil scripts: a small Lox-style language with closures,
/// math builtins and runes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells arcanesigil to read the script from a file instead of the
    /// argument itself.
    #[arg(short, long)]
    file: bool,

    /// Prints the token sequence instead of running the script.
    #[arg(long)]
    tokens: bool,

    /// Prints the syntax tree instead of running the script.
    #[arg(long)]
    ast: bool,

    /// Maximum depth of nested function calls.
    #[arg(long, default_value_t = arcanesigil::interpreter::evaluator::core::MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Increases log verbosity; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level)
                             .with_writer(std::io::stderr)
                             .init();
}

fn print_event(event: Event) {
    match event {
        Event::Output(line) => println!("{line}"),
        Event::Rune(rune) => println!("rune {} at ({}, {})", rune.glyph, rune.x, rune.y),
    }
}

fn run(args: &Args, script: &str) -> Result<(), arcanesigil::Error> {
    if args.tokens {
        for token in tokenize(script)? {
            println!("{:>4}:{:<4} {:?} {:?}", token.line, token.column, token.kind, token.lexeme);
        }
        return Ok(());
    }

    if args.ast {
        let output = parse(&tokenize(script)?);
        for error in &output.errors {
            eprintln!("{error}");
        }
        println!("{:#?}", output.program);
        return Ok(());
    }

    let program = compile(script)?;
    Context::new(print_event).with_max_call_depth(args.max_call_depth)
                             .run(&program)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if let Err(e) = run(&args, &script) {
        eprintln!("{e}");
        process::exit(1);
    }
}
