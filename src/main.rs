use std::{process, time::Instant};

use clap::Parser as ClapParser;

use texpr::{
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::{parse_with_options, ParserOptions},
    render_error,
};

/// Parse a TeX math expression and print its expression tree.
#[derive(ClapParser, Debug)]
#[command(name = "texpr", version)]
struct Args {
    /// The expression, e.g. '\frac{1}{2}x^2'
    expression: String,

    /// Deepest nesting accepted before giving up
    #[arg(long, default_value_t = ParserOptions::default().max_depth)]
    max_depth: usize,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Don't print timings
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    let options = ParserOptions {
        max_depth: args.max_depth,
    };

    let start = Instant::now();

    let tokens = match tokenize(&args.expression) {
        Ok(tokens) => tokens,
        Err(error) => fail(Error::from(error), &args.expression),
    };

    if !args.quiet {
        println!("Tokenized in {:?}", start.elapsed());
    }

    if args.tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let ast = match parse_with_options(tokens, &options) {
        Ok(ast) => ast,
        Err(error) => fail(Error::from(error), &args.expression),
    };

    if !args.quiet {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    println!("{}", ast);
    println!("{}", pretty_print(format!("{:?}", ast)));
}

fn fail(error: Error, source: &str) -> ! {
    eprintln!("{}", render_error(&error, source));
    process::exit(1)
}

fn pretty_print(string: String) -> String {
    let mut result = String::new();
    let mut indent: usize = 0;
    let mut ignore_next_space = false;

    for c in string.chars() {
        match c {
            '{' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            '(' | '[' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            '}' | ')' | ']' => {
                indent = indent.saturating_sub(1);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => result.push(c),
        }
    }

    result
}
