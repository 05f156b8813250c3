use clap::Parser as ClapParser;
use serde_json::json;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "pql")]
#[command(about = "pql - parse pipeline queries and print their AST as JSON")]
#[command(version)]
struct Cli {
    /// The query to parse (reads from stdin if not provided)
    query: Option<String>,

    /// Read the query from a file instead
    #[arg(short, long, conflicts_with = "query")]
    file: Option<String>,

    /// Parse a bare expression instead of a full program
    #[arg(long)]
    expr: bool,

    /// Minified output instead of pretty-printed
    #[arg(short, long)]
    compact: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match read_source(&cli) {
        Ok(source) => source,
        Err(e) => {
            // Same envelope as a parse error, but the exit code signals that
            // the query never reached the parser.
            let envelope = json!({"op": "Error", "error": {"message": e.to_string()}});
            print_json(&envelope, cli.compact);
            std::process::exit(1);
        }
    };

    let result = if cli.expr {
        pql::parse_expr(&source).map(|ast| json!(ast))
    } else {
        pql::parse(&source).map(|ast| json!(ast))
    };

    match result {
        Ok(value) => print_json(&value, cli.compact),
        Err(parse_error) => {
            let envelope = json!({"op": "Error", "error": parse_error});
            print_json(&envelope, cli.compact);
        }
    }
}

fn read_source(cli: &Cli) -> io::Result<String> {
    if let Some(query) = &cli.query {
        return Ok(query.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path);
    }
    if atty::is(atty::Stream::Stdin) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no query given: pass it as an argument, via --file, or on stdin",
        ));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_json(value: &serde_json::Value, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
