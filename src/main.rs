use std::{
    collections::BTreeMap,
    error::Error,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use boolexpr::{CachedSymbols, Symbol, SymbolMap, Value, evaluate, list_symbols, parse};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// boolexpr evaluates a boolean filter expression against named values.
///
/// Exits with status 0 when the expression is true, 1 when it is false and 2
/// on any error.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Defines a symbol. The value is read as JSON when it is a JSON scalar
    /// (`42`, `1.5`, `true`, `"text"`) and as a plain string otherwise.
    #[arg(short, long = "symbol", value_name = "NAME=VALUE", value_parser = parse_symbol)]
    symbols: Vec<(String, Value)>,

    /// Reads symbols from a file holding a JSON object. Symbols given with
    /// `--symbol` take precedence.
    #[arg(short = 'f', long, value_name = "PATH")]
    symbols_file: Option<PathBuf>,

    /// Prints the symbols the expression references, one per line, instead
    /// of evaluating it.
    #[arg(long)]
    list: bool,

    /// Resolves symbols through a memoizing source and prints every symbol
    /// that was consulted after the result.
    #[arg(long)]
    cached: bool,

    expression: String,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        },
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn Error>> {
    let tree = parse(&args.expression)?;
    debug!(expression = %tree, "parsed expression");

    if args.list {
        for name in list_symbols(&tree) {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut symbols = match &args.symbols_file {
        Some(path) => load_symbols(path)?,
        None => SymbolMap::new(),
    };
    symbols.extend(args.symbols.into_iter().map(|(name, value)| (name, Symbol::Value(value))));

    let result = if args.cached {
        let cached = CachedSymbols::new(symbols);
        let result = evaluate(&tree, &cached)?;
        println!("{result}");
        for (name, value) in cached.used().into_iter().collect::<BTreeMap<_, _>>() {
            println!("{name} = {value}");
        }
        result
    } else {
        let result = evaluate(&tree, &symbols)?;
        println!("{result}");
        result
    };

    Ok(if result { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

/// Reads a JSON object of symbols from `path`.
fn load_symbols(path: &Path) -> Result<SymbolMap, Box<dyn Error>> {
    let contents = fs::read_to_string(path).map_err(|e| {
                                               format!("Failed to read the symbols file '{}': {e}",
                                                       path.display())
                                           })?;
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&contents).map_err(|e| {
                                           format!("The symbols file '{}' is not a JSON object: {e}",
                                                   path.display())
                                       })?;

    Ok(SymbolMap::from_json(object))
}

/// Splits a `NAME=VALUE` argument.
fn parse_symbol(arg: &str) -> Result<(String, Value), String> {
    let (name, raw) = arg.split_once('=')
                         .ok_or_else(|| format!("expected NAME=VALUE, found '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing symbol name in '{arg}'"));
    }

    let value = serde_json::from_str::<serde_json::Value>(raw).ok()
                                                              .as_ref()
                                                              .and_then(Value::from_json)
                                                              .unwrap_or_else(|| Value::Str(raw.to_string()));

    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("x=1", "x", Value::Integer(1))]
    #[case("ratio=0.25", "ratio", Value::Real(0.25))]
    #[case("on=true", "on", Value::Bool(true))]
    #[case("name=\"ann\"", "name", Value::Str("ann".to_string()))]
    #[case("name=ann", "name", Value::Str("ann".to_string()))]
    #[case("tags=[1]", "tags", Value::Str("[1]".to_string()))]
    #[case("empty=", "empty", Value::Str(String::new()))]
    #[case("eq=a=b", "eq", Value::Str("a=b".to_string()))]
    fn symbol_arguments(#[case] arg: &str, #[case] name: &str, #[case] value: Value) {
        assert_eq!(parse_symbol(arg).unwrap(), (name.to_string(), value));
    }

    #[rstest]
    #[case("novalue")]
    #[case("=1")]
    fn malformed_symbol_arguments(#[case] arg: &str) {
        assert!(parse_symbol(arg).is_err());
    }

    #[test]
    fn arguments_parse() {
        let args = Args::try_parse_from(["boolexpr",
                                         "-s",
                                         "x=1",
                                         "--symbol",
                                         "y=two",
                                         "--cached",
                                         "x = 1"]).unwrap();

        assert_eq!(args.symbols.len(), 2);
        assert!(args.cached);
        assert!(!args.list);
        assert_eq!(args.expression, "x = 1");
    }
}
