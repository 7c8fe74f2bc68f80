// corefront: scanner and parser for the Core teaching language

use std::error::Error;
use std::fs;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use crossterm::style::Stylize;

use corefront::parser::constants::SOURCE_EXTENSION;
use corefront::report::{
    render_lex_error, render_parse_error, DiagnosticStyle, SymbolTable, TreePrinter,
};

const SYMBOL_TABLE_FILE: &str = "symbol_table.txt";
const PARSE_TREE_FILE: &str = "parse_tree.txt";

fn cli() -> Command {
    Command::new("corefront")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scan and parse a Core source file")
        .arg(
            Arg::new("file")
                .help("Path to the .core source file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('o')
                .help("Directory for symbol_table.txt and parse_tree.txt")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("tokens-only")
                .long("tokens-only")
                .help("Stop after writing the symbol table")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let mut command = cli();
    let matches = command.clone().get_matches();

    let input = matches
        .get_one::<PathBuf>("file")
        .ok_or("missing input file")?;
    let out_dir = matches
        .get_one::<PathBuf>("out-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let tokens_only = matches.get_flag("tokens-only");

    if input.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        eprintln!("Input file must have a .{} extension.", SOURCE_EXTENSION);
        eprintln!();
        eprintln!("{}", command.render_usage());
        return Ok(ExitCode::from(2));
    }

    let source = match fs::read_to_string(input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", input.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let style = if io::stderr().is_terminal() {
        DiagnosticStyle::Colored
    } else {
        DiagnosticStyle::Plain
    };

    eprintln!("Scanning {}...", input.display());
    let analysis = corefront::analyze(&source);

    for err in &analysis.lex_errors {
        eprintln!("{}", render_lex_error(err, style));
    }

    fs::create_dir_all(&out_dir)?;
    let table_path = out_dir.join(SYMBOL_TABLE_FILE);
    write_artifact(&table_path, |out| {
        SymbolTable::new(&analysis.tokens).write_to(out)
    })?;
    eprintln!(
        "Symbol table written to {} ({} tokens)",
        table_path.display(),
        analysis.tokens.len()
    );

    if tokens_only {
        return Ok(ExitCode::SUCCESS);
    }

    let syntax = analysis.syntax.into_result();
    match syntax {
        Ok(tree) => {
            let tree_path = out_dir.join(PARSE_TREE_FILE);
            write_artifact(&tree_path, |out| TreePrinter::new(&tree).write_to(out))?;

            let banner = "Parsing successful!";
            match style {
                DiagnosticStyle::Colored => eprintln!("{}", banner.green().bold()),
                DiagnosticStyle::Plain => eprintln!("{}", banner),
            }
            eprintln!("Parse tree written to {}", tree_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            for err in &failure.diagnostics {
                eprintln!("{}", render_parse_error(err, style));
            }

            let banner = "Parsing failed due to errors.";
            match style {
                DiagnosticStyle::Colored => eprintln!("{}", banner.red().bold()),
                DiagnosticStyle::Plain => eprintln!("{}", banner),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Create `path` and fill it through a buffered writer.
fn write_artifact<F>(path: &Path, render: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<fs::File>) -> io::Result<()>,
{
    let mut out = BufWriter::new(fs::File::create(path)?);
    render(&mut out)?;
    out.flush()
}
