use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use solparse::error::DiagnosticError;
use solparse::lexer::{format_tokens, tokenize};
use solparse::ParseOutput;

#[derive(Parser)]
#[command(name = "solparse")]
#[command(author, version, about = "Solidity 0.4-0.7 syntax parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Typed AST as JSON (default)
    #[value(name = "json")]
    Json,
    /// Generic syntax tree as an S-expression
    #[value(name = "tree")]
    Tree,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Solidity source file and print its syntax tree
    Parse {
        /// The source file to parse
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Dump tokens to stdout
        #[arg(long)]
        dump_tokens: bool,
    },

    /// Check a Solidity source file for syntax errors
    Check {
        /// The source file to check
        input: PathBuf,
    },
}

/// Stack for the parser thread; deep nesting up to the parser's recursion limit fits in it
const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still applies; --verbose raises the default level to debug
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command {
        Commands::Parse {
            input,
            format,
            dump_tokens,
        } => parse(input, format, dump_tokens),
        Commands::Check { input } => check(input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Source file loaded for diagnostics
struct SourceState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl SourceState {
    fn new(source_file: PathBuf) -> Result<Self> {
        let bytes = fs::read(&source_file)
            .with_context(|| format!("Failed to read source file: {:?}", source_file))?;
        let source = String::from_utf8(bytes)
            .with_context(|| format!("Source file is not valid UTF-8: {:?}", source_file))?;

        let mut files = SimpleFiles::new();
        let file_id = files.add(source_file.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn report_error(&self, diagnostic: &Diagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }

    fn report_all(&self, output: &ParseOutput) -> Result<()> {
        for error in &output.errors {
            let diagnostic = DiagnosticError::new(error.clone(), self.file_id).to_diagnostic();
            self.report_error(&diagnostic)?;
        }
        Ok(())
    }
}

fn parse_on_large_stack(source: &str) -> Result<ParseOutput> {
    std::thread::scope(|scope| {
        let handle = std::thread::Builder::new()
            .name("parser".to_string())
            .stack_size(PARSER_STACK_SIZE)
            .spawn_scoped(scope, || solparse::parse(source))
            .context("Failed to spawn the parser thread")?;
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("parser thread panicked"))
    })
}

fn parse(input: PathBuf, format: OutputFormat, dump_tokens: bool) -> Result<()> {
    let state = SourceState::new(input)?;

    if dump_tokens {
        let tokenized = tokenize(&state.source);
        println!("{}", "=== Tokens ===".blue().bold());
        println!("{}", format_tokens(&tokenized.tokens));
        println!();
    }

    let output = parse_on_large_stack(&state.source)?;
    state.report_all(&output)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output.source_file)?),
        OutputFormat::Tree => println!("{}", output.syntax_tree().to_sexp()),
    }

    Ok(())
}

fn check(input: PathBuf, verbose: bool) -> Result<()> {
    let display = input.display().to_string();
    let state = SourceState::new(input)?;

    let output = parse_on_large_stack(&state.source)?;
    if verbose {
        println!(
            "{}: {} top-level item(s)",
            "info".blue().bold(),
            output.source_file.items.len()
        );
    }

    if output.has_errors() {
        state.report_all(&output)?;
        anyhow::bail!("{} syntax error(s) in {}", output.errors.len(), display);
    }

    println!("{}: {} has no syntax errors", "success".green().bold(), display);
    Ok(())
}
