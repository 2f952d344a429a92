use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use monkeyscan::lexer::{Grammar, ScanOptions, Scanner, TokenWithPosition};
use monkeyscan::ScanSession;

#[derive(Parser)]
#[command(name = "monkeyscan")]
#[command(author, version, about = "Lexical scanner for the Monkey language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GrammarArg {
    /// `fn` and `let` only
    #[value(name = "core")]
    Core,
    /// Adds `true`, `false`, `if`, `else` and `return`
    #[value(name = "extended")]
    Extended,
}

impl From<GrammarArg> for Grammar {
    fn from(arg: GrammarArg) -> Self {
        match arg {
            GrammarArg::Core => Grammar::Core,
            GrammarArg::Extended => Grammar::Extended,
        }
    }
}

/// Scanner settings shared by every subcommand
#[derive(Args, Clone, Copy, Debug)]
struct ScanArgs {
    /// Keyword set to recognise
    #[arg(long, value_enum, default_value = "extended")]
    grammar: GrammarArg,

    /// Allow digits after the first letter of an identifier
    #[arg(long)]
    alphanumeric_identifiers: bool,
}

impl ScanArgs {
    fn options(self) -> ScanOptions {
        ScanOptions::new()
            .grammar(self.grammar.into())
            .alphanumeric_identifiers(self.alphanumeric_identifiers)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// The source file to scan, or `-` for stdin
        input: PathBuf,

        /// Emit JSON instead of one token per line
        #[arg(long)]
        json: bool,

        /// Include byte spans
        #[arg(long)]
        spans: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Report illegal characters in a source file
    Check {
        /// The source file to check, or `-` for stdin
        input: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Start an interactive token printer
    Repl {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the default picked here
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(cli.verbose)),
    )
    .init();

    let result = match cli.command {
        Commands::Tokens {
            input,
            json,
            spans,
            scan,
        } => tokens(input, json, spans, scan.options()),
        Commands::Check { input, scan } => check(input, scan.options()),
        Commands::Repl { scan } => repl(scan.options()),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn load(input: PathBuf, options: ScanOptions) -> Result<ScanSession> {
    if input.as_os_str() == "-" {
        let mut source = Vec::new();
        io::stdin()
            .read_to_end(&mut source)
            .context("Failed to read source from stdin")?;
        return Ok(ScanSession::from_source("<stdin>", source, options));
    }

    ScanSession::new(&input, options)
        .with_context(|| format!("Failed to load source file: {:?}", input))
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    literal: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<(usize, usize)>,
}

fn record(token: &TokenWithPosition, spans: bool) -> TokenRecord<'_> {
    TokenRecord {
        kind: token.token.kind.name(),
        literal: &token.token.literal,
        span: spans.then_some((token.span.start, token.span.end)),
    }
}

fn tokens(input: PathBuf, json: bool, spans: bool, options: ScanOptions) -> Result<()> {
    log::info!("Scanning {:?}", input);

    let mut session = load(input, options)?;
    let tokens = session.scan();

    if json {
        let records: Vec<_> = tokens.iter().map(|t| record(t, spans)).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for (i, token) in tokens.iter().enumerate() {
        if spans {
            println!("{:4}: {} @ {}..{}", i, token.token, token.span.start, token.span.end);
        } else {
            println!("{:4}: {}", i, token.token);
        }
    }

    Ok(())
}

fn check(input: PathBuf, options: ScanOptions) -> Result<()> {
    log::info!("Checking {:?}", input);

    let mut session = load(input, options)?;
    let tokens = session.scan();
    log::debug!("{} tokens", tokens.len());

    if session.has_errors() {
        session.report_diagnostics()?;
        anyhow::bail!(
            "found {} illegal character(s) in {}",
            session.error_count(),
            session.source_name
        );
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn repl(options: ScanOptions) -> Result<()> {
    println!("Monkey scanner REPL");
    println!("Type ':quit' or ':q' to exit, ':help' for help\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    let mut line_number = 1;

    loop {
        print!("monkey:{:03}> ", line_number);
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        match line.trim() {
            ":quit" | ":q" => {
                println!("Goodbye!");
                break;
            }
            ":help" | ":h" => {
                println!("REPL commands:");
                println!("  :quit, :q    Exit the REPL");
                println!("  :help, :h    Show this help message");
                println!("\nAny other input is scanned and its tokens printed.");
                continue;
            }
            "" => continue,
            _ => {}
        }

        let mut scanner = Scanner::with_options(&line, options);
        loop {
            let token = scanner.next_token();
            if token.is_eof() {
                break;
            }
            println!("{}", token);
        }

        line_number += 1;
    }

    Ok(())
}
