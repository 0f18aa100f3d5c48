//! tagdoc CLI - Render, check, and inspect bracket markup documents
//!
//! Usage:
//!   tdcli [COMMAND] [OPTIONS] <FILE>
//!
//! Commands:
//!   render    Translate a document to HTML (default)
//!   check     Lex and parse without generating output
//!   tokens    Dump the token stream
//!   stats     Show document statistics

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tagdoc_core::{render, write_html, DocTree, Lexer, NodeKind, Parser, TokenKind};

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run 'tdcli --help' for usage");
            process::exit(2);
        }
    };

    match run(&config) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let input = fs::read_to_string(&config.file)
        .with_context(|| format!("failed to read '{}'", config.file))?;

    match config.command {
        Command::Render => cmd_render(&input, config),
        Command::Check => cmd_check(&input, config),
        Command::Tokens => cmd_tokens(&input, config),
        Command::Stats => cmd_stats(&input),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    output: Option<String>,
    stdout: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Render,
    Check,
    Tokens,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Render;
    let mut format = OutputFormat::Text;
    let mut output = None;
    let mut stdout = false;
    let mut file = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("tdcli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-j" | "--json" => format = OutputFormat::Json,
            "-o" | "--output" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a path argument", arg))?;
                output = Some(value.clone());
            }
            "--stdout" => stdout = true,
            "render" => command = Command::Render,
            "check" => command = Command::Check,
            "tokens" => command = Command::Tokens,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        output,
        stdout,
    })
}

fn print_help() {
    eprintln!(
        r#"tdcli - bracket markup to HTML translator

USAGE:
    tdcli [COMMAND] [OPTIONS] <FILE>

COMMANDS:
    render      Translate a document to HTML (default)
    check       Lex and parse without generating output
    tokens      Dump the token stream
    stats       Show document statistics

OPTIONS:
    -o, --output <PATH>    Write the HTML to PATH (render)
        --stdout           Write the HTML to standard output (render)
    -j, --json             Output in JSON format (check, tokens)
    -h, --help             Print help information
    -V, --version          Print version information

EXAMPLES:
    tdcli article.td               Render article.td to article.html
    tdcli article.td -o out.html   Render to an explicit path
    tdcli check article.td         Report errors without rendering
    tdcli tokens -j article.td     Dump the token stream as JSON
    tdcli stats article.td         Show node statistics
"#
    );
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(input: &str, config: &Config) -> Result<()> {
    let tree = Parser::new(input)?.parse()?;
    let html = render(&tree)?;

    if config.stdout {
        print!("{}", html);
        return Ok(());
    }

    let out = match &config.output {
        Some(path) => PathBuf::from(path),
        None => Path::new(&config.file).with_extension("html"),
    };
    write_html(&out, &html)?;
    eprintln!("wrote '{}'", out.display());
    Ok(())
}

// =============================================================================
// Check Command
// =============================================================================

fn cmd_check(input: &str, config: &Config) -> Result<()> {
    let result = Parser::new(input).and_then(|p| p.parse());

    match config.format {
        OutputFormat::Json => match result {
            Ok(_) => {
                println!("{}", serde_json::json!({"valid": true, "error": null}));
                Ok(())
            }
            Err(e) => {
                println!(
                    "{}",
                    serde_json::json!({"valid": false, "error": e.to_string()})
                );
                process::exit(1);
            }
        },
        OutputFormat::Text => match result {
            Ok(_) => {
                println!("Valid: no errors found");
                Ok(())
            }
            Err(e) => bail!("{}", e),
        },
    }
}

// =============================================================================
// Tokens Command
// =============================================================================

#[derive(Serialize)]
struct JsonToken<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'static str>,
    text: &'a str,
}

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Eof => "eof",
        TokenKind::Tag(_) => "tag",
        TokenKind::OptName => "opt-name",
        TokenKind::Str => "str",
        TokenKind::Word => "word",
        TokenKind::LBracket => "lbracket",
        TokenKind::RBracket => "rbracket",
        TokenKind::Equal => "equal",
        TokenKind::Comma => "comma",
        TokenKind::Star => "star",
    }
}

fn cmd_tokens(input: &str, config: &Config) -> Result<()> {
    let mut lexer = Lexer::new(input)?;

    match config.format {
        OutputFormat::Json => {
            let mut tokens = Vec::new();
            loop {
                let tok = lexer.advance();
                let tag = match tok.kind {
                    TokenKind::Tag(name) => Some(name.as_str()),
                    _ => None,
                };
                tokens.push(JsonToken {
                    kind: kind_name(tok.kind),
                    tag,
                    text: tok.text,
                });
                if tok.kind == TokenKind::Eof {
                    break;
                }
            }
            println!("{}", serde_json::to_string_pretty(&tokens).unwrap());
        }
        OutputFormat::Text => {
            let mut index = 0usize;
            loop {
                let tok = lexer.advance();
                println!("[{:>4}] {:<10} {:?}", index, kind_name(tok.kind), tok.text);
                if tok.kind == TokenKind::Eof {
                    break;
                }
                index += 1;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &str) -> Result<()> {
    let tree = Parser::new(input)?.parse()?;
    let stats = TreeStats::from_tree(&tree, input);

    println!("Document Statistics");
    println!("-------------------");
    println!("Title:        {}", stats.title.as_deref().unwrap_or("(none)"));
    println!("Author:       {}", or_none(tree.option(tree.root(), "author")));
    println!("Date:         {}", or_none(tree.option(tree.root(), "date")));
    println!();
    println!("Content:");
    println!("  Total nodes:    {}", stats.total_nodes);
    println!("  Sections:       {}", stats.sections);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Titles:         {}", stats.titles);
    println!("  Inline marks:   {}", stats.inline_marks);
    println!("  Text fragments: {}", stats.text_fragments);
    println!("  Max depth:      {}", stats.max_depth);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

struct TreeStats {
    title: Option<String>,
    total_nodes: usize,
    sections: usize,
    paragraphs: usize,
    titles: usize,
    inline_marks: usize,
    text_fragments: usize,
    max_depth: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl TreeStats {
    fn from_tree(tree: &DocTree, input: &str) -> Self {
        let mut stats = Self {
            title: None,
            total_nodes: 0,
            sections: 0,
            paragraphs: 0,
            titles: 0,
            inline_marks: 0,
            text_fragments: 0,
            max_depth: 0,
            chars: input.len(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
        };

        for id in tree.ids() {
            stats.total_nodes += 1;
            stats.max_depth = stats.max_depth.max(tree.depth(id));
            match tree.kind(id) {
                NodeKind::Article => {}
                NodeKind::Title(text) => {
                    stats.titles += 1;
                    if stats.title.is_none() {
                        stats.title = Some(text.clone());
                    }
                }
                NodeKind::Sec => stats.sections += 1,
                NodeKind::Para => stats.paragraphs += 1,
                NodeKind::Bold
                | NodeKind::Italic
                | NodeKind::Underline
                | NodeKind::Code
                | NodeKind::Math => stats.inline_marks += 1,
                NodeKind::Text(_) => stats.text_fragments += 1,
            }
        }

        stats
    }
}
