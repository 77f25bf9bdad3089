//! Command-line interface for tom
//!
//! Runs TOM text through the engine's paths and prints the result.
//!
//! Usage:
//!   tom write `<path>` [--seed `<n>`]                       - Roll dice and print the text to persist
//!   tom read `<path>` [--format `<format>`] [--seed `<n>`]  - Evaluate persisted text and print the tree
//!   tom source `<path>`                                   - Print persisted text without dice results
//!   tom tokens `<path>` [--format simple|json]            - Print the token stream
//!   tom anchors `<path>` --board `<b>` --thread `<n>`       - List the anchors in the body text
//!
//! `<path>` may be `-` to read stdin. `--config <file>` layers a TOML file over the defaults.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{LevelFilter, Log, Metadata, Record};
use std::io::Read;
use tom_engine::tom::config::{Loader, TomConfig};
use tom_engine::tom::formats::FormatRegistry;
use tom_engine::tom::lexing;
use tom_engine::tom::random::{RandomSource, SeededRandom, ThreadRandom};
use tom_engine::tom::render::{collect_anchors, AnchorContext};
use tom_engine::tom::Pipeline;

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the TOM file, or - for stdin")
        .required(true)
        .index(1)
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .help("Seed for dice rolls, for reproducible output")
        .value_parser(value_parser!(u64))
}

fn main() {
    let registry = FormatRegistry::default();
    let formats = registry.list_formats().join(", ");

    let matches = Command::new("tom")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for processing TOM forum markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in configuration"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log to stderr (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("write")
                .about("Roll dice in a fresh submission and print the text to persist")
                .arg(path_arg())
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("read")
                .about("Evaluate persisted text and print the resulting tree")
                .arg(path_arg())
                .arg(seed_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help(format!("Output format ({})", formats))
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("source")
                .about("Print persisted text as its author wrote it")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["simple", "json"])
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("anchors")
                .about("List the anchors found in the body text")
                .arg(path_arg())
                .arg(Arg::new("board").long("board").required(true))
                .arg(
                    Arg::new("thread")
                        .long("thread")
                        .required(true)
                        .value_parser(value_parser!(u64)),
                ),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));
    let config = load_config(matches.get_one::<String>("config"));
    let pipeline = Pipeline::from(&config);

    match matches.subcommand() {
        Some(("write", sub)) => handle_write_command(&pipeline, sub),
        Some(("read", sub)) => handle_read_command(&pipeline, &registry, sub),
        Some(("source", sub)) => handle_source_command(&pipeline, sub),
        Some(("tokens", sub)) => handle_tokens_command(&config, sub),
        Some(("anchors", sub)) => handle_anchors_command(&pipeline, sub),
        _ => unreachable!(),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(path: Option<&String>) -> TomConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("invalid configuration: {}", e)))
}

fn read_input(sub: &ArgMatches) -> String {
    let path = sub.get_one::<String>("path").unwrap();
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| fail(format!("reading stdin: {}", e)));
        source
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)))
    }
}

fn random_source(sub: &ArgMatches) -> Box<dyn RandomSource> {
    match sub.get_one::<u64>("seed") {
        Some(seed) => Box::new(SeededRandom::new(*seed)),
        None => Box::new(ThreadRandom),
    }
}

fn handle_write_command(pipeline: &Pipeline, sub: &ArgMatches) {
    let source = read_input(sub);
    let mut random = random_source(sub);
    let persisted = pipeline
        .write(&source, random.as_mut())
        .unwrap_or_else(|e| fail(e));
    print!("{}", persisted);
}

fn handle_read_command(pipeline: &Pipeline, registry: &FormatRegistry, sub: &ArgMatches) {
    let format = sub.get_one::<String>("format").unwrap();
    let source = read_input(sub);
    let mut random = random_source(sub);
    let root = pipeline
        .read(&source, random.as_mut())
        .unwrap_or_else(|e| fail(e));
    let output = registry
        .serialize(&root, format)
        .unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

fn handle_source_command(pipeline: &Pipeline, sub: &ArgMatches) {
    let source = read_input(sub);
    let text = pipeline.view_source(&source).unwrap_or_else(|e| fail(e));
    print!("{}", text);
}

fn handle_tokens_command(config: &TomConfig, sub: &ArgMatches) {
    let format = sub.get_one::<String>("format").unwrap();
    let source = read_input(sub);
    let tokens = lexing::lex(&source, &config.read_config().limits).unwrap_or_else(|e| fail(e));
    match format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        _ => {
            for (token, span) in lexing::tokenize_with_spans(&source) {
                println!("{}..{} {}", span.start, span.end, token);
            }
        }
    }
}

fn handle_anchors_command(pipeline: &Pipeline, sub: &ArgMatches) {
    let board = sub.get_one::<String>("board").unwrap();
    let thread = *sub.get_one::<u64>("thread").unwrap();
    let source = read_input(sub);
    let root = pipeline
        .read(&source, &mut ThreadRandom)
        .unwrap_or_else(|e| fail(e));
    for anchor in collect_anchors(&root, &AnchorContext::new(board.as_str(), thread)) {
        match anchor.end {
            Some(end) => println!("{}/{}/{}-{}", anchor.board, anchor.thread, anchor.start, end),
            None => println!("{}/{}/{}", anchor.board, anchor.thread, anchor.start),
        }
    }
}
