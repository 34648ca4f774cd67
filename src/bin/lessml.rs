//! Command-line interface for lessml
//! Translates LessXaml files to XML and back, and dumps the intermediate stages.
//!
//! Usage:
//!   lessml translate `<path>` [--pretty]                      - LessXaml to XML
//!   lessml reverse `<path>`                                   - XML to LessXaml
//!   lessml tokens `<path>`                                    - Token list as JSON
//!   lessml tree `<path>` [--expand] [--format `<format>`]     - Node tree (json, lessml, xml)
//!
//! Every subcommand accepts `--config <file>` to layer a TOML file over the defaults, and
//! `-v` (repeatable) to raise the log level.

use clap::{Arg, ArgAction, ArgMatches, Command};
use lessml::lessml::config::{LessmlConfig, Loader};
use lessml::lessml::formats::{DslFormatter, FormatRegistry, Formatter, XmlFormatter};
use lessml::lessml::transforms::standard::{expansion, parsing, tokenization, translation};
use lessml::lessml::xml::{from_xml, XmlDocument};
use lessml::Result;
use tracing::Level;

fn main() {
    let matches = Command::new("lessml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate between LessXaml and XML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate a LessXaml file to XML")
                .arg(path_arg("Path to the LessXaml file"))
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .short('p')
                        .help("Indent the XML output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("reverse")
                .about("Write an XML file as LessXaml")
                .arg(path_arg("Path to the XML file")),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token list of a LessXaml file as JSON")
                .arg(path_arg("Path to the LessXaml file")),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the node tree of a LessXaml file")
                .arg(path_arg("Path to the LessXaml file"))
                .arg(
                    Arg::new("expand")
                        .long("expand")
                        .short('e')
                        .help("Expand templates and XAML shorthands first")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: json, lessml or xml")
                        .default_value("json"),
                ),
        )
        .get_matches();

    let Some((command, sub)) = matches.subcommand() else {
        unreachable!("a subcommand is required")
    };
    init_logging(sub.get_count("verbose"));

    match run(command, sub) {
        Ok(output) => println!("{}", output.trim_end_matches('\n')),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path").help(help).required(true).index(1)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<LessmlConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    Ok(loader.build()?)
}

fn read(matches: &ArgMatches) -> Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    Ok(std::fs::read_to_string(path)?)
}

fn run(command: &str, sub: &ArgMatches) -> Result<String> {
    let config = load_config(sub)?;
    match command {
        "translate" => {
            let document = translation(&config).run(read(sub)?)?;
            if sub.get_flag("pretty") || config.output.pretty {
                document.to_pretty_string(config.output.xml_indent)
            } else {
                document.to_xml_string()
            }
        }
        "reverse" => {
            let tree = from_xml(&XmlDocument::parse(&read(sub)?)?)?;
            dsl_formatter(&config).serialize(&tree)
        }
        "tokens" => {
            let tokens = tokenization(&config).run(read(sub)?)?;
            Ok(serde_json::to_string_pretty(&tokens)?)
        }
        "tree" => {
            let source = read(sub)?;
            let tree = if sub.get_flag("expand") {
                expansion(&config).run(source)?
            } else {
                parsing(&config).run(source)?
            };
            let format = sub
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("json");

            let mut registry = FormatRegistry::with_defaults();
            registry.register(dsl_formatter(&config));
            if config.output.pretty {
                registry.register(XmlFormatter {
                    indent: Some(config.output.xml_indent),
                });
            }
            registry.serialize(&tree, format)
        }
        other => unreachable!("unknown subcommand {}", other),
    }
}

fn dsl_formatter(config: &LessmlConfig) -> DslFormatter {
    DslFormatter {
        grammar: config.grammar.clone(),
        indent_string: Some(config.output.indent_string.clone()),
    }
}
