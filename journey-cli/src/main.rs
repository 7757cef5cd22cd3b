// Command-line interface for journey2dayone
//
// Imports a Journey JSON export into a Day One journal through Day One's own
// command line program, converting each entry's markup to Markdown on the way.
//
// Usage:
//  journey2dayone <journal> <export-dir> [--dry-run]         - Import (default)
//  journey2dayone import <journal> <export-dir> [--dry-run]  - Same as above (explicit)
//  journey2dayone convert <input> [-o <output>]               - Convert one entry or markup file
//  journey2dayone inspect <input> [<stage>]                   - Show the text after each stage
//  journey2dayone --list-stages                               - List conversion stages
//
// Configuration is read from the embedded defaults, then ./journey.toml, then the
// file given with --config. --command and --timezone override single keys.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use journey_babel::{Converter, Stage};
use journey_cli::dayone::{DayOneCli, DryRun, EntrySink};
use journey_cli::entry::JourneyEntry;
use journey_cli::import::run_import;
use journey_cli::validate::{resolve_fallback_zone, Validator};
use journey_config::{JourneyConfig, Loader};
use std::fs;
use std::io;
use std::path::Path;

const SUBCOMMANDS: &[&str] = &["import", "convert", "inspect", "help"];
const VALUE_OPTIONS: &[&str] = &["--config", "--command", "--timezone"];

fn stage_names() -> Vec<&'static str> {
    Stage::ALL.iter().map(|stage| stage.name()).collect()
}

fn build_cli() -> Command {
    Command::new("journey2dayone")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Import Journey entries into Day One")
        .long_about(
            "journey2dayone imports a Journey JSON export into a Day One journal.\n\n\
            Each entry's text is converted from Journey's markup to Markdown, its date,\n\
            timezone, tags, photos and location are checked, and the entry is created\n\
            with Day One's command line program (dayone2).\n\n\
            Examples:\n  \
            journey2dayone Journal ./export              # Import every entry\n  \
            journey2dayone Journal ./export --dry-run    # Print the dayone2 commands\n  \
            journey2dayone convert entry.json            # Print one entry as Markdown\n  \
            journey2dayone inspect entry.json lists      # Text after the lists stage",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-stages")
                .long("list-stages")
                .help("List conversion stages")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a journey.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("command")
                .long("command")
                .value_name("PROGRAM")
                .help("Day One command line program (overrides import.command)")
                .value_hint(ValueHint::CommandName)
                .global(true),
        )
        .arg(
            Arg::new("timezone")
                .long("timezone")
                .value_name("TZ")
                .help("Zone for entries without a valid one (overrides import.fallback_timezone)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("import")
                .about("Import a Journey export into a Day One journal (default command)")
                .arg(
                    Arg::new("journal")
                        .help("Name of the Day One journal")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("source")
                        .help("Directory holding the exported JSON entries and photos")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the Day One commands instead of running them")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert one entry to Markdown")
                .long_about(
                    "Convert one entry to Markdown.\n\n\
                    A .json input is read as a Journey entry and its text is converted.\n\
                    Any other input is converted as raw markup.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the text after each conversion stage")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("stage")
                        .help("Stop after this stage. Defaults to showing every stage")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(stage_names()))
                        .index(2),
                ),
        )
}

/// Prepends `import` when the first positional argument is not a subcommand.
///
/// Leading options are skipped; those in [`VALUE_OPTIONS`] consume the next argument.
fn with_default_subcommand(args: Vec<String>) -> Vec<String> {
    let mut rest = args.iter().skip(1);
    let mut first_positional = None;
    while let Some(arg) = rest.next() {
        if VALUE_OPTIONS.contains(&arg.as_str()) {
            rest.next();
        } else if !arg.starts_with('-') {
            first_positional = Some(arg);
            break;
        }
    }
    if !first_positional.is_some_and(|first| !SUBCOMMANDS.contains(&first.as_str())) {
        return args;
    }
    let mut injected = vec![args[0].clone(), "import".to_string()];
    injected.extend_from_slice(&args[1..]);
    injected
}

fn main() {
    let args = with_default_subcommand(std::env::args().collect());
    let matches = build_cli().get_matches_from(args);

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-stages") {
        handle_list_stages_command();
        return;
    }

    let config = load_cli_config(&matches);
    let converter = config.convert.converter().unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {err}");
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("import", sub_matches)) => {
            let journal = required(sub_matches, "journal");
            let source = required(sub_matches, "source");
            let dry_run = sub_matches.get_flag("dry-run");
            handle_import_command(journal, Path::new(source), dry_run, converter, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &converter);
        }
        Some(("inspect", sub_matches)) => {
            let input = required(sub_matches, "input");
            let stage = sub_matches
                .get_one::<String>("stage")
                .and_then(|name| name.parse::<Stage>().ok());
            handle_inspect_command(input, stage, &converter);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Missing argument <{name}>");
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn load_cli_config(matches: &ArgMatches) -> JourneyConfig {
    let mut loader = Loader::new().with_optional_file("journey.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let overrides = [
        ("import.command", matches.get_one::<String>("command")),
        ("import.fallback_timezone", matches.get_one::<String>("timezone")),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            loader = loader.set_override(key, value.as_str()).unwrap_or_else(|err| {
                eprintln!("Invalid value for {key}: {err}");
                std::process::exit(1);
            });
        }
    }
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn handle_import_command(
    journal: &str,
    source: &Path,
    dry_run: bool,
    converter: Converter,
    config: &JourneyConfig,
) {
    let import = &config.import;
    let validator = resolve_fallback_zone(import.fallback_timezone.as_deref())
        .and_then(|zone| {
            Validator::new(
                converter,
                source,
                zone,
                &import.timestamp_format,
                &import.skip_marker,
            )
        })
        .unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        });

    let mut sink: Box<dyn EntrySink> = if dry_run {
        Box::new(DryRun::new(import.command.clone(), io::stdout()))
    } else {
        Box::new(DayOneCli::locate(&import.command).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }))
    };

    let report = run_import(journal, source, &validator, sink.as_mut()).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    println!("{report}");
    if !report.failed.is_empty() {
        std::process::exit(1);
    }
}

/// Reads the markup to convert: a `.json` input is a Journey entry, anything
/// else is taken as markup.
fn read_markup(input: &str) -> String {
    let path = Path::new(input);
    let is_entry = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_entry {
        JourneyEntry::from_path(path)
            .map(|entry| entry.text)
            .unwrap_or_else(|err| {
                eprintln!("Error: {err}");
                std::process::exit(1);
            })
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{input}': {e}");
            std::process::exit(1);
        })
    }
}

fn handle_convert_command(input: &str, output: Option<&str>, converter: &Converter) {
    let markdown = converter.convert(&read_markup(input));
    match output {
        Some(path) => fs::write(path, markdown).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{markdown}"),
    }
}

fn handle_inspect_command(input: &str, stage: Option<Stage>, converter: &Converter) {
    let markup = read_markup(input);
    match stage {
        Some(stage) => print!("{}", converter.convert_through(&markup, stage)),
        None => {
            let mut text = markup;
            for stage in Stage::ALL {
                text = converter.apply(stage, &text);
                println!("=== {stage} ===");
                println!("{text}");
            }
        }
    }
}

fn handle_list_stages_command() {
    println!("Conversion stages, in order:\n");
    for stage in Stage::ALL {
        println!("  {:<10}{}", stage.name(), stage.description());
    }
}
