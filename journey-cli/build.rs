use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of journey_babel::Stage::ALL
// Build scripts cannot depend on the crates they build against, so the names are repeated here
const STAGES: &[&str] = &["inline", "lists", "phrases", "names", "quotes", "rules"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("journey2dayone")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Import Journey entries into Day One")
        .arg_required_else_help(true)
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
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("command")
                .long("command")
                .value_name("PROGRAM")
                .value_hint(ValueHint::CommandName)
                .global(true),
        )
        .arg(
            Arg::new("timezone")
                .long("timezone")
                .value_name("TZ")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("import")
                .about("Import a Journey export into a Day One journal")
                .arg(Arg::new("journal").required(true).index(1))
                .arg(
                    Arg::new("source")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert one entry to Markdown")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the text after each conversion stage")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("stage")
                        .value_parser(clap::builder::PossibleValuesParser::new(STAGES))
                        .index(2),
                ),
        );

    generate_to(Bash, &mut cmd, "journey2dayone", &outdir)?;
    generate_to(Zsh, &mut cmd, "journey2dayone", &outdir)?;
    generate_to(Fish, &mut cmd, "journey2dayone", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
