//! Handing entries to Day One through its command line program

use crate::error::{ImportError, Result};
use crate::validate::ValidatedEntry;
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Destination for validated entries.
///
/// [`DayOneCli`] creates real entries; [`DryRun`] only prints what would be run.
pub trait EntrySink {
    /// Creates one entry in `journal` and returns its new id.
    fn add(&mut self, journal: &str, entry: &ValidatedEntry) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Arguments for `dayone2 … new`. The entry text is passed on stdin.
pub fn build_args(journal: &str, entry: &ValidatedEntry) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-j".into(),
        journal.into(),
        "-d".into(),
        entry.timestamp.as_str().into(),
        "-z".into(),
        entry.timezone.name().into(),
    ];
    if !entry.tags.is_empty() {
        args.push("-t".into());
        args.extend(entry.tags.iter().map(OsString::from));
    }
    if !entry.photos.is_empty() {
        args.push("-p".into());
        args.extend(entry.photos.iter().map(OsString::from));
    }
    if let Some((lat, lon)) = entry.coordinate {
        args.push("--coordinate".into());
        args.push(lat.to_string().into());
        args.push(lon.to_string().into());
    }
    args.push("--".into());
    args.push("new".into());
    args
}

/// The new entry id: the last token of the output, if it is upper-case hex.
pub fn parse_entry_id(stdout: &str) -> Option<String> {
    let token = stdout.split_whitespace().last()?;
    token
        .chars()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        .then(|| token.to_string())
}

/// Runs the Day One command line program once per entry.
#[derive(Debug, Clone)]
pub struct DayOneCli {
    program: PathBuf,
}

impl DayOneCli {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Looks `program` up in PATH. Paths are checked as given.
    pub fn locate(program: &str) -> Result<Self> {
        which::which(program)
            .map(Self::new)
            .map_err(|source| ImportError::CommandNotFound {
                program: program.to_string(),
                source,
            })
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl EntrySink for DayOneCli {
    fn add(&mut self, journal: &str, entry: &ValidatedEntry) -> Result<String> {
        let spawn_error = |source| ImportError::Spawn {
            program: self.program_name(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(build_args(journal, entry))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(entry.text.as_bytes()) {
                Ok(()) => {}
                // Exited without reading; its status and stderr tell why.
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                    log::debug!("{} closed stdin early", self.program_name());
                }
                Err(err) => return Err(spawn_error(err)),
            }
        }
        let output = child.wait_with_output().map_err(spawn_error)?;

        if !output.status.success() {
            return Err(ImportError::CommandFailed {
                program: self.program_name(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_entry_id(&stdout).ok_or_else(|| ImportError::MissingEntryId(stdout.trim().to_string()))
    }

    fn name(&self) -> &'static str {
        "dayone-cli"
    }
}

/// Prints each command line instead of running it.
pub struct DryRun<W: Write> {
    program: String,
    out: W,
    created: usize,
}

impl<W: Write> DryRun<W> {
    pub fn new(program: impl Into<String>, out: W) -> Self {
        Self {
            program: program.into(),
            out,
            created: 0,
        }
    }
}

impl<W: Write> EntrySink for DryRun<W> {
    fn add(&mut self, journal: &str, entry: &ValidatedEntry) -> Result<String> {
        let mut line = shell_quote(&self.program);
        for arg in build_args(journal, entry) {
            line.push(' ');
            line.push_str(&shell_quote(&arg.to_string_lossy()));
        }
        writeln!(self.out, "{line}").map_err(|source| ImportError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
        self.created += 1;
        Ok(format!("DRYRUN{:04}", self.created))
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
