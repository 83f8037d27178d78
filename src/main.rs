use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use env_logger::Builder;
use home::home_dir;
use log::{debug, info, LevelFilter};
use std::env::current_exe;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use wordtree::{CasePolicy, Dictionary};

mod report;

use crate::report::{print_load_summary, print_lookup};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Words to check. If none are given, a sentence is read from stdin.
    words: Vec<String>,
    /// Word list to check against, one word per line.
    #[arg(short, long, env = "WORDCHECK_DICT")]
    dict: Option<PathBuf>,
    /// Which casing to keep when a word occurs more than once.
    #[arg(long, value_enum, default_value_t = Casing::KeepFirst)]
    case_policy: Casing,
    /// Print the whole dictionary in order and exit.
    #[arg(long)]
    list: bool,
    /// More log output. Repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Casing {
    KeepFirst,
    KeepLatest,
}

impl From<Casing> for CasePolicy {
    fn from(casing: Casing) -> Self {
        match casing {
            Casing::KeepFirst => CasePolicy::KeepFirst,
            Casing::KeepLatest => CasePolicy::KeepLatest,
        }
    }
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

const DICTIONARY_NAME: &str = "Dictionary.txt";
const DICTIONARY_SEARCH_PATH: [&str; 3] = [".", "$HOME/.config/wordcheck", "$EXE"];

/// Look for paths starting with $HOME or $EXE and fill in the user's
/// home directory or the wordcheck executable's directory, respectively.
fn expand_dir(dir: &Path) -> Option<PathBuf> {
    if let Ok(path) = dir.strip_prefix("$HOME") {
        Some(home_dir()?.join(path))
    } else if let Ok(path) = dir.strip_prefix("$EXE") {
        match current_exe() {
            Ok(exe) => Some(exe.parent()?.join(path)),
            Err(_) => None,
        }
    } else {
        Some(dir.to_path_buf())
    }
}

/// Look for a word list called `name` in the provided directory search
/// path, and return the first one that exists.
fn find_dictionary(search_path: &[&str], name: &str) -> Option<PathBuf> {
    for dir in search_path {
        let dir = match expand_dir(Path::new(dir)) {
            Some(dir) => dir,
            None => {
                debug!("Could not expand path {}", dir);
                continue;
            }
        };
        let path = dir.join(name);
        if path.exists() {
            info!("Found dictionary {}", path.display());
            return Some(path);
        }
        debug!("No dictionary in {}", dir.display());
    }
    None
}

fn load_dictionary(args: &Cli) -> Result<Dictionary> {
    let path = match &args.dict {
        Some(path) => path.clone(),
        None => match find_dictionary(&DICTIONARY_SEARCH_PATH, DICTIONARY_NAME) {
            Some(path) => path,
            None => bail!("Could not find {}", DICTIONARY_NAME),
        },
    };
    let dict = Dictionary::load(&path, args.case_policy.into())?;
    if dict.tree().is_empty() {
        bail!("{} contains no words", path.display());
    }
    Ok(dict)
}

fn read_sentence() -> Result<String> {
    print!("Enter a sentence: ");
    stdout().flush()?;
    let mut line = String::new();
    stdin()
        .lock()
        .read_line(&mut line)
        .context("Could not read sentence")?;
    Ok(line)
}

fn run(args: &Cli, dict: &Dictionary) -> Result<()> {
    if args.list {
        let mut out = stdout().lock();
        for word in dict.tree() {
            writeln!(out, "{}", word)?;
        }
        return Ok(());
    }

    let sentence = if args.words.is_empty() {
        read_sentence()?
    } else {
        args.words.join(" ")
    };
    for token in sentence.split_whitespace() {
        print_lookup(token, dict.lookup(token));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Cli::parse();
    Builder::new().filter_level(args.log_level()).init();

    let dict = match load_dictionary(&args) {
        Ok(dict) => dict,
        Err(err) => {
            eprintln!("{}", "Failed to load dictionary".red());
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };
    if !args.list {
        print_load_summary(&dict);
    }

    match run(&args, &dict) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();

        let args = Cli::parse_from(["wordcheck", "-vv", "teh", "cat"]);
        assert_eq!(LevelFilter::Debug, args.log_level());
        assert_eq!(vec!["teh", "cat"], args.words);
        assert!(!args.list);

        let args = Cli::parse_from(["wordcheck", "-q", "-v", "--case-policy", "keep-latest"]);
        assert_eq!(LevelFilter::Error, args.log_level());
        assert_eq!(CasePolicy::KeepLatest, CasePolicy::from(args.case_policy));
    }

    #[test]
    fn test_expand_dir() {
        assert_eq!(
            Some(PathBuf::from("./dicts")),
            expand_dir(Path::new("./dicts"))
        );
        let exe_dir = expand_dir(Path::new("$EXE/dicts")).unwrap();
        assert!(exe_dir.ends_with("dicts"));
        assert!(!exe_dir.starts_with("$EXE"));
    }

    #[test]
    fn test_find_dictionary() {
        let found = find_dictionary(&["wordtree/tests", "."], "words.txt");
        assert_eq!(Some(PathBuf::from("wordtree/tests/words.txt")), found);
        assert_eq!(None, find_dictionary(&["no/such/dir"], "words.txt"));
    }
}
