//! CLI tool to strip comments from C-family source files.

use std::io::{self, Write};
use std::process::ExitCode;

use cstrip::{
    EscapePolicy, ScanOptions, Scanner, UnterminatedLiteral, join_lines, read_lines,
    trim_trailing, write_lines,
};
use getopts::{Fail, Options};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("error parsing arguments: {0}")]
    Parsing(#[from] Fail),
    #[error("no command specified")]
    NoCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid --escape value {0:?}, expected odd or single")]
    InvalidEscape(String),
    #[error("invalid --unterminated value {0:?}, expected copy or code")]
    InvalidUnterminated(String),
    #[error("no files specified")]
    NoFiles,
    #[error("--write only applies to the strip command")]
    WriteWithCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Strip,
    Check,
}

#[derive(Debug)]
struct Config {
    command: Command,
    write: bool,
    options: ScanOptions,
    files: Vec<String>,
}

enum Invocation {
    Run(Config),
    Help,
    Version,
}

fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("w", "write", "rewrite files in place (strip only)");
    opts.optopt(
        "",
        "escape",
        "backslash handling before a quote: odd (default) or single",
        "MODE",
    );
    opts.optopt(
        "",
        "unterminated",
        "unclosed literal handling: copy (default) or code",
        "MODE",
    );
    opts.optflag("h", "help", "print this help");
    opts.optflag("V", "version", "print the version");
    opts
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!(
        "Usage: {program} <command> [options] <files...>\n\n\
         Commands:\n  \
         strip  Print the files with comments removed\n  \
         check  Report files that still contain comments"
    );
    eprint!("{}", opts.usage(&brief));
}

fn parse_escape(value: &str) -> Result<EscapePolicy, CliError> {
    match value {
        "odd" => Ok(EscapePolicy::OddBackslashRun),
        "single" => Ok(EscapePolicy::PrecedingBackslash),
        _ => Err(CliError::InvalidEscape(value.to_string())),
    }
}

fn parse_unterminated(value: &str) -> Result<UnterminatedLiteral, CliError> {
    match value {
        "copy" => Ok(UnterminatedLiteral::CopyRest),
        "code" => Ok(UnterminatedLiteral::ResumeAsCode),
        _ => Err(CliError::InvalidUnterminated(value.to_string())),
    }
}

fn parse_args(args: &[String], opts: &Options) -> Result<Invocation, CliError> {
    let matches = opts.parse(args)?;

    if matches.opt_present("h") {
        return Ok(Invocation::Help);
    }
    if matches.opt_present("V") {
        return Ok(Invocation::Version);
    }

    let mut options = ScanOptions::new();
    if let Some(value) = matches.opt_str("escape") {
        options = options.escape(parse_escape(&value)?);
    }
    if let Some(value) = matches.opt_str("unterminated") {
        options = options.unterminated(parse_unterminated(&value)?);
    }

    let write = matches.opt_present("w");
    let mut free = matches.free.into_iter();
    let command = match free.next().as_deref() {
        Some("strip") => Command::Strip,
        Some("check") => Command::Check,
        Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
        None => return Err(CliError::NoCommand),
    };
    if write && command == Command::Check {
        return Err(CliError::WriteWithCheck);
    }

    let files: Vec<String> = free.collect();
    if files.is_empty() {
        return Err(CliError::NoFiles);
    }

    Ok(Invocation::Run(Config {
        command,
        write,
        options,
        files,
    }))
}

fn run(config: &Config) -> ExitCode {
    let scanner = Scanner::new(config.options);
    let mut stdout = io::stdout().lock();
    let mut had_error = false;

    for path in &config.files {
        tracing::debug!(%path, command = ?config.command, "processing file");

        let lines = match read_lines(path) {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
                continue;
            }
        };

        let stripped = scanner.strip_lines(&lines);
        if stripped.in_block_comment {
            tracing::warn!(%path, "file ends inside an unterminated block comment");
        }

        match config.command {
            Command::Strip if config.write => {
                if let Err(e) = write_lines(path, &trim_trailing(&stripped.lines)) {
                    eprintln!("{e}");
                    had_error = true;
                }
            }
            Command::Strip => {
                let text = join_lines(&trim_trailing(&stripped.lines));
                if let Err(e) = stdout.write_all(text.as_bytes()) {
                    eprintln!("stdout: {e}");
                    return ExitCode::FAILURE;
                }
            }
            Command::Check => {
                if stripped.lines == lines {
                    eprintln!("{path}: clean");
                } else {
                    eprintln!("{path}: has comments");
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("cstrip", String::as_str);
    let opts = get_opts();

    match parse_args(args.get(1..).unwrap_or_default(), &opts) {
        Ok(Invocation::Run(config)) => run(&config),
        Ok(Invocation::Help) => {
            print_usage(program, &opts);
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{program} {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            print_usage(program, &opts);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn config(list: &[&str]) -> Config {
        match parse_args(&args(list), &get_opts()) {
            Ok(Invocation::Run(config)) => config,
            Ok(_) => panic!("expected a run invocation for {list:?}"),
            Err(e) => panic!("unexpected error for {list:?}: {e}"),
        }
    }

    #[test]
    fn strip_with_defaults() {
        let config = config(&["strip", "a.c", "b.c"]);
        assert_eq!(config.command, Command::Strip);
        assert!(!config.write);
        assert_eq!(config.options, ScanOptions::default());
        assert_eq!(config.files, vec!["a.c", "b.c"]);
    }

    #[test]
    fn options_anywhere() {
        let config = config(&["check", "--escape", "single", "a.c", "--unterminated=code"]);
        assert_eq!(config.command, Command::Check);
        assert_eq!(config.options.escape, EscapePolicy::PrecedingBackslash);
        assert_eq!(config.options.unterminated, UnterminatedLiteral::ResumeAsCode);
        assert_eq!(config.files, vec!["a.c"]);
    }

    #[test]
    fn write_flag() {
        assert!(config(&["strip", "-w", "a.c"]).write);
    }

    #[test]
    fn help_and_version() {
        assert!(matches!(
            parse_args(&args(&["--help"]), &get_opts()),
            Ok(Invocation::Help)
        ));
        assert!(matches!(
            parse_args(&args(&["-V"]), &get_opts()),
            Ok(Invocation::Version)
        ));
    }

    #[test]
    fn usage_errors() {
        let opts = get_opts();
        assert!(matches!(parse_args(&args(&[]), &opts), Err(CliError::NoCommand)));
        assert!(matches!(
            parse_args(&args(&["strip"]), &opts),
            Err(CliError::NoFiles)
        ));
        assert!(matches!(
            parse_args(&args(&["lint", "a.c"]), &opts),
            Err(CliError::UnknownCommand(c)) if c == "lint"
        ));
        assert!(matches!(
            parse_args(&args(&["strip", "--escape", "even", "a.c"]), &opts),
            Err(CliError::InvalidEscape(v)) if v == "even"
        ));
        assert!(matches!(
            parse_args(&args(&["strip", "--unterminated", "drop", "a.c"]), &opts),
            Err(CliError::InvalidUnterminated(v)) if v == "drop"
        ));
        assert!(matches!(
            parse_args(&args(&["strip", "--bogus", "a.c"]), &opts),
            Err(CliError::Parsing(_))
        ));
        assert!(matches!(
            parse_args(&args(&["check", "--write", "a.c"]), &opts),
            Err(CliError::WriteWithCheck)
        ));
    }

    // -----------------------------------------------------------
    // Running commands against files.
    // -----------------------------------------------------------

    fn source_file(dir: &Path, name: &str, text: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, text).expect("write source");
        path.display().to_string()
    }

    fn run_on(command: Command, write: bool, files: Vec<String>) -> ExitCode {
        run(&Config {
            command,
            write,
            options: ScanOptions::default(),
            files,
        })
    }

    #[test]
    fn check_clean_files_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = source_file(dir.path(), "a.c", "int x;\n");
        let b = source_file(dir.path(), "b.c", "char *s = \"// kept\";\n");
        assert_eq!(run_on(Command::Check, false, vec![a, b]), ExitCode::SUCCESS);
    }

    #[test]
    fn check_fails_when_a_file_has_comments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = source_file(dir.path(), "a.c", "int x; // c\n");
        let b = source_file(dir.path(), "b.c", "int y;\n");
        assert_eq!(run_on(Command::Check, false, vec![a, b]), ExitCode::FAILURE);
    }

    #[test]
    fn check_leaves_files_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = "int x; /* c */\n";
        let a = source_file(dir.path(), "a.c", text);
        assert_eq!(run_on(Command::Check, false, vec![a.clone()]), ExitCode::FAILURE);
        assert_eq!(fs::read_to_string(&a).expect("read"), text);
    }

    #[test]
    fn strip_write_rewrites_in_place() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = source_file(
            dir.path(),
            "a.c",
            "/* header\n * text */\nint x; /* c */\n  y(\"/*\"); // d\n",
        );
        assert_eq!(run_on(Command::Strip, true, vec![a.clone()]), ExitCode::SUCCESS);
        assert_eq!(
            fs::read_to_string(&a).expect("read"),
            "\n\nint x;\n  y(\"/*\");\n"
        );
    }

    #[test]
    fn strip_write_is_stable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = source_file(dir.path(), "a.c", "x = 1;   // one\ny = 2; /* two */\n");
        assert_eq!(run_on(Command::Strip, true, vec![a.clone()]), ExitCode::SUCCESS);
        let first = fs::read_to_string(&a).expect("read");
        assert_eq!(run_on(Command::Strip, true, vec![a.clone()]), ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&a).expect("read"), first);
        assert_eq!(first, "x = 1;\ny = 2;\n");
    }

    #[test]
    fn unreadable_file_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.c").display().to_string();
        let a = source_file(dir.path(), "a.c", "int x; // c\n");
        assert_eq!(
            run_on(Command::Strip, true, vec![missing, a.clone()]),
            ExitCode::FAILURE
        );
        assert_eq!(fs::read_to_string(&a).expect("read"), "int x;\n");
    }

    #[test]
    fn strip_to_stdout_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = source_file(dir.path(), "a.c", "int x; // c\n");
        assert_eq!(run_on(Command::Strip, false, vec![a.clone()]), ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&a).expect("read"), "int x; // c\n");
    }
}
