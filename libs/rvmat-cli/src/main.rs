//! # rvmat
//!
//! Command-line surface over the `rvmat` library.
//!
//! ```text
//! rvmat fmt <input> [-o <output>] [--indent <n>] [--strict] [--case-sensitive] [--no-comments]
//! rvmat check <input>... [--game-root <dir>] [--no-file-check] [--exclude <pattern>]... [--textures]
//! rvmat dump <input>
//! ```

use clap::{Arg, ArgMatches, Command};
use log::{debug, error, info, warn, LevelFilter};
use rvmat::{FormatOptions, Material, ParseOptions, TextureValidateOptions, ValidateOptions};
use std::io::Write;
use thiserror::Error;

const PROG_NAME: &str = env!("CARGO_PKG_NAME");
const PROG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Material { path: String, source: rvmat::Error },

    #[error("invalid indent width '{0}'")]
    Indent(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// COMMAND LINE
// =============================================================================

fn cli() -> Command<'static> {
    let input = Arg::new("input").required(true).help("Material file to read");
    let parse_flags = [
        Arg::new("strict")
            .long("strict")
            .help("Reject malformed numbers instead of reading them as 0"),
        Arg::new("case-sensitive")
            .long("case-sensitive")
            .help("Match known field names exactly"),
        Arg::new("no-comments")
            .long("no-comments")
            .help("Treat '//' and '/*' as errors"),
    ];

    Command::new(PROG_NAME)
        .about("Formatter and validator for RVMAT material files")
        .version(PROG_VERSION)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .global(true)
                .help("Increase log verbosity"),
        )
        .subcommands([
            Command::new("fmt")
                .about("Rewrite a material in canonical form")
                .arg(input.clone())
                .args(parse_flags.clone())
                .args([
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .takes_value(true)
                        .help("Output file (stdout when omitted)"),
                    Arg::new("indent")
                        .long("indent")
                        .takes_value(true)
                        .help("Spaces per nesting level, at least 1 (default 4)"),
                ]),
            Command::new("check")
                .about("Validate one or more materials")
                .arg(input.multiple_values(true).help("Material files to validate"))
                .args(parse_flags.clone())
                .args([
                    Arg::new("game-root")
                        .long("game-root")
                        .takes_value(true)
                        .help("Root that texture paths are resolved against; enables file checks"),
                    Arg::new("no-file-check")
                        .long("no-file-check")
                        .requires("game-root")
                        .help("Resolve against the game root without checking that files exist"),
                    Arg::new("exclude")
                        .long("exclude")
                        .takes_value(true)
                        .multiple_occurrences(true)
                        .help("Texture path exempt from file checks (trailing '*' for a prefix)"),
                    Arg::new("textures")
                        .long("textures")
                        .help("Also check procedural texture expressions"),
                ]),
            Command::new("dump")
                .about("Print the parsed material as JSON")
                .arg(Arg::new("input").required(true).help("Material file to read"))
                .args(parse_flags),
        ])
}

fn verbosity_level(occurrences: u64) -> LevelFilter {
    match occurrences {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn parse_options(args: &ArgMatches) -> ParseOptions {
    ParseOptions {
        case_insensitive: !args.is_present("case-sensitive"),
        allow_comments: !args.is_present("no-comments"),
        relaxed_numbers: !args.is_present("strict"),
    }
}

fn format_options(args: &ArgMatches) -> Result<FormatOptions, CliError> {
    let indent = match args.value_of("indent") {
        Some(width) => match width.parse::<usize>() {
            Ok(spaces) if spaces > 0 => " ".repeat(spaces),
            _ => return Err(CliError::Indent(width.to_string())),
        },
        None => String::new(),
    };
    Ok(FormatOptions { indent })
}

fn validate_options(args: &ArgMatches) -> ValidateOptions {
    let mut options = match args.value_of("game-root") {
        Some(root) => ValidateOptions::with_game_root(root),
        None => ValidateOptions::default(),
    };
    if args.is_present("no-file-check") {
        options.file_check = Some(false);
    }
    options.exclude_paths = args
        .values_of("exclude")
        .map(|values| values.map(str::to_string).collect())
        .unwrap_or_default();
    options
}

fn read(path: &str, options: &ParseOptions) -> Result<Material, CliError> {
    rvmat::decode_file(path, options).map_err(|source| CliError::Material {
        path: path.to_string(),
        source,
    })
}

// =============================================================================
// SUBCOMMANDS
// =============================================================================

fn fmt(args: &ArgMatches) -> Result<bool, CliError> {
    let input = args.value_of("input").unwrap_or_default();
    let material = read(input, &parse_options(args))?;
    let options = format_options(args)?;

    let written = match args.value_of("output") {
        Some(output) => rvmat::encode_file(output, &material, &options),
        None => rvmat::encode(std::io::stdout().lock(), &material, &options),
    };
    written.map_err(|source| CliError::Material {
        path: args.value_of("output").unwrap_or("<stdout>").to_string(),
        source,
    })?;
    info!("formatted {}", input);
    Ok(true)
}

fn check(args: &ArgMatches) -> Result<bool, CliError> {
    let parse = parse_options(args);
    let validate = validate_options(args);
    let textures = args
        .is_present("textures")
        .then(TextureValidateOptions::default);

    if validate.file_check_enabled() && !validate.game_root_exists() {
        warn!("game root {} is not a directory", validate.game_root);
    }

    let mut clean = true;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for input in args.values_of("input").into_iter().flatten() {
        let material = match read(input, &parse) {
            Ok(material) => material,
            Err(e) => {
                error!("{}", e);
                clean = false;
                continue;
            }
        };

        let issues = rvmat::validate_with_textures(&material, &validate, textures.as_ref());
        debug!("{}: {} issues", input, issues.len());
        for issue in &issues {
            writeln!(out, "{}: {}", input, issue)?;
        }
        if issues.iter().any(|issue| issue.is_error()) {
            clean = false;
        }
    }
    Ok(clean)
}

fn dump(args: &ArgMatches) -> Result<bool, CliError> {
    let input = args.value_of("input").unwrap_or_default();
    let material = read(input, &parse_options(args))?;
    let json = serde_json::to_string_pretty(&material)?;
    println!("{}", json);
    Ok(true)
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn run() -> i32 {
    let matches = cli().get_matches();

    env_logger::Builder::new()
        .filter_level(verbosity_level(matches.occurrences_of("verbose")))
        .parse_default_env()
        .init();

    let result = match matches.subcommand() {
        Some(("fmt", args)) => fmt(args),
        Some(("check", args)) => check(args),
        Some(("dump", args)) => dump(args),
        _ => Ok(true),
    };

    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}

fn main() {
    std::process::exit(run());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn subcommand(argv: &[&str]) -> ArgMatches {
        let matches = cli().try_get_matches_from(argv).expect("valid command line");
        let (_, args) = matches.subcommand().expect("subcommand");
        args.clone()
    }

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(verbosity_level(0), LevelFilter::Error);
        assert_eq!(verbosity_level(2), LevelFilter::Info);
        assert_eq!(verbosity_level(9), LevelFilter::Trace);
    }

    #[test]
    fn test_parse_flags() {
        let args = subcommand(&["rvmat", "fmt", "a.rvmat", "--strict", "--no-comments"]);
        let options = parse_options(&args);
        assert!(!options.relaxed_numbers);
        assert!(!options.allow_comments);
        assert!(options.case_insensitive);
    }

    #[test]
    fn test_indent_width() {
        let args = subcommand(&["rvmat", "fmt", "a.rvmat", "--indent", "2"]);
        assert_eq!(format_options(&args).expect("indent").indent, "  ");

        let args = subcommand(&["rvmat", "fmt", "a.rvmat", "--indent", "wide"]);
        assert!(matches!(format_options(&args), Err(CliError::Indent(_))));

        let args = subcommand(&["rvmat", "fmt", "a.rvmat", "--indent", "0"]);
        assert!(matches!(format_options(&args), Err(CliError::Indent(w)) if w == "0"));
    }

    #[test]
    fn test_check_options() {
        let args = subcommand(&[
            "rvmat",
            "check",
            "a.rvmat",
            "b.rvmat",
            "--game-root",
            "P:\\",
            "--exclude",
            "dz\\*",
            "--exclude",
            "a3\\*",
        ]);
        let options = validate_options(&args);
        assert!(options.file_check_enabled());
        assert_eq!(options.exclude_paths, vec!["dz\\*", "a3\\*"]);
        assert_eq!(args.values_of("input").map(|v| v.count()), Some(2));

        let args = subcommand(&["rvmat", "check", "a.rvmat"]);
        assert!(!validate_options(&args).file_check_enabled());

        let args = subcommand(&[
            "rvmat",
            "check",
            "a.rvmat",
            "--game-root",
            "P:\\",
            "--no-file-check",
        ]);
        let options = validate_options(&args);
        assert_eq!(options.game_root, "P:\\");
        assert!(!options.file_check_enabled());
    }
}
