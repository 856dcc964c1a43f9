use std::path::PathBuf;

use clap::{
    Arg, ArgAction, ArgMatches, Command, command, crate_authors, crate_description, crate_name,
    crate_version, value_parser,
};

use crate::constants::{
    ALWAYS_WRITE_HELP, CONFIG_HELP, DRY_RUN_HELP, LOG_FILE_DEFAULT, LOG_FILE_HELP,
    ON_COLLISION_HELP, PARALLEL_HELP, QUIET_HELP, ROOT_HELP, SKIP_HELP, VERBOSE_HELP,
};
use crate::logging::LogLevel;

/// Builds the command-line interface
///
/// Defines the following arguments:
/// - `root`: Output directory to process
/// - `config`: Path to the configuration file
/// - `dry`: Log planned changes without touching any files
/// - `verbose` / `quiet`: Verbosity level
/// - `log_file`: Additional log file
/// - `on_collision`, `always_write`, `parallel`, `skip`: Configuration overrides
pub fn build_command() -> Command {
    let arg_root = Arg::new("root")
        .help(ROOT_HELP)
        .value_parser(value_parser!(PathBuf));

    // define arg for reading from a specific config file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .value_parser(value_parser!(PathBuf));

    // define arg for dry run
    let arg_dry = Arg::new("dry")
        .short('n')
        .long("dry-run")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count)
        .conflicts_with("quiet");

    let arg_quiet = Arg::new("quiet")
        .short('q')
        .long("quiet")
        .help(QUIET_HELP)
        .action(ArgAction::SetTrue);

    // define arg for log file
    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .default_value(LOG_FILE_DEFAULT);

    let arg_on_collision = Arg::new("on_collision")
        .long("on-collision")
        .help(ON_COLLISION_HELP)
        .value_parser(["overwrite", "error"]);

    let arg_always_write = Arg::new("always_write")
        .long("always-write")
        .help(ALWAYS_WRITE_HELP)
        .action(ArgAction::SetTrue);

    let arg_parallel = Arg::new("parallel")
        .long("parallel")
        .help(PARALLEL_HELP)
        .action(ArgAction::SetTrue);

    let arg_skip = Arg::new("skip")
        .long("skip")
        .help(SKIP_HELP)
        .value_parser(["prettify", "normalize", "rewrite"])
        .action(ArgAction::Append);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_root)
        .arg(arg_config)
        .arg(arg_dry)
        .arg(arg_verbose)
        .arg(arg_quiet)
        .arg(arg_log_file)
        .arg(arg_on_collision)
        .arg(arg_always_write)
        .arg(arg_parallel)
        .arg(arg_skip)
}

/// Parses the process arguments
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the verbosity level from the command-line arguments
///
/// `--quiet` wins; otherwise every `-v` raises the level by one step.
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    if matches.get_flag("quiet") {
        return LogLevel::Error;
    }
    LogLevel::from_occurrences(matches.get_count("verbose"))
}

/// Gets the log file path, empty when file logging is off
pub fn get_log_file(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("log_file")
        .cloned()
        .unwrap_or_else(|| LOG_FILE_DEFAULT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        build_command()
            .try_get_matches_from(std::iter::once("postbuild").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_is_consistent() {
        build_command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let matches = parse(&[]);

        assert!(matches.get_one::<PathBuf>("root").is_none());
        assert!(!matches.get_flag("dry"));
        assert_eq!(get_verbosity(&matches), LogLevel::Info);
        assert_eq!(get_log_file(&matches), "");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(get_verbosity(&parse(&["-v"])), LogLevel::Debug);
        assert_eq!(get_verbosity(&parse(&["-vv"])), LogLevel::Trace);
        assert_eq!(get_verbosity(&parse(&["--quiet"])), LogLevel::Error);
    }

    #[test]
    fn test_overrides() {
        let matches = parse(&[
            "public",
            "--on-collision",
            "error",
            "--skip",
            "prettify",
            "--skip",
            "rewrite",
            "--parallel",
        ]);

        assert_eq!(
            matches.get_one::<PathBuf>("root"),
            Some(&PathBuf::from("public"))
        );
        assert_eq!(
            matches.get_one::<String>("on_collision").map(String::as_str),
            Some("error")
        );
        let skipped: Vec<&String> = matches.get_many::<String>("skip").unwrap().collect();
        assert_eq!(skipped, vec!["prettify", "rewrite"]);
        assert!(matches.get_flag("parallel"));
    }

    #[test]
    fn test_rejects_unknown_pass() {
        let result = build_command().try_get_matches_from(["postbuild", "--skip", "minify"]);
        assert!(result.is_err());
    }
}
