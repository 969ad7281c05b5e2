use crate::options::{CliOptions, FormulaFormat, OutputFormat, SubcommandOption};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use git_version::git_version;

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_VERSION: &str = git_version!(fallback = "unknown");

/// Define and parse command line arguments
pub fn parse_arguments() -> Result<CliOptions, String> {
    let version_text = format!("{} ({})", VERSION, GIT_VERSION);
    let string = AUTHORS.replace(':', "\n");
    let app = App::new(PKG_NAME)
        .version(version_text.as_str())
        .author(string.as_str())
        .arg(
            Arg::with_name("log_filter")
                .short("l")
                .long("log-filter")
                .env("RUST_LOG")
                .default_value("warn")
                .global(true)
                .help("Comma separated list of filter directives"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .about("Checks an ATL formula in the states of a turn-based game")
                .add_positional_model_path_arg()
                .add_positional_formula_arg()
                .add_formula_format_arg()
                .add_state_arg()
                .add_max_depth_arg()
                .add_quiet_arg()
                .add_threads_arg(),
        )
        .subcommand(
            SubCommand::with_name("parse")
                .about("Parses an ATL formula and prints it in canonical form")
                .add_positional_formula_arg()
                .add_formula_format_arg()
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .takes_value(false)
                        .help("Print the formula as JSON instead"),
                ),
        )
        .setting(AppSettings::SubcommandRequiredElseHelp);

    let arg_matches = app.get_matches();

    setup_tracing(&arg_matches)?;

    let mut options = CliOptions::default();
    match arg_matches.subcommand() {
        ("check", Some(args)) => {
            options.subcommand = SubcommandOption::Check;
            options.quiet = args.is_present("quiet");
            options.model_path = required_value(args, "model_path")?;
            options.formula_path = required_value(args, "formula_path")?;
            options.formula_explicit_format = parse_formula_format_arg(args)?;
            options.state = args.value_of("state").map(|s| s.to_string());
            options.threads = parse_threads_arg(args)?;
            options.max_depth = parse_max_depth_arg(args)?;
        }
        ("parse", Some(args)) => {
            options.subcommand = SubcommandOption::Parse;
            options.formula_path = required_value(args, "formula_path")?;
            options.formula_explicit_format = parse_formula_format_arg(args)?;
            if args.is_present("json") {
                options.output_format = OutputFormat::Json;
            }
        }
        _ => unreachable!("Unhandled subcommand"),
    }

    Ok(options)
}

/// Clap enforces required arguments, so this only fails if an argument was misnamed
fn required_value(args: &ArgMatches, name: &str) -> Result<String, String> {
    args.value_of(name)
        .map(|s| s.to_string())
        .ok_or_else(|| format!("Missing argument '{}'", name))
}

/// Parse the formula format argument if given (either "json" or "atl")
fn parse_formula_format_arg(args: &ArgMatches) -> Result<Option<FormulaFormat>, String> {
    match args.value_of("formula_format") {
        Some("json") => Ok(Some(FormulaFormat::Json)),
        Some("atl") => Ok(Some(FormulaFormat::Atl)),
        Some(other) => Err(format!("Invalid formula format '{}' specified with --formula-format. Use either \"atl\" or \"json\" [inferred if unspecified].", other)),
        None => Ok(None),
    }
}

/// Parse the threads argument if given. Default is the number of CPUs.
fn parse_threads_arg(args: &ArgMatches) -> Result<usize, String> {
    let threads = args
        .value_of("threads")
        .map_or_else(|| Ok(num_cpus::get()), |v| v.parse())
        .map_err(|err| format!("Invalid number of threads. {}", err))?;
    if threads == 0 {
        return Err("The number of threads must be a positive integer".to_string());
    }
    Ok(threads)
}

/// Parse the max depth argument if given. The engine's default is used otherwise.
fn parse_max_depth_arg(args: &ArgMatches) -> Result<Option<usize>, String> {
    args.value_of("max_depth")
        .map(|v| v.parse::<usize>())
        .transpose()
        .map_err(|err| format!("Invalid max depth. {}", err))
}

fn setup_tracing(args: &ArgMatches) -> Result<(), String> {
    // Configure a filter for tracing data if one have been set
    if let Some(filter) = args.value_of("log_filter") {
        let filter = tracing_subscriber::EnvFilter::try_new(filter)
            .map_err(|err| format!("Invalid log filter.\n{}", err))?;
        tracing_subscriber::fmt().with_env_filter(filter).init()
    } else {
        tracing_subscriber::fmt().init()
    }
    Ok(())
}

/// Trait that allows us to easily add common arguments to the CLI, avoiding duplicate code while
/// remaining flexible in terms of which subcommands have which arguments
pub(crate) trait CommonArgs {
    fn add_positional_model_path_arg(self) -> Self;
    fn add_positional_formula_arg(self) -> Self;
    fn add_formula_format_arg(self) -> Self;
    fn add_state_arg(self) -> Self;
    fn add_max_depth_arg(self) -> Self;
    fn add_quiet_arg(self) -> Self;
    fn add_threads_arg(self) -> Self;
}

/// Add the common arguments to clap::App
impl CommonArgs for App<'_, '_> {
    /// Adds model path as required positional argument
    fn add_positional_model_path_arg(self) -> Self {
        self.arg(
            Arg::with_name("model_path")
                .help("Path to input model (JSON)")
                .required(true),
        )
    }

    /// Adds formula path as a required positional argument
    fn add_positional_formula_arg(self) -> Self {
        self.arg(
            Arg::with_name("formula_path")
                .help("Path to input formula")
                .required(true),
        )
    }

    /// Adds "--formula-format" as an optional argument
    fn add_formula_format_arg(self) -> Self {
        self.arg(
            Arg::with_name("formula_format")
                .long("formula-format")
                .takes_value(true)
                .help("The format of the input formula {{json, atl}}"),
        )
    }

    /// Adds "-s"/"--state" as an argument
    fn add_state_arg(self) -> Self {
        self.arg(
            Arg::with_name("state")
                .short("s")
                .long("state")
                .takes_value(true)
                .help("Name of the state to check the formula in [default is every state]"),
        )
    }

    /// Adds "--max-depth" as an argument
    fn add_max_depth_arg(self) -> Self {
        self.arg(
            Arg::with_name("max_depth")
                .long("max-depth")
                .takes_value(true)
                .help("Give up if the recursion gets deeper than this"),
        )
    }

    /// Adds "-q"/"--quiet" as an argument
    fn add_quiet_arg(self) -> Self {
        self.arg(
            Arg::with_name("quiet")
                .short("q")
                .takes_value(false)
                .long("quiet")
                .help("Suppress stdout"),
        )
    }

    /// Adds "-n"/"--threads" as an argument
    fn add_threads_arg(self) -> Self {
        self.arg(
            Arg::with_name("threads")
                .short("n")
                .long("threads")
                .takes_value(true)
                .help("Number of threads to use"),
        )
    }
}
