use crate::execute::RunOptions;
use crate::http_request_executor::{CurlExecutor, HttpExecutor, NativeExecutor};
use crate::params::CliRequest;
use anyhow::Result;
use clap::{arg, value_parser, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

pub fn command() -> Command {
    return Command::new("batcurl")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            arg!(-f --file <FILE>)
                .help("JSON file with url, get and post entries")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-u --url <URL>)
                .help("request URL, takes precedence over the JSON file")
                .required(false)
                .value_parser(value_parser!(String)),
        )
        .arg(
            arg!(-g --get <PARAM>)
                .help("GET parameters as key=value")
                .required(false)
                .num_args(0..)
                .value_parser(value_parser!(String))
                .action(ArgAction::Append),
        )
        .arg(
            arg!(-p --post <PARAM>)
                .help("POST parameters as key=value, any of them turns the request into a POST")
                .required(false)
                .num_args(0..)
                .value_parser(value_parser!(String))
                .action(ArgAction::Append),
        )
        .arg(
            arg!(-r --respuesta)
                .help("print the response only")
                .visible_alias("response-only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-o --output <FILE>)
                .help("save the response to this file")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-t --timeout <SECS>)
                .help("give up on the request after this many seconds")
                .required(false)
                .value_parser(parse_timeout),
        )
        .arg(
            arg!(--native)
                .help("use the built-in HTTP client instead of curl")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--curl <PATH>)
                .help("curl binary to run")
                .required(false)
                .default_value("curl")
                .value_parser(value_parser!(String)),
        )
        .arg(
            arg!(--"strict-exit")
                .help("exit with a non-zero status when the request cannot be completed")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --verbose)
                .help("log more, repeat for trace output")
                .action(ArgAction::Count),
        );
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be positive, got {}", value));
    }
    return Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout {}: {}", value, e));
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    return matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
}

pub fn run_options(matches: &ArgMatches) -> RunOptions {
    return RunOptions {
        file: matches.get_one::<PathBuf>("file").cloned(),
        request: CliRequest {
            url: matches.get_one::<String>("url").cloned(),
            get: strings(matches, "get"),
            post: strings(matches, "post"),
        },
        response_only: matches.get_flag("respuesta"),
        output_file: matches.get_one::<PathBuf>("output").cloned(),
        strict_exit: matches.get_flag("strict-exit"),
    };
}

pub fn build_executor(matches: &ArgMatches) -> Result<Box<dyn HttpExecutor>> {
    let timeout = matches.get_one::<Duration>("timeout").copied();
    if matches.get_flag("native") {
        return Ok(Box::new(NativeExecutor::new(timeout)?));
    }
    let program = matches.get_one::<String>("curl").map(String::as_str).unwrap_or("curl");
    return Ok(Box::new(CurlExecutor::new(program, timeout)));
}

pub fn verbosity(matches: &ArgMatches) -> u8 {
    return matches.get_count("verbose");
}
