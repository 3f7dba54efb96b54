use anyhow::Result;
use batcurl::cli::{build_executor, command, run_options, verbosity};
use batcurl::execute::run;
use batcurl::logging::init_tracing;
use std::io::Write;

fn main() -> Result<()> {
    let matches = command().get_matches();
    init_tracing(verbosity(&matches))?;

    let options = run_options(&matches);
    let mut stdout = std::io::stdout().lock();
    let status = match build_executor(&matches) {
        Ok(executor) => run(&options, executor.as_ref(), &mut stdout),
        Err(err) => {
            writeln!(stdout, "ERROR: {:#}", err)?;
            // same status as a client that cannot be started
            if options.strict_exit { 3 } else { 0 }
        }
    };
    stdout.flush()?;
    if status != 0 {
        std::process::exit(status);
    }
    return Ok(());
}
