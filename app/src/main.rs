use std::process::ExitCode;

use clap::Parser;
use controlscope_app::{output, run, Cli};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    controlscope_app::init_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let json = cli.json;
    match runtime.block_on(run(cli)) {
        Ok(out) => {
            print!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprint!("{}", output::render_error(json, &err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
