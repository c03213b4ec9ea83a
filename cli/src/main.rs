use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use todo_cli::{app, runtime, Args, Settings, UreqTransport};
use todo_core::{Canceller, TodoClient, TodoController};

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let rt = match runtime::build() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("error: starting runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    match runtime::run_to_completion(rt, run(args)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let mut settings = Settings::load(&args.config)
        .with_context(|| format!("loading settings from {}", args.config))?;
    settings.apply_overrides(&args);
    log::debug!("using {settings:?}");

    let transport = UreqTransport::new(settings.request_timeout());
    let mut controller = TodoController::with_config(
        TodoClient::new(&settings.server.base_url),
        transport,
        settings.controller_config(),
    );
    spawn_interrupt_handler(controller.canceller());

    let mut stdout = std::io::stdout();
    app::execute(&mut controller, args.command, &mut stdout).await
}

/// First Ctrl-C aborts the request in flight; the second exits.
fn spawn_interrupt_handler(canceller: Canceller) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        canceller.cancel();
        eprintln!("interrupted; press Ctrl-C again to quit");
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}
