use tracing::error;
use tracing_subscriber::EnvFilter;

use hcctl::{
    cli::{Cli, Commands, parse_args},
    config::Config,
    daemon::{StartOutcome, StopOutcome, Supervisor},
    error::SupervisorError,
    status::StatusManager,
};

fn main() {
    let args = parse_args();
    init_logging(&args);

    let config = Config::from_cli(&args);
    let supervisor = Supervisor::new(config.clone());

    // Operational failures are reported on stdout but never change the exit
    // code; only invalid usage exits non-zero (handled in parse_args).
    match &args.command {
        Commands::Start => {
            report_start(&config, supervisor.start());
        }
        Commands::Stop { .. } => {
            report_stop(&config, supervisor.stop());
        }
        Commands::Restart { .. } => {
            let (stop, start) = supervisor.restart();
            report_stop(&config, stop);
            report_start(&config, start);
        }
        Commands::Status { json, no_color } => {
            let (state, pid) = supervisor.status();
            StatusManager::new(*json, *no_color).report(&config.program, state, pid);
        }
    }
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn report_start(config: &Config, result: Result<StartOutcome, SupervisorError>) {
    let program = &config.program;
    match result {
        Ok(StartOutcome::Started) => println!("Started {program}"),
        Ok(StartOutcome::AlreadyRunning(pid)) => {
            println!("{program} is already running (PID {pid})");
        }
        Ok(StartOutcome::Failed(Some(code))) => {
            println!("Failed to start {program} (exit code {code})");
        }
        Ok(StartOutcome::Failed(None)) => {
            println!("Failed to start {program} (terminated by signal)");
        }
        Err(err) => {
            error!("Start failed: {err}");
            println!("Failed to start {program}");
        }
    }
}

fn report_stop(config: &Config, result: Result<StopOutcome, SupervisorError>) {
    let program = &config.program;
    match result {
        Ok(StopOutcome::Stopped) => println!("Stopped {program}"),
        Ok(StopOutcome::AlreadyStopped) => println!("{program} is already stopped"),
        Ok(StopOutcome::TimedOut) => {
            println!(
                "{program} did not exit within {:?}; it may still be running",
                config.stop_timeout
            );
        }
        Err(err) => {
            error!("Stop failed: {err}");
            println!("Failed to stop {program}");
        }
    }
}
