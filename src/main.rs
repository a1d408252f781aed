mod cli;

use std::io::BufRead;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use cyclechronicles::audit::{AuditSink, CsvFileSink, TracingSink};
use cyclechronicles::config::ShopConfig;
use cyclechronicles::session::{Script, Session, Step, demo_steps};
use cyclechronicles::ui::OutcomePrinter;
use cyclechronicles::Shop;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ShopConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.audit_log {
        config.audit_log = Some(path);
    }
    if let Some(max) = cli.max_pending {
        config.max_pending = max as usize;
    }
    config.validate()?;

    let printer = OutcomePrinter::new();

    match cli.command {
        Command::Run { script } => {
            let script = Script::from_path(&script)?;
            let mut session = Session::new(build_shop(&config));
            for step in script.steps {
                printer.print(&session.apply(step));
            }
            printer.print_report(&session.report());
        }
        Command::Shell => {
            let mut session = Session::new(build_shop(&config));
            run_shell(&mut session, &printer)?;
            printer.print_report(&session.report());
        }
        Command::Demo => {
            println!("Running the drop-off to pickup walk-through...");
            let mut session = Session::new(build_shop(&config));
            for step in demo_steps() {
                printer.print(&session.apply(step));
            }
            printer.print_report(&session.report());
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_shop(config: &ShopConfig) -> Shop {
    let mut sinks: Vec<Box<dyn AuditSink>> = vec![Box::new(TracingSink)];
    if let Some(path) = &config.audit_log {
        sinks.push(Box::new(CsvFileSink::new(path)));
    }
    Shop::with_policy(config.policy()).with_audit(sinks)
}

fn run_shell(session: &mut Session, printer: &OutcomePrinter) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }
        match trimmed.parse::<Step>() {
            Ok(step) => printer.print(&session.apply(step)),
            Err(e) => eprintln!("  {e}"),
        }
    }
    Ok(())
}
