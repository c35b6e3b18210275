mod args;
mod command;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use driftform_lib::endpoint::{HttpEndpoint, MockConfig, MockEndpoint, SubmitEndpoint};
use driftform_lib::rules::{RandomRuleSource, RuleFeed, RuleSourceConfig};
use driftform_lib::{EngineConfig, FormEngine, SubmitOutcome};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use crate::args::Args;
use crate::command::Command;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.log_level);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
    }
}

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Could not create log file {}: {}", path.display(), e),
    }
}

fn build_endpoint(args: &Args) -> Arc<dyn SubmitEndpoint> {
    match &args.endpoint {
        Some(url) => {
            log::info!("submitting to {url}");
            Arc::new(
                HttpEndpoint::new(url.clone())
                    .with_timeout(Duration::from_secs(args.http_timeout)),
            )
        }
        None => {
            let mut config =
                MockConfig::default().with_transport_failure_rate(args.transport_failure_rate);
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            Arc::new(MockEndpoint::new(config))
        }
    }
}

async fn run(args: Args) -> std::io::Result<()> {
    let feed = RuleFeed::default();
    let cancel = CancellationToken::new();

    if args.rule_interval > 0 {
        let mut config =
            RuleSourceConfig::default().with_interval(Duration::from_secs(args.rule_interval));
        if let Some(seed) = args.seed {
            config = config.with_seed(seed.wrapping_add(1));
        }
        RandomRuleSource::new(config).spawn(feed.clone(), cancel.clone());
    }

    let engine = FormEngine::with_shared_endpoint(
        EngineConfig::default().with_initial_rules(feed.current()),
        build_endpoint(&args),
    );
    engine.follow_rules(feed.subscribe());

    let mut views = engine.subscribe();
    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            println!("\n{}", render::render(&view));
        }
    });

    println!("{}\n\n{}", command::HELP, render::render(&engine.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Ok(Command::Set(field, value)) => engine.update_field(field, value),
            Ok(Command::Submit) => {
                let engine = engine.clone();
                tokio::spawn(async move { report(engine.submit().await) });
            }
            Ok(Command::Show) => println!("{}", render::render(&engine.view())),
            Ok(Command::Rules) => println!("Current rules: {}", engine.rules()),
            Ok(Command::Help) => println!("{}", command::HELP),
            Ok(Command::Quit) => break,
            Err(command::CommandError::Empty) => {}
            Err(e) => println!("{}", e),
        }
    }

    cancel.cancel();
    Ok(())
}

fn report(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Ignored => println!("A submission is already in flight."),
        SubmitOutcome::Blocked(errors) => {
            println!("Fix {} field(s) before submitting.", errors.len())
        }
        SubmitOutcome::Succeeded(_) | SubmitOutcome::Rejected(_) => {}
        SubmitOutcome::TransportFailed(message) => log::debug!("submission ended with: {message}"),
    }
}
