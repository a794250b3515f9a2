// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use candy_app::{AppCommand, AppState};
use config::Config;
use runtime::{DatasetSource, LoaderRuntime};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `candy --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_path = logging::init()?;
    info!(log = %log_path.display(), config = %options.config_path.display(), "starting");

    let source = if options.demo {
        DatasetSource::Bundled
    } else {
        let url = options.url.as_deref().unwrap_or(config.source_url());
        let client = candy_fetch::Client::new(url, config.source_timeout()?).with_context(|| {
            format!(
                "invalid [source] config in {}; fix url/timeout values",
                options.config_path.display()
            )
        })?;
        info!(url = client.url(), timeout = ?client.timeout(), "dataset source");
        DatasetSource::Remote(client)
    };
    if options.check_only {
        return Ok(());
    }

    let mut state = AppState {
        legend: config.show_legend().into(),
        ..AppState::default()
    };

    if options.print_view {
        match source.load() {
            Ok(dataset) => {
                state.dispatch(AppCommand::DataLoaded(dataset));
            }
            Err(error) => warn!("dataset fetch failed: {error:#}"),
        }
        let screen = candy_tui::present(&state);
        println!(
            "{}",
            serde_json::to_string_pretty(&screen).context("encode view as JSON")?
        );
        return Ok(());
    }

    let mut runtime = LoaderRuntime::new(source);
    candy_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    url: Option<String>,
    print_config_path: bool,
    print_example: bool,
    print_view: bool,
    demo: bool,
    check_only: bool,
    show_help: bool,
}

impl CliOptions {
    fn switch(&mut self, flag: &str) -> Option<&mut bool> {
        let slot = match flag {
            "--print-config-path" => &mut self.print_config_path,
            "--print-example-config" => &mut self.print_example,
            "--print-view" => &mut self.print_view,
            "--demo" => &mut self.demo,
            "--check" => &mut self.check_only,
            "--help" | "-h" => &mut self.show_help,
            _ => return None,
        };
        Some(slot)
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        ..CliOptions::default()
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let flag = arg.as_ref();
        match flag {
            "--config" => {
                options.config_path = PathBuf::from(flag_value(&mut iter, flag, "a file path")?);
            }
            "--url" => {
                options.url = Some(flag_value(&mut iter, flag, "a dataset URL")?);
            }
            _ => match options.switch(flag) {
                Some(enabled) => *enabled = true,
                None => bail!(
                    "unknown argument {flag:?}; run with --help to see supported options"
                ),
            },
        }
    }

    Ok(options)
}

fn flag_value<S: AsRef<str>>(
    iter: &mut impl Iterator<Item = S>,
    flag: &str,
    expected: &str,
) -> Result<String> {
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {expected}"))
}

fn print_help() {
    println!("candy: candy power ranking table viewer");
    println!("  --config <path>          Use a specific config path");
    println!("  --url <url>              Fetch the dataset from this URL instead of [source].url");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --print-view             Load the dataset and print the view as JSON");
    println!("  --demo                   Use the bundled sample dataset instead of fetching");
    println!("  --check                  Validate config and startup dependencies");
    println!("  --help                   Show this help");
}
