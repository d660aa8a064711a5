// SPDX-License-Identifier: MPL-2.0
use matrix_notify::app::{self, Flags};
use matrix_notify::application::port::{NotificationSink, OutgoingNotification, RequestOutcome};
use matrix_notify::cli::{Cli, Mode, USAGE};
use matrix_notify::client::{ClientOptions, NotifyClient};
use matrix_notify::config::{self, Config};
use matrix_notify::domain::Notification;
use matrix_notify::error::Result;
use matrix_notify::infrastructure::{ChannelSink, ConsoleSink, HttpApi};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    if std::env::args().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    init_tracing();

    let cli = match Cli::from_env() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "matrix-notify failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "matrix_notify=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config_path {
        Some(path) => config::load_from_path(path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                tracing::warn!("{warning}");
            }
            config
        }
    };
    cli.apply(&mut config);
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let api = Arc::new(HttpApi::new(Duration::from_secs(
        config.service.request_timeout_secs(),
    ))?);
    let options = ClientOptions::from(&config.service);
    let autostart = config.service.autostart;

    match cli.mode {
        Mode::Window => {
            let (sink, inbox) = ChannelSink::channel();
            let client = NotifyClient::new(api, Arc::new(sink), options);
            app::run(Flags {
                client,
                inbox,
                autostart,
                theme_mode: config.display.theme,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Headless => {
            let sink: Arc<dyn NotificationSink> =
                Arc::new(ConsoleSink::stdout(config.display.format));
            let client = NotifyClient::new(api, sink, options);
            runtime()?.block_on(app::headless::run(client, autostart))?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Test => {
            let client = NotifyClient::new(api, Arc::new(|_: &Notification| {}), options);
            let outcome = runtime()?.block_on(client.test());
            Ok(report(outcome))
        }
        Mode::Send {
            message,
            level,
            source,
            user,
        } => {
            let mut notification = OutgoingNotification::new(level, message);
            if let Some(source) = source {
                notification = notification.with_source(source);
            }
            if let Some(user) = user {
                notification = notification.with_user(user);
            }
            let client = NotifyClient::new(api, Arc::new(|_: &Notification| {}), options);
            let outcome = runtime()?.block_on(client.send(notification));
            Ok(report(outcome))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Prints a one-shot response and maps it to the exit status.
fn report(outcome: RequestOutcome) -> ExitCode {
    let ok = outcome.is_ok();
    println!("{}", outcome.into_json());
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
