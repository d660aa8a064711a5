// SPDX-License-Identifier: MPL-2.0
//! Command-line arguments.
//!
//! Flags override the matching `settings.toml` values for this run only.

use crate::config::{Config, OutputFormat, TransportPreference};
use crate::domain::Level;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
matrix-notify - toast client for the notification service

USAGE:
    matrix-notify [OPTIONS]

OPTIONS:
    -b, --base <URL>           Service origin (default: http://127.0.0.1:5069)
    -t, --transport <MODE>     auto | sse | polling
        --no-autostart         Wait for an explicit start
        --headless             Print toasts to stdout instead of opening a window
        --format <FORMAT>      Headless output: text | html
        --theme <THEME>        Window theme: light | dark | system
    -c, --config <FILE>        Read settings from FILE
        --test                 Ask the service for a test notification and exit
        --send <MESSAGE>       Publish a notification and exit
        --level <LEVEL>        Level for --send (default: info)
        --source <SOURCE>      Source label for --send
        --user <USER>          User label for --send
    -h, --help                 Print this help
";

/// What the process should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Open the toast window.
    Window,
    /// Print toasts to standard output.
    Headless,
    /// Request a test notification, print the response, exit.
    Test,
    /// Publish one notification, print the response, exit.
    Send {
        message: String,
        level: Level,
        source: Option<String>,
        user: Option<String>,
    },
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub mode: Mode,
    pub base: Option<String>,
    pub transport: Option<TransportPreference>,
    pub no_autostart: bool,
    pub format: Option<OutputFormat>,
    pub theme: Option<ThemeMode>,
    pub config_path: Option<PathBuf>,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for unknown flags or invalid values.
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    /// Parses an explicit argument list (without the program name).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for unknown flags or invalid values.
    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let base: Option<String> = args.opt_value_from_str(["-b", "--base"])?;
        let transport = args
            .opt_value_from_fn(["-t", "--transport"], |value| {
                TransportPreference::from_name(value)
                    .ok_or_else(|| format!("unknown transport `{value}`"))
            })?;
        let no_autostart = args.contains("--no-autostart");
        let headless = args.contains("--headless");
        let format = args.opt_value_from_fn("--format", |value| {
            OutputFormat::from_name(value).ok_or_else(|| format!("unknown format `{value}`"))
        })?;
        let theme = args.opt_value_from_fn("--theme", |value| {
            ThemeMode::from_name(value).ok_or_else(|| format!("unknown theme `{value}`"))
        })?;
        let config_path: Option<PathBuf> = args.opt_value_from_os_str(["-c", "--config"], |value| {
            Ok::<_, String>(PathBuf::from(value))
        })?;
        let test = args.contains("--test");
        let send: Option<String> = args.opt_value_from_str("--send")?;
        let level = args
            .opt_value_from_fn("--level", |value| {
                Level::ALL
                    .into_iter()
                    .find(|level| level.as_str().eq_ignore_ascii_case(value.trim()))
                    .ok_or_else(|| format!("unknown level `{value}`"))
            })?
            .unwrap_or(Level::Info);
        let source: Option<String> = args.opt_value_from_str("--source")?;
        let user: Option<String> = args.opt_value_from_str("--user")?;

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(Error::Usage(format!(
                "unexpected arguments: {}",
                rest.iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ")
            )));
        }

        let mode = match (send, test, headless) {
            (Some(_), true, _) => {
                return Err(Error::Usage("--send and --test are exclusive".to_string()));
            }
            (Some(message), false, _) => Mode::Send {
                message,
                level,
                source,
                user,
            },
            (None, true, _) => Mode::Test,
            (None, false, true) => Mode::Headless,
            (None, false, false) => Mode::Window,
        };

        Ok(Self {
            mode,
            base,
            transport,
            no_autostart,
            format,
            theme,
            config_path,
        })
    }

    /// Applies the flags on top of the loaded settings.
    pub fn apply(&self, config: &mut Config) {
        if let Some(base) = &self.base {
            config.service.base_url = Some(base.clone());
        }
        if let Some(transport) = self.transport {
            config.service.transport = transport;
        }
        if self.no_autostart {
            config.service.autostart = false;
        }
        if let Some(format) = self.format {
            config.display.format = format;
        }
        if let Some(theme) = self.theme {
            config.display.theme = theme;
        }
    }
}
