//! Command line surface of the `tnotify` binary.
//!
//! Flags follow the single-dash convention (`-user 42`, `-text=hello`), with
//! the usual double-dash form accepted as well.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::client::Response;
use crate::configuration::{ClientOptions, Configuration, IconPreset, DEFAULT_TIMEOUT};
use crate::error::Error;
use crate::Notifier;

/// Single-dash long flag, with an optional inline value
static LONG_FLAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-{1,2}([A-Za-z][A-Za-z0-9_-]+)(=.*)?$").unwrap());

/// Flags that take a value in the next argument
const VALUE_FLAGS: &[&str] = &["user", "key", "text", "icon", "title", "timeout"];

/// Boolean flags, which also accept `-flag=true` and `-flag=false`
const BOOL_FLAGS: &[&str] = &[
    "html", "success", "warning", "error", "question", "silent", "log",
];

/// Parse the inline value of a boolean flag the way Go's `strconv.ParseBool` does
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[derive(Parser, Debug)]
#[command(about, version)]
pub struct Opts {
    /// Recipient User or Channel ID
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub user: String,
    /// API Key of your Telegram bot
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub key: String,
    /// Text of the message
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub text: String,
    /// (optional) Icon before title or message text (UTF code)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub icon: String,
    /// (optional) Title displayed in bold between the icon (if provided) and the message text
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub title: String,
    /// (optional) Use html instead of markdown in the message
    #[arg(long)]
    pub html: bool,
    /// (optional) Predefined success icon (overrides -icon argument)
    #[arg(long)]
    pub success: bool,
    /// (optional) Predefined warning icon (overrides -icon argument)
    #[arg(long)]
    pub warning: bool,
    /// (optional) Predefined error icon (overrides -icon argument)
    #[arg(long)]
    pub error: bool,
    /// (optional) Predefined question mark icon (overrides -icon argument)
    #[arg(long)]
    pub question: bool,
    /// (optional) Send message in silent mode (no user notification on the client)
    #[arg(long)]
    pub silent: bool,
    /// (optional) Print the API response to stdout on success
    #[arg(long)]
    pub log: bool,
    /// (optional) Request timeout in seconds, 0 for none
    #[arg(long, default_value_t = DEFAULT_TIMEOUT)]
    pub timeout: u64,
}

impl Opts {
    /// Parse options from raw process arguments, accepting single-dash flags
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Opts::try_parse_from(normalize_args(args))
    }

    /// Build the notification request described by these options
    pub fn configuration(&self) -> Configuration {
        let presets = [
            (self.success, IconPreset::Success),
            (self.warning, IconPreset::Warning),
            (self.error, IconPreset::Error),
            (self.question, IconPreset::Question),
        ];

        let mut config =
            Configuration::new(self.user.as_str(), self.key.as_str(), self.text.as_str())
                .with_title(&self.title)
                .with_icon(&self.icon)
                .with_html(self.html)
                .with_silent(self.silent)
                .with_log_response(self.log);

        for (enabled, preset) in presets {
            if enabled {
                config = config.with_preset(preset);
            }
        }

        config
    }

    /// Transport options; a timeout of 0 disables it
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            ..Default::default()
        }
    }
}

/// Rewrite `-flag` and `-flag=value` into the `--flag` form clap expects.
///
/// Boolean flags given as `-flag=true` become the bare flag and
/// `-flag=false` is dropped. Arguments consumed as the value of a string
/// flag are passed through untouched, as is everything after `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;
    let mut passthrough = false;

    for (index, arg) in args.into_iter().map(Into::into).enumerate() {
        if index == 0 || passthrough || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = LONG_FLAG_REGEX.captures(text).map(|caps| {
            let name = &caps[1];
            let inline_value = caps.get(2).map_or("", |m| m.as_str());
            expects_value = inline_value.is_empty() && VALUE_FLAGS.contains(&name);

            let switch = inline_value
                .strip_prefix('=')
                .filter(|_| BOOL_FLAGS.contains(&name))
                .and_then(parse_bool);

            match switch {
                Some(true) => Some(format!("--{}", name)),
                Some(false) => None,
                None => Some(format!("--{}{}", name, inline_value)),
            }
        });

        match rewritten {
            Some(Some(flag)) => normalized.push(OsString::from(flag)),
            Some(None) => {}
            None => normalized.push(arg),
        }
    }

    normalized
}

/// Validate the options and send the notification
pub fn run(opts: &Opts) -> Result<Response, Error> {
    Notifier::send(&opts.configuration(), opts.client_options())
}

/// Process exit status for the outcome of [`run`]
pub fn exit_status<T>(result: &Result<T, Error>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
