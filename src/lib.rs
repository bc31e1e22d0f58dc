/*!
 * tnotify - A small command line tool for sending Telegram notifications via bots
 *
 * This library formats a single message (title, icon, markdown or HTML) and
 * sends it to a chat through the Bot API `sendMessage` endpoint.
 */

pub mod cli;
pub mod client;
pub mod configuration;
pub mod error;
pub mod formatter;

/// The main entry point for the tnotify library.
pub struct Notifier;

impl Notifier {
    /// Validate `config` and send it as one message.
    ///
    /// Validation happens before the HTTP client is built, so a request with a
    /// missing recipient, key or text never touches the network.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tnotify::{ClientOptions, Configuration, IconPreset, Notifier};
    ///
    /// let config = Configuration::new("123456", "BOT_TOKEN", "Backup done\\nin 3m")
    ///     .with_title("Nightly")
    ///     .with_preset(IconPreset::Success);
    ///
    /// let result = Notifier::send(&config, ClientOptions::default());
    /// ```
    pub fn send(
        config: &configuration::Configuration,
        options: configuration::ClientOptions,
    ) -> Result<client::Response, error::Error> {
        config.validate()?;

        let client = client::Client::with_options(options)?;
        client.send(config)
    }
}

// Re-export main components for easy access
pub use client::{Client, Response};
pub use configuration::{ClientOptions, Configuration, IconPreset, ParseMode};
pub use error::Error;
pub use formatter::{FormattedMessage, Formatter};
