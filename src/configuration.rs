use crate::error::Error;
use std::fmt;
use std::time::Duration;

/// Default Telegram Bot API host
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Parse mode understood by the `sendMessage` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Legacy markdown, bold is `*text*`
    #[default]
    Markdown,
    /// HTML, bold is `<b>text</b>`
    Html,
}

impl ParseMode {
    /// Value sent as the `parse_mode` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "markdown",
            ParseMode::Html => "html",
        }
    }

    /// Opening and closing bold markers for this mode
    pub fn bold_markers(&self) -> (&'static str, &'static str) {
        match self {
            ParseMode::Markdown => ("*", "*"),
            ParseMode::Html => ("<b>", "</b>"),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predefined icons, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPreset {
    Success,
    Warning,
    Error,
    Question,
}

impl IconPreset {
    /// Presets in override order; a later preset wins over an earlier one.
    pub const ORDER: [IconPreset; 4] = [
        IconPreset::Success,
        IconPreset::Warning,
        IconPreset::Error,
        IconPreset::Question,
    ];

    /// Hex code point of the preset glyph
    pub fn code(&self) -> &'static str {
        match self {
            IconPreset::Success => "2705",
            IconPreset::Warning => "26A0",
            IconPreset::Error => "1F6A8",
            IconPreset::Question => "2753",
        }
    }
}

/// A single notification request, built once from the command line
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Recipient user or channel ID
    recipient: String,
    /// Bot API key, substituted into the request path
    api_key: String,
    /// Raw message text, may contain escaped `\n`
    body: String,
    /// Optional bold title
    title: Option<String>,
    /// Optional hex code point of an icon
    icon: Option<String>,
    /// Enabled icon presets
    presets: Vec<IconPreset>,
    /// Markdown or HTML
    parse_mode: ParseMode,
    /// Send without a client notification
    silent: bool,
    /// Print the raw API response on success
    log_response: bool,
}

impl Configuration {
    /// Create a request for `recipient` using bot `api_key`
    pub fn new<S: Into<String>>(recipient: S, api_key: S, body: S) -> Self {
        Configuration {
            recipient: recipient.into(),
            api_key: api_key.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Set the title; an empty title is the same as none
    pub fn with_title<S: AsRef<str>>(mut self, title: S) -> Self {
        let title = title.as_ref();
        self.title = (!title.is_empty()).then(|| title.to_string());
        self
    }

    /// Set the icon code point; an empty icon is the same as none
    pub fn with_icon<S: AsRef<str>>(mut self, icon: S) -> Self {
        let icon = icon.as_ref();
        self.icon = (!icon.is_empty()).then(|| icon.to_string());
        self
    }

    /// Enable an icon preset
    pub fn with_preset(mut self, preset: IconPreset) -> Self {
        if !self.presets.contains(&preset) {
            self.presets.push(preset);
        }
        self
    }

    /// Switch between markdown and HTML formatting
    pub fn with_html(mut self, html: bool) -> Self {
        self.parse_mode = if html {
            ParseMode::Html
        } else {
            ParseMode::Markdown
        };
        self
    }

    /// Send in silent mode
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Print the raw API response on success
    pub fn with_log_response(mut self, log_response: bool) -> Self {
        self.log_response = log_response;
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn log_response(&self) -> bool {
        self.log_response
    }

    /// Whether `preset` was enabled
    pub fn has_preset(&self, preset: IconPreset) -> bool {
        self.presets.contains(&preset)
    }

    /// Icon code point after presets are applied.
    ///
    /// Presets override the explicit icon and are applied in
    /// [`IconPreset::ORDER`], so with both `Warning` and `Error` enabled the
    /// result is `Error`'s code point.
    pub fn effective_icon(&self) -> Option<&str> {
        IconPreset::ORDER
            .iter()
            .fold(self.icon(), |icon, preset| {
                if self.has_preset(*preset) {
                    Some(preset.code())
                } else {
                    icon
                }
            })
    }

    /// Validate the request before anything is sent
    pub fn validate(&self) -> Result<(), Error> {
        if self.recipient.is_empty() {
            return Err(Error::missing_flag(
                "-user is mandatory (user or channel ID)",
            ));
        }
        if self.api_key.is_empty() {
            return Err(Error::missing_flag("-key is mandatory"));
        }
        if self.body.is_empty() {
            return Err(Error::missing_flag("-text is mandatory"));
        }
        Ok(())
    }
}

/// HTTP client options for API requests
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Scheme and host of the Bot API
    pub base_url: String,
    /// Request timeout, `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT)),
        }
    }
}
