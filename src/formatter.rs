use crate::configuration::{Configuration, ParseMode};
use log::{trace, warn};

/// Message text ready to be sent, with the parse mode it was built for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub text: String,
    pub parse_mode: ParseMode,
    /// Icon code that could not be parsed and was left out
    pub skipped_icon: Option<String>,
}

/// Formatter for Telegram messages
pub struct Formatter;

impl Formatter {
    /// Apply newline decoding, title and icon to the request body.
    ///
    /// An icon that is not a valid hex code point is logged as a warning and
    /// left out; it never fails the message.
    pub fn format(config: &Configuration) -> FormattedMessage {
        trace!("Original message: {}", config.body());

        let parse_mode = config.parse_mode();
        let mut skipped_icon = None;
        let mut text = Self::decode_newlines(config.body());

        if let Some(title) = config.title() {
            text = Self::prepend_title(&text, title, parse_mode);
        }

        if let Some(icon) = config.effective_icon() {
            match Self::parse_icon(icon) {
                Some(glyph) => text = format!("{} {}", glyph, text),
                None => {
                    warn!("{}", Self::icon_warning(icon));
                    skipped_icon = Some(icon.to_string());
                }
            }
        }

        trace!("Formatted message: {}", text);

        FormattedMessage {
            text,
            parse_mode,
            skipped_icon,
        }
    }

    /// Warning logged when an icon code cannot be used
    pub fn icon_warning(icon: &str) -> String {
        format!(
            "Error parsing UTF code {:?} to int - sending message without icon",
            icon
        )
    }

    /// Replace every literal `\n` escape with a line break
    pub fn decode_newlines(text: &str) -> String {
        text.replace("\\n", "\n")
    }

    /// Prepend a bold title followed by a blank line
    pub fn prepend_title(text: &str, title: &str, parse_mode: ParseMode) -> String {
        let (open, close) = parse_mode.bold_markers();
        format!("{}{}{}\n\n{}", open, title, close, text)
    }

    /// Parse a hex code point into the character it names
    pub fn parse_icon(code: &str) -> Option<char> {
        u32::from_str_radix(code, 16).ok().and_then(char::from_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::IconPreset;

    fn request(body: &str) -> Configuration {
        Configuration::new("42", "token", body)
    }

    #[test]
    fn test_plain_body() {
        let message = Formatter::format(&request("hello"));
        assert_eq!(message.text, "hello");
        assert_eq!(message.parse_mode, ParseMode::Markdown);
    }

    #[test]
    fn test_decode_newlines() {
        assert_eq!(Formatter::decode_newlines(r"a\nb\n\nc"), "a\nb\n\nc");
        assert_eq!(Formatter::decode_newlines("no escapes"), "no escapes");
        assert_eq!(Formatter::decode_newlines(r"\n"), "\n");
    }

    #[test]
    fn test_markdown_title() {
        let message = Formatter::format(&request(r"line one\nline two").with_title("Build"));
        assert_eq!(message.text, "*Build*\n\nline one\nline two");
    }

    #[test]
    fn test_html_title() {
        let message = Formatter::format(&request("done").with_title("Build").with_html(true));
        assert_eq!(message.text, "<b>Build</b>\n\ndone");
        assert_eq!(message.parse_mode, ParseMode::Html);
    }

    #[test]
    fn test_title_with_escaped_newline_is_kept_verbatim() {
        let message = Formatter::format(&request("body").with_title(r"a\nb"));
        assert!(message.text.starts_with("*a\\nb*\n\n"));
    }

    #[test]
    fn test_icon_goes_before_title() {
        let message = Formatter::format(
            &request("body")
                .with_title("Deploy")
                .with_preset(IconPreset::Success),
        );
        assert_eq!(message.text, "\u{2705} *Deploy*\n\nbody");
    }

    #[test]
    fn test_explicit_icon() {
        let message = Formatter::format(&request("hi").with_icon("1f600"));
        assert_eq!(message.text, "\u{1F600} hi");
    }

    #[test]
    fn test_warning_and_error_presets_pick_error() {
        let message = Formatter::format(
            &request("hi")
                .with_icon("1F600")
                .with_preset(IconPreset::Warning)
                .with_preset(IconPreset::Error),
        );
        assert_eq!(message.text, "\u{1F6A8} hi");
    }

    #[test]
    fn test_question_preset() {
        let message = Formatter::format(&request("hi").with_preset(IconPreset::Question));
        assert_eq!(message.text, "\u{2753} hi");
    }

    #[test]
    fn test_invalid_icon_is_skipped() {
        let message = Formatter::format(&request("hi").with_icon("not-hex"));
        assert_eq!(message.text, "hi");
        assert_eq!(message.skipped_icon.as_deref(), Some("not-hex"));
        assert_eq!(
            Formatter::icon_warning("not-hex"),
            r#"Error parsing UTF code "not-hex" to int - sending message without icon"#
        );
    }

    #[test]
    fn test_valid_icon_is_not_skipped() {
        let message = Formatter::format(&request("hi").with_icon("2705"));
        assert_eq!(message.skipped_icon, None);

        let message = Formatter::format(&request("hi"));
        assert_eq!(message.skipped_icon, None);
    }

    #[test]
    fn test_parse_icon() {
        assert_eq!(Formatter::parse_icon("26A0"), Some('\u{26A0}'));
        assert_eq!(Formatter::parse_icon("zz"), None);
        assert_eq!(Formatter::parse_icon("0x2705"), None);
        // surrogates and values past U+10FFFF are not characters
        assert_eq!(Formatter::parse_icon("D800"), None);
        assert_eq!(Formatter::parse_icon("110000"), None);
    }
}
