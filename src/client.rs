use std::io::{self, Write};

use log::{debug, error, info};
use reqwest::blocking::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::{Deserialize, Serialize};

use crate::configuration::{ClientOptions, Configuration};
use crate::error::Error;
use crate::formatter::{FormattedMessage, Formatter};

/// HTTP client for communicating with the Telegram API
pub struct Client {
    client: ReqwestClient,
    base_url: String,
}

/// Response from the Telegram API
#[derive(Debug, Deserialize)]
pub struct Response {
    /// Whether the request was successful; absent means false
    #[serde(default)]
    pub ok: bool,
    /// Response description
    pub description: Option<String>,
    /// Response result
    pub result: Option<serde_json::Value>,
}

/// Form body of a `sendMessage` call
#[derive(Debug, Serialize)]
struct SendMessageParams<'a> {
    parse_mode: &'a str,
    chat_id: &'a str,
    text: &'a str,
    disable_notification: bool,
}

impl Client {
    /// Create a client with a custom base URL or timeout
    pub fn with_options(options: ClientOptions) -> Result<Self, Error> {
        let client = ReqwestClient::builder().timeout(options.timeout).build()?;

        Ok(Client {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Validate, format and send the notification described by `config`
    pub fn send(&self, config: &Configuration) -> Result<Response, Error> {
        config.validate()?;

        let message = Formatter::format(config);
        self.send_message(config, &message)
    }

    /// Send an already formatted message
    pub fn send_message(
        &self,
        config: &Configuration,
        message: &FormattedMessage,
    ) -> Result<Response, Error> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, config.api_key());

        let params = SendMessageParams {
            parse_mode: message.parse_mode.as_str(),
            chat_id: config.recipient(),
            text: &message.text,
            disable_notification: config.silent(),
        };

        info!("Sending message to chat {}", config.recipient());

        let response = self.client.post(&url).form(&params).send().map_err(|e| {
            error!("HTTP request failed: {}", e);
            Error::Http(e.without_url())
        })?;

        self.handle_response(response, config.log_response())
    }

    /// Check the API envelope of a response
    fn handle_response(
        &self,
        response: ReqwestResponse,
        log_response: bool,
    ) -> Result<Response, Error> {
        debug!("Received response with status code: {}", response.status());

        let body = response.text().map_err(|e| {
            error!("Failed to read response body: {}", e);
            Error::Body(e.without_url())
        })?;

        Self::check_response(&body, log_response, &mut io::stdout().lock())
    }

    /// Check a raw response body, echoing it to `out` when `log_response` is
    /// set and the API reported success
    pub fn check_response<W: Write>(
        body: &str,
        log_response: bool,
        out: &mut W,
    ) -> Result<Response, Error> {
        let telegram_response = Self::parse_response(body)?;

        if log_response {
            writeln!(out, "Response: {}", body)?;
        }

        Ok(telegram_response)
    }

    /// Decode a raw response body and check its `ok` flag
    pub fn parse_response(body: &str) -> Result<Response, Error> {
        let telegram_response: Response = serde_json::from_str(body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            Error::Decode(e)
        })?;

        if !telegram_response.ok {
            let description = telegram_response
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());

            error!("Telegram API returned error: {}", description);
            return Err(Error::api(description));
        }

        info!("Request was successful (ok=true)");
        Ok(telegram_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        let response = Client::parse_response(r#"{"ok":true,"result":{"message_id":1}}"#).unwrap();
        assert!(response.ok);
        assert!(response.result.is_some());
    }

    #[test]
    fn test_parse_api_error() {
        let err = Client::parse_response(r#"{"ok":false,"description":"bad request"}"#).unwrap_err();
        assert!(matches!(err, Error::Api(ref d) if d == "bad request"));
        assert_eq!(err.to_string(), "Telegram API error: bad request");
    }

    #[test]
    fn test_parse_api_error_without_description() {
        let err = Client::parse_response(r#"{"ok":false}"#).unwrap_err();
        assert_eq!(err.to_string(), "Telegram API error: Unknown error");

        let err = Client::parse_response(r#"{"ok":false,"description":""}"#).unwrap_err();
        assert_eq!(err.to_string(), "Telegram API error: Unknown error");
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = Client::parse_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_parse_missing_ok_is_api_error() {
        let err = Client::parse_response(r#"{"description":"x"}"#).unwrap_err();
        assert!(matches!(err, Error::Api(ref d) if d == "x"));
    }

    #[test]
    fn test_echo_on_success() {
        let body = r#"{"ok":true,"result":{"message_id":3}}"#;
        let mut out = Vec::new();

        Client::check_response(body, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("Response: {}\n", body));
    }

    #[test]
    fn test_no_echo_without_log_flag() {
        let mut out = Vec::new();

        Client::check_response(r#"{"ok":true}"#, false, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_echo_on_api_error() {
        let mut out = Vec::new();

        let body = r#"{"ok":false,"description":"chat not found"}"#;
        let err = Client::check_response(body, true, &mut out).unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        assert!(out.is_empty());

        let err = Client::check_response("not json", true, &mut out).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_client_without_timeout() {
        let options = ClientOptions {
            timeout: None,
            ..Default::default()
        };
        assert!(Client::with_options(options).is_ok());
    }

    #[test]
    fn test_form_encoding() {
        let params = SendMessageParams {
            parse_mode: "markdown",
            chat_id: "42",
            text: "a b\nc",
            disable_notification: true,
        };
        let encoded = form_body(&params);
        assert_eq!(
            encoded,
            "parse_mode=markdown&chat_id=42&text=a+b%0Ac&disable_notification=true"
        );
    }

    fn form_body(params: &SendMessageParams<'_>) -> String {
        let request = ReqwestClient::new()
            .post("http://localhost/")
            .form(params)
            .build()
            .unwrap();
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }
}
