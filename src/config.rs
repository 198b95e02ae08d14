//! Widget configuration resolved at startup.
//!
//! Sources, highest precedence first:
//! - `?endpoint=` on the page URL (browser builds only)
//! - build-time environment: `ASSISTANT_CHAT_ENDPOINT`, `ASSISTANT_CHAT_ESCAPE_MARKUP`
//! - compiled defaults
//!
//! Blank values count as unset. An endpoint taken from the page query always
//! turns `escape_markup` on: a link can choose the backend, but it cannot make
//! the widget inject that backend's text as raw HTML.
//!
//! [`ChatConfig::resolve`] is strict. [`ChatConfig::load`] falls back one
//! field at a time, so a rejected endpoint never resets the escape switch.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use packets::Endpoint;

use crate::state::chat::GREETING;

/// Host of the backend the widget talks to when nothing else is configured.
pub const DEFAULT_HOST: &str = "ai-chatbot-backend-c0t3.onrender.com";
pub const DEFAULT_TITLE: &str = "Personal AI Assistant";
pub const DEFAULT_STATUS: &str = "● Online";

const ESCAPE_MARKUP_KEY: &str = "ASSISTANT_CHAT_ESCAPE_MARKUP";

/// Page query parameter that overrides the endpoint.
pub const ENDPOINT_QUERY_PARAM: &str = "endpoint";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] packets::CodecError),
    #[error("invalid boolean for {key}: {value:?}")]
    InvalidBool { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    pub endpoint: Endpoint,
    pub title: String,
    pub status: String,
    pub greeting: String,
    /// Escape assistant and user text before applying formatting rules.
    pub escape_markup: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint {
                scheme: "wss",
                authority: DEFAULT_HOST.to_owned(),
                namespace: packets::DEFAULT_NAMESPACE.to_owned(),
            },
            title: DEFAULT_TITLE.to_owned(),
            status: DEFAULT_STATUS.to_owned(),
            greeting: GREETING.to_owned(),
            escape_markup: false,
        }
    }
}

impl ChatConfig {
    /// Build config from raw source values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the chosen endpoint does not parse or the
    /// escape switch is not a recognizable boolean.
    pub fn resolve(
        build_endpoint: Option<&str>,
        build_escape_markup: Option<&str>,
        query_endpoint: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(build_escape_markup) {
            config.escape_markup = parse_bool(ESCAPE_MARKUP_KEY, raw)?;
        }
        if let Some(raw) = non_blank(query_endpoint) {
            config.use_query_endpoint(Endpoint::parse(raw)?);
        } else if let Some(raw) = non_blank(build_endpoint) {
            config.endpoint = Endpoint::parse(raw)?;
        }

        Ok(config)
    }

    /// Like [`resolve`](Self::resolve), but a rejected value only resets its
    /// own field. A rejected query endpoint falls back to the build endpoint.
    pub fn resolve_lenient(
        build_endpoint: Option<&str>,
        build_escape_markup: Option<&str>,
        query_endpoint: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(raw) = non_blank(build_escape_markup) {
            match parse_bool(ESCAPE_MARKUP_KEY, raw) {
                Ok(escape) => config.escape_markup = escape,
                Err(e) => leptos::logging::warn!("chat config: {e}; escaping stays off"),
            }
        }
        if let Some(raw) = non_blank(build_endpoint) {
            match Endpoint::parse(raw) {
                Ok(endpoint) => config.endpoint = endpoint,
                Err(e) => leptos::logging::warn!("chat config: build endpoint rejected, using default: {e}"),
            }
        }
        if let Some(raw) = non_blank(query_endpoint) {
            match Endpoint::parse(raw) {
                Ok(endpoint) => config.use_query_endpoint(endpoint),
                Err(e) => leptos::logging::warn!("chat config: query endpoint ignored: {e}"),
            }
        }

        config
    }

    /// Resolve config for this page.
    pub fn load() -> Self {
        let query = query_endpoint();
        Self::resolve_lenient(
            option_env!("ASSISTANT_CHAT_ENDPOINT"),
            option_env!("ASSISTANT_CHAT_ESCAPE_MARKUP"),
            query.as_deref(),
        )
    }

    fn use_query_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoint = endpoint;
        self.escape_markup = true;
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value: raw.to_owned() }),
    }
}

#[cfg(feature = "csr")]
fn query_endpoint() -> Option<String> {
    let search = match web_sys::window()?.location().search() {
        Ok(search) => search,
        Err(e) => {
            leptos::logging::warn!("page query unavailable: {e:?}");
            return None;
        }
    };
    match web_sys::UrlSearchParams::new_with_str(&search) {
        Ok(params) => params.get(ENDPOINT_QUERY_PARAM),
        Err(e) => {
            leptos::logging::warn!("page query unparsable: {e:?}");
            None
        }
    }
}

#[cfg(not(feature = "csr"))]
fn query_endpoint() -> Option<String> {
    None
}
