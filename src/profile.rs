//! # Connection Profiles
//!
//! Profiles are INI sections describing where queries go and who is asking:
//!
//! ```ini
//! [default]
//! host = https://analytics.example.com
//! query_path = /api/docs/query
//! schema_path = /api/docs/query/schema.json
//! sites = example.com, shop.example.com
//! site = shop.example.com
//! api_key = 0123456789abcdef
//! clipboard = system
//! ```
//!
//! A profile with credentials (`api_key`, or `user` and `password`) is
//! considered logged in.

use crate::config::{DEFAULT_HOST, DEFAULT_QUERY_PATH, DEFAULT_SCHEMA_PATH};
use crate::panel::context::SessionSites;
use anyhow::{anyhow, bail, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ini::{Ini, Properties};
use std::path::Path;

/// Credentials sent with every query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    Basic {
        user: String,
        password: Option<String>,
    },
}

impl Credentials {
    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::ApiKey(key) => format!("Bearer {key}"),
            Credentials::Basic { user, password } => {
                let pair = format!("{}:{}", user, password.as_deref().unwrap_or(""));
                format!("Basic {}", STANDARD.encode(pair))
            }
        }
    }
}

/// Where copied text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    #[default]
    System,
    Memory,
}

impl std::str::FromStr for ClipboardMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "system" => Ok(ClipboardMode::System),
            "memory" => Ok(ClipboardMode::Memory),
            other => Err(anyhow!("Unknown clipboard mode '{other}' (use system or memory)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelProfile {
    pub name: String,
    pub host: String,
    pub query_path: String,
    /// `None` disables schema validation
    pub schema_path: Option<String>,
    pub sites: Vec<String>,
    pub site: Option<String>,
    pub credentials: Option<Credentials>,
    pub clipboard: ClipboardMode,
}

impl PanelProfile {
    /// Profile with defaults and no credentials
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: DEFAULT_HOST.to_string(),
            query_path: DEFAULT_QUERY_PATH.to_string(),
            schema_path: Some(DEFAULT_SCHEMA_PATH.to_string()),
            sites: Vec::new(),
            site: None,
            credentials: None,
            clipboard: ClipboardMode::default(),
        }
    }

    /// Load profile `name` from the INI file at `path` (`~` is expanded).
    ///
    /// A missing file or section yields a blank profile.
    pub fn load(name: &str, path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).into_owned();
        tracing::debug!("Loading profile '{}' from '{}'", name, expanded);

        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' not found, using blank profile", expanded);
            return Ok(Self::blank(name));
        }

        let ini = Ini::load_from_file(&expanded)
            .map_err(|e| anyhow!("Failed to read profile file '{expanded}': {e}"))?;
        Self::from_ini(name, &ini)
    }

    /// Parse profile `name` from INI text
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let ini = Ini::load_from_str(text).map_err(|e| anyhow!("Invalid profile file: {e}"))?;
        Self::from_ini(name, &ini)
    }

    fn from_ini(name: &str, ini: &Ini) -> Result<Self> {
        match ini.section(Some(name)) {
            Some(section) => Self::from_section(name, section),
            None => {
                tracing::debug!("Profile '{}' not found, using blank profile", name);
                Ok(Self::blank(name))
            }
        }
    }

    fn from_section(name: &str, section: &Properties) -> Result<Self> {
        let mut profile = Self::blank(name);
        let value = |key: &str| {
            section
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(host) = value("host") {
            if !host.starts_with("http://") && !host.starts_with("https://") {
                bail!("Profile '{name}': host must start with http:// or https://, got '{host}'");
            }
            profile.host = host.trim_end_matches('/').to_string();
        }
        if let Some(path) = value("query_path") {
            profile.query_path = path;
        }
        if let Some(raw) = section.get("schema_path") {
            let raw = raw.trim();
            profile.schema_path = (!raw.is_empty()).then(|| raw.to_string());
        }
        if let Some(sites) = value("sites") {
            profile.sites = sites
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        profile.site = value("site");
        profile.credentials = match (value("api_key"), value("user")) {
            (Some(key), _) => Some(Credentials::ApiKey(key)),
            (None, Some(user)) => Some(Credentials::Basic {
                user,
                password: value("password"),
            }),
            (None, None) => None,
        };
        if let Some(mode) = value("clipboard") {
            profile.clipboard = mode.parse()?;
        }

        Ok(profile)
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_some()
    }

    /// Absolute URL queries are posted to
    pub fn query_url(&self) -> String {
        join_url(&self.host, &self.query_path)
    }

    /// Absolute URL of the query schema, when validation is enabled
    pub fn schema_url(&self) -> Option<String> {
        self.schema_path
            .as_deref()
            .map(|path| join_url(&self.host, path))
    }

    /// Build the session for this profile, preferring `site_override`
    pub fn session(&self, site_override: Option<&str>) -> SessionSites {
        if !self.is_logged_in() {
            return SessionSites::logged_out();
        }
        let selected = site_override
            .map(str::to_string)
            .or_else(|| self.site.clone());
        SessionSites::logged_in(self.sites.clone(), selected)
    }
}

fn join_url(host: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::context::SiteContext;
    use std::io::Write;

    const PROFILE: &str = r#"
[default]
host = https://analytics.example.com/
sites = a.com, b.com ,
site = b.com
api_key = secret

[basic]
user = alice
password = wonderland
schema_path =
clipboard = memory
"#;

    #[test]
    fn should_parse_full_section() {
        let profile = PanelProfile::parse("default", PROFILE).unwrap();

        assert_eq!(profile.host, "https://analytics.example.com");
        assert_eq!(profile.sites, vec!["a.com", "b.com"]);
        assert_eq!(profile.site.as_deref(), Some("b.com"));
        assert_eq!(profile.credentials, Some(Credentials::ApiKey("secret".into())));
        assert_eq!(
            profile.query_url(),
            "https://analytics.example.com/api/docs/query"
        );
        assert_eq!(
            profile.schema_url().as_deref(),
            Some("https://analytics.example.com/api/docs/query/schema.json")
        );
    }

    #[test]
    fn should_parse_basic_credentials_and_disable_schema() {
        let profile = PanelProfile::parse("basic", PROFILE).unwrap();

        assert_eq!(
            profile.credentials,
            Some(Credentials::Basic {
                user: "alice".into(),
                password: Some("wonderland".into())
            })
        );
        assert_eq!(profile.schema_url(), None);
        assert_eq!(profile.clipboard, ClipboardMode::Memory);
    }

    #[test]
    fn should_fall_back_to_blank_profile_for_missing_section() {
        let profile = PanelProfile::parse("missing", PROFILE).unwrap();
        assert_eq!(profile, PanelProfile::blank("missing"));
        assert!(!profile.is_logged_in());
    }

    #[test]
    fn should_reject_host_without_scheme() {
        let result = PanelProfile::parse("x", "[x]\nhost = example.com\n");
        assert!(result.unwrap_err().to_string().contains("http://"));
    }

    #[test]
    fn should_reject_unknown_clipboard_mode() {
        let result = PanelProfile::parse("x", "[x]\nclipboard = carrier-pigeon\n");
        assert!(result.is_err());
    }

    #[test]
    fn should_load_from_file_and_tolerate_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PROFILE.as_bytes()).unwrap();

        let path = file.path().to_string_lossy().to_string();
        let profile = PanelProfile::load("default", &path).unwrap();
        assert!(profile.is_logged_in());

        let missing = PanelProfile::load("default", "/nonexistent/apiline/profile").unwrap();
        assert_eq!(missing, PanelProfile::blank("default"));
    }

    #[test]
    fn authorization_headers_should_encode_credentials() {
        assert_eq!(
            Credentials::ApiKey("k".into()).authorization_header(),
            "Bearer k"
        );
        assert_eq!(
            Credentials::Basic {
                user: "alice".into(),
                password: Some("wonderland".into())
            }
            .authorization_header(),
            "Basic YWxpY2U6d29uZGVybGFuZA=="
        );
    }

    #[test]
    fn session_should_honor_site_override_and_login_state() {
        let profile = PanelProfile::parse("default", PROFILE).unwrap();
        assert_eq!(profile.session(None).selected_site(), "b.com");
        assert_eq!(profile.session(Some("a.com")).selected_site(), "a.com");

        let blank = PanelProfile::blank("default");
        assert!(!blank.session(Some("a.com")).is_logged_in());
    }
}
