//! Profile configuration persistence and client construction.

use std::path::PathBuf;
use std::time::Duration;
use std::{fmt, fs};

use layer_api::{Client, ConnectionReuse, Error};

use super::Cli;

/// Base configuration directory for all profiles.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("layer-cli")
}

/// Path of a named profile file.
pub fn profile_path(name: &str) -> PathBuf {
    config_dir().join(format!("{name}.conf"))
}

/// Persistent per-profile settings stored as `<name>.conf`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub token: Option<String>,
    pub app_id: Option<String>,
    pub version: Option<String>,
    pub api_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl ProfileConfig {
    /// Load a profile. A missing file yields empty settings.
    pub fn load(profile: &str) -> layer_api::Result<Self> {
        let path = profile_path(profile);
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Configuration(format!(
                "load {}: {e}",
                path.display()
            ))),
        }
    }

    /// Parse `key=value` lines. Unknown keys and blank lines are ignored.
    pub fn parse(text: &str) -> layer_api::Result<Self> {
        let mut cfg = Self::default();
        for line in text.lines() {
            let Some((k, v)) = line.trim().split_once('=') else {
                continue;
            };
            let v = v.trim();
            if v.is_empty() {
                continue;
            }
            match k.trim() {
                "token" => cfg.token = Some(v.to_owned()),
                "app_id" => cfg.app_id = Some(v.to_owned()),
                "version" => cfg.version = Some(v.to_owned()),
                "api_url" => cfg.api_url = Some(v.to_owned()),
                "timeout_ms" => {
                    let ms = v
                        .parse()
                        .map_err(|e| Error::Configuration(format!("timeout_ms: {e}")))?;
                    cfg.timeout_ms = Some(ms);
                }
                _ => {}
            }
        }
        Ok(cfg)
    }

    /// Save to `<config_dir>/<profile>.conf`.
    pub fn save(&self, profile: &str) -> layer_api::Result<()> {
        let dir = config_dir();
        fs::create_dir_all(&dir).map_err(|e| Error::Configuration(format!("mkdir: {e}")))?;
        fs::write(profile_path(profile), self.to_string())
            .map_err(|e| Error::Configuration(format!("write config: {e}")))
    }

    /// Overlay command-line / environment values onto the saved ones.
    #[must_use]
    pub fn merged(mut self, cli: &Cli) -> Self {
        if cli.token.is_some() {
            self.token.clone_from(&cli.token);
        }
        if cli.app_id.is_some() {
            self.app_id.clone_from(&cli.app_id);
        }
        if cli.api_version.is_some() {
            self.version.clone_from(&cli.api_version);
        }
        if cli.api_url.is_some() {
            self.api_url.clone_from(&cli.api_url);
        }
        if cli.timeout_ms.is_some() {
            self.timeout_ms = cli.timeout_ms;
        }
        self
    }

    /// Build a client from these settings.
    pub fn client(&self, debug: bool) -> layer_api::Result<Client> {
        let mut b = Client::builder()
            .token(self.token.clone().unwrap_or_default())
            .app_id(self.app_id.clone().unwrap_or_default())
            .connection_reuse(ConnectionReuse::default())
            .debug(debug);
        if let Some(v) = &self.version {
            b = b.version(v);
        }
        if let Some(u) = &self.api_url {
            b = b.api_url(u);
        }
        if let Some(ms) = self.timeout_ms {
            b = b.timeout(Duration::from_millis(ms));
        }
        b.build()
    }

    /// Copy with the token masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut c = self.clone();
        if let Some(t) = &c.token {
            let tail: String = t.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            c.token = Some(format!("****{tail}"));
        }
        c
    }
}

impl fmt::Display for ProfileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("token", self.token.clone()),
            ("app_id", self.app_id.clone()),
            ("version", self.version.clone()),
            ("api_url", self.api_url.clone()),
            ("timeout_ms", self.timeout_ms.map(|ms| ms.to_string())),
        ];
        for (k, v) in fields {
            if let Some(v) = v {
                writeln!(f, "{k}={v}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_text() {
        let cfg = ProfileConfig {
            token: Some("abc".into()),
            app_id: Some("24f43c32-4d95-11e4-b3a2-0fd00000020d".into()),
            version: None,
            api_url: Some("http://localhost:9000".into()),
            timeout_ms: Some(2500),
        };
        assert_eq!(ProfileConfig::parse(&cfg.to_string()).expect("parse"), cfg);
    }

    #[test]
    fn ignores_unknown_and_blank_values() {
        let cfg = ProfileConfig::parse("# comment\nfoo=bar\ntoken=\n  app_id = x \n").expect("parse");
        assert_eq!(cfg.token, None);
        assert_eq!(cfg.app_id.as_deref(), Some("x"));
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(ProfileConfig::parse("timeout_ms=soon").is_err());
    }

    #[test]
    fn redacts_token() {
        let cfg = ProfileConfig {
            token: Some("secret-token-1234".into()),
            ..ProfileConfig::default()
        };
        assert_eq!(cfg.redacted().token.as_deref(), Some("****1234"));
    }

    #[test]
    fn client_requires_token_and_app_id() {
        let err = ProfileConfig::default().client(false).expect_err("empty");
        assert!(matches!(err, Error::Configuration(_)));
    }
}
