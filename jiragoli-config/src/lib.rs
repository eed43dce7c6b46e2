use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const USER_ENV: &str = "JIRAUSER";
pub const PASSWORD_ENV: &str = "JIRAPASS";
pub const SERVER_ENV: &str = "JIRAURL";
const CONFIG_FILE_ENV: &str = "JIRAGOLI_CONFIG_FILE";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JiragoliConfig {
    pub jira_server: Option<String>,
    pub jira_user: Option<String>,
    pub jira_password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

#[derive(Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    general: RawGeneral,
    jira_server: Option<String>,
    jira_user: Option<String>,
    jira_password: Option<String>,
}

#[derive(Default, Deserialize)]
struct RawGeneral {
    jira_server: Option<String>,
    jira_user: Option<String>,
    jira_password: Option<String>,
}

impl JiragoliConfig {
    /// Environment first, then the config file if one exists.
    pub fn load_default() -> Result<Self> {
        let from_env = Self::from_env_with(|name| env::var(name).ok());
        let path = default_config_path();
        if !path.exists() {
            return Ok(from_env);
        }

        let from_file = Self::load_from_path(&path)?;
        Ok(from_env.or(from_file))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let payload = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let raw: RawConfig =
            serde_yaml::from_str(&payload).with_context(|| "invalid YAML config format")?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            jira_server: lookup(SERVER_ENV).and_then(non_empty),
            jira_user: lookup(USER_ENV).and_then(non_empty),
            jira_password: lookup(PASSWORD_ENV).and_then(non_empty),
        }
    }

    pub fn require_credentials(&self) -> Result<Credentials> {
        match (self.jira_user.as_deref(), self.jira_password.as_deref()) {
            (Some(user), Some(password)) => Ok(Credentials {
                user: user.to_string(),
                password: password.to_string(),
            }),
            _ => Err(anyhow!(
                "both JIRA user and password should be set to auth ({USER_ENV}, {PASSWORD_ENV})"
            )),
        }
    }

    pub fn require_server(&self) -> Result<&str> {
        self.jira_server
            .as_deref()
            .ok_or_else(|| anyhow!("URL for JIRA endpoint needs to be provided ({SERVER_ENV})"))
    }

    fn or(self, fallback: Self) -> Self {
        Self {
            jira_server: self.jira_server.or(fallback.jira_server),
            jira_user: self.jira_user.or(fallback.jira_user),
            jira_password: self.jira_password.or(fallback.jira_password),
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            jira_server: first_some(raw.general.jira_server, raw.jira_server)
                .and_then(non_empty),
            jira_user: first_some(raw.general.jira_user, raw.jira_user).and_then(non_empty),
            jira_password: first_some(raw.general.jira_password, raw.jira_password)
                .and_then(non_empty),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(override_path) = env::var_os(CONFIG_FILE_ENV) {
        return PathBuf::from(override_path);
    }

    let mut base = env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.push(".config");
    base.push("jiragoli");
    base.push("config.yaml");
    base
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn first_some<T>(first: Option<T>, second: Option<T>) -> Option<T> {
    first.or(second)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, fs};

    use tempfile::tempdir;

    use super::JiragoliConfig;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn reads_all_values_from_environment() {
        let config = JiragoliConfig::from_env_with(lookup_from(&[
            ("JIRAUSER", "alice"),
            ("JIRAPASS", "secret"),
            ("JIRAURL", " https://jira.example.com/rest/api/2 "),
        ]));

        assert_eq!(
            config.require_server().expect("server"),
            "https://jira.example.com/rest/api/2"
        );
        let credentials = config.require_credentials().expect("credentials");
        assert_eq!(credentials.user, "alice");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn blank_environment_values_are_missing() {
        let config = JiragoliConfig::from_env_with(lookup_from(&[
            ("JIRAUSER", "alice"),
            ("JIRAPASS", "   "),
        ]));

        let error = config.require_credentials().expect_err("expected error");
        assert!(error
            .to_string()
            .contains("both JIRA user and password should be set"));

        let error = config.require_server().expect_err("expected error");
        assert!(error.to_string().contains("URL for JIRA endpoint"));
    }

    #[test]
    fn parses_general_section_from_yaml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            r#"
general:
  jira_server: https://jira.example.com/rest/api/2
  jira_user: alice
  jira_password: token
"#,
        )
        .expect("write config");

        let config = JiragoliConfig::load_from_path(&path).expect("config");
        assert_eq!(
            config.jira_server.as_deref(),
            Some("https://jira.example.com/rest/api/2")
        );
        assert_eq!(config.jira_user.as_deref(), Some("alice"));
        assert_eq!(config.jira_password.as_deref(), Some("token"));
    }

    #[test]
    fn accepts_top_level_keys_in_yaml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "jira_server: https://jira.example.com\n").expect("write");

        let config = JiragoliConfig::load_from_path(&path).expect("config");
        assert_eq!(
            config.jira_server.as_deref(),
            Some("https://jira.example.com")
        );
        assert!(config.jira_user.is_none());
    }

    #[test]
    fn rejects_invalid_yaml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "general: [unterminated").expect("write");

        let error = JiragoliConfig::load_from_path(&path).expect_err("expected error");
        assert!(error.to_string().contains("invalid YAML"));
    }

    #[test]
    fn environment_takes_precedence_over_file() {
        let from_env = JiragoliConfig::from_env_with(lookup_from(&[("JIRAUSER", "env-user")]));
        let from_file = JiragoliConfig {
            jira_server: Some("https://file.example.com".to_string()),
            jira_user: Some("file-user".to_string()),
            jira_password: Some("file-pass".to_string()),
        };

        let merged = from_env.or(from_file);
        assert_eq!(merged.jira_user.as_deref(), Some("env-user"));
        assert_eq!(merged.jira_password.as_deref(), Some("file-pass"));
        assert_eq!(
            merged.jira_server.as_deref(),
            Some("https://file.example.com")
        );
    }
}
