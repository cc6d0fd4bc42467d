//! Configuration loading for Folio.
//!
//! Two sources feed the startup inputs:
//!
//! - `~/.folio/config.toml` (optional; a missing file is not an error)
//! - environment overrides, which take precedence
//!
//! ```toml
//! [app]
//! id = "default-app-id"
//! initial_auth_token = "${FOLIO_AUTH_TOKEN}"
//!
//! [firebase]
//! apiKey = "${FIREBASE_API_KEY}"
//! projectId = "my-project"
//!
//! [endpoints]
//! auth = "https://identitytoolkit.googleapis.com"
//! firestore = "https://firestore.googleapis.com"
//! ```
//!
//! String values may reference environment variables with `${VAR}`.

mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

use std::{
    env, fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use folio_types::{AppId, FirebaseConfig};

/// JSON object with the Firebase web configuration.
pub const ENV_FIREBASE_CONFIG: &str = "FOLIO_FIREBASE_CONFIG";
pub const ENV_APP_ID: &str = "FOLIO_APP_ID";
pub const ENV_INITIAL_AUTH_TOKEN: &str = "FOLIO_INITIAL_AUTH_TOKEN";
/// `host:port` of a local auth emulator, same convention as the Firebase SDKs.
pub const ENV_AUTH_EMULATOR_HOST: &str = "FIREBASE_AUTH_EMULATOR_HOST";
/// `host:port` of a local Firestore emulator.
pub const ENV_FIRESTORE_EMULATOR_HOST: &str = "FIRESTORE_EMULATOR_HOST";

#[derive(Debug, Default, Deserialize)]
pub struct FolioConfig {
    pub app: Option<AppConfig>,
    /// Firebase web config, same keys as the JS `firebaseConfig` object.
    pub firebase: Option<toml::Table>,
    pub endpoints: Option<EndpointsConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Default, Deserialize)]
pub struct AppConfig {
    /// Application identifier embedded in document-store paths.
    pub id: Option<String>,
    /// Pre-issued custom token exchanged for an identity at startup.
    pub initial_auth_token: Option<String>,
}

// Manual Debug impl to prevent leaking the token in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("id", &self.id)
            .field(
                "initial_auth_token",
                &if self.initial_auth_token.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .finish()
    }
}

/// Base URL overrides for the auth and document-store REST APIs.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct EndpointsConfig {
    pub auth: Option<String>,
    pub firestore: Option<String>,
}

impl FolioConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".folio"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// File backing the durable client storage (theme preference).
#[must_use]
pub fn state_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("state.toml"))
}

/// Everything the hosting environment hands to the identity bootstrap.
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    pub firebase: FirebaseConfig,
    pub initial_auth_token: Option<String>,
    pub app_id: AppId,
    pub endpoints: EndpointsConfig,
}

impl HostEnvironment {
    /// Merge the config file with the process environment.
    #[must_use]
    pub fn resolve(config: Option<&FolioConfig>) -> Self {
        Self::resolve_with(config, |key| env::var(key).ok())
    }

    /// Same as [`HostEnvironment::resolve`] with an explicit variable lookup.
    pub fn resolve_with<F>(config: Option<&FolioConfig>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = config.and_then(|cfg| cfg.app.as_ref());
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let firebase = match lookup(ENV_FIREBASE_CONFIG).and_then(non_blank) {
            Some(raw) => FirebaseConfig::from_json_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(env_var = ENV_FIREBASE_CONFIG, "Ignoring Firebase config: {e}");
                FirebaseConfig::default()
            }),
            None => config
                .and_then(|cfg| cfg.firebase.as_ref())
                .map(|table| firebase_from_table(table, &lookup))
                .unwrap_or_default(),
        };

        let initial_auth_token = lookup(ENV_INITIAL_AUTH_TOKEN)
            .or_else(|| {
                app.and_then(|a| a.initial_auth_token.as_deref())
                    .map(|raw| expand_env_vars_with(raw, &lookup))
            })
            .and_then(non_blank);

        let app_id = lookup(ENV_APP_ID)
            .or_else(|| {
                app.and_then(|a| a.id.as_deref())
                    .map(|raw| expand_env_vars_with(raw, &lookup))
            })
            .map(|raw| {
                AppId::parse(raw).unwrap_or_else(|e| {
                    tracing::warn!("Using default app id: {e}");
                    AppId::default()
                })
            })
            .unwrap_or_default();

        let configured = config
            .and_then(|cfg| cfg.endpoints.clone())
            .unwrap_or_default();
        let expand = |value: Option<String>| {
            value
                .map(|raw| expand_env_vars_with(&raw, &lookup))
                .and_then(non_blank)
        };
        let mut endpoints = EndpointsConfig {
            auth: expand(configured.auth),
            firestore: expand(configured.firestore),
        };
        if let Some(host) = lookup(ENV_AUTH_EMULATOR_HOST).and_then(non_blank) {
            endpoints.auth = Some(format!("http://{host}/identitytoolkit.googleapis.com"));
        }
        if let Some(host) = lookup(ENV_FIRESTORE_EMULATOR_HOST).and_then(non_blank) {
            endpoints.firestore = Some(format!("http://{host}"));
        }

        Self {
            firebase,
            initial_auth_token,
            app_id,
            endpoints,
        }
    }
}

fn firebase_from_table<F>(table: &toml::Table, lookup: &F) -> FirebaseConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut map = Map::new();
    for (key, value) in table {
        match toml_to_json(value) {
            Ok(Value::String(s)) => {
                map.insert(key.clone(), Value::String(expand_env_vars_with(&s, lookup)));
            }
            Ok(json) => {
                map.insert(key.clone(), json);
            }
            Err(e) => tracing::warn!(key = %key, "Skipping firebase config value: {e}"),
        }
    }
    FirebaseConfig::new(map)
}

/// Convert a TOML value to a JSON value.
fn toml_to_json(value: &toml::Value) -> Result<Value, String> {
    match value {
        toml::Value::String(s) => Ok(Value::String(s.clone())),
        toml::Value::Integer(i) => Ok(Value::Number((*i).into())),
        toml::Value::Float(f) => {
            let n =
                serde_json::Number::from_f64(*f).ok_or_else(|| format!("Invalid float: {f}"))?;
            Ok(Value::Number(n))
        }
        toml::Value::Boolean(b) => Ok(Value::Bool(*b)),
        toml::Value::Array(arr) => {
            let json_arr: Result<Vec<_>, _> = arr.iter().map(toml_to_json).collect();
            Ok(Value::Array(json_arr?))
        }
        toml::Value::Table(table) => {
            let mut map = Map::new();
            for (k, v) in table {
                map.insert(k.clone(), toml_to_json(v)?);
            }
            Ok(Value::Object(map))
        }
        toml::Value::Datetime(dt) => Ok(Value::String(dt.to_string())),
    }
}

#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    expand_env_vars_with(value, &|key: &str| env::var(key).ok())
}

/// Replace `${VAR}` references using `lookup`. Unknown variables become empty;
/// an unclosed `${` is kept literally.
pub fn expand_env_vars_with<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    out.push_str(&lookup(var).unwrap_or_default());
                }
                i = end + 1;
                continue;
            }
        }

        let Some(ch) = value[i..].chars().next() else {
            break;
        };
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // expand_env_vars tests

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars_with("hello world", &vars(&[])), "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        let lookup = vars(&[("TEST_CONFIG_VAR", "replaced")]);
        let result = expand_env_vars_with("prefix ${TEST_CONFIG_VAR} suffix", &lookup);
        assert_eq!(result, "prefix replaced suffix");
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        let result = expand_env_vars_with("before ${MISSING_VAR_FOR_TEST} after", &vars(&[]));
        assert_eq!(result, "before  after");
    }

    #[test]
    fn expand_env_vars_adjacent_vars() {
        let lookup = vars(&[("ADJ_A", "X"), ("ADJ_B", "Y")]);
        assert_eq!(expand_env_vars_with("${ADJ_A}${ADJ_B}", &lookup), "XY");
    }

    #[test]
    fn expand_env_vars_unclosed_brace_preserved() {
        assert_eq!(
            expand_env_vars_with("test ${UNCLOSED", &vars(&[])),
            "test ${UNCLOSED"
        );
    }

    #[test]
    fn expand_env_vars_unicode_content() {
        let lookup = vars(&[("UNICODE_VAR", "🦀")]);
        assert_eq!(
            expand_env_vars_with("Hello ${UNICODE_VAR} Rust", &lookup),
            "Hello 🦀 Rust"
        );
    }

    // toml_to_json tests

    #[test]
    fn toml_to_json_nested() {
        let mut inner = toml::value::Table::new();
        inner.insert("nested".to_string(), toml::Value::Boolean(true));
        let mut outer = toml::value::Table::new();
        outer.insert("inner".to_string(), toml::Value::Table(inner));
        let json = toml_to_json(&toml::Value::Table(outer)).unwrap();
        assert_eq!(json["inner"]["nested"], true);
    }

    #[test]
    fn toml_to_json_invalid_float_nan() {
        assert!(toml_to_json(&toml::Value::Float(f64::NAN)).is_err());
    }

    // FolioConfig parsing tests

    #[test]
    fn parse_empty_config() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert!(config.app.is_none());
        assert!(config.firebase.is_none());
        assert!(config.endpoints.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[app]
id = "portfolio"
initial_auth_token = "tok"

[firebase]
apiKey = "AIza-test"
projectId = "demo"

[endpoints]
auth = "http://localhost:9099/identitytoolkit.googleapis.com"
"#;
        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        let app = config.app.as_ref().unwrap();
        assert_eq!(app.id.as_deref(), Some("portfolio"));
        assert_eq!(config.firebase.as_ref().unwrap().len(), 2);
        assert!(config.endpoints.unwrap().firestore.is_none());
    }

    #[test]
    fn app_config_debug_redacts_token() {
        let app = AppConfig {
            id: Some("portfolio".into()),
            initial_auth_token: Some("secret-token".into()),
        };
        let debug = format!("{app:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = FolioConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[app\nid = 1").unwrap();
        let err = FolioConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    // HostEnvironment tests

    #[test]
    fn resolve_without_any_source_is_empty_with_default_app_id() {
        let host = HostEnvironment::resolve_with(None, vars(&[]));
        assert!(host.firebase.is_empty());
        assert!(host.initial_auth_token.is_none());
        assert_eq!(host.app_id.as_str(), "default-app-id");
        assert_eq!(host.endpoints, EndpointsConfig::default());
    }

    #[test]
    fn resolve_env_json_takes_precedence_over_file() {
        let config: FolioConfig = toml::from_str(
            r#"
[firebase]
apiKey = "from-file"
projectId = "file-project"
"#,
        )
        .unwrap();
        let lookup = vars(&[(
            ENV_FIREBASE_CONFIG,
            r#"{"apiKey": "from-env", "projectId": "env-project"}"#,
        )]);
        let host = HostEnvironment::resolve_with(Some(&config), lookup);
        assert_eq!(host.firebase.api_key(), Some("from-env"));
        assert_eq!(host.firebase.project_id(), Some("env-project"));
    }

    #[test]
    fn resolve_malformed_env_json_is_treated_as_empty() {
        let host = HostEnvironment::resolve_with(None, vars(&[(ENV_FIREBASE_CONFIG, "{oops")]));
        assert!(host.firebase.is_empty());
    }

    #[test]
    fn resolve_expands_variables_in_file_values() {
        let config: FolioConfig = toml::from_str(
            r#"
[app]
id = "${APP}"
initial_auth_token = "${TOKEN}"

[firebase]
apiKey = "${FIREBASE_API_KEY}"
projectId = "demo"
"#,
        )
        .unwrap();
        let lookup = vars(&[
            ("APP", "portfolio"),
            ("FIREBASE_API_KEY", "AIza-expanded"),
        ]);
        let host = HostEnvironment::resolve_with(Some(&config), lookup);
        assert_eq!(host.app_id.as_str(), "portfolio");
        assert_eq!(host.firebase.api_key(), Some("AIza-expanded"));
        // TOKEN is unset, so the expanded token is blank and dropped.
        assert!(host.initial_auth_token.is_none());
    }

    #[test]
    fn resolve_emulator_hosts_override_endpoints() {
        let config: FolioConfig = toml::from_str(
            r#"
[endpoints]
auth = "https://auth.example"
firestore = "https://store.example"
"#,
        )
        .unwrap();
        let lookup = vars(&[
            (ENV_AUTH_EMULATOR_HOST, "127.0.0.1:9099"),
            (ENV_FIRESTORE_EMULATOR_HOST, "127.0.0.1:8080"),
        ]);
        let host = HostEnvironment::resolve_with(Some(&config), lookup);
        assert_eq!(
            host.endpoints.auth.as_deref(),
            Some("http://127.0.0.1:9099/identitytoolkit.googleapis.com")
        );
        assert_eq!(
            host.endpoints.firestore.as_deref(),
            Some("http://127.0.0.1:8080")
        );
    }

    #[test]
    fn resolve_env_overrides_app_id_and_token() {
        let lookup = vars(&[(ENV_APP_ID, "tenant-7"), (ENV_INITIAL_AUTH_TOKEN, " tok ")]);
        let host = HostEnvironment::resolve_with(None, lookup);
        assert_eq!(host.app_id.as_str(), "tenant-7");
        assert_eq!(host.initial_auth_token.as_deref(), Some("tok"));
    }

    #[test]
    fn app_id_with_path_separator_falls_back_to_default() {
        let host = HostEnvironment::resolve_with(None, vars(&[(ENV_APP_ID, "a/b")]));
        assert_eq!(host.app_id.as_str(), "default-app-id");
    }
}
