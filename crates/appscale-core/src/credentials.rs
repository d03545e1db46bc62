//! Operator credential resolution and display-time redaction
//!
//! Automated flows (the `--test` path) resolve the operator's
//! username/password from the process environment, falling back to the
//! toolchain defaults. Interactive flows go through the [`OperatorPrompt`]
//! seam, implemented by the CLI; this crate never prompts.
//!
//! Credential values headed for a log line or the terminal pass through
//! [`obscure_creds`], which keeps only a short trailing suffix of each
//! value.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;

/// Environment override for the operator username
pub const USERNAME_VAR: &str = "APPSCALE_USERNAME";

/// Environment override for the operator password
pub const PASSWORD_VAR: &str = "APPSCALE_PASSWORD";

/// A mapping of credential field names to secret values
pub type CredentialMap = IndexMap<String, String>;

// Redaction keeps this many trailing characters visible.
const VISIBLE_SUFFIX: usize = 4;

/// Trait for reading process environment variables
pub trait EnvReader: Send + Sync {
    /// Look up a variable, `None` when unset
    fn var(&self, name: &str) -> Option<String>;
}

/// Reader backed by the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Mock environment for testing
#[derive(Debug, Default, Clone)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    /// Create a new empty mock environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the mock environment
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Trait for interactively collecting operator credentials
///
/// The CLI implements this over stdin and a hidden password prompt. Core
/// code only routes to it - interactive behavior belongs to the caller.
pub trait OperatorPrompt {
    /// Ask the operator for a username/password pair
    fn read_credentials(&self) -> Result<(String, String)>;
}

/// Fallback operator credentials, fixed at construction
///
/// The stock pair matches what the toolchain seeds a fresh deployment with.
#[derive(Debug, Clone)]
pub struct DefaultCredentials {
    pub username: String,
    pub password: String,
}

impl DefaultCredentials {
    /// Create a fixed default pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for DefaultCredentials {
    fn default() -> Self {
        Self::new("a@a.a", "aaaaaa")
    }
}

/// Resolves operator credentials for CLI and automated flows
pub struct CredentialSource {
    defaults: DefaultCredentials,
    env: Arc<dyn EnvReader>,
}

impl CredentialSource {
    /// Create a source with explicit defaults and environment
    pub fn new(defaults: DefaultCredentials, env: Arc<dyn EnvReader>) -> Self {
        Self { defaults, env }
    }

    /// Create a source over the real process environment
    pub fn from_process_env(defaults: DefaultCredentials) -> Self {
        Self::new(defaults, Arc::new(ProcessEnv))
    }

    /// Resolve the operator's username and password
    ///
    /// When `testing` is set, reads `APPSCALE_USERNAME` and
    /// `APPSCALE_PASSWORD`; both must be present for the overrides to take
    /// effect, otherwise the fixed defaults are returned. The prompt is
    /// never consulted and this path cannot fail.
    ///
    /// When `testing` is not set, the pair comes from the prompt.
    pub fn get_credentials(
        &self,
        testing: bool,
        prompt: &dyn OperatorPrompt,
    ) -> Result<(String, String)> {
        if testing {
            return Ok(self.env_credentials());
        }
        prompt.read_credentials()
    }

    /// The environment-or-default resolution used by automated flows
    pub fn env_credentials(&self) -> (String, String) {
        match (self.env.var(USERNAME_VAR), self.env.var(PASSWORD_VAR)) {
            (Some(username), Some(password)) => (username, password),
            _ => {
                tracing::debug!(
                    "{} / {} not both set, using default credentials",
                    USERNAME_VAR,
                    PASSWORD_VAR
                );
                (
                    self.defaults.username.clone(),
                    self.defaults.password.clone(),
                )
            }
        }
    }
}

/// Redact a single credential value for display
///
/// Keeps the last four characters behind a `***` prefix. Values shorter
/// than four characters are masked entirely - a short secret must never
/// reach the terminal verbatim.
pub fn obscure_string(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < VISIBLE_SUFFIX {
        return "***".to_string();
    }
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("***{suffix}")
}

/// Produce a display-safe copy of a credential map
///
/// Every value is redacted independently via [`obscure_string`]; keys are
/// not inspected. The input map is left untouched and key order is
/// preserved.
pub fn obscure_creds(creds: &CredentialMap) -> CredentialMap {
    creds
        .iter()
        .map(|(field, value)| (field.clone(), obscure_string(value)))
        .collect()
}
