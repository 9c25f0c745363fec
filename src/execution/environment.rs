//! Environment snapshots handed to spawned tools.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Variable carrying the Expo access token.
pub const EXPO_TOKEN_VAR: &str = "EXPO_TOKEN";

/// Immutable set of variables visible to one child process.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// Build an environment from explicit pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Overlay the auth token, if one is given.
    ///
    /// Only `EXPO_TOKEN` is touched. An empty token counts as absent.
    pub fn with_auth_token(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.vars.insert(EXPO_TOKEN_VAR.into(), token.into());
        }
        self
    }

    /// Look up a variable.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Iterate over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// Values are left out: the snapshot usually holds secrets.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("keys", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_matches_host() {
        let env = Environment::capture();
        if let Some(path) = std::env::var_os("PATH") {
            assert_eq!(env.get("PATH"), Some(path.as_os_str()));
        }
    }

    #[test]
    fn test_token_overlay_adds_single_key() {
        let base = Environment::from_vars([("HOME", "/home/dev"), ("PATH", "/usr/bin")]);
        let env = base.clone().with_auth_token(Some("tok"));

        assert_eq!(env.len(), base.len() + 1);
        assert_eq!(env.get(EXPO_TOKEN_VAR), Some(OsStr::new("tok")));
        assert_eq!(env.get("HOME"), Some(OsStr::new("/home/dev")));
        assert_eq!(env.get("PATH"), Some(OsStr::new("/usr/bin")));
    }

    #[test]
    fn test_token_overlay_replaces_existing() {
        let base = Environment::from_vars([(EXPO_TOKEN_VAR, "old"), ("PATH", "/bin")]);
        let env = base.with_auth_token(Some("new"));

        assert_eq!(env.len(), 2);
        assert_eq!(env.get(EXPO_TOKEN_VAR), Some(OsStr::new("new")));
    }

    #[test]
    fn test_no_token_leaves_env_untouched() {
        let base = Environment::from_vars([("PATH", "/bin")]);
        assert_eq!(base.clone().with_auth_token(None), base);
        assert_eq!(base.clone().with_auth_token(Some("")), base);
    }

    #[test]
    fn test_debug_hides_values() {
        let env = Environment::from_vars([(EXPO_TOKEN_VAR, "hunter2")]);
        let debug = format!("{env:?}");
        assert!(debug.contains(EXPO_TOKEN_VAR));
        assert!(!debug.contains("hunter2"));
    }
}
