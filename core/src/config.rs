//! Client configuration: where the API lives and how to authenticate.
//!
//! There is no config file and no environment contract; callers build a
//! `ClientConfig` from whatever source they use.

use std::fmt;
use std::time::Duration;

use crate::endpoint::{API_ROOT_PAKK_V2, API_ROOT_SCRIPT_V1};

/// Applied to the whole request, connect through body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// API family. Selects the path root and the authorization header format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiFlavour {
    /// `scriptapi/v1`, `Authorization: Bearer <secret>`.
    #[default]
    ScriptV1,
    /// `pakkapi/v2`, `Authorization: <secret>`.
    PakkV2,
}

impl ApiFlavour {
    pub fn api_root(self) -> &'static str {
        match self {
            ApiFlavour::ScriptV1 => API_ROOT_SCRIPT_V1,
            ApiFlavour::PakkV2 => API_ROOT_PAKK_V2,
        }
    }

    pub fn authorization(self, secret: &str) -> String {
        match self {
            ApiFlavour::ScriptV1 => format!("Bearer {secret}"),
            ApiFlavour::PakkV2 => secret.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host name, optionally with a port.
    pub domain: String,
    pub secret: String,
    pub flavour: ApiFlavour,
    pub scheme: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(domain: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            secret: secret.into(),
            flavour: ApiFlavour::default(),
            scheme: "https".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_flavour(mut self, flavour: ApiFlavour) -> Self {
        self.flavour = flavour;
        self
    }

    /// Plain `http` is only meant for local test servers.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn authorization(&self) -> String {
        self.flavour.authorization(&self.secret)
    }
}

// The secret never reaches logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("domain", &self.domain)
            .field("secret", &"<redacted>")
            .field("flavour", &self.flavour)
            .field("scheme", &self.scheme)
            .field("timeout", &self.timeout)
            .finish()
    }
}
