//! Site catalog: the mapping from service name to the rule used to probe it.
//!
//! The catalog is loaded from a JSON object shaped like
//! `{"GitHub": {"url": "https://github.com/{}", "errorType": "status_code"}}`.
//! Malformed entries are kept (with an `Unknown` strategy) so that every
//! service still yields exactly one verdict.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved key holding schema metadata rather than a service.
pub const SCHEMA_KEY: &str = "$schema";

/// Placeholder substituted with the username in a URL template.
pub const USERNAME_PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorStrategy {
    /// Account exists when the service answers HTTP 200.
    StatusCode,
    /// Account exists when the body contains none of the error signals.
    Message,
    /// Unrecognized or missing `errorType`; never reports an account.
    Unknown(String),
}

impl ErrorStrategy {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "status_code" => ErrorStrategy::StatusCode,
            "message" => ErrorStrategy::Message,
            other => ErrorStrategy::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ErrorStrategy::StatusCode => "status_code",
            ErrorStrategy::Message => "message",
            ErrorStrategy::Unknown(tag) => tag,
        }
    }
}

/// One `errorMsg` string or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorSignal {
    One(String),
    Many(Vec<String>),
}

impl ErrorSignal {
    pub fn patterns(&self) -> &[String] {
        match self {
            ErrorSignal::One(s) => std::slice::from_ref(s),
            ErrorSignal::Many(v) => v,
        }
    }

    /// Plain, case-sensitive substring match against any pattern.
    pub fn matches(&self, body: &str) -> bool {
        self.patterns().iter().any(|p| body.contains(p.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub url_template: String,
    pub strategy: ErrorStrategy,
    pub error_signal: Option<ErrorSignal>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>, strategy: ErrorStrategy) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            strategy,
            error_signal: None,
        }
    }

    pub fn with_error_signal(mut self, signal: ErrorSignal) -> Self {
        self.error_signal = Some(signal);
        self
    }

    /// Substitute the username verbatim into the URL template.
    pub fn resolve_url(&self, username: &str) -> String {
        self.url_template.replace(USERNAME_PLACEHOLDER, username)
    }
}

/// Entry as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawService {
    url: Option<String>,
    #[serde(rename = "errorType")]
    error_type: Option<String>,
    #[serde(rename = "errorMsg")]
    error_msg: Option<ErrorSignal>,
}

impl RawService {
    fn into_descriptor(self, name: &str) -> ServiceDescriptor {
        let strategy = match self.error_type.as_deref() {
            Some(tag) => ErrorStrategy::from_tag(tag),
            None => ErrorStrategy::Unknown(String::new()),
        };
        if let ErrorStrategy::Unknown(tag) = &strategy {
            tracing::warn!(service = %name, error_type = %tag, "unrecognized errorType; service will report not found");
        }
        let url_template = match self.url {
            Some(url) => url,
            None => {
                tracing::warn!(service = %name, "catalog entry has no url; service will report not found");
                return ServiceDescriptor {
                    name: name.to_string(),
                    url_template: String::new(),
                    strategy: ErrorStrategy::Unknown(strategy.name().to_string()),
                    error_signal: self.error_msg,
                };
            }
        };
        if strategy == ErrorStrategy::Message && self.error_msg.is_none() {
            tracing::warn!(service = %name, "message strategy without errorMsg; service will report not found");
        }
        ServiceDescriptor {
            name: name.to_string(),
            url_template,
            strategy,
            error_signal: self.error_msg,
        }
    }
}

/// Read-only set of services to probe, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<ServiceDescriptor>,
}

impl Catalog {
    pub fn from_services(mut services: Vec<ServiceDescriptor>) -> Self {
        services.retain(|s| s.name != SCHEMA_KEY);
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Self { services }
    }

    pub fn from_json_str(data: &str) -> anyhow::Result<Self> {
        let root: Value = serde_json::from_str(data).context("catalog is not valid JSON")?;
        let Value::Object(entries) = root else {
            anyhow::bail!("catalog must be a JSON object keyed by service name");
        };

        let mut services = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            if name == SCHEMA_KEY {
                continue;
            }
            let descriptor = match serde_json::from_value::<RawService>(entry) {
                Ok(raw) => raw.into_descriptor(&name),
                Err(e) => {
                    tracing::warn!(service = %name, error = %e, "malformed catalog entry; service will report not found");
                    ServiceDescriptor::new(name.as_str(), "", ErrorStrategy::Unknown(String::new()))
                }
            };
            services.push(descriptor);
        }
        Ok(Self::from_services(services))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&data)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        tracing::info!(path = %path.display(), services = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.name == name)
    }
}
