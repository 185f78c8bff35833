// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Root URL of the upstream API, always ending in `/` so that
/// resource paths join beneath it instead of replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };

        let url = Url::parse(&with_slash).map_err(|e| ValidationError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::InvalidUrl {
                    url: trimmed.to_string(),
                    reason: format!("unsupported scheme '{}'", other),
                })
            }
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(ValidationError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "base URL must not carry a query or fragment".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Resolves a relative resource path beneath this base.
    pub fn join(&self, path: &str) -> Result<Url, ValidationError> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|e| ValidationError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog collection on the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Films,
    People,
    Starships,
    Vehicles,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Films,
        Resource::People,
        Resource::Starships,
        Resource::Vehicles,
    ];

    /// Path segment of this collection on the upstream.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Films => "films",
            Resource::People => "people",
            Resource::Starships => "starships",
            Resource::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.path() == wanted)
            .ok_or_else(|| ValidationError::UnknownResource(s.to_string()))
    }
}
