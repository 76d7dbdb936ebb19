use serde::{Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

/// Environment shown when no configuration source provides one.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Deployment slot identifier, as configured.
///
/// The configured casing is kept for display in sentences; [`label`](Self::label)
/// gives the uppercase banner form and [`slot`](Self::slot) the
/// case-insensitive classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Build a name from a raw configuration value.
    ///
    /// Returns `None` for blank input so callers can fall through to the next
    /// source.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase form used in the banner heading.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        Slot::classify(&self.0)
    }
}

impl Default for EnvironmentName {
    fn default() -> Self {
        Self(DEFAULT_ENVIRONMENT.to_string())
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EnvironmentName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Closed classification of an environment name.
#[derive(ToSchema, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Blue,
    Green,
    Production,
    /// Anything else, including `development`.
    Other,
}

impl Slot {
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("blue") {
            Self::Blue
        } else if name.eq_ignore_ascii_case("green") {
            Self::Green
        } else if name.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Other
        }
    }
}

/// Pick the first non-blank value from `sources`, in precedence order.
///
/// Falls back to [`DEFAULT_ENVIRONMENT`] when every source is absent or blank.
pub fn resolve_environment<I, S>(sources: I) -> EnvironmentName
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .flatten()
        .find_map(|value| EnvironmentName::parse(value.as_ref()))
        .unwrap_or_default()
}
