use crate::display::{EnvironmentName, Slot};
use serde::Serialize;
use utoipa::ToSchema;

/// Visual attributes derived from an environment name.
#[derive(ToSchema, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Solid background color (CSS hex).
    #[schema(value_type = String, example = "#007bff")]
    pub color: &'static str,
    /// CSS `background` value used for the page header.
    #[schema(value_type = String)]
    pub gradient: &'static str,
    #[schema(value_type = String, example = "🔵")]
    pub icon: &'static str,
    #[schema(value_type = String)]
    pub subtitle: &'static str,
}

const BLUE: DisplayConfig = DisplayConfig {
    color: "#007bff",
    gradient: "linear-gradient(135deg, #007bff 0%, #0056b3 100%)",
    icon: "🔵",
    subtitle: "Blue environment is serving traffic",
};

const GREEN: DisplayConfig = DisplayConfig {
    color: "#28a745",
    gradient: "linear-gradient(135deg, #28a745 0%, #1e7e34 100%)",
    icon: "🟢",
    subtitle: "Green environment is serving traffic",
};

const PRODUCTION: DisplayConfig = DisplayConfig {
    color: "#17a2b8",
    gradient: "linear-gradient(135deg, #17a2b8 0%, #117a8b 100%)",
    icon: "🚀",
    subtitle: "Live production environment",
};

const DEVELOPMENT: DisplayConfig = DisplayConfig {
    color: "#6c757d",
    gradient: "linear-gradient(135deg, #6c757d 0%, #495057 100%)",
    icon: "🛠️",
    subtitle: "Development or unrecognized environment",
};

impl DisplayConfig {
    #[must_use]
    pub const fn for_slot(slot: Slot) -> Self {
        match slot {
            Slot::Blue => BLUE,
            Slot::Green => GREEN,
            Slot::Production => PRODUCTION,
            Slot::Other => DEVELOPMENT,
        }
    }

    #[must_use]
    pub fn for_environment(environment: &EnvironmentName) -> Self {
        Self::for_slot(environment.slot())
    }

    /// Attribute set used for `development` and every unrecognized name.
    #[must_use]
    pub const fn fallback() -> Self {
        DEVELOPMENT
    }
}
