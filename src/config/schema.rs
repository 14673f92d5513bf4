/// Configuration schema and defaults for the explorer.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[source]`, `[web]`, `[chart]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level explorer configuration.
///
/// Maps directly to the `~/.biospace/config.toml` and `.biospace.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub source: SourceConfig,
    pub web: WebConfig,
    pub chart: ChartConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [source]
// ---------------------------------------------------------------------------

/// Where the records come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the backend; `/api/experiments` is appended.
    pub api_base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://biospace-backend.onrender.com".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `biospace web`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [chart]
// ---------------------------------------------------------------------------

/// Terminal bar chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Columns used by the longest bar.
    pub width: usize,
    /// Bar color as `#rrggbb`.
    pub bar_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 50,
            bar_color: "#007bff".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostic log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`. Any `tracing` filter
    /// directive is accepted.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl ExplorerConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `biospace config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r##"# biospace explorer configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Command-line flags (--api-url)
#   2. Environment variables (BIOSPACE_*)
#   3. Project config (.biospace.toml in current directory)
#   4. User global config (~/.biospace/config.toml)
#   5. Built-in defaults

[source]
api_base_url = "https://biospace-backend.onrender.com"   # BIOSPACE_API_URL

[web]
addr = "127.0.0.1:9747"       # BIOSPACE_WEB_ADDR
open_browser = true

[chart]
width = 50                    # BIOSPACE_CHART_WIDTH
bar_color = "#007bff"

[logging]
level = "warn"                # error | warn | info | debug | trace (BIOSPACE_LOG)
"##
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
