/// Configuration system for the explorer.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::ExplorerConfig::default()`]
/// 2. **User global config**: `~/.biospace/config.toml`
/// 3. **Project local config**: `.biospace.toml` in the current working directory
/// 4. **Environment variables**: `BIOSPACE_*` overrides
///
/// Command-line flags are applied by the caller on top of the result.
///
/// File layers are merged key by key: a file that only sets
/// `[source] api_base_url` leaves every other value from the layer below.
///
/// # Usage
///
/// ```rust,ignore
/// use biospace_explorer::config;
///
/// let cfg = config::load();
/// let source = HttpSource::from_config(&cfg.source);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::ExplorerConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for all commands.
pub fn load() -> ExplorerConfig {
    load_layers(
        global_config_path().as_deref(),
        project_config_path().as_deref(),
        |key| std::env::var(key).ok(),
    )
}

/// Resolve a config from explicit file layers and an environment lookup.
pub fn load_layers(
    global: Option<&Path>,
    project: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> ExplorerConfig {
    let mut merged = toml::Value::Table(toml::Table::new());

    for layer in [global, project].into_iter().flatten() {
        if let Some(value) = load_toml_value(layer) {
            merge_values(&mut merged, value);
        }
    }

    let mut config: ExplorerConfig = merged.try_into().unwrap_or_else(|e| {
        tracing::warn!("ignoring config files: {e}");
        ExplorerConfig::default()
    });

    apply_env_overrides(&mut config, env);
    config
}

/// Read a TOML file as an untyped value.
///
/// Returns `None` if the file doesn't exist, is malformed, or holds a value
/// the schema rejects. Such a layer is logged and skipped as a whole; the
/// other layers still apply.
fn load_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("ignoring malformed config {}: {e}", path.display());
            return None;
        }
    };

    let checked: Result<ExplorerConfig, _> = value.clone().try_into();
    if let Err(e) = checked {
        tracing::warn!("ignoring invalid config {}: {e}", path.display());
        return None;
    }
    Some(value)
}

/// Deep-merge `overlay` into `base`: tables merge recursively, any other
/// value in the overlay replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.biospace/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".biospace").join("config.toml"))
}

/// Path to the project local config: `.biospace.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".biospace.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence file-free layer).
///
/// Supported variables:
/// - `BIOSPACE_API_URL`: backend base URL
/// - `BIOSPACE_WEB_ADDR`: dashboard listen address
/// - `BIOSPACE_CHART_WIDTH`: terminal chart width in columns
/// - `BIOSPACE_LOG`: log level / filter directive
fn apply_env_overrides(config: &mut ExplorerConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(val) = env("BIOSPACE_API_URL")
        && !val.is_empty()
    {
        config.source.api_base_url = val;
    }
    if let Some(val) = env("BIOSPACE_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Some(val) = env("BIOSPACE_CHART_WIDTH")
        && let Ok(width) = val.parse::<usize>()
    {
        config.chart.width = width;
    }
    if let Some(val) = env("BIOSPACE_LOG")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.biospace/config.toml`.
///
/// Creates the `~/.biospace/` directory if it doesn't exist. Returns an
/// error if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    write_default_config(&path, force)?;
    Ok(path)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, ExplorerConfig::default_toml()).context("failed to write config file")
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `source.api_base_url`. The existing value's
/// type decides how the new value is parsed.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_in(&path, key, value)
}

fn set_config_value_in(path: &Path, key: &str, value: &str) -> Result<()> {
    // Start from the full default schema so every key is settable even when
    // the file only holds a few of them.
    let defaults =
        toml::to_string_pretty(&ExplorerConfig::default()).context("failed to serialize defaults")?;
    let mut root: toml::Value =
        toml::from_str(&defaults).context("failed to parse serialized defaults")?;

    if path.exists() {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        let current: toml::Value =
            toml::from_str(&content).context("failed to parse config as TOML value")?;
        merge_values(&mut root, current);
    }

    set_toml_value(&mut root, key, value)?;

    // Reject values that would make the file unloadable.
    let _: ExplorerConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(*leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("config key '{key}' is not a scalar"),
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert((*leaf).to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show a resolved config as TOML.
pub fn to_toml(config: &ExplorerConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
