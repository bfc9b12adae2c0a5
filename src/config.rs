use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration, loaded from config.toml with env overrides for
/// the Notion credentials.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,

    /// IANA timezone used to resolve "today"; the feed itself is date-only
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Default output path for the generated .ics file
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            notion: NotionConfig::default(),
            timezone: default_timezone(),
            output: default_output(),
        }
    }
}

/// Notion API credentials and database schema
#[derive(Debug, Default, Deserialize)]
pub struct NotionConfig {
    /// Integration token; the NOTION_TOKEN env var takes precedence
    #[serde(default)]
    pub token: String,

    /// Database to query; the NOTION_DATABASE_ID env var takes precedence
    #[serde(default)]
    pub database_id: String,

    #[serde(default)]
    pub properties: PropertyNames,
}

/// Names of the database properties holding each field.
/// Defaults match the original database schema (Chinese column names).
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyNames {
    /// Title property with the person's name
    #[serde(default = "default_name_property")]
    pub name: String,

    /// Date property with the birth date
    #[serde(default = "default_birthday_property")]
    pub birthday: String,

    /// Number or rich-text property with a contact identifier
    #[serde(default = "default_contact_property")]
    pub contact: String,

    /// Checkbox property controlling whether the age is shown
    #[serde(default = "default_hide_age_property")]
    pub hide_age: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        PropertyNames {
            name: default_name_property(),
            birthday: default_birthday_property(),
            contact: default_contact_property(),
            hide_age: default_hide_age_property(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

fn default_output() -> String {
    "birthdays.ics".to_string()
}

fn default_name_property() -> String {
    "姓名".to_string()
}

fn default_birthday_property() -> String {
    "生日".to_string()
}

fn default_contact_property() -> String {
    "QQ号码".to_string()
}

fn default_hide_age_property() -> String {
    "隐藏年龄".to_string()
}

/// Get the config file path (~/.config/birthdays/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("birthdays");
    Ok(config_dir.join("config.toml"))
}

/// Load config from the given path (or the default location), then apply
/// env overrides. A missing file is fine as long as the credentials come
/// from the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        toml::from_str::<Config>(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?
    } else {
        Config::default()
    };

    // Env vars override file values (the token usually lives in CI secrets)
    apply_override(&mut config.notion.token, std::env::var("NOTION_TOKEN").ok());
    apply_override(
        &mut config.notion.database_id,
        std::env::var("NOTION_DATABASE_ID").ok(),
    );

    if config.notion.token.is_empty() || config.notion.database_id.is_empty() {
        anyhow::bail!(
            "Missing Notion credentials.\n\n\
            Set NOTION_TOKEN and NOTION_DATABASE_ID, or create {}:\n\n\
            [notion]\n\
            token = \"secret_...\"\n\
            database_id = \"...\"",
            path.display()
        );
    }

    Ok(config)
}

/// Replace a file value with an env value. Unset or empty env vars leave
/// the file value alone rather than blanking the credential.
fn apply_override(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *field = value;
        }
    }
}
