//! Export configuration
//!
//! Settings come from a JSON (or YAML) file. The command line only overrides
//! `only_hostnames` and `export_target`. Loading validates everything up front
//! so that a bad setting never costs an API call.

use crate::error::{ExportError, ExportResult};
use crate::filter::FilterRules;
use crate::route53::normalize_zone_id;
use crate::traits::FileSystem;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "config-route53.json";

/// Which parts of Route53 to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    Records,
    Zones,
    Both,
}

impl ExportTarget {
    pub fn includes_records(&self) -> bool {
        matches!(self, ExportTarget::Records | ExportTarget::Both)
    }

    pub fn includes_zones(&self) -> bool {
        matches!(self, ExportTarget::Zones | ExportTarget::Both)
    }
}

/// Values given on the command line; they take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Comma-separated hostname patterns
    pub only_hostnames: Option<String>,
    pub export_target: Option<ExportTarget>,
}

/// Validated, immutable settings for one run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub zone_ids: Vec<String>,
    pub output_dir: PathBuf,
    pub locals_file: PathBuf,
    pub imports_file: PathBuf,
    pub zones_file: PathBuf,
    pub single_zone: bool,
    pub single_zone_records_file: PathBuf,
    /// Credential profile handed to the AWS SDK untouched
    pub profile: Option<String>,
    pub export_target: ExportTarget,
    pub skip_zone_tags: bool,
    pub filter: FilterRules,
}

/// A list option given either as an array or as one comma-separated string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    Text(String),
    Items(Vec<Value>),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
            StringList::Items(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Null => None,
                    Value::String(text) => Some(text.trim().to_string()),
                    other => Some(other.to_string()),
                })
                .filter(|text| !text.is_empty())
                .collect(),
        }
    }
}

/// Raw file contents after key normalization
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    zone_ids: Option<StringList>,
    output_dir: Option<String>,
    locals_file: Option<String>,
    imports_file: Option<String>,
    zones_file: Option<String>,
    single_zone: Option<bool>,
    single_zone_records_file: Option<String>,
    profile: Option<String>,
    skip_hostnames: Option<StringList>,
    only_hostnames: Option<StringList>,
    export_target: Option<ExportTarget>,
    skip_zone_tags: Option<bool>,
    skip_record_types: Option<StringList>,
    skippable_import_types: Option<StringList>,
}

fn list(raw: Option<StringList>) -> Vec<String> {
    raw.map(StringList::into_vec).unwrap_or_default()
}

fn path_or(raw: Option<String>, default: &str) -> PathBuf {
    match raw {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => PathBuf::from(default),
    }
}

/// `--zone-ids` and `zone-ids` both become `zone_ids`
pub fn normalize_key(key: &str) -> String {
    let trimmed = key.trim();
    trimmed
        .strip_prefix("--")
        .unwrap_or(trimmed)
        .replace('-', "_")
}

/// Normalize keys and lift entries nested under `arguments` to the top level.
/// Nested entries win over top-level ones with the same name.
fn normalize_keys(raw: Map<String, Value>) -> Map<String, Value> {
    let mut normalized = Map::new();
    let mut nested = Vec::new();

    for (key, value) in raw {
        let key = normalize_key(&key);
        match value {
            Value::Object(arguments) if key == "arguments" => nested.push(arguments),
            value => {
                normalized.insert(key, value);
            }
        }
    }

    for arguments in nested {
        for (key, value) in arguments {
            normalized.insert(normalize_key(&key), value);
        }
    }

    normalized
}

impl ExportConfig {
    /// Load and validate the config file at `path`
    pub fn load(
        fs: &dyn FileSystem,
        path: &Path,
        overrides: &CliOverrides,
    ) -> ExportResult<Self> {
        if !fs.exists(path) {
            return Err(ExportError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs
            .read_to_string(path)
            .map_err(|err| ExportError::Configuration(format!("{:#}", err)))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        let document: Value = if is_yaml {
            serde_yaml::from_str(&content).map_err(|err| {
                ExportError::Configuration(format!(
                    "Invalid YAML in config file {}: {}",
                    path.display(),
                    err
                ))
            })?
        } else {
            serde_json::from_str(&content).map_err(|err| {
                ExportError::Configuration(format!(
                    "Invalid JSON in config file {}: {}",
                    path.display(),
                    err
                ))
            })?
        };

        Self::from_value(document, overrides).map_err(|err| match err {
            ExportError::Configuration(msg) => {
                ExportError::Configuration(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Build the configuration from an already parsed document
    pub fn from_value(document: Value, overrides: &CliOverrides) -> ExportResult<Self> {
        let Value::Object(map) = document else {
            return Err(ExportError::Configuration(
                "config file must define an object".to_string(),
            ));
        };

        let raw: RawConfig = serde_json::from_value(Value::Object(normalize_keys(map)))?;

        let zone_ids: Vec<String> = list(raw.zone_ids)
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(normalize_zone_id)
            .filter(|zone_id| !zone_id.is_empty())
            .collect();

        if zone_ids.is_empty() {
            return Err(ExportError::Configuration(
                "No zone IDs supplied. Add zone_ids entries to the config file".to_string(),
            ));
        }

        let export_target = overrides
            .export_target
            .or(raw.export_target)
            .unwrap_or(ExportTarget::Both);

        let single_zone = raw.single_zone.unwrap_or(false);
        if single_zone && zone_ids.len() != 1 {
            return Err(ExportError::Configuration(format!(
                "single_zone requires exactly one hosted zone ID, got {}",
                zone_ids.len()
            )));
        }
        if single_zone && export_target == ExportTarget::Zones {
            return Err(ExportError::Configuration(
                "Zones-only export is not supported with single_zone".to_string(),
            ));
        }

        let only_hostnames = match &overrides.only_hostnames {
            Some(cli_value) => vec![cli_value.clone()],
            None => list(raw.only_hostnames),
        };

        let filter = FilterRules::new(
            &list(raw.skip_record_types),
            &list(raw.skippable_import_types),
            &list(raw.skip_hostnames),
            &only_hostnames,
        )?;

        Ok(Self {
            zone_ids,
            output_dir: path_or(raw.output_dir, "."),
            locals_file: path_or(raw.locals_file, "locals.tf"),
            imports_file: path_or(raw.imports_file, "imports.tf"),
            zones_file: path_or(raw.zones_file, "config-zones.tf"),
            single_zone,
            single_zone_records_file: path_or(
                raw.single_zone_records_file,
                "config-records.tf",
            ),
            profile: raw
                .profile
                .map(|profile| profile.trim().to_string())
                .filter(|profile| !profile.is_empty()),
            export_target,
            skip_zone_tags: raw.skip_zone_tags.unwrap_or(false),
            filter,
        })
    }

    /// Zone metadata is only exported in multi-zone mode
    pub fn zone_export_enabled(&self) -> bool {
        self.export_target.includes_zones() && !self.single_zone
    }

    /// Tags are fetched only when they end up in the zones file
    pub fn fetch_zone_tags(&self) -> bool {
        self.zone_export_enabled() && !self.skip_zone_tags
    }

    /// Location of a per-zone records file
    pub fn zone_records_path(&self, file_name: &str) -> PathBuf {
        if self.output_dir == Path::new(".") {
            PathBuf::from(file_name)
        } else {
            self.output_dir.join(file_name)
        }
    }
}
