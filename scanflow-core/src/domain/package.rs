//! Discovered package entity and Package URL identity handling

use std::collections::BTreeMap;

use packageurl::PackageUrl;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Static allow-list of every package field accepted from scan data: the
/// six Package URL identity fields first, then the mergeable data fields.
/// Unknown keys in incoming mappings are dropped.
pub const KNOWN_PACKAGE_FIELDS: &[&str] = &[
    "type",
    "namespace",
    "name",
    "version",
    "qualifiers",
    "subpath",
    "filename",
    "primary_language",
    "description",
    "release_date",
    "homepage_url",
    "download_url",
    "bug_tracking_url",
    "code_view_url",
    "vcs_url",
    "size",
    "license_expression",
    "declared_license",
    "copyright",
    "source_packages",
];

/// Canonicalize a qualifiers string: keys lowercased and sorted, entries
/// with empty values dropped, re-encoded as `k=v&k2=v2`.
///
/// Two qualifier strings that differ only in key order canonicalize to the
/// same value, so they resolve to the same package identity.
pub fn normalize_qualifiers(raw: &str) -> String {
    let mut entries = BTreeMap::new();
    for pair in raw.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            let key = key.trim().to_lowercase();
            let value = value.trim();
            if !key.is_empty() && !value.is_empty() {
                entries.insert(key, value.to_string());
            }
        }
    }
    entries
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Canonicalize qualifiers provided either as an encoded string or as a
/// JSON object of key/value pairs.
pub fn normalize_qualifiers_value(value: &Value) -> String {
    match value {
        Value::String(raw) => normalize_qualifiers(raw),
        Value::Object(map) => {
            let encoded = map
                .iter()
                .filter_map(|(key, value)| {
                    value.as_str().map(|v| format!("{}={}", key, v))
                })
                .collect::<Vec<_>>()
                .join("&");
            normalize_qualifiers(&encoded)
        }
        _ => String::new(),
    }
}

/// Parse a canonical qualifiers string back into ordered pairs.
pub fn parse_qualifiers(qualifiers: &str) -> Vec<(String, String)> {
    qualifiers
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// The normalized Package URL tuple identifying a package within a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    #[serde(rename = "type")]
    pub package_type: String,
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub qualifiers: String,
    pub subpath: String,
}

impl PackageIdentity {
    /// Extract and remove the Package URL fields from a package data
    /// mapping, canonicalizing qualifiers. Returns `None` when every
    /// identity field is empty.
    pub fn extract(data: &mut serde_json::Map<String, Value>) -> Option<Self> {
        let mut take = |field: &str| -> String {
            match data.remove(field) {
                Some(Value::String(s)) => s,
                Some(other) if field == "qualifiers" => normalize_qualifiers_value(&other),
                Some(other) => other.as_str().map(str::to_string).unwrap_or_default(),
                None => String::new(),
            }
        };

        let identity = Self {
            package_type: take("type"),
            namespace: take("namespace"),
            name: take("name"),
            version: take("version"),
            qualifiers: normalize_qualifiers(&take("qualifiers")),
            subpath: take("subpath"),
        };

        if identity.is_empty() {
            None
        } else {
            Some(identity)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.package_type.is_empty()
            && self.namespace.is_empty()
            && self.name.is_empty()
            && self.version.is_empty()
            && self.qualifiers.is_empty()
            && self.subpath.is_empty()
    }

    /// Render the canonical Package URL string, when type and name are set.
    pub fn purl(&self) -> Option<String> {
        if self.package_type.is_empty() || self.name.is_empty() {
            return None;
        }
        let mut purl =
            PackageUrl::new(self.package_type.clone(), self.name.clone()).ok()?;
        if !self.namespace.is_empty() {
            purl.with_namespace(self.namespace.clone());
        }
        if !self.version.is_empty() {
            purl.with_version(self.version.clone());
        }
        if !self.subpath.is_empty() {
            purl.with_subpath(self.subpath.clone()).ok()?;
        }
        for (key, value) in parse_qualifiers(&self.qualifiers) {
            purl.add_qualifier(key, value).ok()?;
        }
        Some(purl.to_string())
    }
}

/// A software package discovered in a project codebase, identified by its
/// normalized Package URL tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredPackage {
    pub uuid: Uuid,
    pub project_uuid: Uuid,
    #[serde(rename = "type")]
    pub package_type: String,
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub qualifiers: String,
    pub subpath: String,
    pub filename: String,
    pub primary_language: String,
    pub description: String,
    pub release_date: String,
    pub homepage_url: String,
    pub download_url: String,
    pub bug_tracking_url: String,
    pub code_view_url: String,
    pub vcs_url: String,
    pub size: Option<i64>,
    pub license_expression: String,
    pub declared_license: String,
    pub copyright: String,
    pub source_packages: Vec<String>,
}

impl DiscoveredPackage {
    pub fn new(project_uuid: Uuid, identity: PackageIdentity) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            project_uuid,
            package_type: identity.package_type,
            namespace: identity.namespace,
            name: identity.name,
            version: identity.version,
            qualifiers: identity.qualifiers,
            subpath: identity.subpath,
            filename: String::new(),
            primary_language: String::new(),
            description: String::new(),
            release_date: String::new(),
            homepage_url: String::new(),
            download_url: String::new(),
            bug_tracking_url: String::new(),
            code_view_url: String::new(),
            vcs_url: String::new(),
            size: None,
            license_expression: String::new(),
            declared_license: String::new(),
            copyright: String::new(),
            source_packages: Vec::new(),
        }
    }

    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity {
            package_type: self.package_type.clone(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            qualifiers: self.qualifiers.clone(),
            subpath: self.subpath.clone(),
        }
    }

    /// Canonical Package URL string for this package.
    pub fn purl(&self) -> Option<String> {
        self.identity().purl()
    }

    /// Whether the named non-identity field currently holds no value.
    pub fn field_is_empty(&self, field: &str) -> bool {
        match field {
            "filename" => self.filename.is_empty(),
            "primary_language" => self.primary_language.is_empty(),
            "description" => self.description.is_empty(),
            "release_date" => self.release_date.is_empty(),
            "homepage_url" => self.homepage_url.is_empty(),
            "download_url" => self.download_url.is_empty(),
            "bug_tracking_url" => self.bug_tracking_url.is_empty(),
            "code_view_url" => self.code_view_url.is_empty(),
            "vcs_url" => self.vcs_url.is_empty(),
            "size" => self.size.is_none(),
            "license_expression" => self.license_expression.is_empty(),
            "declared_license" => self.declared_license.is_empty(),
            "copyright" => self.copyright.is_empty(),
            "source_packages" => self.source_packages.is_empty(),
            _ => false,
        }
    }

    /// Current value of the named non-identity field, for conflict logging.
    pub fn field_value(&self, field: &str) -> Value {
        match field {
            "filename" => Value::from(self.filename.clone()),
            "primary_language" => Value::from(self.primary_language.clone()),
            "description" => Value::from(self.description.clone()),
            "release_date" => Value::from(self.release_date.clone()),
            "homepage_url" => Value::from(self.homepage_url.clone()),
            "download_url" => Value::from(self.download_url.clone()),
            "bug_tracking_url" => Value::from(self.bug_tracking_url.clone()),
            "code_view_url" => Value::from(self.code_view_url.clone()),
            "vcs_url" => Value::from(self.vcs_url.clone()),
            "size" => self.size.map(Value::from).unwrap_or(Value::Null),
            "license_expression" => Value::from(self.license_expression.clone()),
            "declared_license" => Value::from(self.declared_license.clone()),
            "copyright" => Value::from(self.copyright.clone()),
            "source_packages" => Value::from(self.source_packages.clone()),
            _ => Value::Null,
        }
    }

    /// Set the named non-identity field from a JSON value. Returns false
    /// when the field is unknown or the value cannot be converted.
    pub fn set_field(&mut self, field: &str, value: &Value) -> bool {
        fn as_string(value: &Value) -> Option<String> {
            match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        }

        match field {
            "filename" => as_string(value).map(|v| self.filename = v).is_some(),
            "primary_language" => as_string(value).map(|v| self.primary_language = v).is_some(),
            "description" => as_string(value).map(|v| self.description = v).is_some(),
            "release_date" => as_string(value).map(|v| self.release_date = v).is_some(),
            "homepage_url" => as_string(value).map(|v| self.homepage_url = v).is_some(),
            "download_url" => as_string(value).map(|v| self.download_url = v).is_some(),
            "bug_tracking_url" => as_string(value).map(|v| self.bug_tracking_url = v).is_some(),
            "code_view_url" => as_string(value).map(|v| self.code_view_url = v).is_some(),
            "vcs_url" => as_string(value).map(|v| self.vcs_url = v).is_some(),
            "size" => {
                let size = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.parse::<i64>().ok(),
                    _ => None,
                };
                size.map(|v| self.size = Some(v)).is_some()
            }
            "license_expression" => as_string(value).map(|v| self.license_expression = v).is_some(),
            "declared_license" => as_string(value).map(|v| self.declared_license = v).is_some(),
            "copyright" => as_string(value).map(|v| self.copyright = v).is_some(),
            "source_packages" => {
                let packages: Vec<String> = match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                    Value::String(s) if !s.is_empty() => vec![s.clone()],
                    _ => Vec::new(),
                };
                if packages.is_empty() {
                    false
                } else {
                    self.source_packages = packages;
                    true
                }
            }
            _ => false,
        }
    }
}
