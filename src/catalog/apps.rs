//! Application catalog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TuneupError};
use crate::recipe::RecipeStore;

/// Logical path of the application catalog.
pub const APPS_PATH: &str = "data/applications.json";

/// Category used when an entry has none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Package id marking an entry as not installable.
const NO_PACKAGE: &str = "na";

#[derive(Debug, Clone, Deserialize)]
struct AppRecord {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    winget: Option<String>,
}

/// One installable application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    package_id: Option<String>,
}

impl App {
    fn from_record(key: String, record: AppRecord) -> Self {
        let package_id = record
            .winget
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && !id.eq_ignore_ascii_case(NO_PACKAGE));

        Self {
            name: record.content.unwrap_or_else(|| key.clone()),
            description: record.description,
            category: record
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            package_id,
            key,
        }
    }

    /// Package-manager id, `None` if the app cannot be installed.
    pub fn package_id(&self) -> Option<&str> {
        self.package_id.as_deref()
    }

    pub fn is_installable(&self) -> bool {
        self.package_id.is_some()
    }
}

/// All applications, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    apps: BTreeMap<String, App>,
}

impl AppCatalog {
    /// Load the catalog through `store`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogNotFound` if no location holds it and
    /// `CatalogParseError` if the JSON is invalid.
    pub fn load(store: &RecipeStore) -> Result<Self> {
        let path = Path::new(APPS_PATH);
        let (location, content) =
            store
                .read_to_string(path)?
                .ok_or_else(|| TuneupError::CatalogNotFound {
                    path: path.to_path_buf(),
                })?;
        Self::parse(&content, location.path())
    }

    /// Parse catalog JSON.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        let records: BTreeMap<String, AppRecord> =
            serde_json::from_str(content).map_err(|e| TuneupError::CatalogParseError {
                path: source_path.to_path_buf(),
                message: e.to_string(),
            })?;

        let apps = records
            .into_iter()
            .map(|(key, record)| (key.clone(), App::from_record(key, record)))
            .collect();

        Ok(Self { apps })
    }

    pub fn get(&self, key: &str) -> Option<&App> {
        self.apps.get(key)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Apps in key order.
    pub fn iter(&self) -> impl Iterator<Item = &App> {
        self.apps.values()
    }

    /// Apps grouped by category; categories and apps sorted by name.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&App>> {
        let mut groups: BTreeMap<&str, Vec<&App>> = BTreeMap::new();
        for app in self.apps.values() {
            groups.entry(app.category.as_str()).or_default().push(app);
        }
        for apps in groups.values_mut() {
            apps.sort_by_key(|a| a.name.to_lowercase());
        }
        groups
    }
}
