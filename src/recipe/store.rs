//! Recipe discovery and loading.
//!
//! Logical resource paths such as `recipes/maintenance.yaml` are resolved
//! against a list of base directories (configured directories, the working
//! directory, the directory of the running executable) and finally against
//! the resources packaged into the binary.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use tracing::{debug, warn};

use crate::error::{Result, TuneupError};
use crate::recipe::step::Step;

/// Recipes and catalogs shipped inside the binary.
static PACKAGED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// Where a logical resource path was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// A file on disk.
    File(PathBuf),
    /// A resource packaged into the binary.
    Packaged(PathBuf),
}

impl ResourceLocation {
    /// Path used in diagnostics.
    pub fn path(&self) -> &Path {
        match self {
            Self::File(p) | Self::Packaged(p) => p,
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Packaged(p) => write!(f, "<packaged>/{}", p.display()),
        }
    }
}

/// Resolves and loads recipe and catalog resources.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    bases: Vec<PathBuf>,
    packaged: bool,
}

impl RecipeStore {
    /// Create a store searching `bases` in order, then the packaged resources.
    pub fn new(bases: Vec<PathBuf>) -> Self {
        Self {
            bases,
            packaged: true,
        }
    }

    /// Build the default search list.
    ///
    /// Order: `extra` (relative entries resolved against `cwd`), `cwd`,
    /// the directory holding the current executable.
    pub fn discover(extra: &[PathBuf], cwd: &Path) -> Self {
        let mut bases: Vec<PathBuf> = extra
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { cwd.join(p) })
            .collect();
        bases.push(cwd.to_path_buf());

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            if !bases.contains(&exe_dir) {
                bases.push(exe_dir);
            }
        }

        Self::new(bases)
    }

    /// Disable the packaged fallback.
    pub fn without_packaged(mut self) -> Self {
        self.packaged = false;
        self
    }

    /// Base directories searched, in order.
    pub fn bases(&self) -> &[PathBuf] {
        &self.bases
    }

    /// Find the first location holding `path`.
    pub fn locate(&self, path: &Path) -> Option<ResourceLocation> {
        if path.is_absolute() {
            return path
                .is_file()
                .then(|| ResourceLocation::File(path.to_path_buf()));
        }

        for base in &self.bases {
            let candidate = base.join(path);
            if candidate.is_file() {
                return Some(ResourceLocation::File(candidate));
            }
        }

        if self.packaged && PACKAGED.get_file(path).is_some() {
            return Some(ResourceLocation::Packaged(path.to_path_buf()));
        }

        None
    }

    /// Read the resource at `path` as text.
    ///
    /// Returns `Ok(None)` when no location holds it.
    pub fn read_to_string(&self, path: &Path) -> Result<Option<(ResourceLocation, String)>> {
        let Some(location) = self.locate(path) else {
            return Ok(None);
        };

        let content = match &location {
            ResourceLocation::File(p) => fs::read_to_string(p)?,
            ResourceLocation::Packaged(p) => PACKAGED
                .get_file(p)
                .and_then(|f| f.contents_utf8())
                .map(str::to_string)
                .ok_or_else(|| TuneupError::RecipeParseError {
                    path: p.clone(),
                    message: "Invalid UTF-8".to_string(),
                })?,
        };

        Ok(Some((location, content)))
    }

    /// Load the recipe at `path`.
    ///
    /// A missing recipe yields an empty sequence and a warning; a malformed
    /// one is an error.
    ///
    /// # Errors
    ///
    /// Returns `RecipeParseError` if the YAML is invalid or a step violates
    /// its invariants.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Step>> {
        let path = path.as_ref();
        match self.read_to_string(path)? {
            Some((location, content)) => {
                debug!("Loading recipe from {}", location);
                parse_recipe(&content, location.path())
            }
            None => {
                warn!(
                    "Cannot find command file: {} (searched {} locations)",
                    path.display(),
                    self.bases.len() + usize::from(self.packaged)
                );
                Ok(Vec::new())
            }
        }
    }
}

/// Parse YAML recipe content.
///
/// An empty document is an empty recipe.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_recipe(content: &str, source_path: &Path) -> Result<Vec<Step>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let steps: Option<Vec<Step>> =
        serde_yaml::from_str(content).map_err(|e| TuneupError::RecipeParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(steps.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::step::StepCommand;
    use tempfile::TempDir;

    const RECIPE: &str = r#"
- cmd: echo one
  tag: clean_temp
- cmd: [echo, two]
  tag: flush_dns
  friendly: Second step
  timeout: 5
"#;

    #[test]
    fn parse_recipe_preserves_order() {
        let steps = parse_recipe(RECIPE, Path::new("r.yaml")).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].tag(), "clean_temp");
        assert_eq!(steps[1].friendly(), Some("Second step"));
        assert_eq!(steps[1].timeout_secs(), 5);
        assert!(matches!(steps[1].command(), StepCommand::Argv(_)));
    }

    #[test]
    fn parse_recipe_empty_document() {
        assert!(parse_recipe("", Path::new("r.yaml")).unwrap().is_empty());
        assert!(parse_recipe("~\n", Path::new("r.yaml")).unwrap().is_empty());
    }

    #[test]
    fn parse_recipe_reports_path_on_syntax_error() {
        let err = parse_recipe("- cmd: [unclosed", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, TuneupError::RecipeParseError { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn parse_recipe_rejects_mapping_root() {
        assert!(parse_recipe("cmd: echo hi", Path::new("r.yaml")).is_err());
    }

    #[test]
    fn load_missing_recipe_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = RecipeStore::new(vec![temp.path().to_path_buf()]).without_packaged();
        let steps = store.load("recipes/nope.yaml").unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn load_first_matching_base_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::create_dir_all(first.path().join("recipes")).unwrap();
        fs::create_dir_all(second.path().join("recipes")).unwrap();
        fs::write(first.path().join("recipes/r.yaml"), "- cmd: echo first").unwrap();
        fs::write(second.path().join("recipes/r.yaml"), "- cmd: echo second").unwrap();

        let store = RecipeStore::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let steps = store.load("recipes/r.yaml").unwrap();
        assert_eq!(steps[0].command().to_shell_string(), "echo first");
    }

    #[test]
    fn load_falls_through_to_later_base() {
        let empty = TempDir::new().unwrap();
        let full = TempDir::new().unwrap();
        fs::write(full.path().join("r.yaml"), "- cmd: echo found").unwrap();

        let store = RecipeStore::new(vec![
            empty.path().to_path_buf(),
            full.path().to_path_buf(),
        ]);
        assert_eq!(store.load("r.yaml").unwrap().len(), 1);
    }

    #[test]
    fn load_malformed_recipe_is_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.yaml"), "- cmd: [oops").unwrap();
        let store = RecipeStore::new(vec![temp.path().to_path_buf()]);
        assert!(store.load("bad.yaml").is_err());
    }

    #[test]
    fn load_absolute_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("abs.yaml");
        fs::write(&path, "- cmd: echo abs").unwrap();
        let store = RecipeStore::new(vec![]).without_packaged();
        assert_eq!(store.load(&path).unwrap().len(), 1);
    }

    #[test]
    fn packaged_maintenance_recipe_is_available() {
        let store = RecipeStore::new(vec![]);
        let location = store.locate(Path::new("recipes/maintenance.yaml"));
        assert!(matches!(location, Some(ResourceLocation::Packaged(_))));
        assert!(!store.load("recipes/maintenance.yaml").unwrap().is_empty());
    }

    #[test]
    fn packaged_fallback_can_be_disabled() {
        let store = RecipeStore::new(vec![]).without_packaged();
        assert!(store.locate(Path::new("recipes/maintenance.yaml")).is_none());
    }

    #[test]
    fn discover_resolves_relative_extra_dirs() {
        let temp = TempDir::new().unwrap();
        let store = RecipeStore::discover(&[PathBuf::from("custom")], temp.path());
        assert_eq!(store.bases()[0], temp.path().join("custom"));
        assert_eq!(store.bases()[1], temp.path());
    }
}
