use std::path::Path;

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};

use crate::sem::StandardScope;

/// Settings of the compilation of a declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Maximum number of dimensions of a view.
    pub max_dims: usize,
    /// Dotted names of the modules exposing the view constants.
    pub modules: Vec<String>,
    /// Whether view constants can be written without a module, e.g. `::strided`.
    pub bare_names: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_dims: 8,
            modules: vec!["view".into(), "cython.view".into()],
            bare_names: true,
        }
    }
}

impl CompileOptions {
    /// Loads the options from a YAML file. Missing fields keep their default.
    pub fn from_yaml_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn scope(&self) -> StandardScope {
        StandardScope::new(&self.modules, self.bare_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_dims: 3").unwrap();
        let options = CompileOptions::from_yaml_file(file.path()).unwrap();
        assert_eq!(options.max_dims, 3);
        assert_eq!(options.modules, CompileOptions::default().modules);
    }

    #[test]
    fn test_unknown_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_dim: 3").unwrap();
        assert!(CompileOptions::from_yaml_file(file.path()).is_err());
    }
}
