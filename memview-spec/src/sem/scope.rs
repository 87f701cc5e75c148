use super::ViewConstant;

/// Resolution of the symbolic names which can appear in the step slot of an axis.
pub trait ViewScope {
    /// Resolves a bare name, e.g. `contiguous`.
    fn resolve(&self, name: &str) -> Option<ViewConstant>;

    /// Resolves a dotted path, e.g. `view.contiguous`.
    fn resolve_path(&self, path: &[String]) -> Option<ViewConstant>;

    /// Whether `path` names a module (or a package containing one).
    fn is_module(&self, path: &[String]) -> bool;
}

/// The scope exposing the view constants through a configured set of modules.
#[derive(Debug, Clone)]
pub struct StandardScope {
    modules: Vec<Vec<String>>,
    bare_names: bool,
}

impl StandardScope {
    /// `modules` are dotted module names, e.g. `cython.view`.
    pub fn new<I, S>(modules: I, bare_names: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            modules: modules
                .into_iter()
                .map(|m| m.as_ref().split('.').map(String::from).collect())
                .collect(),
            bare_names,
        }
    }
}

impl Default for StandardScope {
    fn default() -> Self {
        Self::new(["view", "cython.view"], true)
    }
}

impl ViewScope for StandardScope {
    fn resolve(&self, name: &str) -> Option<ViewConstant> {
        if self.bare_names {
            ViewConstant::from_name(name)
        } else {
            None
        }
    }

    fn resolve_path(&self, path: &[String]) -> Option<ViewConstant> {
        let (name, module) = path.split_last()?;
        if self.modules.iter().any(|m| m.as_slice() == module) {
            ViewConstant::from_name(name)
        } else {
            None
        }
    }

    fn is_module(&self, path: &[String]) -> bool {
        !path.is_empty() && self.modules.iter().any(|m| m.starts_with(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> Vec<String> {
        s.split('.').map(String::from).collect()
    }

    #[test]
    fn test_resolve_path() {
        let scope = StandardScope::default();
        assert_eq!(
            scope.resolve_path(&path("cython.view.strided")),
            Some(ViewConstant::Strided)
        );
        assert_eq!(
            scope.resolve_path(&path("view.generic")),
            Some(ViewConstant::Generic)
        );
        assert_eq!(scope.resolve_path(&path("cython.strided")), None);
        assert_eq!(scope.resolve_path(&path("view.follow")), None);
    }

    #[test]
    fn test_modules() {
        let scope = StandardScope::default();
        assert!(scope.is_module(&path("cython")));
        assert!(scope.is_module(&path("cython.view")));
        assert!(!scope.is_module(&path("numpy")));
    }

    #[test]
    fn test_bare_names() {
        assert_eq!(
            StandardScope::default().resolve("indirect"),
            Some(ViewConstant::Indirect)
        );
        assert_eq!(StandardScope::new(["view"], false).resolve("indirect"), None);
    }
}
