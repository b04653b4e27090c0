//! Mapping from files and directories to Rust module paths.
//!
//! A file's module is derived from where it sits below the crate's `src/` directory:
//! `src/api/users.rs` is `crate::api::users`, `src/api/mod.rs` is `crate::api`, and
//! `src/lib.rs` or `src/main.rs` is the crate root.

use crate::error::{GenError, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A module path such as `crate::api::users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    /// The crate root, `crate`.
    pub fn crate_root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of an inline `mod name { .. }` declared inside this module.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn is_crate_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, which is how handlers of this module are qualified once imported.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("crate")
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "crate")?;
        for segment in &self.segments {
            write!(f, "::{}", segment)?;
        }
        Ok(())
    }
}

/// Resolves module paths relative to `<crate_root>/src/`.
///
/// Without a crate root nothing is stripped and the whole absolute path ends up in the
/// module path. That almost always means the crate root was not configured.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    src_dir: Option<PathBuf>,
}

impl ModuleResolver {
    pub fn new(crate_root: Option<&Path>) -> Result<Self> {
        let src_dir = match crate_root {
            Some(root) => Some(absolute(&root.join("src"))?),
            None => None,
        };
        Ok(Self { src_dir })
    }

    /// Module declared by the source file at `file`.
    pub fn module_of_file(&self, file: &Path) -> Result<ModulePath> {
        let mut segments = self.segments(file)?;

        if let Some(last) = segments.last_mut() {
            let stem = Path::new(last.as_str())
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
            if let Some(stem) = stem {
                *last = stem;
            }
        }
        if segments.last().map(String::as_str) == Some("mod") {
            segments.pop();
        }
        if segments.len() == 1 && (segments[0] == "lib" || segments[0] == "main") {
            segments.clear();
        }

        Ok(ModulePath { segments })
    }

    /// Module whose files live in `dir`, used to name the module the generated file
    /// is written into.
    pub fn module_of_dir(&self, dir: &Path) -> Result<ModulePath> {
        Ok(ModulePath {
            segments: self.segments(dir)?,
        })
    }

    fn segments(&self, path: &Path) -> Result<Vec<String>> {
        let abs = absolute(path)?;
        let relative = match &self.src_dir {
            Some(src_dir) => abs.strip_prefix(src_dir).unwrap_or(&abs),
            None => abs.as_path(),
        };

        Ok(relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect())
    }
}

/// Absolute, lexically cleaned form of `path`: `.` is dropped and `..` removes the
/// preceding component. Symlinks are not resolved.
fn absolute(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path).map_err(|e| GenError::io(path, e))?;

    let mut cleaned = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(cleaned.components().next_back(), Some(Component::Normal(_))) {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(root: &Path) -> ModuleResolver {
        ModuleResolver::new(Some(root)).unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(ModulePath::crate_root().to_string(), "crate");
        assert_eq!(
            ModulePath::from_segments(["api", "users"]).to_string(),
            "crate::api::users"
        );
    }

    #[test]
    fn test_name_and_child() {
        let api = ModulePath::from_segments(["api"]);
        assert_eq!(api.name(), "api");
        assert_eq!(api.child("users").name(), "users");
        assert_eq!(ModulePath::crate_root().name(), "crate");
    }

    #[test]
    fn test_module_of_nested_file() {
        let root = Path::new("/work/shop");
        let module = resolver(root)
            .module_of_file(&root.join("src/api/users.rs"))
            .unwrap();
        assert_eq!(module.to_string(), "crate::api::users");
    }

    #[test]
    fn test_mod_rs_names_its_directory() {
        let root = Path::new("/work/shop");
        let module = resolver(root)
            .module_of_file(&root.join("src/api/mod.rs"))
            .unwrap();
        assert_eq!(module.to_string(), "crate::api");
    }

    #[test]
    fn test_lib_and_main_are_crate_root() {
        let root = Path::new("/work/shop");
        let resolver = resolver(root);
        assert!(resolver
            .module_of_file(&root.join("src/lib.rs"))
            .unwrap()
            .is_crate_root());
        assert!(resolver
            .module_of_file(&root.join("src/main.rs"))
            .unwrap()
            .is_crate_root());
        assert_eq!(
            resolver
                .module_of_file(&root.join("src/api/lib.rs"))
                .unwrap()
                .to_string(),
            "crate::api::lib"
        );
    }

    #[test]
    fn test_module_of_dir() {
        let root = Path::new("/work/shop");
        let resolver = resolver(root);
        assert_eq!(
            resolver.module_of_dir(&root.join("src/api")).unwrap().to_string(),
            "crate::api"
        );
        assert!(resolver
            .module_of_dir(&root.join("src"))
            .unwrap()
            .is_crate_root());
    }

    #[test]
    fn test_crate_root_with_parent_components() {
        let resolver = resolver(Path::new("/work/shop/src/api/../.."));
        assert_eq!(
            resolver
                .module_of_file(Path::new("/work/shop/src/api/users.rs"))
                .unwrap()
                .to_string(),
            "crate::api::users"
        );
        assert_eq!(
            resolver
                .module_of_dir(Path::new("/work/shop/src/./api"))
                .unwrap()
                .to_string(),
            "crate::api"
        );
    }

    #[test]
    fn test_parent_components_do_not_escape_filesystem_root() {
        assert_eq!(
            absolute(Path::new("/../work/./shop/..")).unwrap(),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn test_unset_crate_root_keeps_absolute_path() {
        let resolver = ModuleResolver::new(None).unwrap();
        let module = resolver
            .module_of_file(Path::new("/work/shop/src/api/users.rs"))
            .unwrap();
        assert_eq!(module.to_string(), "crate::work::shop::src::api::users");
    }
}
