use std::collections::HashSet;

/// Top-level folders that never become categories.
pub const DEFAULT_EXCLUDED_FOLDERS: &[&str] = &[".git", "node_modules", "assets"];

/// An exact-name set of folders skipped at the top level of a scan.
///
/// Matching is case-sensitive and only applies to direct children of the
/// base directory; a nested `assets/` folder inside a category is counted
/// like any other folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| name.trim().trim_end_matches('/').to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    pub fn is_excluded(&self, folder_name: &str) -> bool {
        self.names.contains(folder_name)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_FOLDERS.iter().copied())
    }
}
