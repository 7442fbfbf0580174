use std::path::{Path, PathBuf};

use lgo_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.lichensgo` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Anchor a configured relative path at the project root.
#[must_use]
pub fn resolve_in_project(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::{find_project_root, resolve_in_project};

    #[test]
    fn finds_project_root_in_current_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".lichensgo")).expect(".lichensgo should create");

        let found = find_project_root(temp.path());
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn finds_project_root_in_parent_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".lichensgo")).expect(".lichensgo should create");
        std::fs::create_dir_all(temp.path().join("exports/2024")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("exports/2024"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn returns_none_when_not_found() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join("a/b")).expect("nested dirs should create");

        assert!(find_project_root(&temp.path().join("a/b")).is_none());
    }

    #[test]
    fn relative_paths_anchor_at_root() {
        let root = Path::new("/srv/survey");
        assert_eq!(
            resolve_in_project(root, Path::new(".lichensgo/lichensgo.duckdb")),
            Path::new("/srv/survey/.lichensgo/lichensgo.duckdb")
        );
        assert_eq!(
            resolve_in_project(root, Path::new("/data/eco.csv")),
            Path::new("/data/eco.csv")
        );
    }
}
