use std::path::{Path, PathBuf};

/// Returns `dir/base.ext`, or the first free `dir/base (n).ext` when it is taken.
pub fn unique_path(dir: &Path, base: &str, ext: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.{}", base, ext));
    if !candidate.exists() {
        return candidate;
    }

    (0..)
        .map(|n| dir.join(format!("{} ({}).{}", base, n, ext)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_free_name_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = unique_path(dir.path(), "history", "csv");
        assert_eq!(path, dir.path().join("history.csv"));
    }

    #[test]
    fn test_taken_names_are_numbered_from_zero() {
        let dir = tempfile::tempdir().unwrap();

        File::create(dir.path().join("history.csv")).unwrap();
        assert_eq!(
            unique_path(dir.path(), "history", "csv"),
            dir.path().join("history (0).csv")
        );

        File::create(dir.path().join("history (0).csv")).unwrap();
        File::create(dir.path().join("history (1).csv")).unwrap();
        assert_eq!(
            unique_path(dir.path(), "history", "csv"),
            dir.path().join("history (2).csv")
        );
    }
}
