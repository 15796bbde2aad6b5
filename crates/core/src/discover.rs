//! Image discovery.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ImageFile;

/// Extensions picked up by discovery, matched exactly as given on disk.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// List the image files directly inside `dir`.
///
/// Returns files whose extension is one of `.jpg`, `.jpeg`, `.png`, in
/// whatever order the filesystem enumerates them. An empty directory or one
/// without matches yields an empty list. Subdirectories are not entered.
pub fn find_images(dir: &Path) -> Result<Vec<ImageFile>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.display().to_string()));
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if IMAGE_EXTENSIONS.contains(&ext) {
            images.push(ImageFile::new(path));
        }
    }

    log::debug!("discovered {} image(s) in {}", images.len(), dir.display());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn names(images: &[ImageFile]) -> BTreeSet<String> {
        images.iter().map(|i| i.basename.clone()).collect()
    }

    #[test]
    fn test_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "b.jpeg");
        touch(dir.path(), "c.png");
        touch(dir.path(), "d.gif");
        touch(dir.path(), "e.txt");
        touch(dir.path(), "noext");

        let images = find_images(dir.path()).unwrap();
        assert_eq!(
            names(&images),
            ["a.jpg", "b.jpeg", "c.png"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        );
    }

    #[test]
    fn test_extension_case_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "upper.JPG");
        touch(dir.path(), "mixed.Png");
        touch(dir.path(), "lower.jpg");

        let images = find_images(dir.path()).unwrap();
        assert_eq!(
            names(&images),
            ["lower.jpg"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let images = find_images(dir.path()).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "inner.jpg");
        touch(dir.path(), "outer.jpg");

        let images = find_images(dir.path()).unwrap();
        assert_eq!(
            names(&images),
            ["outer.jpg"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn test_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(
            find_images(&gone),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn test_idempotent_over_unchanged_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "b.png");

        let first = names(&find_images(dir.path()).unwrap());
        let second = names(&find_images(dir.path()).unwrap());
        assert_eq!(first, second);
    }
}
