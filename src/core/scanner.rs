//! Turns a `category/[subfolder/]image` tree into an ordered list of gallery entries.

use super::{ExclusionSet, GalleryEntry, NameCollator, NaturalCollator, ScanError};
use crate::utils::file_detection::{has_image_extension, DEFAULT_IMAGE_EXTENSION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use walkdir::WalkDir;

/// What to do when a directory below the base directory cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Fail the whole scan with the first error.
    #[default]
    Abort,
    /// Log a warning and leave the unreadable folder out of the result.
    Skip,
}

/// Fixed settings for an [`Indexer`], decided once at startup.
#[derive(Clone)]
pub struct IndexerOptions {
    pub excluded: ExclusionSet,
    /// Extension without the leading dot, matched ignoring ASCII case.
    pub image_extension: String,
    pub unreadable: UnreadablePolicy,
    pub collator: Arc<dyn NameCollator>,
}

impl Default for IndexerOptions {
    fn default() -> Self {
        Self {
            excluded: ExclusionSet::default(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            unreadable: UnreadablePolicy::default(),
            collator: Arc::new(NaturalCollator::default()),
        }
    }
}

impl fmt::Debug for IndexerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexerOptions")
            .field("excluded", &self.excluded)
            .field("image_extension", &self.image_extension)
            .field("unreadable", &self.unreadable)
            .finish_non_exhaustive()
    }
}

/// A directory child, resolved through symbolic links.
struct Child {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Stateless scanner. Every call to [`Indexer::scan`] reads the filesystem
/// from scratch; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Indexer {
    options: IndexerOptions,
}

impl Indexer {
    pub fn new(options: IndexerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IndexerOptions {
        &self.options
    }

    /// Scans `base_dir` and returns the gallery entries in display order.
    ///
    /// Categories come in natural order; inside a category the category's own
    /// entry precedes its subfolder entries. Failing to list `base_dir` is
    /// always an error, regardless of the [`UnreadablePolicy`].
    pub fn scan(&self, base_dir: &Path) -> Result<Vec<GalleryEntry>, ScanError> {
        let started = Instant::now();
        let mut entries = Vec::new();

        let categories = self
            .list_children(base_dir)?
            .into_iter()
            .filter(|child| child.is_dir && !self.options.excluded.is_excluded(&child.name));

        for category in categories {
            match self.scan_category(&category) {
                Ok(mut found) => entries.append(&mut found),
                Err(err) => self.recover(err)?,
            }
        }

        tracing::info!(
            "✅ Scan of {} completed: {} entries in {:?}",
            base_dir.display(),
            entries.len(),
            started.elapsed()
        );
        Ok(entries)
    }

    fn scan_category(&self, category: &Child) -> Result<Vec<GalleryEntry>, ScanError> {
        tracing::debug!("Scanning category {}", category.name);
        let children = self.list_children(&category.path)?;
        let mut entries = Vec::new();

        if let Some(entry) = self.build_entry(
            &category.name,
            &category.name,
            &category.name,
            &category.path,
            &children,
        )? {
            entries.push(entry);
        }

        for subfolder in children.iter().filter(|child| child.is_dir) {
            let prefix = format!("{}/{}", category.name, subfolder.name);
            let result = self.list_children(&subfolder.path).and_then(|files| {
                self.build_entry(
                    &category.name,
                    &subfolder.name,
                    &prefix,
                    &subfolder.path,
                    &files,
                )
            });
            match result {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(err) => self.recover(err)?,
            }
        }

        Ok(entries)
    }

    /// Builds the entry for `dir` if any of its direct `children` is an image.
    fn build_entry(
        &self,
        category: &str,
        name: &str,
        prefix: &str,
        dir: &Path,
        children: &[Child],
    ) -> Result<Option<GalleryEntry>, ScanError> {
        let images: Vec<String> = children
            .iter()
            .filter(|child| {
                !child.is_dir && has_image_extension(&child.name, &self.options.image_extension)
            })
            .map(|child| format!("{prefix}/{}", child.name))
            .collect();

        if images.is_empty() {
            return Ok(None);
        }

        let file_count = self.count_files(dir)?;
        Ok(Some(GalleryEntry {
            name: name.to_string(),
            category: category.to_string(),
            photo_count: images.len(),
            file_count,
            images,
        }))
    }

    /// Lists the direct children of `dir`, sorted with the configured collator.
    ///
    /// Symbolic links are resolved so a link to a folder counts as a folder. A
    /// dangling link fails with `NotFound` for the link's own path.
    fn list_children(&self, dir: &Path) -> Result<Vec<Child>, ScanError> {
        let read_dir = fs::read_dir(dir).map_err(|e| ScanError::from_io(e, dir))?;

        let mut children = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| ScanError::from_io(e, dir))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| ScanError::from_io(e, &path))?;
            let is_dir = if file_type.is_symlink() {
                fs::metadata(&path)
                    .map_err(|e| ScanError::from_io(e, &path))?
                    .is_dir()
            } else {
                file_type.is_dir()
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            children.push(Child { name, path, is_dir });
        }

        children.sort_by(|a, b| self.options.collator.compare(&a.name, &b.name));
        Ok(children)
    }

    /// Counts every non-directory item below `dir`, at any depth.
    ///
    /// Links are followed; a link pointing back at one of its own ancestors
    /// fails with [`ScanError::CyclicLink`] instead of recursing forever.
    fn count_files(&self, dir: &Path) -> Result<usize, ScanError> {
        let mut count = 0;
        for item in WalkDir::new(dir).follow_links(true).min_depth(1) {
            match item {
                Ok(entry) if !entry.file_type().is_dir() => count += 1,
                Ok(_) => {}
                Err(err) => self.recover(ScanError::from_walk(err, dir))?,
            }
        }
        Ok(count)
    }

    fn recover(&self, err: ScanError) -> Result<(), ScanError> {
        match self.options.unreadable {
            UnreadablePolicy::Abort => Err(err),
            UnreadablePolicy::Skip => {
                tracing::warn!("Skipping unreadable path {}: {}", err.path().display(), err);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::{running_as_root, GalleryFixture};
    use std::cmp::Ordering;

    fn names(entries: &[GalleryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_end_to_end_example() {
        let fixture = GalleryFixture::new();
        fixture.file("A/x.webp");
        fixture.file("A/y.png");
        fixture.file("A/Sub/z.webp");
        fixture.dir("B");

        let entries = Indexer::default().scan(fixture.root()).unwrap();

        assert_eq!(
            entries,
            vec![
                GalleryEntry {
                    name: "A".into(),
                    images: vec!["A/x.webp".into()],
                    category: "A".into(),
                    photo_count: 1,
                    file_count: 2,
                },
                GalleryEntry {
                    name: "Sub".into(),
                    images: vec!["A/Sub/z.webp".into()],
                    category: "A".into(),
                    photo_count: 1,
                    file_count: 1,
                },
            ]
        );
        assert!(logs_contain("2 entries"));
    }

    #[test]
    fn test_no_images_anywhere_yields_empty_result() {
        let fixture = GalleryFixture::new();
        fixture.file("docs/readme.md");
        fixture.file("docs/deep/notes.txt");
        fixture.dir("empty");
        fixture.file("top-level.webp");

        assert!(Indexer::default().scan(fixture.root()).unwrap().is_empty());
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let fixture = GalleryFixture::new();
        fixture.file("Cat/one.WEBP");
        fixture.file("Cat/two.WebP");
        fixture.file("Cat/three.webp.bak");

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].images, vec!["Cat/one.WEBP", "Cat/two.WebP"]);
        assert_eq!(entries[0].file_count, 3);
    }

    #[test]
    fn test_folder_named_like_image_is_not_an_image() {
        let fixture = GalleryFixture::new();
        fixture.dir("Cat/folder.webp");
        fixture.file("Cat/Model/real.webp");

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["Model"]);
    }

    #[test]
    fn test_categories_and_subfolders_use_natural_order() {
        let fixture = GalleryFixture::new();
        for cat in ["cat10", "cat2", "cat1"] {
            fixture.file(&format!("{cat}/p.webp"));
        }
        fixture.file("cat1/model10/a.webp");
        fixture.file("cat1/Model2/a.webp");
        fixture.file("cat1/model1/img10.webp");
        fixture.file("cat1/model1/img2.webp");

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(
            names(&entries),
            vec!["cat1", "model1", "Model2", "model10", "cat2", "cat10"]
        );
        assert_eq!(
            entries[1].images,
            vec!["cat1/model1/img2.webp", "cat1/model1/img10.webp"]
        );
    }

    #[test]
    fn test_accented_and_punctuated_names_sort_by_locale() {
        let fixture = GalleryFixture::new();
        for cat in ["Zeta", "Élan", "apple", "a_b", "a1"] {
            fixture.file(&format!("{cat}/p.webp"));
        }

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["a_b", "a1", "apple", "Élan", "Zeta"]);
    }

    #[test]
    fn test_category_entry_precedes_its_subfolders() {
        let fixture = GalleryFixture::new();
        fixture.file("Foo/Bar/b.webp");
        fixture.file("Foo/zzz.webp");

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["Foo", "Bar"]);
        assert!(entries.iter().all(|e| e.category == "Foo"));
    }

    #[test]
    fn test_excluded_top_level_folders_are_never_scanned() {
        let fixture = GalleryFixture::new();
        fixture.file(".git/hooks.webp");
        fixture.file("node_modules/pkg/logo.webp");
        fixture.file("assets/icon.webp");
        fixture.file("Real/assets/nested.webp");

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["assets"]);
        assert_eq!(entries[0].category, "Real");
        assert_eq!(entries[0].images, vec!["Real/assets/nested.webp"]);
    }

    #[test]
    fn test_file_count_is_recursive_and_ignores_extension() {
        let fixture = GalleryFixture::new();
        fixture.file("Cat/cover.webp");
        fixture.file("Cat/meta.json");
        fixture.file("Cat/Model/a.webp");
        fixture.file("Cat/Model/b.webp");
        fixture.file("Cat/Model/weights.bin");
        fixture.file("Cat/Model/deep/deeper/x.txt");
        fixture.file("Cat/Model/deep/y.webp");
        fixture.dir("Cat/Model/empty");

        let entries = Indexer::default().scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["Cat", "Model"]);

        let cat = &entries[0];
        assert_eq!((cat.photo_count, cat.file_count), (1, 7));

        let model = &entries[1];
        assert_eq!((model.photo_count, model.file_count), (2, 5));
        for entry in &entries {
            assert_eq!(entry.photo_count, entry.images.len());
            assert!(entry.file_count >= entry.photo_count);
        }
    }

    #[test]
    fn test_third_level_folders_never_become_entries() {
        let fixture = GalleryFixture::new();
        fixture.file("Cat/Model/Variant/v.webp");

        assert!(Indexer::default().scan(fixture.root()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_is_repeatable() {
        let fixture = GalleryFixture::new();
        fixture.file("b/x.webp");
        fixture.file("a/m2/y.webp");
        fixture.file("a/m1/z.webp");

        let indexer = Indexer::default();
        assert_eq!(
            indexer.scan(fixture.root()).unwrap(),
            indexer.scan(fixture.root()).unwrap()
        );
    }

    #[test]
    fn test_custom_extension_and_exclusions() {
        let fixture = GalleryFixture::new();
        fixture.file("Cat/a.png");
        fixture.file("Cat/b.webp");
        fixture.file("private/c.png");

        let indexer = Indexer::new(IndexerOptions {
            excluded: ExclusionSet::new(["private"]),
            image_extension: "png".into(),
            ..Default::default()
        });
        let entries = indexer.scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["Cat"]);
        assert_eq!(entries[0].images, vec!["Cat/a.png"]);
        assert_eq!(entries[0].file_count, 2);
    }

    #[test]
    fn test_injected_collator_controls_order() {
        let fixture = GalleryFixture::new();
        for cat in ["cat1", "cat2", "cat10"] {
            fixture.file(&format!("{cat}/p.webp"));
        }

        let reverse = |a: &str, b: &str| -> Ordering { b.cmp(a) };
        let indexer = Indexer::new(IndexerOptions {
            collator: Arc::new(reverse),
            ..Default::default()
        });
        let entries = indexer.scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["cat2", "cat10", "cat1"]);
    }

    #[test]
    fn test_missing_base_dir_is_not_found() {
        let fixture = GalleryFixture::new();
        let missing = fixture.root().join("nope");

        let err = Indexer::default().scan(&missing).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(ref p) if p == &missing));
    }

    #[test]
    fn test_base_dir_that_is_a_file_fails() {
        let fixture = GalleryFixture::new();
        fixture.file("plain.txt");

        let err = Indexer::default()
            .scan(&fixture.root().join("plain.txt"))
            .unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_base_dir_fails_even_when_skipping() {
        let fixture = GalleryFixture::new();
        let indexer = Indexer::new(IndexerOptions {
            unreadable: UnreadablePolicy::Skip,
            ..Default::default()
        });
        assert!(indexer.scan(&fixture.root().join("nope")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subfolder_aborts_whole_scan() {
        if running_as_root() {
            eprintln!("skipping permission test: running as root");
            return;
        }
        let fixture = GalleryFixture::new();
        fixture.file("A/a.webp");
        fixture.file("B/locked/b.webp");
        fixture.file("C/c.webp");
        let locked = fixture.root().join("B/locked");
        fixture.set_mode(&locked, 0o000);

        let result = Indexer::default().scan(fixture.root());
        fixture.set_mode(&locked, 0o755);

        let err = result.unwrap_err();
        assert!(matches!(err, ScanError::PermissionDenied(ref p) if p == &locked));
    }

    #[cfg(unix)]
    #[test]
    #[tracing_test::traced_test]
    fn test_skip_policy_leaves_out_unreadable_subfolder() {
        if running_as_root() {
            eprintln!("skipping permission test: running as root");
            return;
        }
        let fixture = GalleryFixture::new();
        fixture.file("A/a.webp");
        fixture.file("B/locked/b.webp");
        fixture.file("B/open/c.webp");
        let locked = fixture.root().join("B/locked");
        fixture.set_mode(&locked, 0o000);

        let indexer = Indexer::new(IndexerOptions {
            unreadable: UnreadablePolicy::Skip,
            ..Default::default()
        });
        let result = indexer.scan(fixture.root());
        fixture.set_mode(&locked, 0o755);

        let entries = result.unwrap();
        assert_eq!(names(&entries), vec!["A", "open"]);
        assert!(logs_contain("Skipping unreadable path"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folders_are_followed() {
        let fixture = GalleryFixture::new();
        fixture.file("shared/Model/m.webp");
        fixture.dir("Cat");
        std::os::unix::fs::symlink(
            fixture.root().join("shared/Model"),
            fixture.root().join("Cat/Linked"),
        )
        .unwrap();

        let indexer = Indexer::new(IndexerOptions {
            excluded: ExclusionSet::new(["shared"]),
            ..Default::default()
        });
        let entries = indexer.scan(fixture.root()).unwrap();
        assert_eq!(names(&entries), vec!["Linked"]);
        assert_eq!(entries[0].images, vec!["Cat/Linked/m.webp"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_reported() {
        let fixture = GalleryFixture::new();
        fixture.file("Cat/cover.webp");
        fixture.dir("Cat/Model");
        std::os::unix::fs::symlink(
            fixture.root().join("Cat"),
            fixture.root().join("Cat/Model/back"),
        )
        .unwrap();

        let err = Indexer::default().scan(fixture.root()).unwrap_err();
        assert!(matches!(err, ScanError::CyclicLink(_)), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_fails_with_not_found() {
        let fixture = GalleryFixture::new();
        fixture.file("Cat/cover.webp");
        let link = fixture.root().join("Cat/gone");
        std::os::unix::fs::symlink(fixture.root().join("missing"), &link).unwrap();

        let err = Indexer::default().scan(fixture.root()).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(ref p) if p == &link), "got {err:?}");
    }
}
