//! Creating parsed entries on disk.
//!
//! The [`Materializer`] walks a list of [`Entry`] values and makes sure each
//! declared directory and file exists below an output root:
//!
//! - directories are created together with any missing ancestors
//! - files get their parent directory first and are then created empty
//! - an existing file is never truncated or rewritten
//!
//! A failure to create one entry is reported and the run moves on to the
//! next entry. Progress is pushed to a [`Reporter`] as it happens.

use std::{
    fs::{self, OpenOptions},
    io,
    path::{Component, Path, PathBuf},
};

use log::{debug, error, info};
use serde::Deserialize;
use thiserror::Error;

use sprout_parser::Entry;

use crate::error::SproutError;

/// Order in which entries are created.
///
/// Both orders produce the same final state on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassMode {
    /// Create every entry in declaration order.
    #[default]
    SinglePass,

    /// Create all directories first, then all files.
    TwoPass,
}

/// Why a single entry could not be created.
#[derive(Debug, Error)]
pub enum CreationFailureKind {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("path would leave the output root")]
    UnsafePath,

    #[error("a non-directory already exists at this path")]
    NotADirectory,

    #[error("a non-file already exists at this path")]
    NotAFile,

    #[error("refusing to use a symbolic link")]
    Symlink,
}

/// An entry that was skipped because it could not be created.
#[derive(Debug, Error)]
#[error("cannot create {}: {kind}", .path.display())]
pub struct CreationFailure {
    path: PathBuf,
    is_directory: bool,
    #[source]
    kind: CreationFailureKind,
}

impl CreationFailure {
    fn new(path: PathBuf, entry: &Entry, kind: CreationFailureKind) -> Self {
        Self {
            path,
            is_directory: entry.is_directory(),
            kind,
        }
    }

    /// The path that could not be created.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the entry was declared as a directory.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn kind(&self) -> &CreationFailureKind {
        &self.kind
    }
}

/// Receives progress while entries are materialized.
pub trait Reporter {
    /// `path` did not exist and was created.
    fn created(&mut self, entry: &Entry, path: &Path);

    /// `path` already existed with the declared kind and was left alone.
    fn existing(&mut self, entry: &Entry, path: &Path) {
        let _ = (entry, path);
    }

    /// `path` would be created (dry run).
    fn planned(&mut self, entry: &Entry, path: &Path) {
        let _ = (entry, path);
    }

    /// `entry` was skipped.
    fn failed(&mut self, entry: &Entry, failure: &CreationFailure);
}

/// A [`Reporter`] that writes progress to the `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn created(&mut self, entry: &Entry, path: &Path) {
        let kind = if entry.is_directory() { "directory" } else { "file" };
        info!(path = path.display().to_string(), kind; "Created entry");
    }

    fn existing(&mut self, _entry: &Entry, path: &Path) {
        debug!(path = path.display().to_string(); "Entry already exists");
    }

    fn planned(&mut self, entry: &Entry, path: &Path) {
        let kind = if entry.is_directory() { "directory" } else { "file" };
        info!(path = path.display().to_string(), kind; "Would create entry");
    }

    fn failed(&mut self, _entry: &Entry, failure: &CreationFailure) {
        error!(path = failure.path().display().to_string(); "{failure}");
    }
}

/// Summary of one materialization run.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    directories_created: usize,
    files_created: usize,
    existing: usize,
    planned: usize,
    failures: Vec<CreationFailure>,
}

impl MaterializeReport {
    pub fn directories_created(&self) -> usize {
        self.directories_created
    }

    pub fn files_created(&self) -> usize {
        self.files_created
    }

    /// Entries that were already present and left untouched.
    pub fn existing(&self) -> usize {
        self.existing
    }

    /// Entries that a dry run would have created.
    pub fn planned(&self) -> usize {
        self.planned
    }

    pub fn failures(&self) -> &[CreationFailure] {
        &self.failures
    }

    /// Number of entries processed.
    pub fn total(&self) -> usize {
        self.directories_created
            + self.files_created
            + self.existing
            + self.planned
            + self.failures.len()
    }

    /// Returns `true` if no entry was skipped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn a report with skipped entries into an error.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Incomplete`] if any entry failed.
    pub fn into_result(self) -> Result<Self, SproutError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(SproutError::Incomplete {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// What happened to a single entry.
enum Outcome {
    Created,
    Existing,
}

/// Creates entries below an output root.
///
/// # Examples
///
/// ```rust,no_run
/// use sprout::materialize::{LogReporter, Materializer, PassMode};
/// use sprout_parser::Entry;
///
/// let entries = vec![Entry::directory(["src"]), Entry::file(["src", "main.rs"])];
/// let report = Materializer::new("out")
///     .with_pass_mode(PassMode::TwoPass)
///     .run(&entries, &mut LogReporter);
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Materializer {
    root: PathBuf,
    pass_mode: PassMode,
    dry_run: bool,
}

impl Materializer {
    /// Create a single-pass materializer writing below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pass_mode: PassMode::default(),
            dry_run: false,
        }
    }

    pub fn with_pass_mode(mut self, pass_mode: PassMode) -> Self {
        self.pass_mode = pass_mode;
        self
    }

    /// Report what would be created without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Materialize `entries`, continuing past entries that fail.
    pub fn run(&self, entries: &[Entry], reporter: &mut dyn Reporter) -> MaterializeReport {
        info!(
            root = self.root.display().to_string(),
            pass_mode:? = self.pass_mode,
            dry_run = self.dry_run,
            entries = entries.len();
            "Materializing entries"
        );

        let mut report = MaterializeReport::default();
        match self.pass_mode {
            PassMode::SinglePass => {
                for entry in entries {
                    self.apply(entry, &mut report, reporter);
                }
            }
            PassMode::TwoPass => {
                let (directories, files): (Vec<&Entry>, Vec<&Entry>) =
                    entries.iter().partition(|e| e.is_directory());
                for entry in directories.into_iter().chain(files) {
                    self.apply(entry, &mut report, reporter);
                }
            }
        }

        debug!(
            directories = report.directories_created,
            files = report.files_created,
            existing = report.existing,
            failed = report.failures.len();
            "Materialization finished"
        );
        report
    }

    fn apply(&self, entry: &Entry, report: &mut MaterializeReport, reporter: &mut dyn Reporter) {
        let relative = match self.resolve(entry) {
            Ok(relative) => relative,
            Err(failure) => {
                reporter.failed(entry, &failure);
                report.failures.push(failure);
                return;
            }
        };

        let target = self.root.join(&relative);
        if self.dry_run {
            reporter.planned(entry, &target);
            report.planned += 1;
            return;
        }

        let outcome = if entry.is_directory() {
            create_directories(&self.root, &relative)
        } else {
            create_file(&self.root, &relative)
        };

        match outcome {
            Ok(Outcome::Created) => {
                reporter.created(entry, &target);
                if entry.is_directory() {
                    report.directories_created += 1;
                } else {
                    report.files_created += 1;
                }
            }
            Ok(Outcome::Existing) => {
                reporter.existing(entry, &target);
                report.existing += 1;
            }
            Err(kind) => {
                let failure = CreationFailure::new(target, entry, kind);
                reporter.failed(entry, &failure);
                report.failures.push(failure);
            }
        }
    }

    /// The path of `entry` relative to the root, refusing paths that could
    /// leave it.
    fn resolve(&self, entry: &Entry) -> Result<PathBuf, CreationFailure> {
        let relative = entry.path();
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !contained || relative.as_os_str().is_empty() {
            return Err(CreationFailure::new(
                relative,
                entry,
                CreationFailureKind::UnsafePath,
            ));
        }
        Ok(relative)
    }
}

/// Create `relative` below `root` one directory at a time.
///
/// Every component is checked with `symlink_metadata` before it is entered,
/// so a symlink anywhere on the way is refused instead of followed.
fn create_directories(root: &Path, relative: &Path) -> Result<Outcome, CreationFailureKind> {
    let mut current = root.to_path_buf();
    let mut outcome = Outcome::Existing;

    for component in relative.components() {
        let Component::Normal(name) = component else {
            continue;
        };
        current.push(name);

        match fs::symlink_metadata(&current) {
            Ok(meta) => check_directory(&meta)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match fs::create_dir(&current) {
                    Ok(()) => outcome = Outcome::Created,
                    // Created concurrently; check what is there now.
                    Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                        check_directory(&fs::symlink_metadata(&current)?)?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(outcome)
}

fn check_directory(meta: &fs::Metadata) -> Result<(), CreationFailureKind> {
    if meta.file_type().is_symlink() {
        Err(CreationFailureKind::Symlink)
    } else if meta.is_dir() {
        Ok(())
    } else {
        Err(CreationFailureKind::NotADirectory)
    }
}

fn create_file(root: &Path, relative: &Path) -> Result<Outcome, CreationFailureKind> {
    if let Some(parent) = relative.parent() {
        create_directories(root, parent)?;
    }

    // `create_new` never follows a symlink at the final component and never
    // truncates.
    let path = root.join(relative);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => Ok(Outcome::Created),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            let meta = fs::symlink_metadata(&path)?;
            if meta.is_file() {
                Ok(Outcome::Existing)
            } else if meta.file_type().is_symlink() {
                Err(CreationFailureKind::Symlink)
            } else {
                Err(CreationFailureKind::NotAFile)
            }
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    /// Records every callback for assertions.
    #[derive(Default)]
    struct Recorder {
        created: Vec<PathBuf>,
        existing: Vec<PathBuf>,
        planned: Vec<PathBuf>,
        failed: Vec<PathBuf>,
    }

    impl Reporter for Recorder {
        fn created(&mut self, _entry: &Entry, path: &Path) {
            self.created.push(path.to_path_buf());
        }

        fn existing(&mut self, _entry: &Entry, path: &Path) {
            self.existing.push(path.to_path_buf());
        }

        fn planned(&mut self, _entry: &Entry, path: &Path) {
            self.planned.push(path.to_path_buf());
        }

        fn failed(&mut self, _entry: &Entry, failure: &CreationFailure) {
            self.failed.push(failure.path().to_path_buf());
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry::directory(["src"]),
            Entry::file(["src", "main.py"]),
            Entry::directory(["src", "utils"]),
            Entry::file(["src", "utils", "helpers.py"]),
        ]
    }

    #[test]
    fn test_single_pass_creates_in_order() {
        let dir = tempdir().unwrap();
        let mut recorder = Recorder::default();

        let report = Materializer::new(dir.path()).run(&sample(), &mut recorder);

        assert!(report.is_complete());
        assert_eq!(report.directories_created(), 2);
        assert_eq!(report.files_created(), 2);
        assert_eq!(
            recorder.created,
            vec![
                dir.path().join("src"),
                dir.path().join("src/main.py"),
                dir.path().join("src/utils"),
                dir.path().join("src/utils/helpers.py"),
            ]
        );
        assert_eq!(fs::metadata(dir.path().join("src/main.py")).unwrap().len(), 0);
    }

    #[test]
    fn test_two_pass_creates_directories_first() {
        let dir = tempdir().unwrap();
        let mut recorder = Recorder::default();

        Materializer::new(dir.path())
            .with_pass_mode(PassMode::TwoPass)
            .run(&sample(), &mut recorder);

        assert_eq!(
            recorder.created,
            vec![
                dir.path().join("src"),
                dir.path().join("src/utils"),
                dir.path().join("src/main.py"),
                dir.path().join("src/utils/helpers.py"),
            ]
        );
    }

    #[test]
    fn test_file_without_declared_parent_gets_one() {
        let dir = tempdir().unwrap();

        let report = Materializer::new(dir.path())
            .run(&[Entry::file(["a", "b", "c.txt"])], &mut Recorder::default());

        assert!(report.is_complete());
        assert!(dir.path().join("a/b/c.txt").is_file());
    }

    #[test]
    fn test_existing_entries_are_left_alone() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.py"), "print('hi')\n").unwrap();
        let mut recorder = Recorder::default();

        let report = Materializer::new(dir.path()).run(&sample(), &mut recorder);

        assert_eq!(report.existing(), 2);
        assert_eq!(report.files_created(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/main.py")).unwrap(),
            "print('hi')\n"
        );
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("src"), "").unwrap();
        let entries = vec![
            Entry::directory(["src"]),
            Entry::file(["src", "main.py"]),
            Entry::file(["README.md"]),
        ];
        let mut recorder = Recorder::default();

        let report = Materializer::new(dir.path()).run(&entries, &mut recorder);

        assert_eq!(report.failures().len(), 2);
        assert!(matches!(
            report.failures()[0].kind(),
            CreationFailureKind::NotADirectory
        ));
        assert!(matches!(
            report.failures()[1].kind(),
            CreationFailureKind::NotADirectory
        ));
        assert_eq!(recorder.created, vec![dir.path().join("README.md")]);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_directory_where_file_is_declared() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();

        let report =
            Materializer::new(dir.path()).run(&[Entry::file(["build"])], &mut Recorder::default());

        assert!(matches!(
            report.failures()[0].kind(),
            CreationFailureKind::NotAFile
        ));
        assert!(!report.failures()[0].is_directory());
    }

    #[test]
    fn test_unsafe_paths_are_refused() {
        let dir = tempdir().unwrap();
        let entries = vec![
            Entry::file(["..", "escape.txt"]),
            Entry::directory(["/abs"]),
        ];

        let report =
            Materializer::new(dir.path().join("root")).run(&entries, &mut Recorder::default());

        assert_eq!(report.failures().len(), 2);
        for failure in report.failures() {
            assert!(matches!(failure.kind(), CreationFailureKind::UnsafePath));
        }
        assert!(!dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("out");
        let mut recorder = Recorder::default();

        let report = Materializer::new(&root)
            .with_dry_run(true)
            .run(&sample(), &mut recorder);

        assert_eq!(report.planned(), 4);
        assert_eq!(recorder.planned.len(), 4);
        assert!(!root.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("target.txt"),
            dir.path().join("dangling.txt"),
        )
        .unwrap();
        let entries = vec![Entry::directory(["link"]), Entry::file(["dangling.txt"])];

        let report = Materializer::new(dir.path()).run(&entries, &mut Recorder::default());

        assert_eq!(report.failures().len(), 2);
        for failure in report.failures() {
            assert!(matches!(failure.kind(), CreationFailureKind::Symlink));
        }
        assert!(!outside.path().join("target.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_children_of_a_symlinked_directory_stay_inside() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        let entries = vec![
            Entry::directory(["link"]),
            Entry::file(["link", "secret.txt"]),
            Entry::directory(["link", "nested"]),
            Entry::file(["link", "nested", "deep.txt"]),
        ];
        let mut recorder = Recorder::default();

        let report = Materializer::new(dir.path()).run(&entries, &mut recorder);

        assert_eq!(report.failures().len(), 4);
        for failure in report.failures() {
            assert!(matches!(failure.kind(), CreationFailureKind::Symlink));
        }
        assert!(recorder.created.is_empty());
        assert!(!outside.path().join("secret.txt").exists());
        assert!(!outside.path().join("nested").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_two_pass_does_not_follow_symlinked_parent() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("src/utils")).unwrap();

        let report = Materializer::new(dir.path())
            .with_pass_mode(PassMode::TwoPass)
            .run(&sample(), &mut Recorder::default());

        assert_eq!(report.failures().len(), 2);
        assert!(dir.path().join("src/main.py").is_file());
        assert!(!outside.path().join("helpers.py").exists());
    }

    #[test]
    fn test_into_result() {
        let report = MaterializeReport {
            files_created: 3,
            failures: vec![CreationFailure::new(
                PathBuf::from("x"),
                &Entry::file(["x"]),
                CreationFailureKind::UnsafePath,
            )],
            ..Default::default()
        };

        let err = report.into_result().unwrap_err();
        assert_eq!(err.to_string(), "1 of 4 entries could not be created");
        assert!(MaterializeReport::default().into_result().is_ok());
    }
}
