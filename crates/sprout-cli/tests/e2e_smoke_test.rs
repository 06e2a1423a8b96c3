use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use sprout_cli::{Args, run};

/// Collects all .txt files from a directory
fn collect_diagram_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(tree_file: &Path, output_dir: &Path, strict: bool) -> Args {
    Args {
        tree_file: tree_file.to_string_lossy().to_string(),
        output_dir: output_dir.to_string_lossy().to_string(),
        config: None,
        indent_width: None,
        strict,
        two_pass: false,
        dry_run: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_diagram_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_path = temp_dir
            .path()
            .join(demo_path.file_stem().unwrap().to_string_lossy().as_ref());

        // Strict mode: the demos must be clean diagrams
        if let Err(e) = run(&args(demo_path, &output_path, true)) {
            failed_demos.push((demo_path.clone(), e));
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_diagram_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpected_successes = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir
            .path()
            .join(demo_path.file_stem().unwrap().to_string_lossy().as_ref());

        if run(&args(demo_path, &output_path, true)).is_ok() {
            unexpected_successes.push(demo_path.clone());
        }

        // A strict parse failure happens before anything is created
        assert!(
            !output_path.join("app").exists() && !output_path.join("docs").exists(),
            "{} created entries despite failing",
            demo_path.display()
        );
    }

    if !unexpected_successes.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpected_successes {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpected_successes.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}
