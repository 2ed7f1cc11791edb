/*!
 * Tests for full unificar runs
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::tempdir;

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::error::{SkipReason, UnificarError};
use crate::types::StaleArtifact;
use crate::utils::OUTPUT_FILE;

fn rule() -> String {
    "=".repeat(50)
}

fn banner(path: &str) -> String {
    format!("\n\n{rule}\nARCHIVO: {path}\n{rule}\n\n", rule = rule())
}

fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content)
}

// Helper function to create a small project tree
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    write_file(&root.join("index.js"), b"require('./core/logic');\n")?;
    write_file(&root.join("README.md"), b"# Radar\n")?;
    write_file(&root.join("core").join("logic.js"), b"module.exports = {};\n")?;
    write_file(
        &root.join("config").join("settings.js"),
        b"export const port = 3000;\n",
    )?;
    write_file(&root.join("package.json"), b"{ \"name\": \"radar\" }\n")?;

    // Everything below should stay out of the output
    write_file(&root.join("node_modules").join("x").join("index.js"), b"dep")?;
    write_file(&root.join(".git").join("config"), b"[core]\n")?;
    write_file(&root.join("dist").join("bundle.js"), b"minified")?;
    write_file(&root.join("package-lock.json"), b"{}")?;
    write_file(&root.join(".DS_Store"), b"\0\0\x01Bud1")?;
    write_file(&root.join("assets").join("logo.png"), b"\x89PNG\r\n")?;
    write_file(&root.join("assets").join("photo.jpg"), b"\xff\xd8\xff")?;

    Ok(temp_dir)
}

fn read_output(root: &Path) -> io::Result<String> {
    fs::read_to_string(root.join(OUTPUT_FILE))
}

#[test]
fn test_literal_scenario() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), b"hello")?;
    write_file(&temp_dir.path().join("node_modules").join("x.txt"), b"nope")?;

    let report = Aggregator::headless(Config::new(temp_dir.path())).run()?;

    let output = read_output(temp_dir.path())?;
    assert_eq!(output, format!("{}hello", banner("./a.txt")));
    assert_eq!(output.matches("ARCHIVO:").count(), 1);
    assert!(!output.contains("node_modules"));
    assert_eq!(report.files_included(), 1);
    assert_eq!(report.files_skipped(), 0);
    assert_eq!(report.bytes_written, output.len());

    Ok(())
}

#[test]
fn test_basic_run() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let report = Aggregator::headless(Config::new(temp_dir.path())).run()?;
    let output = read_output(temp_dir.path())?;

    assert!(output.contains(&format!("{}require('./core/logic');\n", banner("./index.js"))));
    assert!(output.contains(&format!("{}module.exports = {{}};\n", banner("./core/logic.js"))));
    assert!(output.contains("ARCHIVO: ./config/settings.js"));
    assert!(output.contains("ARCHIVO: ./README.md"));
    assert!(output.contains("ARCHIVO: ./package.json"));
    assert_eq!(report.files_included(), 5);
    assert_eq!(report.stale_artifact, StaleArtifact::Absent);

    Ok(())
}

#[test]
fn test_excluded_directories_at_any_depth() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    write_file(&root.join("src").join("build").join("gen.js"), b"generated")?;
    write_file(
        &root.join("src").join("deep").join("logs").join("today.log"),
        b"log line",
    )?;
    write_file(&root.join("src").join("builder.js"), b"kept")?;

    Aggregator::headless(Config::new(root)).run()?;
    let output = read_output(root)?;

    for hidden in ["node_modules", ".git", "dist", "/build/", "/logs/"] {
        assert!(!output.contains(hidden), "{} leaked into output", hidden);
    }
    assert!(!output.contains("generated"));
    assert!(!output.contains("log line"));
    assert!(!output.contains("dep"));
    assert!(output.contains("ARCHIVO: ./src/builder.js"));

    Ok(())
}

#[test]
fn test_excluded_names_and_extensions() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let report = Aggregator::headless(Config::new(temp_dir.path())).run()?;
    let output = read_output(temp_dir.path())?;

    assert!(!output.contains("package-lock.json"));
    assert!(!output.contains(".DS_Store"));
    assert!(!output.contains("logo.png"));
    assert!(!output.contains("photo.jpg"));

    // Filtered files are not attempted, so they are not reported as skipped
    assert!(report.skipped.is_empty());

    Ok(())
}

#[test]
fn test_files_before_subdirectories_in_name_order() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("b.txt"), b"b")?;
    write_file(&root.join("a").join("inner.txt"), b"inner")?;
    write_file(&root.join("z.txt"), b"z")?;
    write_file(&root.join("c").join("d").join("deep.txt"), b"deep")?;
    write_file(&root.join("c").join("c.txt"), b"c")?;

    let report = Aggregator::headless(Config::new(root)).run()?;
    let order: Vec<&str> = report.file_details.iter().map(|f| f.path.as_str()).collect();

    assert_eq!(
        order,
        vec![
            "./b.txt",
            "./z.txt",
            "./a/inner.txt",
            "./c/c.txt",
            "./c/d/deep.txt"
        ]
    );

    // The output follows the same order
    let output = read_output(root)?;
    let positions: Vec<usize> = order
        .iter()
        .map(|p| output.find(&format!("ARCHIVO: {}\n", p)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    Ok(())
}

#[test]
fn test_rerun_is_byte_identical_and_not_self_embedding() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = Config::new(temp_dir.path());

    Aggregator::headless(config.clone()).run()?;
    let first = fs::read(&config.output_file)?;

    let report = Aggregator::headless(config.clone()).run()?;
    let second = fs::read(&config.output_file)?;

    assert_eq!(first, second);
    assert_eq!(report.stale_artifact, StaleArtifact::Removed);
    assert!(!String::from_utf8_lossy(&second).contains(OUTPUT_FILE));

    Ok(())
}

#[test]
fn test_nested_output_name_is_excluded_too() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("a.txt"), b"hello")?;
    write_file(&root.join("sub").join(OUTPUT_FILE), b"an old dump")?;

    Aggregator::headless(Config::new(root)).run()?;
    let output = read_output(root)?;

    assert!(!output.contains("an old dump"));

    Ok(())
}

#[test]
fn test_undecodable_file_is_isolated() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    write_file(&root.join("core").join("blob.bin"), &[b'o', b'k', 0xff, 0xfe, 0x00])?;

    let report = Aggregator::headless(Config::new(root)).run()?;
    let output = read_output(root)?;

    assert!(!output.contains("blob.bin"));
    assert_eq!(report.files_included(), 5);
    assert_eq!(report.files_skipped(), 1);
    assert_eq!(report.skipped[0].path, "./core/blob.bin");
    assert_eq!(report.skipped[0].reason, SkipReason::Decode { valid_up_to: 2 });

    // Neighbours stay intact and correctly delimited
    assert!(output.contains(&format!("{}module.exports = {{}};\n", banner("./core/logic.js"))));
    assert_eq!(output.matches("ARCHIVO:").count(), 5);
    assert_eq!(output.matches(&rule()).count(), 10);

    Ok(())
}

#[test]
fn test_binary_without_denylisted_extension_is_attempted() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    // Valid UTF-8 with control bytes still counts as text
    write_file(&root.join("data.bin"), &[0u8, 1u8, 2u8, 3u8])?;

    let report = Aggregator::headless(Config::new(root)).run()?;
    let output = fs::read(root.join(OUTPUT_FILE))?;

    assert_eq!(report.files_included(), 1);
    assert!(output.ends_with(&[0u8, 1u8, 2u8, 3u8]));

    Ok(())
}

#[test]
fn test_empty_tree_writes_empty_file() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("node_modules").join("a.js"), b"x")?;

    let report = Aggregator::headless(Config::new(temp_dir.path())).run()?;

    assert_eq!(read_output(temp_dir.path())?, "");
    assert_eq!(report.files_included(), 0);
    assert_eq!(report.bytes_written, 0);

    Ok(())
}

#[test]
fn test_stale_removal_failure_continues_to_final_write() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("a.txt"), b"hello")?;
    // A directory at the output path cannot be removed as a file,
    // and the final write then fails too
    fs::create_dir(root.join(OUTPUT_FILE))?;

    let result = Aggregator::headless(Config::new(root)).run();

    // The error comes from the write, not from the cleanup
    assert!(matches!(result, Err(UnificarError::Writer(_))));
    assert!(root.join(OUTPUT_FILE).is_dir());

    Ok(())
}

#[test]
fn test_missing_root_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let result = Aggregator::headless(Config::new(temp_dir.path().join("nope"))).run();

    assert!(result.is_err());
}

#[cfg(unix)]
#[test]
fn test_symlinks() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("real").join("a.txt"), b"real")?;
    std::os::unix::fs::symlink(root.join("real").join("a.txt"), root.join("link.txt"))?;
    std::os::unix::fs::symlink(root.join("real"), root.join("linked_dir"))?;
    std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt"))?;

    let report = Aggregator::headless(Config::new(root)).run()?;
    let output = read_output(root)?;

    // File links are read, directory links are neither walked nor read
    assert!(output.contains(&format!("{}real", banner("./link.txt"))));
    assert!(output.contains(&format!("{}real", banner("./real/a.txt"))));
    assert!(!output.contains("linked_dir"));

    assert_eq!(report.files_skipped(), 1);
    assert_eq!(report.skipped[0].path, "./dangling.txt");
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::Io {
            kind: io::ErrorKind::NotFound,
            ..
        }
    ));

    Ok(())
}
