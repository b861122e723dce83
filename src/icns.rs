use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::constants::manifest::{ICONSET_ENTRIES, PLACEHOLDER_ICNS};
use crate::render::render_to_png;

/// How icon.icns was produced on this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcnsOutcome {
    /// The converter built a real ICNS from the staged iconset
    Converted,
    /// The converter ran (or failed to start) and did not succeed
    ConversionFailed(String),
    /// No converter was available, a placeholder was written instead
    Placeholder,
}

/// Look up the iconset converter on PATH. Absolute and relative paths are
/// accepted as-is when they point at an executable.
pub fn find_converter(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Render every iconset entry into `iconset_dir`, creating it if needed
pub fn stage_iconset(iconset_dir: &Path) -> Result<()> {
    fs::create_dir_all(iconset_dir).with_context(|| {
        format!("Failed to create iconset directory: {}", iconset_dir.display())
    })?;

    for &(size, filename) in ICONSET_ENTRIES {
        render_to_png(size, &iconset_dir.join(filename))?;
    }

    Ok(())
}

/// Run `converter -c icns <iconset_dir> -o <output>`.
///
/// Any existing `output` is removed first, and whatever the converter wrote
/// is removed again if it fails, so a failed conversion never leaves an ICNS
/// behind. The converter's stdout goes straight to the terminal.
pub fn run_converter(converter: &Path, iconset_dir: &Path, output: &Path) -> Result<()> {
    remove_if_exists(output)?;

    let result = Command::new(converter)
        .args(["-c", "icns"])
        .arg(iconset_dir)
        .arg("-o")
        .arg(output)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("Failed to run {}", converter.display()))?;

    if !result.status.success() {
        remove_if_exists(output)?;
        bail!(
            "{} failed ({}): {}",
            converter.display(),
            result.status,
            String::from_utf8_lossy(&result.stderr).trim()
        );
    }

    Ok(())
}

pub fn write_placeholder(path: &Path) -> Result<()> {
    fs::write(path, PLACEHOLDER_ICNS)
        .with_context(|| format!("Failed to write placeholder ICNS: {}", path.display()))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.icns");
        write_placeholder(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![0x69, 0x63, 0x6E, 0x73]);
    }

    #[test]
    fn test_stage_iconset_writes_all_entries() {
        let dir = tempfile::tempdir().unwrap();
        let iconset = dir.path().join("icon.iconset");
        stage_iconset(&iconset).unwrap();
        // Second call reuses the existing directory
        stage_iconset(&iconset).unwrap();

        for &(size, filename) in ICONSET_ENTRIES {
            let img = image::open(iconset.join(filename)).unwrap();
            assert_eq!((img.width(), img.height()), (size, size), "{}", filename);
        }
        assert_eq!(fs::read_dir(&iconset).unwrap().count(), ICONSET_ENTRIES.len());
    }

    #[test]
    fn test_missing_converter_not_found() {
        assert!(find_converter("definitely-not-a-real-iconutil-binary").is_none());
    }

    #[test]
    fn test_remove_if_exists_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        remove_if_exists(&dir.path().join("nothing-here")).unwrap();
    }

    #[test]
    fn test_missing_converter_binary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("icon.icns");
        let result = run_converter(&dir.path().join("no-such-iconutil"), dir.path(), &output);
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_converter_removes_partial_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-iconutil");
        fs::write(&script, "#!/bin/sh\nprintf partial > \"$5\"\nexit 1\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let output = dir.path().join("icon.icns");
        assert!(run_converter(&script, dir.path(), &output).is_err());
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_converter_reports_error_and_clears_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-iconutil");
        fs::write(&script, "#!/bin/sh\necho broken iconset >&2\nexit 1\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let output = dir.path().join("icon.icns");
        fs::write(&output, b"stale").unwrap();

        let err = run_converter(&script, dir.path(), &output).unwrap_err();
        assert!(format!("{:#}", err).contains("broken iconset"));
        assert!(!output.exists());
    }
}
