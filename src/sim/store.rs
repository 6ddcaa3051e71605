/// Sparkline persistence: a tiny session store so the buy-ratio history
/// survives restarts. One line of comma-separated values in a writable
/// data directory. Every failure path degrades to "no history": the
/// host synthesizes a seed series instead, and rendering never blocks
/// on this file.

use std::path::{Path, PathBuf};

const SPARKLINE_FILE: &str = "sparkline.dat";
pub const MAX_POINTS: usize = 12;

/// Writable data directory.
/// Search order: (1) exe directory if writable (portable installs),
/// (2) ~/.local/share/trenchscape, (3) CWD.
fn data_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            let probe = parent.join(".write_test_trenchscape");
            if std::fs::write(&probe, "").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return parent.to_path_buf();
            }
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let dir = PathBuf::from(home).join(".local/share/trenchscape");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }

    PathBuf::from(".")
}

pub fn load_sparkline() -> Option<Vec<f32>> {
    load_sparkline_from(&data_dir())
}

pub fn save_sparkline(points: &[f32]) {
    save_sparkline_to(&data_dir(), points);
}

/// Parse the history file. Corrupt or too-short data reads as absent.
pub fn load_sparkline_from(dir: &Path) -> Option<Vec<f32>> {
    let text = std::fs::read_to_string(dir.join(SPARKLINE_FILE)).ok()?;
    let points: Vec<f32> = text
        .trim()
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    if points.len() < 2 || points.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let start = points.len().saturating_sub(MAX_POINTS);
    Some(points[start..].to_vec())
}

/// Write failures are ignored: the store is best-effort.
pub fn save_sparkline_to(dir: &Path, points: &[f32]) {
    let line = points
        .iter()
        .map(|p| format!("{:.2}", p))
        .collect::<Vec<_>>()
        .join(",");
    let _ = std::fs::write(dir.join(SPARKLINE_FILE), line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("trenchscape_store_{}", tag));
        let _ = std::fs::create_dir_all(&dir);
        dir
    }

    #[test]
    fn round_trip() {
        let dir = temp_dir("roundtrip");
        save_sparkline_to(&dir, &[61.0, 64.5, 58.25]);
        let loaded = load_sparkline_from(&dir).unwrap();
        assert_eq!(loaded, vec![61.0, 64.5, 58.25]);
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = temp_dir("corrupt");
        std::fs::write(dir.join(SPARKLINE_FILE), "61.0,not_a_number,58").unwrap();
        assert!(load_sparkline_from(&dir).is_none());
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = temp_dir("missing");
        let _ = std::fs::remove_file(dir.join(SPARKLINE_FILE));
        assert!(load_sparkline_from(&dir).is_none());
    }

    #[test]
    fn single_point_is_not_enough() {
        let dir = temp_dir("single");
        std::fs::write(dir.join(SPARKLINE_FILE), "61.0").unwrap();
        assert!(load_sparkline_from(&dir).is_none());
    }

    #[test]
    fn long_history_keeps_the_tail() {
        let dir = temp_dir("tail");
        let points: Vec<f32> = (0..20).map(|i| i as f32).collect();
        save_sparkline_to(&dir, &points);
        let loaded = load_sparkline_from(&dir).unwrap();
        assert_eq!(loaded.len(), MAX_POINTS);
        assert_eq!(loaded[0], 8.0);
        assert_eq!(loaded[MAX_POINTS - 1], 19.0);
    }
}
