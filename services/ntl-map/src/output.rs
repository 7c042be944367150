//! Text map sink: file artifact plus console echo.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the rendered rows to `<dir>/<name>_ntl.txt` and stream the same
/// content to stdout. The file handle closes on every exit path.
pub fn write_map(dir: &Path, name: &str, rows: &[String]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}_ntl.txt"));

    let mut file = fs::File::create(&path)?;
    for row in rows {
        writeln!(file, "{row}")?;
        println!("{row}");
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_map_creates_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec!["\t🌎░".to_string(), "\t█.".to_string()];

        let path = write_map(dir.path(), "berlin", &rows).unwrap();
        assert_eq!(path.file_name().unwrap(), "berlin_ntl.txt");

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "\t🌎░\n\t█.\n");
    }

    #[test]
    fn test_write_map_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out");

        let path = write_map(&nested, "test", &[]).unwrap();
        assert!(path.parent().unwrap().exists());
    }
}
