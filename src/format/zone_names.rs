//! Plain-text `timezone_names.txt`: one zone name per line, index == zone id.

use std::path::Path;

use crate::error::{Error, Result};

pub fn read(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
}

pub fn write(path: &Path, names: &[String]) -> Result<()> {
    let mut body = names.join("\n");
    body.push('\n');
    std::fs::write(path, body).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timezone_names.txt");
        let names = vec!["Test/Berlin".to_string(), "Etc/GMT".to_string()];
        write(&path, &names).unwrap();
        assert_eq!(read(&path).unwrap(), names);
    }

    #[test]
    fn skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timezone_names.txt");
        std::fs::write(&path, "Test/Berlin\n\nEtc/GMT\n").unwrap();
        assert_eq!(read(&path).unwrap(), vec!["Test/Berlin", "Etc/GMT"]);
    }
}
