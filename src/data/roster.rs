//! Roster loading for the command line tool

use anyhow::Result;
use crate::data::Member;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load members from a JSON array of member records
pub fn load_members(path: &str) -> Result<Vec<Member>> {
    log::info!("Reading roster file: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let reader = BufReader::new(File::open(path)?);
    let members: Vec<Member> = serde_json::from_reader(reader)?;

    log::info!("Loaded {} members", members.len());

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_array_of_members() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 0, "name": "A", "room": "101"}}, {{"id": 1, "name": "B", "courses": ["CS1"]}}]"#
        )
        .unwrap();

        let members = load_members(file.path().to_str().unwrap()).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].courses, vec!["CS1".to_string()]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_members("/nonexistent/roster.json").is_err());
    }
}
