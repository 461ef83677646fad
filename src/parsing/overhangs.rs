use std::path::Path;

/// Read a list of overhangs from a text file
///
/// # Errors
///
/// Returns an IO error if the file cannot be read.
pub fn parse_overhang_file(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_overhang_text(&content))
}

/// Split text into overhang strings.
///
/// Overhangs may be separated by commas, semicolons or whitespace; anything
/// after `#` on a line is ignored. Order and repeats are preserved, since
/// repeats are themselves a defect to report.
#[must_use]
pub fn parse_overhang_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|c: char| c == ',' || c == ';' || c.is_whitespace()))
        .map(|token| token.trim_matches('"'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_overhang_text() {
        let text = "# EcoFlex level 2\nCTAT, GTAC\nGGAC;TCGA TGTT  # last\n";
        assert_eq!(
            parse_overhang_text(text),
            vec!["CTAT", "GTAC", "GGAC", "TCGA", "TGTT"]
        );
    }

    #[test]
    fn test_parse_preserves_repeats() {
        assert_eq!(parse_overhang_text("TCCG,TCCG"), vec!["TCCG", "TCCG"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_overhang_text("\n# only a comment\n").is_empty());
    }

    #[test]
    fn test_parse_overhang_file() {
        let mut temp = NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b"AATT\nTAGG\n\"CCTA\"\n").unwrap();
        temp.flush().unwrap();

        let overhangs = parse_overhang_file(temp.path()).unwrap();
        assert_eq!(overhangs, vec!["AATT", "TAGG", "CCTA"]);
    }
}
