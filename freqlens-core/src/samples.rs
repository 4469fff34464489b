use freqlens_common::Result;
use std::io::Read;
use std::path::Path;

/// Splits `raw` on commas and keeps every token that parses to a finite number.
///
/// Tokens are trimmed first. Empty tokens, words, `NaN` and infinities are dropped
/// without complaint; order of the surviving samples is preserved.
pub fn parse_samples(raw: &str) -> Vec<f64> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Counts tokens that `parse_samples` would discard, ignoring blank ones.
pub fn rejected_tokens(raw: &str) -> usize {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| !t.parse::<f64>().map(f64::is_finite).unwrap_or(false))
        .count()
}

/// Reads a sample file, treating line breaks as additional separators.
pub fn read_raw_input(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(lines_to_csv(&content))
}

pub fn read_raw_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    Ok(lines_to_csv(&content))
}

fn lines_to_csv(content: &str) -> String {
    content.lines().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_list() {
        assert_eq!(parse_samples("1,2,3.5"), vec![1.0, 2.0, 3.5]);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(parse_samples(" 4 ,\t5,6 "), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn junk_is_dropped() {
        assert_eq!(parse_samples("1,abc,,2,NaN,inf,-3e1"), vec![1.0, 2.0, -30.0]);
        assert_eq!(rejected_tokens("1,abc,,2,NaN,inf,-3e1"), 3);
    }

    #[test]
    fn nothing_numeric() {
        assert!(parse_samples("").is_empty());
        assert!(parse_samples("abc,def").is_empty());
        assert!(parse_samples(",,,").is_empty());
    }

    #[test]
    fn newlines_become_separators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.txt");
        std::fs::write(&path, "1,2\n3\r\n4,5\n").unwrap();
        let raw = read_raw_input(&path).unwrap();
        assert_eq!(parse_samples(&raw), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
