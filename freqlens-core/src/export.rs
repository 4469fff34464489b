use std::io::Write;
use std::path::Path;
use freqlens_common::{BinningConfig, FreqLensError, Result};
use crate::binning::Distribution;

pub fn fmt_real(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}")
}

pub fn fmt_pct(ratio: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", ratio * 100.0)
}

/// `[start, end)`, except the last interval which is closed: `[start, end]`.
pub fn interval_label(start: f64, end: f64, is_last: bool, decimals: usize) -> String {
    let close = if is_last { ']' } else { ')' };
    format!("[{}, {}{close}", fmt_real(start, decimals), fmt_real(end, decimals))
}

// --- headless summary output ---

pub fn write_summary<W: Write>(out: &mut W, dist: &Distribution, decimals: usize) -> Result<()> {
    writeln!(out, "{:<16} {}", "Minimum:", fmt_real(dist.min, decimals))?;
    writeln!(out, "{:<16} {}", "Maximum:", fmt_real(dist.max, decimals))?;
    writeln!(out, "{:<16} {}", "Range:", fmt_real(dist.range, decimals))?;
    writeln!(out, "{:<16} {}", "Samples:", dist.n)?;
    writeln!(out, "{:<16} {}", "Sturges k:", dist.sturges_k)?;
    writeln!(out, "{:<16} {}", "Intervals:", dist.k)?;
    writeln!(out, "{:<16} {}", "Width:", fmt_real(dist.interval_width, decimals))?;
    if dist.unplaced > 0 {
        writeln!(out, "{:<16} {}", "Unplaced:", dist.unplaced)?;
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, dist: &Distribution, decimals: usize) -> Result<()> {
    writeln!(
        out,
        "{:<24} {:>10} {:>6} {:>9} {:>6} {:>9}",
        "interval", "mark", "f", "rel", "F", "cum rel"
    )?;
    let last = dist.intervals.len().saturating_sub(1);
    for (i, b) in dist.intervals.iter().enumerate() {
        writeln!(
            out,
            "{:<24} {:>10} {:>6} {:>9} {:>6} {:>9}",
            interval_label(b.start, b.end, i == last, decimals),
            fmt_real(b.mark, decimals),
            b.frequency,
            fmt_pct(b.relative_frequency, decimals),
            b.cumulative_frequency,
            fmt_pct(b.cumulative_relative_frequency, decimals),
        )?;
    }
    Ok(())
}

pub fn print_summary(dist: &Distribution, decimals: usize) -> Result<()> {
    write_summary(&mut std::io::stdout().lock(), dist, decimals)
}

pub fn print_table(dist: &Distribution, decimals: usize) -> Result<()> {
    write_table(&mut std::io::stdout().lock(), dist, decimals)
}

// --- JSON export ---

pub fn export_json(output_path: &Path, dist: &Distribution, config: &BinningConfig) -> Result<()> {
    let doc = serde_json::json!({
        "config": config,
        "distribution": dist,
    });
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, &doc)?;
    Ok(())
}

// --- CSV export ---

pub fn export_csv(output_path: &Path, dist: &Distribution) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    writeln!(file, "start,end,mark,frequency,relative_frequency,cumulative_frequency,cumulative_relative_frequency")?;
    for b in &dist.intervals {
        writeln!(file, "{},{},{},{},{:.6},{},{:.6}",
            b.start,
            b.end,
            b.mark,
            b.frequency,
            b.relative_frequency,
            b.cumulative_frequency,
            b.cumulative_relative_frequency,
        )?;
    }
    Ok(())
}

pub fn export(output_path: &Path, format: &str, dist: &Distribution, config: &BinningConfig) -> Result<()> {
    match format {
        "json" => export_json(output_path, dist, config),
        "csv" => export_csv(output_path, dist),
        _ => Err(FreqLensError::Other(format!("Unknown format: {format} (use json or csv)"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::compute;

    #[test]
    fn labels_close_only_the_last_interval() {
        assert_eq!(interval_label(1.0, 2.8, false, 2), "[1.00, 2.80)");
        assert_eq!(interval_label(8.2, 10.1, true, 2), "[8.20, 10.10]");
    }

    #[test]
    fn percentages() {
        assert_eq!(fmt_pct(0.2, 2), "20.00%");
        assert_eq!(fmt_pct(1.0, 0), "100%");
    }

    #[test]
    fn summary_block() {
        let d = compute("1,2,3,4,5,6,7,8,9,10", &BinningConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_summary(&mut buf, &d, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Range:           9.00"));
        assert!(text.contains("Sturges k:       5"));
        assert!(text.contains("Width:           1.80"));
        assert!(!text.contains("Unplaced"));
    }

    #[test]
    fn table_rows() {
        let d = compute("1,2,3,4,5,6,7,8,9,10", &BinningConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &d, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("[1.00, 2.80)"));
        assert!(lines[5].starts_with("[8.20, 10.10]"));
        assert!(lines[5].ends_with("100.00%"));
    }

    #[test]
    fn unknown_format_rejected() {
        let d = compute("1,2", &BinningConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = export(&dir.path().join("out.xml"), "xml", &d, &BinningConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown format"));
    }
}
