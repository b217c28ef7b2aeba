//! Whitespace-delimited numeric tables
//!
//! One row per line, values separated by a single space and written in
//! scientific notation with 18 fractional digits and a signed two-digit
//! exponent (`4.800000000000000000e+01`). Reading accepts any whitespace
//! separation, skips blank lines and lines starting with `#`.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Format one value the way table files store it.
pub fn format_value(v: f64) -> String {
    let s = format!("{:.18e}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => s,
    }
}

/// Write rows of values to `writer`.
pub fn write_table<W, R>(writer: &mut W, rows: &[R]) -> IoResult<()>
where
    W: Write,
    R: AsRef<[f32]>,
{
    for row in rows {
        let line = row
            .as_ref()
            .iter()
            .map(|&v| format_value(f64::from(v)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

/// Write rows of values to a file, replacing it if present.
pub fn write_table_file<P, R>(path: P, rows: &[R]) -> IoResult<()>
where
    P: AsRef<Path>,
    R: AsRef<[f32]>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_table(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Read rows of values from `reader`.
///
/// Rows may have different lengths; callers check the shape they expect.
///
/// # Errors
///
/// Returns [`IoError::TableParse`] with the 1-based line number when a
/// token is not a number.
pub fn read_table<R: BufRead>(reader: R) -> IoResult<Vec<Vec<f32>>> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let row = trimmed
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f32>().map_err(|e| IoError::TableParse {
                    line: i + 1,
                    message: format!("'{}': {}", tok, e),
                })
            })
            .collect::<IoResult<Vec<f32>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read rows of values from a file.
pub fn read_table_file<P: AsRef<Path>>(path: P) -> IoResult<Vec<Vec<f32>>> {
    read_table(BufReader::new(File::open(path.as_ref())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(48.0), "4.800000000000000000e+01");
        assert_eq!(format_value(0.0), "0.000000000000000000e+00");
        assert_eq!(format_value(255.0), "2.550000000000000000e+02");
        assert_eq!(format_value(0.5), "5.000000000000000000e-01");
    }

    #[test]
    fn test_read_skips_blank_and_comments() {
        let text = "# header\n1.0 2.0\n\n  3e+00   4\n";
        let rows = read_table(text.as_bytes()).unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_read_reports_line() {
        let err = read_table("1 2\n3 x\n".as_bytes()).unwrap_err();
        match err {
            IoError::TableParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
