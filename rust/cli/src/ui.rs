//! Small helpers for consistent terminal messages.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message with a "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Left-aligned table row: the first column padded to `width`.
pub fn row(
    out: &mut dyn Write,
    width: usize,
    label: &str,
    value: impl std::fmt::Display,
) -> std::io::Result<()> {
    writeln!(out, "  {:<width$} {}", label, value, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes() {
        let mut buf = Vec::new();
        write_error(&mut buf, "boom").unwrap();
        display_warning(&mut buf, "careful").unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "Error: boom\nWARNING: careful\n");
    }

    #[test]
    fn rows_align() {
        let mut buf = Vec::new();
        row(&mut buf, 6, "pot", 30).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "  pot    30\n");
    }
}
