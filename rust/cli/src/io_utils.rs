//! File I/O utilities shared across CLI commands.
//!
//! Helper functions for the small set of file operations the commands
//! need: reading a line of interactive input, slurping a history file,
//! and making sure a parent directory exists before a write.
//!
//! ## Error Handling
//!
//! Functions return `Result` types with appropriate error messages. I/O
//! errors are converted to `String` for easy integration with command
//! error handling.

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// This function is used for interactive commands that need user input.
/// It trims whitespace from the input and returns `None` on EOF or read
/// errors, which interactive loops treat as a quit.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => {
            let trimmed = line.trim();
            Some(trimmed.to_string())
        }
        Err(_) => None, // Read error
    }
}

/// Read a UTF-8 text file, stripping a BOM if present.
pub fn read_text(path: &str) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("failed to read {}: {}", path, e))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| format!("{} is not valid UTF-8: {}", path, e))?;
    if text.starts_with('\u{feff}') {
        text = text.trim_start_matches('\u{feff}').to_string();
    }
    Ok(text)
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_trims_and_returns() {
        let mut input = Cursor::new(b"  play 2  \n".to_vec());
        assert_eq!(read_stdin_line(&mut input), Some("play 2".to_string()));
    }

    #[test]
    fn test_read_stdin_line_none_on_eof() {
        let mut input = Cursor::new(Vec::new());
        assert_eq!(read_stdin_line(&mut input), None);
    }

    #[test]
    fn test_read_text_missing_file_is_an_error() {
        let err = read_text("definitely/not/here.jsonl").unwrap_err();
        assert!(err.contains("failed to read"));
    }
}
