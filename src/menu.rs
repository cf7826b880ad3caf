//! Interactive prompt and post-run menu.
//!
//! Reads from any `BufRead` and writes to any `Write`, so the loop can be
//! driven by stdin/stdout in the binary and by in-memory buffers in tests.

use crate::models::Accumulator;
use crate::outputs::{delimited, display};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::error;

/// Print `message` and read one trimmed line. `None` at end of input.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Save,
    Display,
    Exit,
}

impl Choice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Choice::Save),
            "2" => Some(Choice::Display),
            "3" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Save / display / exit loop over a finished run.
///
/// Save failures are reported and the menu keeps going. End of input exits.
pub async fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    acc: &Accumulator,
    default_output: &str,
    delimiter: u8,
) -> io::Result<()> {
    loop {
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. Save scraped data to CSV")?;
        writeln!(out, "2. Display scraped data")?;
        writeln!(out, "3. Exit")?;

        let Some(answer) = prompt(input, out, "Enter your choice: ")? else {
            return Ok(());
        };

        match Choice::parse(&answer) {
            Some(Choice::Save) => {
                let message = format!("Enter the filename to save data (default: {default_output}): ");
                let filename = match prompt(input, out, &message)? {
                    Some(name) if !name.is_empty() => name,
                    _ => default_output.to_string(),
                };
                let table = acc.finalize();
                match delimited::write_table(&table, Path::new(&filename), delimiter).await {
                    Ok(()) => writeln!(out, "Data saved to '{filename}' ({} rows).", table.len())?,
                    Err(e) => {
                        error!(path = %filename, error = %e, "Failed to save table");
                        writeln!(out, "Could not save to '{filename}': {e}")?;
                    }
                }
            }
            Some(Choice::Display) => display::render(&acc.to_table(), out)?,
            Some(Choice::Exit) => {
                writeln!(out, "Exiting. Goodbye!")?;
                return Ok(());
            }
            None => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::SelectorChain;
    use crate::models::Record;
    use crate::schema::{Field, Schema};
    use std::io::Cursor;

    fn accumulator() -> Accumulator {
        let schema = Schema::new(
            "test",
            vec![
                Field::new("title", "No Title Found", SelectorChain::new()),
                Field::new("url", "", SelectorChain::new()),
            ],
            "title",
        )
        .unwrap();
        let mut acc = Accumulator::new(&schema);
        acc.push(Record::new(vec![
            ("title".to_string(), "Storm".to_string()),
            ("url".to_string(), "https://www.cnn.com/a".to_string()),
        ]))
        .unwrap();
        acc.push(Record::new(vec![
            ("title".to_string(), String::new()),
            ("url".to_string(), "https://www.cnn.com/b".to_string()),
        ]))
        .unwrap();
        acc
    }

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let mut input = Cursor::new("  https://x.test  \n");
        let mut out = Vec::new();
        let line = prompt(&mut input, &mut out, "URL: ").unwrap();
        assert_eq!(line.as_deref(), Some("https://x.test"));
        assert_eq!(out, b"URL: ");
        assert_eq!(prompt(&mut input, &mut out, "URL: ").unwrap(), None);
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::Save));
        assert_eq!(Choice::parse(" 2\n"), Some(Choice::Display));
        assert_eq!(Choice::parse("3"), Some(Choice::Exit));
        assert_eq!(Choice::parse("4"), None);
    }

    #[tokio::test]
    async fn test_display_then_invalid_then_exit() {
        let mut input = Cursor::new("2\n9\n3\n");
        let mut out = Vec::new();
        run(&mut input, &mut out, &accumulator(), "cnn_news.csv", b',')
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Record 1:\ntitle: Storm"));
        assert!(text.contains("Record 2:\ntitle: \n"));
        assert!(text.contains("Invalid choice. Please try again."));
        assert!(text.ends_with("Exiting. Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_save_with_custom_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picked.csv");
        let mut input = Cursor::new(format!("1\n{}\n3\n", path.display()));
        let mut out = Vec::new();

        run(&mut input, &mut out, &accumulator(), "unused.csv", b',')
            .await
            .unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "title,url\nStorm,https://www.cnn.com/a\n");
        assert!(String::from_utf8(out).unwrap().contains("(1 rows)"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        run(&mut input, &mut out, &accumulator(), "x.csv", b',')
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Enter your choice: "));
    }
}
