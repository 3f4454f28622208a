use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{FetchResult, ReleaseId};

/// Render a fetch outcome.
///
/// The page body goes to `output` (or stdout); the summary goes to stderr so
/// stdout stays pipeable.
pub fn render(
    result: &FetchResult,
    release_id: ReleaseId,
    url: &str,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    if let FetchResult::Ok { body } = result {
        write_body(body, output)?;
    }

    if quiet {
        if let FetchResult::Error { code } = result {
            eprintln!("{} HTTP {}", "error:".red().bold(), code);
        }
        return Ok(());
    }

    eprintln!(
        "\n {} v{}",
        "discogs-listings".bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{}", summary_table(result, release_id, url, output));

    if let FetchResult::Error { code } = result {
        eprintln!(
            " {} The marketplace answered HTTP {}; no listings were returned.\n",
            "[ERROR]".red().bold(),
            code
        );
    }

    Ok(())
}

fn write_body(body: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, body)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn summary_table(
    result: &FetchResult,
    release_id: ReleaseId,
    url: &str,
    output: Option<&Path>,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Release").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Size").add_attribute(Attribute::Bold),
        ]);

    let (status_cell, size) = match result {
        FetchResult::Ok { body } => (
            Cell::new("✓ ok").fg(Color::Green),
            match output {
                Some(path) => format!("{} bytes → {}", body.len(), path.display()),
                None => format!("{} bytes", body.len()),
            },
        ),
        FetchResult::Error { code } => (
            Cell::new(format!("✗ {}", code)).fg(Color::Red),
            "-".to_string(),
        ),
    };

    table.add_row(vec![
        Cell::new(release_id.to_string()),
        Cell::new(url),
        status_cell.set_alignment(CellAlignment::Center),
        Cell::new(size),
    ]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_summary_table_success() {
        let result = FetchResult::Ok {
            body: "<html>listings</html>".to_string(),
        };
        let table = summary_table(
            &result,
            ReleaseId(1),
            "https://www.discogs.com/sell/release/1",
            None,
        )
        .to_string();
        assert!(table.contains("ok"));
        assert!(table.contains("21 bytes"));
    }

    #[test]
    fn test_summary_table_error() {
        let result = FetchResult::Error { code: 404 };
        let table =
            summary_table(&result, ReleaseId(1), "http://x/sell/release/1", None).to_string();
        assert!(table.contains("404"));
    }

    #[test]
    fn test_body_written_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listings.html");
        let result = FetchResult::Ok {
            body: "<html>listings</html>".to_string(),
        };
        render(&result, ReleaseId(1), "http://x/sell/release/1", Some(&path), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<html>listings</html>"
        );
    }

    #[test]
    fn test_error_writes_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listings.html");
        render(
            &FetchResult::Error { code: 503 },
            ReleaseId(1),
            "http://x/sell/release/1",
            Some(&path),
            true,
        )
        .unwrap();
        assert!(!path.exists());
    }
}
