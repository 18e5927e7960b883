use anyhow::Result;
use std::path::{Path, PathBuf};

use super::payload::ExportPayload;
use crate::persistence::atomic_write;

/// Render the export payload as a Markdown document.
///
/// This is the rendering collaborator: it decides layout, the payload
/// supplies the data. Pagination concerns ("Page i of N") belong to
/// renderers with pages; a Markdown document has none.
pub fn render_markdown(payload: &ExportPayload) -> String {
    let mut doc = String::new();

    doc.push_str(&format!("# {}\n\n", payload.title));
    doc.push_str(&payload.generated);
    doc.push('\n');
    if !payload.day_start.is_empty() || !payload.day_end.is_empty() {
        let start = if payload.day_start.is_empty() { "?" } else { &payload.day_start };
        let end = if payload.day_end.is_empty() { "?" } else { &payload.day_end };
        doc.push_str(&format!("Hours: {} - {}\n", start, end));
    }
    doc.push('\n');

    doc.push_str(&format!(
        "| {} | {} | {} |\n",
        payload.head[0], payload.head[1], payload.head[2]
    ));
    doc.push_str("| ---: | --- | ---: |\n");
    for row in &payload.rows {
        doc.push_str(&format!("| {} | {} | {} |\n", row[0], row[1], row[2]));
    }
    doc.push('\n');

    doc.push_str("## Summary\n\n");
    for line in &payload.summary_lines {
        doc.push_str(&format!("- {}\n", line));
    }

    doc
}

/// Write the rendered document into `dir`, atomically, and return its path
pub fn write_document(payload: &ExportPayload, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.md", payload.file_stem));
    let doc = render_markdown(payload);
    atomic_write(&path, &doc)?;
    Ok(path)
}
