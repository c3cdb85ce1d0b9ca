//! ZIP download: the rendered page plus the content tree it came from.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::ContentTree;

pub fn bundle_zip(html: &str, tree: &ContentTree) -> Result<Vec<u8>> {
    let content_json =
        serde_json::to_vec_pretty(tree).context("Failed to serialize content tree")?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("index.html", options)
        .context("Failed to start index.html")?;
    zip.write_all(html.as_bytes())
        .context("Failed to write index.html")?;

    zip.start_file("content.json", options)
        .context("Failed to start content.json")?;
    zip.write_all(&content_json)
        .context("Failed to write content.json")?;

    let cursor = zip.finish().context("Failed to finish ZIP archive")?;
    Ok(cursor.into_inner())
}
