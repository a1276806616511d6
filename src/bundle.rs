//! Output bundle: the Markdown file, its media folder and a ZIP archive of both.
//!
//! Layout, for base name `report`:
//!
//! ```text
//! report.md
//! report_media/document.001.png
//! report_media/document.002.png
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::render::RenderResult;

/// Files produced by one conversion, ready to be written out.
#[derive(Debug, Clone)]
pub struct Bundle<'a> {
    base_name: String,
    markdown: &'a str,
    images: &'a BTreeMap<String, Vec<u8>>,
}

impl<'a> Bundle<'a> {
    /// Bundle a render result under the given base name.
    ///
    /// The base name should match the one the Markdown was rendered with,
    /// so image links point into the written media folder.
    pub fn new(base_name: impl Into<String>, result: &'a RenderResult) -> Self {
        Self::from_parts(base_name, &result.markdown, &result.images)
    }

    /// Bundle Markdown text and an image manifest directly.
    pub fn from_parts(
        base_name: impl Into<String>,
        markdown: &'a str,
        images: &'a BTreeMap<String, Vec<u8>>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            markdown,
            images,
        }
    }

    /// Markdown file name (`<base>.md`).
    pub fn markdown_name(&self) -> String {
        format!("{}.md", self.base_name)
    }

    /// Media folder name (`<base>_media`).
    pub fn media_dir_name(&self) -> String {
        format!("{}_media", self.base_name)
    }

    /// Every bundle entry path with its content, in sorted order.
    pub fn entries(&self) -> BTreeMap<String, &[u8]> {
        let mut entries = BTreeMap::new();
        entries.insert(self.markdown_name(), self.markdown.as_bytes());
        let media_dir = self.media_dir_name();
        for (name, content) in self.images {
            entries.insert(format!("{}/{}", media_dir, name), content.as_slice());
        }
        entries
    }

    /// Write `<dir>/<base>.md` and `<dir>/<base>_media/*`; returns the Markdown path.
    pub fn write_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let markdown_path = dir.join(self.markdown_name());
        fs::write(&markdown_path, self.markdown)?;

        if !self.images.is_empty() {
            let media_dir = dir.join(self.media_dir_name());
            fs::create_dir_all(&media_dir)?;
            for (name, content) in self.images {
                fs::write(media_dir.join(name), content)?;
            }
        }

        log::debug!(
            "Wrote {} and {} media files",
            markdown_path.display(),
            self.images.len()
        );
        Ok(markdown_path)
    }

    /// Write the bundle as a ZIP archive.
    pub fn write_zip<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, content) in self.entries() {
            zip.start_file(path, options)?;
            zip.write_all(content)?;
        }

        Ok(zip.finish()?)
    }

    /// Write the bundle as a ZIP archive file.
    pub fn write_zip_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = self.write_zip(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }
}
