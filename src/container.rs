use super::{Error, Result};
use crate::parser_config::AnalyzerConfig;
use std::{
    collections::HashMap,
    io::{Cursor, Read},
    path::Path,
};

/// Holds the decompressed entries of a loaded PowerPoint (pptx) container.
///
/// `PptxArchive` knows nothing about XML: it decompresses every entry once when
/// opened and afterwards answers exact-name lookups from memory. Because it never
/// changes after [`PptxArchive::open`], a shared reference can be handed to
/// several worker threads at once.
#[derive(Debug)]
pub struct PptxArchive {
    entries: Vec<(String, Vec<u8>)>,
    index: HashMap<String, usize>,
}

impl PptxArchive {
    /// Opens a byte buffer as a ZIP container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptArchive`] if the central directory cannot be
    /// located, if an entry fails to decompress (including checksum failures), or
    /// if an entry's declared uncompressed size disagrees with the bytes produced.
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut entries = Vec::with_capacity(archive.len());
        let mut index = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let declared = file.size();
            let mut content = Vec::with_capacity(declared.min(1 << 24) as usize);
            file.read_to_end(&mut content)
                .map_err(|e| Error::CorruptArchive(format!("{name}: {e}")))?;

            if content.len() as u64 != declared {
                return Err(Error::CorruptArchive(format!(
                    "{name}: declared {declared} bytes, decompressed {}",
                    content.len()
                )));
            }

            index.entry(name.clone()).or_insert(entries.len());
            entries.push((name, content));
        }

        log::debug!("opened archive with {} entries", entries.len());
        Ok(Self { entries, index })
    }

    /// Reads a file from disk and opens it with [`PptxArchive::open`].
    pub fn open_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::open(&bytes)
    }

    /// Looks up an entry by its exact, case-sensitive name.
    ///
    /// [`Error::EntryNotFound`] means the part does not exist; it is not a sign of
    /// a damaged archive.
    pub fn lookup(&self, name: &str) -> Result<&[u8]> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1.as_slice())
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))
    }

    /// Looks up an entry and decodes it as text, dropping a leading BOM.
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn lookup_text(&self, name: &str) -> Result<String> {
        let bytes = self.lookup(name)?;
        let text = String::from_utf8_lossy(bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }

    /// Retrieves the XML text of the slide at the 1-based `position`.
    ///
    /// The part name is derived from the position alone, following the packaging
    /// convention `ppt/slides/slide{position}.xml` (or the template configured in
    /// `config`), never from the slide's numeric or relationship id.
    pub fn locate_slide_part(&self, config: &AnalyzerConfig, position: usize) -> Result<String> {
        let name = config.slide_part_name(position);
        match self.lookup_text(&name) {
            Ok(xml) => Ok(xml),
            Err(Error::EntryNotFound(_)) => Err(Error::SlidePartMissing { name, position }),
            Err(e) => Err(e),
        }
    }
}
