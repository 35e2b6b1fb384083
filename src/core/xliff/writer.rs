use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::core::Catalog;

pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";
pub const XLIFF_VERSION: &str = "1.2";
pub const CATALOG_EXTENSION: &str = "xliff";

/// Attributes of the single `<file>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogHeader {
    pub module: String,
    pub language: String,
}

impl CatalogHeader {
    pub fn new(module: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            language: language.into(),
        }
    }

    /// Value of the `original` attribute, e.g. `messages.ru_RU`.
    pub fn original(&self) -> String {
        format!("{}.{}", self.module, self.language)
    }
}

/// `<output>/<language>/<module>.xliff`
pub fn catalog_path(output_root: &Path, language: &str, module: &str) -> PathBuf {
    output_root
        .join(language)
        .join(format!("{}.{}", module, CATALOG_EXTENSION))
}

/// Render the catalog as a tab-indented XLIFF 1.2 document.
///
/// Units get ids from 1 in catalog order. Text is escaped only where XML
/// requires it (`&`, `<`, `>`).
pub fn render_catalog(catalog: &Catalog, header: &CatalogHeader) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = BytesStart::new("xliff")
        .with_attributes([("xmlns", XLIFF_NAMESPACE), ("version", XLIFF_VERSION)]);
    writer.write_event(Event::Start(root))?;

    let original = header.original();
    let file = BytesStart::new("file").with_attributes([
        ("original", original.as_str()),
        ("datatype", "plaintext"),
        ("source-language", header.language.as_str()),
        ("target-language", header.language.as_str()),
    ]);
    writer.write_event(Event::Start(file))?;
    writer.write_event(Event::Start(BytesStart::new("body")))?;

    for (index, (source, target)) in catalog.iter().enumerate() {
        let id = (index + 1).to_string();
        let unit = BytesStart::new("trans-unit").with_attributes([("id", id.as_str())]);
        writer.write_event(Event::Start(unit))?;
        write_text_element(&mut writer, "source", source)?;
        write_text_element(&mut writer, "target", target)?;
        writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("file")))?;
    writer.write_event(Event::End(BytesEnd::new("xliff")))?;

    let mut document =
        String::from_utf8(writer.into_inner()).context("Catalog is not valid UTF-8")?;
    document.push('\n');
    Ok(document)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write the catalog to `path`, replacing any previous file.
///
/// The document is written to a sibling temporary file and renamed into
/// place, so `path` holds either the old catalog or the complete new one.
/// The parent directory must already exist.
pub fn write_catalog(path: &Path, catalog: &Catalog, header: &CatalogHeader) -> Result<()> {
    let document = render_catalog(catalog, header)?;

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let written = fs::write(&temp_path, document)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))
        .and_then(|()| {
            fs::rename(&temp_path, path)
                .with_context(|| format!("Failed to write file: {}", path.display()))
        });

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}
