use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::core::Catalog;

/// Outcome of loading a catalog from disk.
///
/// Loading never fails the run: a broken file yields an empty catalog and the
/// reason in `error`, which the caller must surface.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub error: Option<String>,
}

pub fn load_catalog(path: &Path) -> CatalogLoad {
    if !path.exists() {
        return CatalogLoad::default();
    }

    let parsed = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))
        .and_then(|content| {
            parse_catalog(&content)
                .with_context(|| format!("Failed to parse catalog: {}", path.display()))
        });

    match parsed {
        Ok(catalog) => CatalogLoad {
            catalog,
            error: None,
        },
        Err(e) => CatalogLoad {
            catalog: Catalog::new(),
            error: Some(format!("{:#}", e)),
        },
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Source,
    Target,
}

/// Parse an XLIFF 1.2 document into a catalog, in document order.
///
/// Elements are matched by local name, so both a default namespace and a
/// prefixed one (`ns0:trans-unit`) are accepted. A unit without `<target>`
/// maps to its source; a unit without `<source>` is ignored.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let mut reader = Reader::from_str(content);

    let mut catalog = Catalog::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut in_unit = false;
    let mut field: Option<Field> = None;
    let mut source: Option<String> = None;
    let mut target: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if depth == 0 {
                    if e.local_name().as_ref() != b"xliff" {
                        bail!("Root element is not <xliff>");
                    }
                    saw_root = true;
                }
                depth += 1;

                match e.local_name().as_ref() {
                    b"trans-unit" => {
                        in_unit = true;
                        source = None;
                        target = None;
                    }
                    b"source" if in_unit => {
                        field = Some(Field::Source);
                        source = Some(String::new());
                    }
                    b"target" if in_unit => {
                        field = Some(Field::Target);
                        target = Some(String::new());
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 0 {
                    if e.local_name().as_ref() != b"xliff" {
                        bail!("Root element is not <xliff>");
                    }
                    saw_root = true;
                }
                match e.local_name().as_ref() {
                    b"source" if in_unit => source = Some(String::new()),
                    b"target" if in_unit => target = Some(String::new()),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                depth = depth.saturating_sub(1);

                match e.local_name().as_ref() {
                    b"trans-unit" => {
                        in_unit = false;
                        field = None;
                        if let Some(source) = source.take().filter(|s| !s.is_empty()) {
                            let target = target.take().unwrap_or_else(|| source.clone());
                            catalog.insert_translation(source, target);
                        }
                    }
                    b"source" | b"target" => field = None,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(f) = field {
                    let text = e.unescape().context("Invalid text content")?;
                    append(f, &mut source, &mut target, &text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(f) = field {
                    let text = std::str::from_utf8(e).context("Invalid CDATA content")?;
                    append(f, &mut source, &mut target, text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!(
                "Error at position {}: {}",
                reader.buffer_position(),
                e
            ),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        bail!("Document has no <xliff> root element");
    }
    if depth != 0 {
        bail!("Unexpected end of document");
    }

    Ok(catalog)
}

fn append(field: Field, source: &mut Option<String>, target: &mut Option<String>, text: &str) {
    let slot = match field {
        Field::Source => source,
        Field::Target => target,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}
