//! XLIFF 1.2 catalog persistence.

mod reader;
mod writer;

pub use reader::{CatalogLoad, load_catalog, parse_catalog};
pub use writer::{
    CATALOG_EXTENSION, CatalogHeader, XLIFF_NAMESPACE, XLIFF_VERSION, catalog_path,
    render_catalog, write_catalog,
};
