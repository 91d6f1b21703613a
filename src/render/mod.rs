mod xml;

pub use xml::{render_cpn_document, write_cpn_file};
