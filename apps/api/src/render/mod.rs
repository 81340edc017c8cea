// Result rendering: highlighted screen markup and the .docx export.
// Both read the marker convention the analysis prompt asks the model to emit.

pub mod docx_export;
pub mod markup;

pub use docx_export::{export_file_name, to_document, DOCX_CONTENT_TYPE};
pub use markup::to_display_markup;
