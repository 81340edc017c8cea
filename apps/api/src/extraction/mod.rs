//! Text Extraction Adapter: Turns an uploaded file into raw lesson text.
//!
//! `.docx` goes through the `docx-rs` reader; `.txt` is decoded as UTF-8.
//! Anything else is refused before its bytes are looked at.

use docx_rs::{
    DocumentChild, InsertChild, MoveToChild, Paragraph, ParagraphChild, Run, RunChild,
    StructuredDataTag, StructuredDataTagChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("file is not valid UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("could not read .docx document: {0}")]
    Docx(String),
}

/// User-facing message for any failed upload.
pub fn upload_error_message(file_name: &str) -> String {
    format!("Lỗi khi đọc file: {file_name}. Vui lòng kiểm tra định dạng file.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Docx,
    PlainText,
}

impl UploadKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".docx") {
            Ok(UploadKind::Docx)
        } else if lower.ends_with(".txt") {
            Ok(UploadKind::PlainText)
        } else {
            Err(ExtractionError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

/// Extracts the text content of an uploaded file.
pub fn extract_text(file_name: &str, data: &[u8]) -> Result<String, ExtractionError> {
    match UploadKind::from_file_name(file_name)? {
        UploadKind::Docx => docx_to_text(data),
        UploadKind::PlainText => plain_text(data),
    }
}

fn plain_text(data: &[u8]) -> Result<String, ExtractionError> {
    let text = String::from_utf8(data.to_vec())?;
    Ok(text
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(text))
}

/// One line per paragraph, in document order. Table cells contribute their
/// paragraphs row by row, and content controls contribute theirs in place.
fn docx_to_text(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => collect_table_lines(table, &mut lines),
            DocumentChild::StructuredDataTag(tag) => collect_tag_lines(tag, &mut lines),
            _ => {}
        }
    }
    Ok(lines.join("\n"))
}

fn collect_table_lines(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
                    TableCellContent::Table(nested) => collect_table_lines(nested, lines),
                    TableCellContent::StructuredDataTag(tag) => collect_tag_lines(tag, lines),
                    _ => {}
                }
            }
        }
    }
}

/// Block-level content control. Loose runs directly under the tag form one
/// line of their own.
fn collect_tag_lines(tag: &StructuredDataTag, lines: &mut Vec<String>) {
    let mut loose = String::new();
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => push_run_text(run, &mut loose),
            StructuredDataTagChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            StructuredDataTagChild::Table(table) => collect_table_lines(table, lines),
            StructuredDataTagChild::StructuredDataTag(nested) => collect_tag_lines(nested, lines),
            _ => {}
        }
    }
    if !loose.is_empty() {
        lines.push(loose);
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    push_inline_text(&paragraph.children, &mut out);
    out
}

/// Visible text of inline content. Tracked insertions and moved-in text
/// count; deletions and moved-out text do not.
fn push_inline_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, out),
            ParagraphChild::Hyperlink(link) => push_inline_text(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run_text(run, out);
                    }
                }
            }
            ParagraphChild::MoveTo(moved) => {
                for child in &moved.children {
                    if let MoveToChild::Run(run) = child {
                        push_run_text(run, out);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => push_inline_tag_text(tag, out),
            _ => {}
        }
    }
}

fn push_inline_tag_text(tag: &StructuredDataTag, out: &mut String) {
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => push_run_text(run, out),
            StructuredDataTagChild::Paragraph(paragraph) => {
                push_inline_text(&paragraph.children, out)
            }
            StructuredDataTagChild::StructuredDataTag(nested) => push_inline_tag_text(nested, out),
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
