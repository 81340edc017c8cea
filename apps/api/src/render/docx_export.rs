//! Document export: Rebuilds the integrated lesson as a styled `.docx`.
//!
//! Layout: centered title heading, metadata paragraph (subject, grade,
//! legend), one paragraph per content line, divider, attribution.
//! Highlighted segments become bold runs in `INTEGRATION_BLUE`.

use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, LineSpacing, Style, StyleType};

use crate::errors::AppError;
use crate::render::markup::{split_segments, strip_markup};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Foreground color of every integrated passage.
pub const INTEGRATION_BLUE: &str = "0000FF";

const DOCUMENT_TITLE: &str = "KẾ HOẠCH BÀI DẠY (TÍCH HỢP NĂNG LỰC SỐ)";
const LEGEND: &str =
    "Ghi chú: Nội dung màu xanh dương là phần đã tích hợp năng lực số (Mục tiêu & Tiến trình).";
const DIVIDER: &str = "--------------------------------------------------";
const ATTRIBUTION: &str = "Tài liệu được tạo tự động bởi công cụ tích hợp năng lực số.";
const FILE_PREFIX: &str = "GiaoAn_TichHopSo";
const HEADING_STYLE: &str = "Heading1";

// Sizes in half-points, spacing in twips.
const TITLE_SIZE: usize = 32;
const BODY_SPACING_AFTER: u32 = 120;
const BLOCK_SPACING: u32 = 400;
const DIVIDER_SPACING_BEFORE: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<&'static str>,
    /// Line break inserted before the text, inside the same paragraph.
    pub break_before: bool,
}

impl StyledRun {
    fn plain(text: String) -> Self {
        Self {
            text,
            bold: false,
            italic: false,
            color: None,
            break_before: false,
        }
    }

    fn highlighted(text: String) -> Self {
        Self {
            bold: true,
            color: Some(INTEGRATION_BLUE),
            ..Self::plain(text)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRole {
    Title,
    Metadata,
    Body,
    Divider,
    Attribution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocParagraph {
    pub role: ParagraphRole,
    pub runs: Vec<StyledRun>,
}

/// The assembled document, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub paragraphs: Vec<DocParagraph>,
}

/// Converts one content line into its runs. Empty runs are omitted.
pub fn line_runs(line: &str) -> Vec<StyledRun> {
    split_segments(line)
        .into_iter()
        .filter_map(|segment| {
            let text = strip_markup(segment.raw());
            if text.is_empty() {
                None
            } else if segment.is_highlighted() {
                Some(StyledRun::highlighted(text))
            } else {
                Some(StyledRun::plain(text))
            }
        })
        .collect()
}

/// One body paragraph per `\n`-separated line of the integrated content.
pub fn body_paragraphs(content: &str) -> Vec<DocParagraph> {
    content
        .split('\n')
        .map(|line| DocParagraph {
            role: ParagraphRole::Body,
            runs: line_runs(line.strip_suffix('\r').unwrap_or(line)),
        })
        .collect()
}

pub fn layout(content: &str, subject: &str, grade: &str) -> ExportDocument {
    let mut paragraphs = Vec::new();

    paragraphs.push(DocParagraph {
        role: ParagraphRole::Title,
        runs: vec![StyledRun {
            bold: true,
            ..StyledRun::plain(DOCUMENT_TITLE.to_string())
        }],
    });

    paragraphs.push(DocParagraph {
        role: ParagraphRole::Metadata,
        runs: vec![
            StyledRun {
                bold: true,
                ..StyledRun::plain(format!("Môn học: {subject}"))
            },
            StyledRun {
                bold: true,
                break_before: true,
                ..StyledRun::plain(format!(" | Khối lớp: {grade}"))
            },
            StyledRun {
                italic: true,
                color: Some(INTEGRATION_BLUE),
                break_before: true,
                ..StyledRun::plain(LEGEND.to_string())
            },
        ],
    });

    paragraphs.extend(body_paragraphs(content));

    paragraphs.push(DocParagraph {
        role: ParagraphRole::Divider,
        runs: vec![StyledRun::plain(DIVIDER.to_string())],
    });
    paragraphs.push(DocParagraph {
        role: ParagraphRole::Attribution,
        runs: vec![StyledRun::plain(ATTRIBUTION.to_string())],
    });

    ExportDocument { paragraphs }
}

impl StyledRun {
    fn to_docx(&self, role: ParagraphRole) -> docx_rs::Run {
        let mut run = docx_rs::Run::new();
        if self.break_before {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(&self.text);
        if self.bold {
            run = run.bold();
        }
        if self.italic {
            run = run.italic();
        }
        if let Some(color) = self.color {
            run = run.color(color);
        }
        if role == ParagraphRole::Title {
            run = run.size(TITLE_SIZE);
        }
        run
    }
}

impl DocParagraph {
    fn to_docx(&self) -> docx_rs::Paragraph {
        let paragraph = self
            .runs
            .iter()
            .fold(docx_rs::Paragraph::new(), |p, run| {
                p.add_run(run.to_docx(self.role))
            });

        match self.role {
            ParagraphRole::Title => paragraph
                .style(HEADING_STYLE)
                .align(AlignmentType::Center)
                .line_spacing(LineSpacing::new().after(BLOCK_SPACING)),
            ParagraphRole::Metadata => {
                paragraph.line_spacing(LineSpacing::new().after(BLOCK_SPACING))
            }
            ParagraphRole::Body => {
                paragraph.line_spacing(LineSpacing::new().after(BODY_SPACING_AFTER))
            }
            ParagraphRole::Divider => paragraph
                .align(AlignmentType::Center)
                .line_spacing(LineSpacing::new().before(DIVIDER_SPACING_BEFORE)),
            ParagraphRole::Attribution => paragraph.align(AlignmentType::Center),
        }
    }
}

impl ExportDocument {
    /// Serializes to `.docx` bytes. Nothing is returned unless packing
    /// completes.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>, AppError> {
        let heading = Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .bold()
            .size(TITLE_SIZE);

        let docx = self
            .paragraphs
            .iter()
            .fold(Docx::new().add_style(heading), |docx, p| {
                docx.add_paragraph(p.to_docx())
            });

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| AppError::Export(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

/// Renders the integrated content into a downloadable `.docx`.
pub fn to_document(content: &str, subject: &str, grade: &str) -> Result<Vec<u8>, AppError> {
    layout(content, subject, grade).to_docx_bytes()
}

/// `GiaoAn_TichHopSo_<subject>_<grade>.docx` with path separators replaced.
pub fn export_file_name(subject: &str, grade: &str) -> String {
    format!(
        "{FILE_PREFIX}_{}_{}.docx",
        path_safe(subject),
        path_safe(grade)
    )
}

fn path_safe(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect()
}
