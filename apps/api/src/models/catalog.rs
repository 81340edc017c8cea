//! Fixed pick lists offered to the front end.

use serde::Serialize;

pub const MIN_SUGGESTIONS: u8 = 1;
pub const MAX_SUGGESTIONS: u8 = 10;
pub const DEFAULT_SUGGESTIONS: u8 = 3;

/// Subjects of the 2018 general-education programme.
pub const SUBJECTS: &[&str] = &[
    "Tiếng Việt / Ngữ văn",
    "Toán",
    "Tiếng Anh / Ngoại ngữ",
    "Tự nhiên và Xã hội",
    "Lịch sử và Địa lí",
    "Khoa học tự nhiên",
    "Khoa học",
    "Vật lí",
    "Hóa học",
    "Sinh học",
    "Lịch sử",
    "Địa lí",
    "Giáo dục kinh tế và pháp luật",
    "Tin học",
    "Công nghệ",
    "Giáo dục thể chất",
    "Âm nhạc",
    "Mĩ thuật",
    "Hoạt động trải nghiệm, hướng nghiệp",
    "Nội dung giáo dục địa phương",
    "Giáo dục quốc phòng và an ninh",
    "Đạo đức / Giáo dục công dân",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    Primary,
    Middle,
    High,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 3] = [GradeLevel::Primary, GradeLevel::Middle, GradeLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            GradeLevel::Primary => "Tiểu học",
            GradeLevel::Middle => "THCS",
            GradeLevel::High => "THPT",
        }
    }

    /// School grades (lớp) belonging to this band.
    pub fn grades(self) -> std::ops::RangeInclusive<u8> {
        match self {
            GradeLevel::Primary => 1..=5,
            GradeLevel::Middle => 6..=9,
            GradeLevel::High => 10..=12,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradeBand {
    pub level: GradeLevel,
    pub label: &'static str,
    pub grades: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub subjects: &'static [&'static str],
    pub grade_bands: Vec<GradeBand>,
    pub min_suggestions: u8,
    pub max_suggestions: u8,
    pub default_suggestions: u8,
}

pub fn catalog() -> Catalog {
    Catalog {
        subjects: SUBJECTS,
        grade_bands: GradeLevel::ALL
            .iter()
            .map(|&level| GradeBand {
                level,
                label: level.label(),
                grades: level.grades().map(|g| format!("Lớp {g}")).collect(),
            })
            .collect(),
        min_suggestions: MIN_SUGGESTIONS,
        max_suggestions: MAX_SUGGESTIONS,
        default_suggestions: DEFAULT_SUGGESTIONS,
    }
}
