// src/view_models.rs

use crate::model::{CodeReviewResult, Lesson};

/// Lecciones de una categoría, como índices en el currículo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub lessons: Vec<usize>,
}

/// Agrupa por categoría en orden de primera aparición
pub fn lessons_by_category(lessons: &[Lesson]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for (idx, lesson) in lessons.iter().enumerate() {
        match groups.iter().position(|g| g.category == lesson.category) {
            Some(pos) => groups[pos].lessons.push(idx),
            None => groups.push(CategoryGroup {
                category: &lesson.category,
                lessons: vec![idx],
            }),
        }
    }
    groups
}

/// Tema que se envía a `/api/quiz`
pub fn topic_for(lesson: &Lesson) -> String {
    format!("{}: {}", lesson.category, lesson.title)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyTone {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTone {
    pub fn of(difficulty: u8) -> Self {
        match difficulty {
            0..=2 => DifficultyTone::Easy,
            3 => DifficultyTone::Medium,
            _ => DifficultyTone::Hard,
        }
    }

    pub fn color(self) -> egui::Color32 {
        match self {
            DifficultyTone::Easy => egui::Color32::from_rgb(0x22, 0xc5, 0x5e),
            DifficultyTone::Medium => egui::Color32::from_rgb(0xea, 0xb3, 0x08),
            DifficultyTone::Hard => egui::Color32::from_rgb(0xef, 0x44, 0x44),
        }
    }
}

/// Barras de dificultad / estrellas de frecuencia: `(llenas, vacías)` sobre 5
pub fn scale_marks(value: u8) -> (usize, usize) {
    let filled = usize::from(value.min(5));
    (filled, 5 - filled)
}

/// `01`, `02`, … para las tarjetas de normas
pub fn standard_number(position: usize) -> String {
    format!("{:02}", position + 1)
}

/// Qué secciones del informe de revisión se pintan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReviewReport {
    pub show_strengths: bool,
    pub show_improvements: bool,
    pub show_suggested_code: bool,
    pub show_critique: bool,
}

impl From<&CodeReviewResult> for ReviewReport {
    fn from(result: &CodeReviewResult) -> Self {
        Self {
            show_strengths: !result.strengths.is_empty(),
            show_improvements: !result.improvements.is_empty(),
            show_suggested_code: !result.suggested_code.trim().is_empty(),
            show_critique: result
                .critique
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(category: &str, title: &str) -> Lesson {
        Lesson {
            id: title.into(),
            category: category.into(),
            title: title.into(),
            difficulty: 2,
            frequency: 4,
            content: String::new(),
        }
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let lessons = vec![
            lesson("基礎", "a"),
            lesson("制御", "b"),
            lesson("基礎", "c"),
        ];
        let groups = lessons_by_category(&lessons);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "基礎");
        assert_eq!(groups[0].lessons, vec![0, 2]);
        assert_eq!(groups[1].lessons, vec![1]);
    }

    #[test]
    fn topic_string() {
        assert_eq!(topic_for(&lesson("基礎", "変数")), "基礎: 変数");
    }

    #[test]
    fn difficulty_tones() {
        assert_eq!(DifficultyTone::of(1), DifficultyTone::Easy);
        assert_eq!(DifficultyTone::of(2), DifficultyTone::Easy);
        assert_eq!(DifficultyTone::of(3), DifficultyTone::Medium);
        assert_eq!(DifficultyTone::of(5), DifficultyTone::Hard);
    }

    #[test]
    fn marks_and_numbers() {
        assert_eq!(scale_marks(3), (3, 2));
        assert_eq!(scale_marks(9), (5, 0));
        assert_eq!(standard_number(0), "01");
        assert_eq!(standard_number(11), "12");
    }
}
