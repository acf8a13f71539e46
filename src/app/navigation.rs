use crate::model::{Lesson, ViewMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    ShowView(ViewMode),
    OpenLesson(usize),
    ToggleSidebar,
    SetSidebar(bool),
}

/// Vista activa + lección activa. Sólo cambia a través de `reduce`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavState {
    pub view: ViewMode,
    pub active_lesson: usize,
    pub sidebar_open: bool,
    lesson_count: usize,
}

impl NavState {
    pub fn new(lesson_count: usize) -> Self {
        Self {
            view: ViewMode::Lesson,
            active_lesson: 0,
            sidebar_open: true,
            lesson_count,
        }
    }

    pub fn reduce(self, action: NavAction) -> Self {
        match action {
            NavAction::ShowView(view) => Self { view, ..self },
            NavAction::OpenLesson(index) if index < self.lesson_count => Self {
                view: ViewMode::Lesson,
                active_lesson: index,
                ..self
            },
            NavAction::OpenLesson(index) => {
                log::warn!("lección {index} inexistente ({} en total)", self.lesson_count);
                self
            }
            NavAction::ToggleSidebar => Self {
                sidebar_open: !self.sidebar_open,
                ..self
            },
            NavAction::SetSidebar(open) => Self {
                sidebar_open: open,
                ..self
            },
        }
    }

    /// Resaltado en la barra lateral sólo mientras se ve la lección
    pub fn is_lesson_highlighted(&self, index: usize) -> bool {
        self.view == ViewMode::Lesson && self.active_lesson == index
    }

    pub fn header_title<'a>(&self, lessons: &'a [Lesson]) -> &'a str {
        match self.view {
            ViewMode::Lesson => lessons
                .get(self.active_lesson)
                .map(|l| l.title.as_str())
                .unwrap_or_default(),
            ViewMode::Tutor => "AI 講師アシスタント",
            ViewMode::Quiz => "理解度チェック",
            ViewMode::Review => "AI コードレビュー",
            ViewMode::Roadmap => "学習ロードマップ",
            ViewMode::Standards => "コーディング規約",
        }
    }
}

/// Entradas principales de la barra lateral, en orden
pub const MAIN_NAV: [(ViewMode, &str); 5] = [
    (ViewMode::Tutor, "AI 講師"),
    (ViewMode::Quiz, "クイズモード"),
    (ViewMode::Review, "コードレビュー"),
    (ViewMode::Roadmap, "学習ロードマップ"),
    (ViewMode::Standards, "コーディング規約"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(title: &str) -> Lesson {
        Lesson {
            id: title.to_lowercase(),
            category: "基礎".into(),
            title: title.into(),
            difficulty: 1,
            frequency: 5,
            content: String::new(),
        }
    }

    #[test]
    fn starts_on_first_lesson_with_sidebar_open() {
        let nav = NavState::new(3);
        assert_eq!(nav.view, ViewMode::Lesson);
        assert_eq!(nav.active_lesson, 0);
        assert!(nav.sidebar_open);
    }

    #[test]
    fn open_lesson_switches_view() {
        let nav = NavState::new(3)
            .reduce(NavAction::ShowView(ViewMode::Quiz))
            .reduce(NavAction::OpenLesson(2));
        assert_eq!(nav.view, ViewMode::Lesson);
        assert_eq!(nav.active_lesson, 2);
        assert!(nav.is_lesson_highlighted(2));
    }

    #[test]
    fn out_of_range_lesson_is_ignored() {
        let nav = NavState::new(3).reduce(NavAction::ShowView(ViewMode::Tutor));
        assert_eq!(nav.reduce(NavAction::OpenLesson(3)), nav);
    }

    #[test]
    fn highlight_only_in_lesson_view() {
        let nav = NavState::new(3).reduce(NavAction::ShowView(ViewMode::Roadmap));
        assert!(!nav.is_lesson_highlighted(0));
    }

    #[test]
    fn sidebar_toggles() {
        let nav = NavState::new(1).reduce(NavAction::ToggleSidebar);
        assert!(!nav.sidebar_open);
        assert!(nav.reduce(NavAction::SetSidebar(true)).sidebar_open);
    }

    #[test]
    fn header_titles() {
        let lessons = vec![lesson("変数とデータ型")];
        let nav = NavState::new(1);
        assert_eq!(nav.header_title(&lessons), "変数とデータ型");
        assert_eq!(
            nav.reduce(NavAction::ShowView(ViewMode::Review))
                .header_title(&lessons),
            "AI コードレビュー"
        );
        assert_eq!(
            nav.reduce(NavAction::ShowView(ViewMode::Standards))
                .header_title(&lessons),
            "コーディング規約"
        );
    }
}
