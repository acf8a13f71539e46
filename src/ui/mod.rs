pub mod chat;
pub mod fonts;
pub mod helpers;
pub mod layout;
pub mod markdown;
pub mod radar;
pub mod views;

use std::time::Duration;

use eframe::{App, Frame};
use egui::{Color32, Context, RichText};

use crate::app::TutorApp;
use crate::model::ViewMode;
use layout::{bottom_panel, header, notice_modal, sidebar};

impl App for TutorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Respuestas de la API y temporizadores antes de pintar
        if self.poll_api() {
            ctx.request_repaint();
        }
        let now = ctx.input(|i| i.time);
        if self.tick(now, &mut rand::thread_rng()) {
            ctx.request_repaint();
        }
        let loading = self.review.loading;
        if let Some(wait) = self.review.progress.seconds_until_next(now).filter(|_| loading) {
            ctx.request_repaint_after(Duration::from_secs_f64(wait.max(0.0)));
        }

        if self.nav.sidebar_open {
            sidebar(self, ctx);
        }
        header(self, ctx);

        // PANEL INFERIOR TEMA OSCURO O CLARO
        bottom_panel(ctx);

        if let Some(err) = &self.load_error {
            egui::TopBottomPanel::top("load_error").show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("⚠ コンテンツの読み込みに失敗しました: {err}"))
                        .color(Color32::from_rgb(0xb9, 0x1c, 0x1c)),
                );
            });
        }

        // Dispatch por vista
        match self.view() {
            ViewMode::Lesson => views::lesson::ui_lesson(self, ctx),
            ViewMode::Tutor => views::tutor::ui_tutor(self, ctx),
            ViewMode::Quiz => views::quiz::ui_quiz(self, ctx),
            ViewMode::Review => views::review::ui_review(self, ctx),
            ViewMode::Roadmap => views::roadmap::ui_roadmap(self, ctx),
            ViewMode::Standards => views::standards::ui_standards(self, ctx),
        }

        notice_modal(ctx, "quiz_notice", &mut self.quiz.notice);
        notice_modal(ctx, "review_notice", &mut self.review.notice);
    }
}
