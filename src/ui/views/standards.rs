use egui::{Color32, Context, Frame, RichText};

use crate::TutorApp;
use crate::ui::layout::content_panel;
use crate::ui::markdown::markdown_view;
use crate::view_models::standard_number;

const HEADER_BG: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a);
const HEADER_SUB: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);

pub fn ui_standards(app: &mut TutorApp, ctx: &Context) {
    content_panel(ctx, 860.0, |ui| {
        ui.add_space(12.0);
        ui.label(RichText::new("VBA コーディング規約").size(24.0).strong());
        ui.label(
            RichText::new(
                "「動けばいい」から脱却しよう。\n可読性、保守性、堅牢性を高めるための開発ルールです。チーム開発や将来のメンテナンスに備え、このスタンダードを遵守しましょう。",
            )
            .weak(),
        );
        ui.add_space(16.0);

        for (pos, standard) in app.content.standards.iter().enumerate() {
            Frame::default()
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .corner_radius(14)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    Frame::default()
                        .fill(HEADER_BG)
                        .corner_radius(14)
                        .inner_margin(egui::Margin::same(20))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(standard_number(pos))
                                        .size(34.0)
                                        .strong()
                                        .color(Color32::WHITE),
                                );
                                ui.add_space(12.0);
                                ui.vertical(|ui| {
                                    ui.label(
                                        RichText::new(&standard.title)
                                            .size(19.0)
                                            .strong()
                                            .color(Color32::WHITE),
                                    );
                                    ui.label(RichText::new(&standard.description).color(HEADER_SUB));
                                });
                            });
                        });
                    Frame::default()
                        .inner_margin(egui::Margin::same(24))
                        .show(ui, |ui| {
                            markdown_view(ui, ("standard", standard.id), &standard.content);
                        });
                });
            ui.add_space(20.0);
        }

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("この規約は絶対ではありませんが、迷った時の「道しるべ」として活用してください。")
                    .small()
                    .weak(),
            );
        });
        ui.add_space(24.0);
    });
}
