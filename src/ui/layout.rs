use egui::{Align2, Color32, Context, Frame, RichText, ScrollArea, Ui, Visuals};
use egui_code_editor::{CodeEditor, ColorTheme, Syntax};

use crate::app::navigation::MAIN_NAV;
use crate::app::{NavAction, TutorApp};
use crate::ui::helpers::nav_button;
use crate::view_models::lessons_by_category;

pub const SIDEBAR_BG: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a);
pub const ACCENT: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);

/// Barra lateral: producto, vistas principales y currículo por categoría
pub fn sidebar(app: &mut TutorApp, ctx: &Context) {
    let mut action = None;

    egui::SidePanel::left("sidebar")
        .resizable(false)
        .exact_width(280.0)
        .frame(Frame::default().fill(SIDEBAR_BG).inner_margin(egui::Margin::same(12)))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("VBA MASTER").size(20.0).strong().color(ACCENT));
                    ui.label(
                        RichText::new("ようこそ、コードの世界へ！")
                            .small()
                            .color(Color32::from_gray(0x94)),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("☰").clicked() {
                        action = Some(NavAction::SetSidebar(false));
                    }
                });
            });
            ui.separator();

            ScrollArea::vertical().show(ui, |ui| {
                for (view, label) in MAIN_NAV {
                    if nav_button(ui, label, app.nav.view == view) {
                        action = Some(NavAction::ShowView(view));
                    }
                }

                ui.add_space(16.0);
                ui.label(
                    RichText::new("カリキュラム")
                        .small()
                        .strong()
                        .color(Color32::from_gray(0x64)),
                );

                for group in lessons_by_category(&app.content.lessons) {
                    ui.add_space(8.0);
                    ui.label(RichText::new(group.category).strong().color(Color32::from_gray(0xcb)));
                    for idx in group.lessons {
                        let title = &app.content.lessons[idx].title;
                        if nav_button(ui, title, app.nav.is_lesson_highlighted(idx)) {
                            action = Some(NavAction::OpenLesson(idx));
                        }
                    }
                }
            });
        });

    if let Some(action) = action {
        app.navigate(action);
    }
}

/// Cabecera con el título de la vista activa
pub fn header(app: &mut TutorApp, ctx: &Context) {
    let mut toggle = false;
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            if !app.nav.sidebar_open && ui.button("☰").clicked() {
                toggle = true;
            }
            ui.heading(app.header_title());
        });
    });
    if toggle {
        app.navigate(NavAction::ToggleSidebar);
    }
}

pub fn bottom_panel(ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 ダークモード").clicked() {
                ctx.set_visuals(Visuals::dark());
            }
            if ui.button("☀ ライトモード").clicked() {
                ctx.set_visuals(Visuals::light());
            }
        });
    });
}

/// Panel central con ancho de contenido máximo y desplazamiento vertical
pub fn content_panel(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let w = ui.available_width().min(max_width);
                let side = ((ui.available_width() - w) / 2.0).max(0.0);
                ui.horizontal(|ui| {
                    ui.add_space(side);
                    ui.vertical(|ui| {
                        ui.set_width(w);
                        inner(ui);
                    });
                });
            });
    });
}

/// Editor de entrada con ancho fijo
pub fn code_editor_input(
    ui: &mut Ui,
    id: &str,
    width: f32,
    rows: usize,
    fontsize: f32,
    syntax: Syntax,
    text: &mut String,
    max_height: f32,
) {
    ScrollArea::vertical()
        .id_salt(id)
        .max_height(max_height)
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.set_width(width);
            CodeEditor::default()
                .id_source(id)
                .with_rows(rows)
                .with_fontsize(fontsize)
                .with_theme(ColorTheme::GITHUB_DARK)
                .with_syntax(syntax)
                .with_numlines(true)
                .vscroll(false)
                .show(ui, text);
        });
}

/// Aviso bloqueante (equivalente a `alert`). Se cierra con "OK".
pub fn notice_modal(ctx: &Context, id: &str, notice: &mut Option<String>) {
    let Some(text) = notice.as_deref() else {
        return;
    };
    let mut close = false;
    egui::Window::new("お知らせ")
        .id(egui::Id::new(id))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(text);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        });
    if close {
        *notice = None;
    }
}
