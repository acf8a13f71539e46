// src/ui/helpers.rs
use egui::{Button, Color32, Frame, RichText, Ui, Vec2};

use crate::view_models::{DifficultyTone, scale_marks};

const NAV_ACTIVE_BG: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
const NAV_TEXT: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);
const STAR: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);
const MUTED: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);

/// Botón de ancho completo de la barra lateral; resaltado si `active`
pub fn nav_button(ui: &mut Ui, label: &str, active: bool) -> bool {
    let text = if active {
        RichText::new(label).color(Color32::WHITE).strong()
    } else {
        RichText::new(label).color(NAV_TEXT)
    };
    let mut button = Button::new(text).min_size(Vec2::new(ui.available_width(), 32.0));
    button = if active {
        button.fill(NAV_ACTIVE_BG)
    } else {
        button.frame(false)
    };
    ui.add(button).clicked()
}

pub fn pill(ui: &mut Ui, text: &str, fg: Color32, bg: Color32) {
    Frame::default()
        .fill(bg)
        .corner_radius(10)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().strong().color(fg));
        });
}

/// Cinco barras coloreadas según la dificultad
pub fn difficulty_badge(ui: &mut Ui, difficulty: u8) {
    let (filled, empty) = scale_marks(difficulty);
    let color = DifficultyTone::of(difficulty).color();
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.label(RichText::new("難易度").small().weak());
        ui.label(RichText::new("▮".repeat(filled)).color(color));
        ui.label(RichText::new("▮".repeat(empty)).color(MUTED));
    })
    .response
    .on_hover_text(format!("理解難易度: {difficulty}/5"));
}

/// Cinco estrellas para la frecuencia de uso
pub fn frequency_badge(ui: &mut Ui, frequency: u8) {
    let (filled, empty) = scale_marks(frequency);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.label(RichText::new("実務頻出度").small().weak());
        ui.label(RichText::new("★".repeat(filled)).color(STAR));
        ui.label(RichText::new("★".repeat(empty)).color(MUTED));
    })
    .response
    .on_hover_text(format!("実務頻出度: {frequency}/5"));
}

/// Tarjeta con borde suave
pub fn card(ui: &mut Ui, inner: impl FnOnce(&mut Ui)) {
    Frame::default()
        .fill(ui.visuals().extreme_bg_color)
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .corner_radius(12)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            inner(ui);
        });
}
