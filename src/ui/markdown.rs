use std::hash::Hash;
use std::time::Duration;

use egui::{Color32, Frame, Id, RichText, Ui};
use egui_code_editor::{CodeEditor, ColorTheme};

use crate::app::feedback::{CopyFeedback, EguiClipboard};
use crate::code_utils::vba_syntax;
use crate::markdown::{self, Block, CodeBlock, Inline};

const CODE_HEADER_BG: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const CODE_HEADER_FG: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
const CODE_FONT_SIZE: f32 = 13.0;

/// Pinta `content` con el subconjunto de markdown soportado
pub fn markdown_view(ui: &mut Ui, id_salt: impl Hash, content: &str) {
    let base = ui.make_persistent_id(id_salt);
    let mut code_index = 0usize;

    for block in markdown::parse(content) {
        match block {
            Block::Heading { level, text } => {
                let size = if level == 1 { 22.0 } else { 18.0 };
                ui.add_space(if level == 1 { 10.0 } else { 6.0 });
                ui.label(RichText::new(text).size(size).strong());
                ui.add_space(4.0);
            }
            Block::Bullet(spans) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("•").color(Color32::from_rgb(0x16, 0xa3, 0x4a)));
                    inline_spans(ui, &spans);
                });
            }
            Block::Numbered { marker, content } => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(format!("{marker}.")).strong());
                    inline_spans(ui, &content);
                });
            }
            Block::Spacer => ui.add_space(8.0),
            Block::TableRow(cells) => {
                ui.horizontal(|ui| {
                    for cell in &cells {
                        Frame::default()
                            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                            .inner_margin(egui::Margin::symmetric(8, 4))
                            .show(ui, |ui| inline_spans(ui, cell));
                    }
                });
            }
            Block::Paragraph(spans) => {
                ui.horizontal_wrapped(|ui| inline_spans(ui, &spans));
            }
            Block::Code(code) => {
                code_block(ui, base.with(code_index), &code);
                code_index += 1;
            }
        }
    }
}

fn inline_spans(ui: &mut Ui, spans: &[Inline]) {
    ui.spacing_mut().item_spacing.x = 0.0;
    for span in spans {
        match span {
            Inline::Text(text) => ui.label(text.as_str()),
            Inline::Strong(text) => ui.label(RichText::new(text.as_str()).strong()),
        };
    }
}

/// Cabecera (lenguaje + copiar) y cuerpo monoespaciado de sólo lectura
fn code_block(ui: &mut Ui, id: Id, block: &CodeBlock) {
    let now = ui.input(|i| i.time);
    let mut feedback = ui
        .ctx()
        .data_mut(|d| d.get_temp::<CopyFeedback>(id))
        .unwrap_or_default();
    feedback.tick(now);

    ui.add_space(6.0);
    Frame::default()
        .fill(CODE_HEADER_BG)
        .corner_radius(6)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(block.label())
                        .monospace()
                        .small()
                        .color(CODE_HEADER_FG),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if feedback.is_copied() {
                        "✔ コピーしました"
                    } else {
                        "📋 コピー"
                    };
                    if ui
                        .add(egui::Button::new(RichText::new(label).small()).frame(false))
                        .clicked()
                    {
                        let mut clipboard = EguiClipboard(ui.ctx());
                        feedback.activate(&mut clipboard, &block.code, now);
                    }
                });
            });
        });

    let mut buf = block.code.clone();
    let rows = buf.lines().count().max(1);
    CodeEditor::default()
        .id_source(format!("{id:?}"))
        .with_rows(rows)
        .with_fontsize(CODE_FONT_SIZE)
        .with_theme(ColorTheme::GITHUB_DARK)
        .with_syntax(vba_syntax())
        .with_numlines(false)
        .vscroll(false)
        .show(ui, &mut buf);
    ui.add_space(6.0);

    if let Some(remaining) = feedback.remaining(now) {
        ui.ctx()
            .request_repaint_after(Duration::from_secs_f64(remaining));
    }
    ui.ctx().data_mut(|d| d.insert_temp(id, feedback));
}
