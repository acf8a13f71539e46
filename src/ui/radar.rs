use egui::{Align2, Color32, FontId, Mesh, Pos2, Sense, Shape, Stroke, Ui, Vec2};

use crate::model::ReviewMetrics;
use crate::radar::{CANVAS_SIZE, CENTER, MARKER_RADIUS, Point, RadarChart};

const GRID: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);
const SPOKE: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);
const DATA_STROKE: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
const LABEL: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);

fn data_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(34, 197, 94, 51)
}

/// Gráfico radar escalado al cuadrado disponible (máx. 300)
pub fn radar_chart(ui: &mut Ui, metrics: &ReviewMetrics) {
    let side = ui.available_width().min(CANVAS_SIZE as f32);
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
    let painter = ui.painter_at(rect);
    let scale = side / CANVAS_SIZE as f32;

    let to_screen = |p: Point| -> Pos2 {
        Pos2::new(
            rect.left() + p.x as f32 * scale,
            rect.top() + p.y as f32 * scale,
        )
    };

    let drawing = RadarChart::layout(metrics);

    for ring in &drawing.grid {
        let points: Vec<Pos2> = ring.iter().copied().map(to_screen).collect();
        painter.add(Shape::closed_line(points, Stroke::new(1.0, GRID)));
    }

    let font = FontId::proportional((12.0 * scale).max(9.0));
    for (label, (from, to)) in drawing.labels.iter().zip(&drawing.spokes) {
        painter.line_segment([to_screen(*from), to_screen(*to)], Stroke::new(1.0, SPOKE));
        painter.text(
            to_screen(label.anchor),
            Align2::CENTER_CENTER,
            label.name,
            font.clone(),
            LABEL,
        );
        painter.text(
            to_screen(label.score_anchor()),
            Align2::CENTER_CENTER,
            &label.score,
            font.clone(),
            DATA_STROKE,
        );
    }

    let vertices: Vec<Pos2> = drawing.data.iter().copied().map(to_screen).collect();

    // Abanico de triángulos desde el centro: el polígono puede ser cóncavo
    let center = to_screen(Point {
        x: CENTER,
        y: CENTER,
    });
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, data_fill());
    for v in &vertices {
        mesh.colored_vertex(*v, data_fill());
    }
    let n = vertices.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    painter.add(Shape::mesh(mesh));
    painter.add(Shape::closed_line(vertices.clone(), Stroke::new(2.0, DATA_STROKE)));

    for v in vertices {
        painter.circle_filled(v, MARKER_RADIUS as f32 * scale, DATA_STROKE);
    }
}
