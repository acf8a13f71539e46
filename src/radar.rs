//! Geometría del gráfico radar de la revisión de código.
//!
//! Lienzo fijo de 300x300 con centro en (150,150) y radio 100 para el nivel 5.
//! Los cinco ejes arrancan arriba (-90°) y avanzan de 72° en 72°.

use std::f64::consts::PI;

use crate::model::ReviewMetrics;

pub const CANVAS_SIZE: f64 = 300.0;
pub const CENTER: f64 = CANVAS_SIZE / 2.0;
pub const RADIUS: f64 = 100.0;
pub const MAX_VALUE: f64 = 5.0;
pub const LEVELS: u32 = 5;
pub const LABEL_LEVEL: f64 = 6.2;
/// Distancia vertical entre el nombre del eje y su puntuación
pub const SCORE_LABEL_OFFSET: f64 = 15.0;
pub const MARKER_RADIUS: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Ejes en orden fijo (el orden forma parte del contrato visual)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Maintainability,
    Readability,
    Efficiency,
    Robustness,
    Consistency,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Maintainability,
        Axis::Readability,
        Axis::Efficiency,
        Axis::Robustness,
        Axis::Consistency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Axis::Maintainability => "保守性",
            Axis::Readability => "可読性",
            Axis::Efficiency => "効率性",
            Axis::Robustness => "安全性",
            Axis::Consistency => "一貫性",
        }
    }

    pub fn value(self, metrics: &ReviewMetrics) -> u8 {
        match self {
            Axis::Maintainability => metrics.maintainability,
            Axis::Readability => metrics.readability,
            Axis::Efficiency => metrics.efficiency,
            Axis::Robustness => metrics.robustness,
            Axis::Consistency => metrics.consistency,
        }
    }
}

/// Ángulo en radianes del eje `index`: -90° + index·72°
pub fn axis_angle(index: usize) -> f64 {
    2.0 * PI * index as f64 / Axis::ALL.len() as f64 - PI / 2.0
}

/// `center + (value/max)·radius·(cos θ, sin θ)`. No se recorta el valor:
/// negativos caen al lado opuesto del centro.
pub fn point_at(value: f64, index: usize, max: f64) -> Point {
    let angle = axis_angle(index);
    let r = value / max * RADIUS;
    Point {
        x: CENTER + r * angle.cos(),
        y: CENTER + r * angle.sin(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub name: &'static str,
    pub score: String,
    pub anchor: Point,
}

impl AxisLabel {
    pub fn score_anchor(&self) -> Point {
        Point {
            x: self.anchor.x,
            y: self.anchor.y + SCORE_LABEL_OFFSET,
        }
    }
}

/// Escena vectorial completa, independiente del backend de pintado
#[derive(Clone, Debug, PartialEq)]
pub struct RadarDrawing {
    pub grid: Vec<Vec<Point>>,
    pub spokes: Vec<(Point, Point)>,
    pub labels: Vec<AxisLabel>,
    pub data: Vec<Point>,
}

/// Gráfico radar de cinco ejes, escala 1..=5
pub struct RadarChart;

impl RadarChart {
    pub fn layout(metrics: &ReviewMetrics) -> RadarDrawing {
        let grid = (1..=LEVELS)
            .map(|level| {
                (0..Axis::ALL.len())
                    .map(|i| point_at(level as f64, i, LEVELS as f64))
                    .collect()
            })
            .collect();

        let center = Point {
            x: CENTER,
            y: CENTER,
        };
        let spokes = (0..Axis::ALL.len())
            .map(|i| (center, point_at(MAX_VALUE, i, MAX_VALUE)))
            .collect();

        let labels = Axis::ALL
            .iter()
            .enumerate()
            .map(|(i, axis)| AxisLabel {
                name: axis.label(),
                score: format!("{}/5", axis.value(metrics)),
                anchor: point_at(LABEL_LEVEL, i, MAX_VALUE),
            })
            .collect();

        let data = Axis::ALL
            .iter()
            .enumerate()
            .map(|(i, axis)| point_at(axis.value(metrics) as f64, i, MAX_VALUE))
            .collect();

        RadarDrawing {
            grid,
            spokes,
            labels,
            data,
        }
    }
}

impl RadarDrawing {
    pub fn vertex(&self, axis: Axis) -> Point {
        let index = Axis::ALL
            .iter()
            .position(|a| *a == axis)
            .unwrap_or_default();
        self.data[index]
    }

    /// Exporta la escena como SVG (mismo `viewBox` que el lienzo)
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}">"#,
            s = CANVAS_SIZE
        );
        for ring in &self.grid {
            svg.push_str(&format!(
                r##"<polygon points="{}" fill="none" stroke="#e2e8f0" stroke-width="1"/>"##,
                points_attr(ring)
            ));
        }
        for (label, (from, to)) in self.labels.iter().zip(&self.spokes) {
            let score = label.score_anchor();
            svg.push_str(&format!(
                r##"<g><line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#cbd5e1" stroke-width="1"/><text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" font-size="12">{}</text><text x="{:.2}" y="{:.2}" text-anchor="middle" font-weight="bold" fill="#16a34a">{}</text></g>"##,
                from.x,
                from.y,
                to.x,
                to.y,
                label.anchor.x,
                label.anchor.y,
                label.name,
                score.x,
                score.y,
                label.score
            ));
        }
        svg.push_str(&format!(
            r##"<polygon points="{}" fill="rgba(34, 197, 94, 0.2)" stroke="#16a34a" stroke-width="2"/>"##,
            points_attr(&self.data)
        ));
        for p in &self.data {
            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="#16a34a"/>"##,
                p.x, p.y, MARKER_RADIUS
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < EPS && (p.y - y).abs() < EPS, "{p:?} != ({x}, {y})");
    }

    fn metrics(values: [u8; 5]) -> ReviewMetrics {
        ReviewMetrics {
            maintainability: values[0],
            readability: values[1],
            efficiency: values[2],
            robustness: values[3],
            consistency: values[4],
        }
    }

    #[test]
    fn full_value_on_first_axis_is_top_of_circle() {
        assert_close(point_at(5.0, 0, 5.0), 150.0, 50.0);
    }

    #[test]
    fn zero_value_is_center_on_every_axis() {
        for i in 0..5 {
            assert_close(point_at(0.0, i, 5.0), CENTER, CENTER);
        }
    }

    #[test]
    fn axes_are_spaced_72_degrees() {
        for i in 0..5 {
            let expected = (-90.0 + 72.0 * i as f64).to_radians();
            assert!((axis_angle(i) - expected).abs() < EPS);
        }
    }

    #[test]
    fn negative_value_lands_opposite_side() {
        // sin recorte: -5 en el eje 0 queda abajo
        assert_close(point_at(-5.0, 0, 5.0), 150.0, 250.0);
    }

    #[test]
    fn layout_has_five_rings_spokes_and_labels() {
        let drawing = RadarChart::layout(&metrics([3, 4, 2, 5, 3]));
        assert_eq!(drawing.grid.len(), 5);
        assert!(drawing.grid.iter().all(|ring| ring.len() == 5));
        assert_eq!(drawing.spokes.len(), 5);
        assert_close(drawing.grid[4][0], 150.0, 50.0);
        assert_close(drawing.grid[0][0], 150.0, 130.0);

        let first = &drawing.labels[0];
        assert_eq!(first.name, "保守性");
        assert_eq!(first.score, "3/5");
        assert_close(first.anchor, 150.0, 150.0 - 6.2 / 5.0 * 100.0);
        assert_close(first.score_anchor(), 150.0, 150.0 - 124.0 + 15.0);
    }

    #[test]
    fn robustness_vertex_at_full_radius() {
        let drawing = RadarChart::layout(&metrics([3, 4, 2, 5, 3]));
        let angle = 126.0_f64.to_radians();
        assert_close(
            drawing.vertex(Axis::Robustness),
            150.0 + 100.0 * angle.cos(),
            150.0 + 100.0 * angle.sin(),
        );
        assert_eq!(drawing.vertex(Axis::Robustness), drawing.spokes[3].1);
    }

    #[test]
    fn svg_contains_rings_polygon_and_markers() {
        let svg = RadarChart::layout(&metrics([5, 5, 5, 5, 5])).to_svg();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<polygon").count(), 6);
        assert_eq!(svg.matches("<circle").count(), 5);
        assert!(svg.contains("150.00,50.00"));
        assert!(svg.contains("一貫性"));
        assert_eq!(svg.matches("<g>").count(), 5);
        assert!(svg.ends_with("</svg>"));
    }
}
