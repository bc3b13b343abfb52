// src/app/graphe.rs
//
// Tracé (painter egui)
// --------------------
// - repère ajusté aux points reçus (y min/max + marge)
// - axes si 0 est dans la fenêtre
// - la courbe est coupée là où des points manquent (trou de domaine)

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};

use calculatrice_graphique::noyau::Point;
use calculatrice_graphique::service::ReponseGraphe;

const HAUTEUR: f32 = 320.0;
const MARGE_Y: f64 = 0.05;

/// Découpe la suite de points là où l’écart en x dépasse 1,5 pas.
pub fn segments(points: &[Point], pas_x: f64) -> Vec<&[Point]> {
    let mut out = Vec::new();
    let mut debut = 0;
    for i in 1..points.len() {
        if points[i].x - points[i - 1].x > 1.5 * pas_x {
            out.push(&points[debut..i]);
            debut = i;
        }
    }
    if debut < points.len() {
        out.push(&points[debut..]);
    }
    out
}

/// Bornes en y (avec marge) ; fenêtre unité si la courbe est plate.
fn bornes_y(points: &[Point]) -> (f64, f64) {
    let (mut bas, mut haut) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        bas = bas.min(p.y);
        haut = haut.max(p.y);
    }
    if !bas.is_finite() || !haut.is_finite() {
        return (-1.0, 1.0);
    }
    if haut - bas < 1e-12 {
        return (bas - 1.0, haut + 1.0);
    }
    let m = (haut - bas) * MARGE_Y;
    (bas - m, haut + m)
}

pub fn dessiner(ui: &mut egui::Ui, trace: &ReponseGraphe) {
    let taille = egui::vec2(ui.available_width(), HAUTEUR);
    let (reponse, painter) = ui.allocate_painter(taille, Sense::hover());
    let cadre = reponse.rect;

    let visuals = ui.visuals();
    painter.rect_filled(cadre, 4.0, visuals.extreme_bg_color);

    let (x0, x1) = (trace.x_range.min, trace.x_range.max);
    let (y0, y1) = bornes_y(&trace.coordinates);

    let vers_ecran = |p: Point| -> Pos2 {
        let tx = ((p.x - x0) / (x1 - x0)) as f32;
        let ty = ((p.y - y0) / (y1 - y0)) as f32;
        Pos2::new(
            cadre.left() + tx * cadre.width(),
            cadre.bottom() - ty * cadre.height(),
        )
    };

    dessiner_axes(&painter, cadre, (x0, x1), (y0, y1), visuals.weak_text_color());

    let couleur = visuals.selection.stroke.color;
    let pas_x = if trace.pas == 0 {
        f64::INFINITY
    } else {
        (x1 - x0) / f64::from(trace.pas)
    };

    for morceau in segments(&trace.coordinates, pas_x) {
        match morceau {
            [seul] => {
                painter.circle_filled(vers_ecran(*seul), 2.0, couleur);
            }
            _ => {
                let ligne: Vec<Pos2> = morceau.iter().map(|p| vers_ecran(*p)).collect();
                painter.add(Shape::line(ligne, Stroke::new(2.0, couleur)));
            }
        }
    }

    let police = FontId::monospace(11.0);
    let texte = visuals.text_color();
    painter.text(
        cadre.left_top() + egui::vec2(4.0, 2.0),
        Align2::LEFT_TOP,
        format!("y ∈ [{y0:.3}, {y1:.3}]"),
        police.clone(),
        texte,
    );
    painter.text(
        cadre.right_bottom() - egui::vec2(4.0, 2.0),
        Align2::RIGHT_BOTTOM,
        format!("x ∈ [{x0}, {x1}]"),
        police,
        texte,
    );
}

fn dessiner_axes(
    painter: &egui::Painter,
    cadre: Rect,
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
    couleur: Color32,
) {
    let trait_axe = Stroke::new(1.0, couleur);

    if x0 <= 0.0 && 0.0 <= x1 {
        let x = cadre.left() + ((-x0) / (x1 - x0)) as f32 * cadre.width();
        painter.line_segment(
            [Pos2::new(x, cadre.top()), Pos2::new(x, cadre.bottom())],
            trait_axe,
        );
    }
    if y0 <= 0.0 && 0.0 <= y1 {
        let y = cadre.bottom() - ((-y0) / (y1 - y0)) as f32 * cadre.height();
        painter.line_segment(
            [Pos2::new(cadre.left(), y), Pos2::new(cadre.right(), y)],
            trait_axe,
        );
    }
}
