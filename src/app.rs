// src/app.rs
//
// Calculatrice graphique : module App (racine)
// --------------------------------------------
// - etat.rs   : état + actions (branchées sur le service)
// - vue.rs    : widgets egui (calculatrice, traceur)
// - graphe.rs : dessin de la courbe
//
// La gestion Enter est faite dans vue.rs, quand le champ a le focus.

pub mod etat;
pub mod graphe;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée (comme bouton "C").
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
