// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Onglets : Calcul / Graphe
// - Clavier : Enter évalue (quand le champ a le focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Pavé : chiffres + notation calculatrice (×, ÷, π, √, log, ln, ^)
//
// Note : PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppCalc, Mode};
use super::graphe;

/// Touches du pavé : (étiquette, texte inséré). Une ligne = une rangée.
const PAVE: [[(&str, &str); 5]; 5] = [
    [("7", "7"), ("8", "8"), ("9", "9"), ("÷", "÷"), ("√", "√(")],
    [("4", "4"), ("5", "5"), ("6", "6"), ("×", "×"), ("^", "^")],
    [("1", "1"), ("2", "2"), ("3", "3"), ("-", "-"), ("π", "π")],
    [("0", "0"), (".", "."), ("(", "("), ("+", "+"), (")", ")")],
    [("sin", "sin("), ("cos", "cos("), ("tan", "tan("), ("log", "log("), ("ln", "ln(")],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.horizontal(|ui| {
            ui.heading("Calculatrice graphique");
            ui.add_space(12.0);
            ui.selectable_value(&mut self.mode, Mode::Calcul, "Calcul");
            ui.selectable_value(&mut self.mode, Mode::Graphe, "Graphe");
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.mode {
                Mode::Calcul => self.ui_calcul(ui),
                Mode::Graphe => self.ui_graphe(ui),
            });
    }

    /* ------------------------ Calculatrice ------------------------ */

    fn ui_calcul(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2×π, √(16)+log(100), 2^-1")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // singleline : Enter fait perdre le focus au champ ce même frame
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.evaluer();
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if bouton(ui, "C", [56.0, 30.0]).on_hover_text("Efface l’entrée").clicked() {
                self.clear_entree();
            }
            if bouton(ui, "AC", [56.0, 30.0]).on_hover_text("Remise à zéro").clicked() {
                self.reset_total();
            }
            if bouton(ui, "DEL", [56.0, 30.0]).on_hover_text("Efface le dernier symbole").clicked() {
                self.backspace_entree();
            }
            if bouton(ui, "=", [64.0, 30.0]).clicked() {
                self.evaluer();
            }
        });

        ui.add_space(6.0);
        self.ui_pave(ui);

        ui.add_space(8.0);
        ui.separator();

        ui.label("Résultat :");
        champ_monospace(ui, "resultat_out", &self.resultat);
        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }

        ui.add_space(6.0);
        self.ui_demarche(ui);

        ui.add_space(6.0);
        self.ui_historique(ui);
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for (etiquette, texte) in rangee {
                        if bouton(ui, etiquette, [52.0, 32.0]).clicked() {
                            self.inserer(texte);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| match &self.demarche {
                Some(d) => {
                    ui.label("Jetons :");
                    champ_monospace(ui, "demarche_jetons", &d.jetons);
                    ui.label("RPN :");
                    champ_monospace(ui, "demarche_rpn", &d.rpn);
                    ui.label("Arbre :");
                    champ_monospace(ui, "demarche_arbre", &d.arbre);
                }
                None => {
                    ui.weak("rien à détailler");
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut rappel = None;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("aucun calcul");
                }
                for e in &self.historique {
                    ui.horizontal(|ui| {
                        if ui
                            .small_button("↺")
                            .on_hover_text("Reprendre la formule")
                            .clicked()
                        {
                            rappel = Some(e.formule.clone());
                        }
                        ui.monospace(format!("{} = {}", e.formule, e.resultat));
                        ui.weak(&e.horodatage);
                    });
                }
            });

        if let Some(f) = rappel {
            self.rappeler(&f);
        }
    }

    /* ------------------------ Traceur ------------------------ */

    fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) =");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.fonction)
                .desired_width(ui.available_width())
                .hint_text("Ex: x^2-2x-3, sin(x), 1÷x, √x")
                .id_salt("fonction_edit")
                .code_editor(),
        );
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.lost_focus() && enter {
            self.tracer();
        }

        let points_max = self.points_max();
        ui.horizontal(|ui| {
            ui.label("x min");
            ui.add(egui::DragValue::new(&mut self.x_min).speed(0.5));
            ui.label("x max");
            ui.add(egui::DragValue::new(&mut self.x_max).speed(0.5));
            ui.label("points");
            ui.add(
                egui::DragValue::new(&mut self.points)
                    .speed(1)
                    .range(0..=points_max),
            );
            if bouton(ui, "Tracer", [72.0, 28.0]).clicked() {
                self.tracer();
            }
        });

        if !self.erreur_graphe.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur_graphe);
        }

        ui.add_space(6.0);
        match &self.trace {
            Some(t) => {
                graphe::dessiner(ui, t);
                ui.weak(format!("{} points retenus", t.points));
            }
            None => {
                ui.weak("aucun tracé");
            }
        }

        ui.add_space(8.0);
        ui.separator();
        self.ui_fonctions(ui);
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Nom :");
            ui.add(
                egui::TextEdit::singleline(&mut self.nom_fonction)
                    .desired_width(160.0)
                    .id_salt("nom_fonction_edit"),
            );
            if bouton(ui, "Enregistrer", [96.0, 28.0]).clicked() {
                self.enregistrer_fonction();
            }
        });

        let mut choisie = None;
        egui::CollapsingHeader::new("Fonctions enregistrées")
            .default_open(true)
            .show(ui, |ui| {
                if self.fonctions.is_empty() {
                    ui.weak("aucune fonction");
                }
                for f in &self.fonctions {
                    ui.horizontal(|ui| {
                        if ui.small_button("▶").on_hover_text("Tracer").clicked() {
                            choisie = Some(f.chaine.clone());
                        }
                        ui.monospace(format!("{} : {}", f.nom, f.chaine));
                    });
                }
            });

        if let Some(chaine) = choisie {
            self.charger_fonction(&chaine);
        }
    }
}

/* ------------------------ Widgets ------------------------ */

fn bouton(ui: &mut egui::Ui, etiquette: &str, taille: [f32; 2]) -> egui::Response {
    ui.add_sized(taille, egui::Button::new(etiquette))
}

/// Affichage lecture seule dans un cadre (pas de TextEdit interactif).
fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(contenu);
            });
        });
}
