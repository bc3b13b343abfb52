//! src/app/etat.rs
//!
//! État UI + actions (sans dessin).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, démarche,
//! historique) et du traceur (fonction, bornes, points, fonctions enregistrées),
//! et brancher les boutons sur le service.
//!
//! Contrats :
//! - Aucun calcul ici : tout passe par `Service` (donc par le noyau).
//! - Une erreur n’efface pas le dernier résultat affiché.
//! - Le traceur ne touche jamais à l’historique.

use calculatrice_graphique::config::{POINTS_DEFAUT, X_MAX_DEFAUT, X_MIN_DEFAUT};
use calculatrice_graphique::noyau::{decomposer, normalize, Demarche};
use calculatrice_graphique::service::{ReponseGraphe, RequeteGraphe, Service};
use calculatrice_graphique::stockage::{EntreeHistorique, FonctionEnregistree};

/// Nombre d’entrées d’historique affichées sous la calculatrice.
const HISTORIQUE_VISIBLE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Calcul,
    Graphe,
}

pub struct AppCalc {
    service: Service,

    pub mode: Mode,

    // --- calculatrice ---
    pub entree: String,
    pub resultat: String,
    pub erreur: String,
    pub demarche: Option<Demarche>,
    pub historique: Vec<EntreeHistorique>,

    // --- traceur ---
    pub fonction: String,
    pub x_min: f64,
    pub x_max: f64,
    pub points: u32,
    pub trace: Option<ReponseGraphe>,
    pub erreur_graphe: String,
    pub nom_fonction: String,
    pub fonctions: Vec<FonctionEnregistree>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl AppCalc {
    pub fn new(service: Service) -> Self {
        let mut app = Self {
            service,
            mode: Mode::Calcul,
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: None,
            historique: Vec::new(),
            fonction: String::new(),
            x_min: X_MIN_DEFAUT,
            x_max: X_MAX_DEFAUT,
            points: POINTS_DEFAUT,
            trace: None,
            erreur_graphe: String::new(),
            nom_fonction: String::new(),
            fonctions: Vec::new(),
            focus_entree: true,
        };
        app.rafraichir_historique();
        app.rafraichir_fonctions();
        app
    }

    pub fn points_max(&self) -> u32 {
        self.service.config().points_max
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// AC : entrée + résultat + erreur + démarche.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = None;
        self.focus_entree = true;
    }

    /// DEL : retire d’un coup un mot connu ("sqrt(", "log(", "π"...), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);

        for motif in ["sqrt(", "sin(", "cos(", "tan(", "log(", "ln(", "√(", "pi"] {
            if let Some(reste) = self.entree.strip_suffix(motif) {
                let n = reste.len();
                self.entree.truncate(n);
                self.focus_entree = true;
                return;
            }
        }
        self.entree.pop();
        self.focus_entree = true;
    }

    /// Insertion depuis le pavé (texte tel quel, la normalisation fera le reste).
    pub fn inserer(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    /// Rappel d’une formule de l’historique dans l’entrée.
    pub fn rappeler(&mut self, formule: &str) {
        self.entree = formule.to_string();
        self.focus_entree = true;
    }

    /* ------------------------ Actions branchées sur le service ------------------------ */

    /// "=" / Enter : évalue l’entrée et recharge l’historique.
    pub fn evaluer(&mut self) {
        let formule = self.entree.trim().to_string();
        if formule.is_empty() {
            self.erreur = "Entrée vide".to_string();
            self.focus_entree = true;
            return;
        }

        // Démarche : disponible dès que l’expression s’analyse (même si le calcul échoue).
        self.demarche = decomposer(&normalize(&formule)).ok();

        match self.service.calculer(&formule) {
            Ok(r) => {
                self.erreur.clear();
                self.resultat = r.result;
                self.rafraichir_historique();
            }
            Err(e) => self.erreur = e.to_string(),
        }
        self.focus_entree = true;
    }

    pub fn tracer(&mut self) {
        let req = RequeteGraphe {
            fonction: Some(self.fonction.clone()),
            x_min: Some(self.x_min),
            x_max: Some(self.x_max),
            points: Some(i64::from(self.points)),
        };

        match self.service.tracer(&req) {
            Ok(r) => {
                self.erreur_graphe.clear();
                self.trace = Some(r);
            }
            Err(e) => {
                self.erreur_graphe = e.to_string();
                self.trace = None;
            }
        }
    }

    pub fn enregistrer_fonction(&mut self) {
        match self
            .service
            .enregistrer_fonction(self.nom_fonction.trim(), self.fonction.trim())
        {
            Ok(_) => {
                self.erreur_graphe.clear();
                self.nom_fonction.clear();
                self.rafraichir_fonctions();
            }
            Err(e) => self.erreur_graphe = e.to_string(),
        }
    }

    /// Reprend une fonction enregistrée et la trace aussitôt.
    pub fn charger_fonction(&mut self, chaine: &str) {
        self.fonction = chaine.to_string();
        self.tracer();
    }

    fn rafraichir_historique(&mut self) {
        match self.service.historique(Some(HISTORIQUE_VISIBLE)) {
            Ok(h) => self.historique = h,
            Err(e) => tracing::warn!(erreur = %e, "historique illisible"),
        }
    }

    fn rafraichir_fonctions(&mut self) {
        match self.service.fonctions() {
            Ok(f) => self.fonctions = f,
            Err(e) => tracing::warn!(erreur = %e, "fonctions illisibles"),
        }
    }
}

#[cfg(test)]
mod tests {
    use calculatrice_graphique::config::Config;
    use calculatrice_graphique::service::Service;
    use calculatrice_graphique::stockage::StockageMemoire;

    use super::AppCalc;

    fn app() -> AppCalc {
        AppCalc::new(Service::new(
            Box::new(StockageMemoire::new()),
            Config::default(),
        ))
    }

    #[test]
    fn evaluation_et_historique() {
        let mut a = app();
        a.inserer("2");
        a.inserer("×");
        a.inserer("3");
        a.evaluer();

        assert_eq!(a.resultat, "6");
        assert!(a.erreur.is_empty());
        assert_eq!(a.historique.len(), 1);
        assert_eq!(a.historique[0].formule, "2×3");

        let d = a.demarche.as_ref().unwrap();
        assert_eq!(d.rpn, "2 3 *");
    }

    #[test]
    fn erreur_garde_le_resultat() {
        let mut a = app();
        a.rappeler("1+1");
        a.evaluer();
        a.rappeler("10÷0");
        a.evaluer();

        assert_eq!(a.resultat, "2");
        assert!(!a.erreur.is_empty());
        assert_eq!(a.historique.len(), 1);
        // l’expression s’analyse : la démarche reste visible
        assert!(a.demarche.is_some());
    }

    #[test]
    fn entree_vide() {
        let mut a = app();
        a.evaluer();
        assert_eq!(a.erreur, "Entrée vide");
    }

    #[test]
    fn backspace_mots() {
        let mut a = app();
        a.inserer("2+sqrt(");
        a.backspace_entree();
        assert_eq!(a.entree, "2+");
        a.inserer("pi");
        a.backspace_entree();
        assert_eq!(a.entree, "2+");
        a.backspace_entree();
        assert_eq!(a.entree, "2");
    }

    #[test]
    fn trace_et_fonctions() {
        let mut a = app();
        a.fonction = "x^2".to_string();
        a.points = 20;
        a.tracer();
        assert_eq!(a.trace.as_ref().map(|t| t.points), Some(21));
        assert!(a.historique.is_empty());

        a.nom_fonction = "parabole".to_string();
        a.enregistrer_fonction();
        assert_eq!(a.fonctions.len(), 1);
        assert!(a.nom_fonction.is_empty());

        a.x_min = 3.0;
        a.x_max = 1.0;
        a.tracer();
        assert!(a.trace.is_none());
        assert!(!a.erreur_graphe.is_empty());
    }
}
