//! Routeur JSON (indépendant du transport)
//!
//! méthode + cible (+ query) + corps JSON  ->  statut HTTP + corps JSON
//!
//! Reprend le contrat de l’ancien serveur : mêmes chemins, mêmes clés,
//! mêmes messages d’erreur (en anglais). Un adaptateur HTTP n’a plus qu’à
//! recopier `Reponse` sur le fil.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::service::{ErreurService, RequeteGraphe, Service};

#[derive(Clone, Debug, PartialEq)]
pub struct Reponse {
    pub statut: u16,
    pub corps: Value,
}

impl Reponse {
    fn ok(corps: Value) -> Self {
        Self { statut: 200, corps }
    }

    fn erreur(statut: u16, message: &str) -> Self {
        Self {
            statut,
            corps: json!({ "error": message }),
        }
    }

    fn erreur_details(statut: u16, message: &str, details: impl std::fmt::Display) -> Self {
        Self {
            statut,
            corps: json!({ "error": message, "details": details.to_string() }),
        }
    }
}

pub struct Routeur<'a> {
    service: &'a Service,
}

impl<'a> Routeur<'a> {
    pub fn new(service: &'a Service) -> Self {
        Self { service }
    }

    /// Point d’entrée unique. `cible` peut contenir une query (`?limit=10`).
    pub fn repondre(&self, methode: &str, cible: &str, corps: &str) -> Reponse {
        let (chemin, query) = match cible.split_once('?') {
            Some((c, q)) => (c, q),
            None => (cible, ""),
        };
        debug!(methode, chemin, "requête");

        match (methode.to_ascii_uppercase().as_str(), chemin) {
            ("POST", "/api/calculate") => self.calculer(corps),
            ("POST", "/api/graph") => self.tracer(corps),
            ("GET", "/api/history") => self.historique(query),
            ("POST", "/api/history") => self.ajouter_historique(corps),
            ("GET", "/api/functions") => self.fonctions(),
            ("POST", "/api/functions") => self.enregistrer_fonction(corps),
            ("GET", "/api/health") => Reponse::ok(valeur(&self.service.sante())),
            _ => Reponse::erreur(404, "Endpoint not found"),
        }
    }

    fn calculer(&self, corps: &str) -> Reponse {
        let corps = lire_corps(corps);
        let Some(formule) = champ_texte(&corps, "formula") else {
            return Reponse::erreur(400, "Formula is required and must be a string");
        };

        match self.service.calculer(formule) {
            Ok(r) => Reponse::ok(json!({
                "result": r.result,
                "formula": r.formula,
                "success": true,
            })),
            Err(ErreurService::ExpressionInvalide(e)) => {
                Reponse::erreur_details(400, "Invalid mathematical expression", e)
            }
            Err(e) => Reponse::erreur(400, &e.to_string()),
        }
    }

    fn tracer(&self, corps: &str) -> Reponse {
        let corps = lire_corps(corps);
        if champ_texte(&corps, "functionString").is_none() {
            return Reponse::erreur(400, "Function string is required and must be a string");
        }

        let req: RequeteGraphe = match serde_json::from_value(corps) {
            Ok(r) => r,
            Err(e) => return Reponse::erreur_details(400, "Error generating graph data", e),
        };

        match self.service.tracer(&req) {
            Ok(r) => {
                let mut v = valeur(&r);
                if let Value::Object(m) = &mut v {
                    m.insert("success".into(), Value::Bool(true));
                }
                Reponse::ok(v)
            }
            Err(e) => Reponse::erreur_details(400, "Error generating graph data", e),
        }
    }

    fn historique(&self, query: &str) -> Reponse {
        let limite = parametre(query, "limit").and_then(|v| v.parse::<usize>().ok());

        match self.service.historique(limite) {
            Ok(h) => Reponse::ok(json!({
                "count": h.len(),
                "history": h,
                "success": true,
            })),
            Err(e) => {
                error!(erreur = %e, "lecture de l’historique");
                Reponse::erreur(500, "Database error retrieving history")
            }
        }
    }

    fn ajouter_historique(&self, corps: &str) -> Reponse {
        let corps = lire_corps(corps);
        let (Some(formule), Some(resultat)) =
            (champ_texte(&corps, "formula"), champ_texte(&corps, "result"))
        else {
            return Reponse::erreur(400, "Formula and result are required");
        };

        match self.service.ajouter_historique(formule, resultat) {
            Ok(e) => Reponse::ok(json!({
                "id": e.id,
                "formula": e.formule,
                "result": e.resultat,
                "success": true,
            })),
            Err(ErreurService::Requete(m)) => Reponse::erreur(400, &m),
            Err(e) => {
                error!(erreur = %e, "écriture de l’historique");
                Reponse::erreur(500, "Database error saving to history")
            }
        }
    }

    fn fonctions(&self) -> Reponse {
        match self.service.fonctions() {
            Ok(f) => Reponse::ok(json!({
                "count": f.len(),
                "functions": f,
                "success": true,
            })),
            Err(e) => {
                error!(erreur = %e, "lecture des fonctions");
                Reponse::erreur(500, "Database error retrieving functions")
            }
        }
    }

    fn enregistrer_fonction(&self, corps: &str) -> Reponse {
        let corps = lire_corps(corps);
        let (Some(nom), Some(chaine)) = (
            champ_texte(&corps, "functionName"),
            champ_texte(&corps, "functionString"),
        ) else {
            return Reponse::erreur(400, "Function name and string are required");
        };

        match self.service.enregistrer_fonction(nom, chaine) {
            Ok(f) => Reponse::ok(json!({
                "id": f.id,
                "functionName": f.nom,
                "functionString": f.chaine,
                "success": true,
            })),
            Err(ErreurService::Requete(m)) => Reponse::erreur(400, &m),
            Err(e) => {
                error!(erreur = %e, "écriture d’une fonction");
                Reponse::erreur(500, "Database error saving function")
            }
        }
    }
}

/// Corps absent ou illisible => objet vide (les champs requis manqueront).
fn lire_corps(corps: &str) -> Value {
    if corps.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(corps).unwrap_or(Value::Null)
}

fn champ_texte<'v>(corps: &'v Value, cle: &str) -> Option<&'v str> {
    corps
        .get(cle)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn valeur<T: Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}

/// `a=1&limit=10` -> Some("10") pour "limit".
fn parametre<'q>(query: &'q str, nom: &str) -> Option<&'q str> {
    query
        .split('&')
        .filter_map(|p| p.split_once('='))
        .find(|(k, _)| *k == nom)
        .map(|(_, v)| v)
}
