//! Service : opérations logiques autour du noyau
//!
//! calculer : normalize -> evaluate -> historique (écriture “tire et oublie”)
//! tracer   : validation des bornes -> normalize -> sample (aucune persistance)
//!
//! + lecture/écriture de l’historique et des fonctions enregistrées, état de santé.
//!
//! Le stockage est passé explicitement à la construction (pas d’état global).
//! Les messages d’erreur de requête sont ceux du contrat JSON historique (anglais).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, POINTS_DEFAUT, X_MAX_DEFAUT, X_MIN_DEFAUT};
use crate::noyau::{evaluate, normalize, sample, ErreurCalcul, Point};
use crate::stockage::{EntreeHistorique, ErreurStockage, FonctionEnregistree, Stockage};

#[derive(Debug, Error)]
pub enum ErreurService {
    /// Requête structurellement invalide (champ manquant, bornes dégénérées...).
    #[error("{0}")]
    Requete(String),

    #[error("Invalid mathematical expression: {0}")]
    ExpressionInvalide(#[from] ErreurCalcul),

    #[error(transparent)]
    Stockage(#[from] ErreurStockage),
}

fn requete(msg: &str) -> ErreurService {
    ErreurService::Requete(msg.to_string())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReponseCalcul {
    pub result: String,
    pub formula: String,
}

/// Champs absents => valeurs par défaut (-10, 10, 200).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequeteGraphe {
    #[serde(rename = "functionString", default)]
    pub fonction: Option<String>,
    #[serde(rename = "xMin", default)]
    pub x_min: Option<f64>,
    #[serde(rename = "xMax", default)]
    pub x_max: Option<f64>,
    #[serde(alias = "pointCount", default)]
    pub points: Option<i64>,
}

impl RequeteGraphe {
    pub fn new(fonction: impl Into<String>) -> Self {
        Self {
            fonction: Some(fonction.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intervalle {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReponseGraphe {
    pub coordinates: Vec<Point>,
    /// Texte tel que saisi (avant normalisation).
    pub function: String,
    #[serde(rename = "xRange")]
    pub x_range: Intervalle,
    /// Nombre de points retenus.
    pub points: usize,
    /// Nombre de pas effectivement utilisé (après plafonnement).
    #[serde(skip)]
    pub pas: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EtatSante {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}

pub struct Service {
    stockage: Box<dyn Stockage>,
    config: Config,
}

impl Service {
    pub fn new(stockage: Box<dyn Stockage>, config: Config) -> Self {
        Self { stockage, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Calculate : évalue une formule en notation calculatrice.
    ///
    /// Un succès est ajouté à l’historique ; un échec du stockage est journalisé
    /// et n’empêche jamais la réponse.
    pub fn calculer(&self, formule: &str) -> Result<ReponseCalcul, ErreurService> {
        if formule.trim().is_empty() {
            return Err(requete("Formula is required and must be a string"));
        }

        let valeur = evaluate(&normalize(formule), None)?;

        if let Err(e) = self.stockage.ajouter_historique(formule, &valeur.texte) {
            warn!(erreur = %e, formule, "historique non enregistré");
        }

        Ok(ReponseCalcul {
            result: valeur.texte,
            formula: formule.to_string(),
        })
    }

    /// Graph : échantillonne une fonction de x. Aucun effet de bord.
    ///
    /// Seules les requêtes structurellement invalides échouent ; les trous de
    /// domaine donnent simplement moins de points.
    pub fn tracer(&self, req: &RequeteGraphe) -> Result<ReponseGraphe, ErreurService> {
        let fonction = req
            .fonction
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| requete("Function string is required and must be a string"))?;

        let x_min = req.x_min.unwrap_or(X_MIN_DEFAUT);
        let x_max = req.x_max.unwrap_or(X_MAX_DEFAUT);
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(requete("xMin and xMax must be finite numbers"));
        }
        if x_min >= x_max {
            return Err(requete("xMin must be lower than xMax"));
        }

        let demandes = req.points.unwrap_or(i64::from(POINTS_DEFAUT));
        let demandes =
            u32::try_from(demandes).map_err(|_| requete("points must be a non-negative integer"))?;
        let pas = if demandes > self.config.points_max {
            warn!(
                demandes,
                plafond = self.config.points_max,
                "nombre de points plafonné"
            );
            self.config.points_max
        } else {
            demandes
        };

        let ensemble = sample(&normalize(fonction), x_min, x_max, pas);
        debug!(
            fonction,
            retenus = ensemble.points.len(),
            echantillons = u64::from(pas) + 1,
            "tracé échantillonné"
        );

        Ok(ReponseGraphe {
            points: ensemble.points.len(),
            coordinates: ensemble.points,
            function: fonction.to_string(),
            x_range: Intervalle {
                min: ensemble.x_min,
                max: ensemble.x_max,
            },
            pas,
        })
    }

    /// Historique, du plus récent au plus ancien (limite par défaut : config).
    pub fn historique(&self, limite: Option<usize>) -> Result<Vec<EntreeHistorique>, ErreurService> {
        let limite = limite.unwrap_or(self.config.limite_historique);
        Ok(self.stockage.lister_historique(limite)?)
    }

    /// Ajout manuel à l’historique (route POST /api/history).
    pub fn ajouter_historique(
        &self,
        formule: &str,
        resultat: &str,
    ) -> Result<EntreeHistorique, ErreurService> {
        if formule.trim().is_empty() || resultat.trim().is_empty() {
            return Err(requete("Formula and result are required"));
        }
        Ok(self.stockage.ajouter_historique(formule, resultat)?)
    }

    pub fn fonctions(&self) -> Result<Vec<FonctionEnregistree>, ErreurService> {
        Ok(self.stockage.lister_fonctions()?)
    }

    pub fn enregistrer_fonction(
        &self,
        nom: &str,
        chaine: &str,
    ) -> Result<FonctionEnregistree, ErreurService> {
        if nom.trim().is_empty() || chaine.trim().is_empty() {
            return Err(requete("Function name and string are required"));
        }
        Ok(self.stockage.enregistrer_fonction(nom, chaine)?)
    }

    pub fn sante(&self) -> EtatSante {
        EtatSante {
            status: "OK".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            database: self.stockage.nom().to_string(),
        }
    }
}
