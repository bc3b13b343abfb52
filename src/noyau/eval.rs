//! Noyau : évaluation (pipeline réel)
//!
//! texte normalisé -> jetons -> RPN -> Expr -> f64 -> contrôle “fini” -> texte
//!
//! Aucun état entre deux appels : chaque évaluation repart du texte.

use super::erreur::ErreurCalcul;
use super::expr::{Expr, Portee};
use super::format::format_nombre;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

/// Résultat réussi : toujours fini.
#[derive(Clone, Debug, PartialEq)]
pub struct Valeur {
    pub nombre: f64,
    pub texte: String,
}

pub type Resultat = Result<Valeur, ErreurCalcul>;

/// Étapes intermédiaires, pour le panneau “Démarche”.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Analyse un texte normalisé en arbre.
pub fn parse(expr_str: &str) -> Result<Expr, ErreurCalcul> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    from_rpn(&rpn)
}

/// API publique : évalue une expression normalisée.
///
/// Sans portée, toute variable est une erreur. NaN/±∞ ne sont jamais un succès.
pub fn evaluate(expr_str: &str, portee: Option<&Portee<'_>>) -> Resultat {
    let arbre = parse(expr_str)?;
    let nombre = arbre.eval(portee)?;

    if !nombre.is_finite() {
        return Err(ErreurCalcul::NonFini);
    }

    Ok(Valeur {
        nombre,
        texte: format_nombre(nombre),
    })
}

/// Démarche : jetons, RPN et arbre parenthésé (sans évaluer).
pub fn decomposer(expr_str: &str) -> Result<Demarche, ErreurCalcul> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    let arbre = from_rpn(&rpn)?;

    Ok(Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        arbre: arbre.to_string(),
    })
}
