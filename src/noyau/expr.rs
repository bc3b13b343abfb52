// src/noyau/expr.rs
//
// AST numérique (f64).
// - Num : littéral
// - Pi / E : constantes
// - Var : variable libre (ex: x), résolue par la Portee à l’évaluation
// - Fonc : fonction unaire de la table (sin, log10, sqrt...)
//
// IMPORTANT :
// - eval() ne doit jamais “inventer” une valeur pour Var (pas de zéro par défaut).
// - Les erreurs de domaine sont signalées ici ; NaN/±∞ restants sont filtrés par
//   l’appelant (eval.rs, echantillon.rs).

use std::f64::consts;
use std::fmt;

use super::erreur::ErreurCalcul;

/// Liaison d’une seule variable (le `x` du tracé).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Portee<'a> {
    nom: &'a str,
    valeur: f64,
}

impl<'a> Portee<'a> {
    pub fn new(nom: &'a str, valeur: f64) -> Self {
        Self { nom, valeur }
    }

    /// Portée du tracé : `x = valeur`.
    pub fn x(valeur: f64) -> Portee<'static> {
        Portee { nom: "x", valeur }
    }

    pub fn valeur(&self, nom: &str) -> Option<f64> {
        (self.nom == nom).then_some(self.valeur)
    }
}

/// Table des fonctions unaires (radians pour la trigo).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log10,
    Ln,
    Exp,
    Abs,
}

impl Fonction {
    /// `log` vaut log10 (convention calculatrice), `ln` est le log naturel.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;

        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sqrt" => Sqrt,
            "log" | "log10" => Log10,
            "ln" => Ln,
            "exp" => Exp,
            "abs" => Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sqrt => "sqrt",
            Log10 => "log10",
            Ln => "ln",
            Exp => "exp",
            Abs => "abs",
        }
    }

    pub fn appliquer(self, x: f64) -> Result<f64, ErreurCalcul> {
        use Fonction::*;

        match self {
            Sqrt if x < 0.0 => Err(ErreurCalcul::domaine(format!(
                "racine carrée d’un nombre négatif ({x})"
            ))),
            Log10 | Ln if x <= 0.0 => Err(ErreurCalcul::domaine(format!(
                "{} d’un nombre non positif ({x})",
                self.nom()
            ))),
            Asin | Acos if !(-1.0..=1.0).contains(&x) => Err(ErreurCalcul::domaine(format!(
                "{} hors de [-1, 1] ({x})",
                self.nom()
            ))),

            Sin => Ok(x.sin()),
            Cos => Ok(x.cos()),
            Tan => Ok(x.tan()),
            Asin => Ok(x.asin()),
            Acos => Ok(x.acos()),
            Atan => Ok(x.atan()),
            Sqrt => Ok(x.sqrt()),
            Log10 => Ok(x.log10()),
            Ln => Ok(x.ln()),
            Exp => Ok(x.exp()),
            Abs => Ok(x.abs()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,
    E,

    Var(String),

    Neg(Box<Expr>),
    Fonc(Fonction, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue l’arbre. Sans portée, toute variable est une erreur.
    pub fn eval(&self, portee: Option<&Portee<'_>>) -> Result<f64, ErreurCalcul> {
        use Expr::*;

        match self {
            Num(v) => Ok(*v),
            Pi => Ok(consts::PI),
            E => Ok(consts::E),

            Var(nom) => portee
                .and_then(|p| p.valeur(nom))
                .ok_or_else(|| ErreurCalcul::IdentifiantInconnu(nom.clone())),

            Neg(x) => Ok(-x.eval(portee)?),
            Fonc(f, x) => f.appliquer(x.eval(portee)?),

            Add(a, b) => Ok(a.eval(portee)? + b.eval(portee)?),
            Sub(a, b) => Ok(a.eval(portee)? - b.eval(portee)?),
            Mul(a, b) => Ok(a.eval(portee)? * b.eval(portee)?),

            Div(a, b) => {
                let n = a.eval(portee)?;
                let d = b.eval(portee)?;
                if d == 0.0 {
                    return Err(ErreurCalcul::domaine("division par zéro"));
                }
                Ok(n / d)
            }

            Pow(a, b) => {
                let base = a.eval(portee)?;
                let exposant = b.eval(portee)?;
                let v = base.powf(exposant);
                if v.is_nan() && base < 0.0 {
                    return Err(ErreurCalcul::domaine(format!(
                        "puissance non réelle ({base})^({exposant})"
                    )));
                }
                if base == 0.0 && exposant < 0.0 {
                    return Err(ErreurCalcul::domaine("division par zéro"));
                }
                Ok(v)
            }
        }
    }

    /// Noms des variables libres (ordre d’apparition, sans doublon).
    pub fn variables(&self) -> Vec<&str> {
        use Expr::*;

        let mut out: Vec<&str> = Vec::new();
        let mut pile: Vec<&Expr> = vec![self];

        while let Some(e) = pile.pop() {
            match e {
                Var(nom) => {
                    if !out.contains(&nom.as_str()) {
                        out.push(nom.as_str());
                    }
                }
                Num(_) | Pi | E => {}
                Neg(x) | Fonc(_, x) => pile.push(x),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    // b d’abord : a sort en premier de la pile
                    pile.push(b);
                    pile.push(a);
                }
            }
        }

        out
    }
}

/// Affichage entièrement parenthésé (démarche).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Num(v) => write!(f, "{v}"),
            Pi => write!(f, "π"),
            E => write!(f, "e"),
            Var(nom) => write!(f, "{nom}"),
            Neg(x) => write!(f, "-({x})"),
            Fonc(g, x) => write!(f, "{}({x})", g.nom()),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a})^({b})"),
        }
    }
}
