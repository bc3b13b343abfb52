// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est dans la table des fonctions => opérateur préfixe
//    - sinon => variable/atome (Expr::Var), sauf "e" (constante)
// - Moins unaire: si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe).
//   Le plus unaire est ignoré.
// - Multiplication implicite: valeur suivie d’une valeur => '*' injecté
//   ("2x", "2pi", "3(x+1)", "(x+1)(x-1)").
//
// Précédences (bas -> haut):
//   + -  <  * / (et implicite)  <  ^ (droite)  <  moins unaire  <  fonction
//
// NOTE:
// - Une fonction suivie d’une parenthèse sort juste après la parenthèse fermante.
// - Sans parenthèse ("sqrt 9"), elle s’applique à l’opérande suivant.

use super::erreur::ErreurCalcul;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

const PREC_NEG: i32 = 4;

/// Profondeur maximale de l’arbre (eval, Display et Drop sont récursifs).
pub const PROFONDEUR_MAX: usize = 256;
const PREC_FONCTION: i32 = 5;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        Tok::Neg => PREC_NEG,
        Tok::Ident(_) => PREC_FONCTION,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

fn symbole(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::Caret => "^",
        _ => "?",
    }
}

/// Dépile vers la sortie tout ce qui doit passer avant l’opérateur binaire `tok`.
fn pousser_binaire(tok: Tok, out: &mut Vec<Tok>, ops: &mut Vec<Tok>) {
    let p_tok = precedence(&tok);

    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }

        let p_top = precedence(top);
        let doit_pop = if is_right_associative(&tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        if let Some(op) = ops.pop() {
            out.push(op);
        }
    }

    ops.push(tok);
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et la multiplication implicite.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        let debut_valeur = matches!(tok, Tok::Num(_) | Tok::Pi | Tok::Ident(_) | Tok::LPar);
        if debut_valeur && prev_was_value {
            pousser_binaire(Tok::Star, &mut out, &mut ops);
        }

        match tok {
            Tok::Num(_) | Tok::Pi => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : opérateur préfixe (sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    // variable/atome : sortie directe
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérande manquant avant ')'"));
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, elle possède ce groupe : on la sort
                if matches!(ops.last(), Some(Tok::Ident(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }
            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "opérande manquant avant '{}'",
                        symbole(&tok)
                    )));
                }
                pousser_binaire(tok, &mut out, &mut ops);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurCalcul::syntaxe("jeton interne inattendu")),
        }
    }

    if !prev_was_value {
        return Err(ErreurCalcul::syntaxe("expression incomplète (opérande manquant)"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// - Ident(name):
///     - fonction de la table => Expr::Fonc
///     - "e" => constante d’Euler
///     - sinon => variable : Expr::Var(name)
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurCalcul> {
    let invalide = || ErreurCalcul::syntaxe("expression invalide");

    // (sous-arbre, profondeur) : l’évaluation et l’affichage sont récursifs
    let mut st: Vec<(Expr, usize)> = Vec::new();
    let empiler = |st: &mut Vec<(Expr, usize)>, e: Expr, profondeur: usize| {
        if profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::syntaxe("expression trop imbriquée"));
        }
        st.push((e, profondeur));
        Ok(())
    };

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push((Expr::Num(v), 1)),
            Tok::Pi => st.push((Expr::Pi, 1)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                empiler(&mut st, e, pa.max(pb) + 1)?;
            }

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                empiler(&mut st, Expr::Neg(Box::new(x)), p + 1)?;
            }

            Tok::Ident(name) => match Fonction::depuis_nom(&name) {
                Some(f) => {
                    let (x, p) = st.pop().ok_or_else(|| {
                        ErreurCalcul::syntaxe(format!("fonction sans argument : {name}"))
                    })?;
                    empiler(&mut st, Expr::Fonc(f, Box::new(x)), p + 1)?;
                }
                None if name == "e" => st.push((Expr::E, 1)),
                None => st.push((Expr::Var(name), 1)),
            },

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}

#[cfg(test)]
mod tests {
    use super::{from_rpn, to_rpn, PROFONDEUR_MAX};
    use crate::noyau::erreur::ErreurCalcul;
    use crate::noyau::jetons::{format_tokens, tokenize};

    fn rpn(s: &str) -> String {
        let t = tokenize(s).unwrap();
        format_tokens(&to_rpn(&t).unwrap())
    }

    fn arbre(s: &str) -> String {
        let t = tokenize(s).unwrap();
        from_rpn(&to_rpn(&t).unwrap()).unwrap().to_string()
    }

    fn erreur(s: &str) -> ErreurCalcul {
        let t = tokenize(s).unwrap();
        match to_rpn(&t) {
            Ok(r) => from_rpn(&r).unwrap_err(),
            Err(e) => e,
        }
    }

    #[test]
    fn precedence_classique() {
        assert_eq!(rpn("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(rpn("(1 + 2) * 3"), "1 2 + 3 *");
        assert_eq!(rpn("8 / 4 / 2"), "8 4 / 2 /");
        assert_eq!(rpn("5 - 3 - 1"), "5 3 - 1 -");
    }

    #[test]
    fn puissance_associative_a_droite() {
        assert_eq!(rpn("2 ^ 3 ^ 2"), "2 3 2 ^ ^");
    }

    #[test]
    fn moins_unaire_avant_puissance() {
        assert_eq!(rpn("-2 ^ 2"), "2 neg 2 ^");
        assert_eq!(rpn("2 ^ -1"), "2 1 neg ^");
        assert_eq!(rpn("3 - -1"), "3 1 neg -");
    }

    #[test]
    fn fonctions_avec_et_sans_parentheses() {
        assert_eq!(rpn("sin(π / 2)"), "π 2 / sin");
        assert_eq!(rpn("sqrt 9 + 1"), "9 sqrt 1 +");
        assert_eq!(rpn("sin(x)^2"), "x sin 2 ^");
        assert_eq!(rpn("-sqrt(4)"), "4 sqrt neg");
    }

    #[test]
    fn multiplication_implicite() {
        assert_eq!(rpn("2x"), "2 x *");
        assert_eq!(rpn("2pi"), "2 π *");
        assert_eq!(rpn("3(x+1)"), "3 x 1 + *");
        assert_eq!(rpn("(x+1)(x-1)"), "x 1 + x 1 - *");
        assert_eq!(rpn("2sin(x)"), "2 x sin *");
        assert_eq!(rpn("x^2-2x-3"), "x 2 ^ 2 x * - 3 -");
    }

    #[test]
    fn constante_e_et_variables() {
        assert_eq!(arbre("2e"), "(2*e)");
        assert_eq!(arbre("x + y"), "(x+y)");
    }

    #[test]
    fn erreurs_de_syntaxe() {
        assert!(matches!(erreur("2+"), ErreurCalcul::Syntaxe(_)));
        assert!(matches!(erreur("(1+2"), ErreurCalcul::Syntaxe(_)));
        assert!(matches!(erreur("1+2)"), ErreurCalcul::Syntaxe(_)));
        assert!(matches!(erreur("()"), ErreurCalcul::Syntaxe(_)));
        assert!(matches!(erreur("*3"), ErreurCalcul::Syntaxe(_)));
        assert!(matches!(erreur("sin"), ErreurCalcul::Syntaxe(_)));
        assert_eq!(
            erreur("(1+2"),
            ErreurCalcul::Syntaxe("parenthèses non fermées".into())
        );
    }

    #[test]
    fn vide() {
        assert_eq!(
            to_rpn(&[]).unwrap_err(),
            ErreurCalcul::Syntaxe("entrée vide".into())
        );
    }

    #[test]
    fn imbrication_bornee() {
        let attendu = ErreurCalcul::Syntaxe("expression trop imbriquée".into());

        // moins unaires, fonctions, chaînes à gauche, puissances à droite
        assert_eq!(erreur(&format!("{}1", "-".repeat(10_000))), attendu);
        assert_eq!(
            erreur(&format!("{}1{}", "sin(".repeat(1_000), ")".repeat(1_000))),
            attendu
        );
        assert_eq!(erreur(&vec!["1"; 5_000].join("+")), attendu);
        assert_eq!(erreur(&vec!["2"; 5_000].join("^")), attendu);

        // les parenthèses seules n’ajoutent pas de niveau
        let parens = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        assert_eq!(arbre(&parens), "1");

        // juste sous la limite : accepté
        let n = PROFONDEUR_MAX - 1;
        assert!(arbre(&format!("{}1", "-".repeat(n))).starts_with("-("));
    }
}
