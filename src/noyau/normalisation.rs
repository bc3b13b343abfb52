// src/noyau/normalisation.rs
//
// Notation calculatrice -> grammaire du noyau
// ------------------------------------------
// Un seul passage gauche -> droite : chaque règle s’applique une fois au texte
// d’entrée, la sortie n’est jamais relue. Les mots (log, ln) sont reconnus en
// entier : "log10" ou "logistic" ne sont pas touchés.
//
// Table :
//   ×   -> *
//   ÷   -> /
//   π   -> pi
//   √   -> sqrt
//   log -> log10   (base 10, convention calculatrice)
//   ln  -> ln      (log naturel, nom natif du noyau)
//   ^   -> ^       (exposant natif du noyau)
//
// sin / cos / tan passent tels quels. Un symbole inconnu passe tel quel
// (l’évaluateur échouera dessus).

/// Normalise une saisie calculatrice. Fonction pure et totale.
///
/// Idempotente : `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(brut: &str) -> String {
    let chars: Vec<char> = brut.chars().collect();
    let mut out = String::with_capacity(brut.len() + 8);
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        match c {
            '×' => {
                out.push('*');
                i += 1;
            }
            '÷' => {
                out.push('/');
                i += 1;
            }
            'π' => {
                pousser_mot(&mut out, "pi", chars.get(i + 1).copied());
                i += 1;
            }
            '√' => {
                pousser_mot(&mut out, "sqrt", chars.get(i + 1).copied());
                i += 1;
            }
            _ if est_debut_mot(c) => {
                let start = i;
                while i < chars.len() && est_car_mot(chars[i]) {
                    i += 1;
                }
                let mot: String = chars[start..i].iter().collect();
                out.push_str(remplacer_mot(&mot));
            }
            // nombre (avec exposant "1e5") : recopié tel quel, pour ne pas
            // prendre "e5" pour un mot
            _ if c.is_ascii_digit() || c == '.' => {
                let fin = fin_nombre(&chars, i);
                out.extend(&chars[i..fin]);
                i = fin;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Fin (exclue) d’un littéral numérique commençant en `i`.
/// Même découpage que le tokenizer : chiffres, point, exposant e[+-]chiffres.
pub(crate) fn fin_nombre(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

fn remplacer_mot(mot: &str) -> &str {
    if mot.eq_ignore_ascii_case("log") {
        "log10"
    } else {
        mot
    }
}

/// Insère un mot issu d’un glyphe ; espace de séparation si un voisin est une
/// lettre/chiffre (sinon "πx" deviendrait l’identifiant "pix").
fn pousser_mot(out: &mut String, mot: &str, suivant: Option<char>) {
    if out.chars().last().is_some_and(est_car_mot) {
        out.push(' ');
    }
    out.push_str(mot);
    if suivant.is_some_and(est_car_mot) {
        out.push(' ');
    }
}

fn est_debut_mot(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn est_car_mot(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
