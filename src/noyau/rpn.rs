// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), identifiants résolus
// - Puis replier la RPN sur une pile de valeurs
//
// Règles:
// - Ident(name):
//    - variable connue => sa valeur part directement en sortie
//    - fonction connue => appel actif, invoqué dès la parenthèse fermante
//    - sinon => VariableIndefinie
// - Arguments de fonction : un jeton par argument (nombre, variable, ou texte brut),
//   séparés par des virgules. Le résultat de l’appel sort comme un nombre.
//
// NOTE:
// - Le moins unaire est déjà réglé par la tokenisation (0 injecté).

use super::erreur::ErreurEval;
use super::jetons::{Operateur, Tok};
use super::registre::{Appelable, Argument, Tables};

/// o2 (sommet de pile) doit-il sortir avant d’empiler o1 ?
fn doit_depiler(o1: Operateur, o2: Operateur) -> bool {
    if o1.est_associatif_droite() {
        o1.precedence() < o2.precedence()
    } else {
        o1.precedence() <= o2.precedence()
    }
}

/// Appel de fonction en cours de collecte.
struct Appel<'a> {
    nom: String,
    fonction: &'a dyn Appelable,
}

fn argument_depuis(tok: &Tok, tables: &Tables<'_>) -> Argument {
    match tok {
        Tok::Num(v) => Argument::Nombre(*v),
        Tok::Ident(nom) => match tables.variable(nom) {
            Some(v) => Argument::Nombre(v),
            None => Argument::Texte(nom.clone()),
        },
        autre => Argument::Texte(autre.to_string()),
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(3), Op(+), Num(4), Op(*), Num(2)]
///   rpn:    [Num(3), Num(4), Num(2), Op(*), Op(+)]
pub fn to_rpn(tokens: &[Tok], tables: &Tables<'_>) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new(); // Op ou LPar seulement

    let mut appel: Option<Appel<'_>> = None;
    let mut attend_argument = false;
    let mut arguments: Vec<Argument> = Vec::new();

    for tok in tokens {
        if attend_argument && !matches!(tok, Tok::RPar) {
            arguments.push(argument_depuis(tok, tables));
            attend_argument = false;
            continue;
        }

        match tok {
            Tok::Num(v) => out.push(Tok::Num(*v)),

            Tok::Ident(nom) => {
                if let Some(v) = tables.variable(nom) {
                    out.push(Tok::Num(v));
                } else if let Some(fonction) = tables.fonction(nom) {
                    appel = Some(Appel {
                        nom: nom.clone(),
                        fonction,
                    });
                } else {
                    return Err(ErreurEval::VariableIndefinie(nom.clone()));
                }
            }

            Tok::Virgule => attend_argument = true,

            Tok::Op(o1) => {
                // une '(' arrête le dépilement
                while let Some(Tok::Op(o2)) = ops.last() {
                    if !doit_depiler(*o1, *o2) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(Tok::Op(*o1));
            }

            Tok::LPar => {
                if appel.is_some() {
                    // parenthèse d’appel : pas de groupe
                    attend_argument = true;
                } else {
                    ops.push(Tok::LPar);
                }
            }

            Tok::RPar => {
                if let Some(Appel { nom, fonction }) = appel.take() {
                    let args = std::mem::take(&mut arguments);
                    tracing::trace!(fonction = %nom, arguments = args.len(), "appel de fonction");
                    out.push(Tok::Num(fonction.appeler(&nom, &args)?));
                    attend_argument = false;
                    continue;
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(ErreurEval::ParenthesesDesequilibrees),
                    }
                }
            }

            Tok::Inconnu(texte) => return Err(ErreurEval::JetonNonReconnu(texte.clone())),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::RPar) {
            return Err(ErreurEval::ParenthesesDesequilibrees);
        }
        out.push(op);
    }

    Ok(out)
}

fn appliquer(op: Operateur, a: f64, b: f64) -> f64 {
    match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        // division par zéro : ±inf ou NaN (IEEE), pas d’erreur
        Operateur::Divise => a / b,
        Operateur::Puissance => a.powf(b),
        // troncature vers zéro d’abord, signe du dividende
        Operateur::Modulo => a.trunc() % b.trunc(),
    }
}

/// Replie une RPN sur une pile de valeurs.
pub fn evaluer_rpn(rpn: Vec<Tok>) -> Result<f64, ErreurEval> {
    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(v) => pile.push(v),

            Tok::Op(op) => {
                let b = pile.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                let a = pile.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                pile.push(appliquer(op, a, b));
            }

            autre => return Err(ErreurEval::OperateurInconnu(autre.to_string())),
        }
    }

    // pile vide (ex: "()") comprise : tout sauf une valeur unique
    match pile.as_slice() {
        [v] => Ok(*v),
        _ => Err(ErreurEval::TropDeValeurs),
    }
}
