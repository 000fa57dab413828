//! Tests scientifiques (campagne) : comportement observable du pipeline complet.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Flottants IEEE : sin(pi) vaut ~1e-16, pas 0. Les fonctions trig sont donc
//!   comparées à une tolérance près.
//! - Un argument de fonction est un seul jeton : "abs(-3)" passe parce que le
//!   0 injecté devient l’argument et que "- 3" reste dans l’expression englobante.

use super::{evaluer, evaluer_avec, Argument, Contexte, ErreurEval, Fonction, Fonctions, Variables};

fn ok(expr: &str) -> f64 {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = ok(expr);
    assert!(
        (v - attendu).abs() < 1e-12,
        "expr={expr:?} obtenu={v} attendu={attendu}"
    );
}

fn avec_var(expr: &str, nom: &str, valeur: f64) -> f64 {
    let vars = Variables::from([(nom.to_string(), valeur)]);
    evaluer_avec(expr, &vars, &Fonctions::new())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/* ------------------------ Bases ------------------------ */

#[test]
fn sci_bases() {
    assert_eq!(ok(""), 0.0);
    assert_eq!(ok("     "), 0.0);
    assert_eq!(ok("2"), 2.0);
    assert_eq!(ok("2.5"), 2.5);
    assert_eq!(ok("2.5*2 + 1.75"), 6.75);
}

#[test]
fn sci_operateurs() {
    assert_eq!(ok("2 + 3"), 5.0);
    assert_eq!(ok("2 - 5"), -3.0);
    assert_eq!(ok("2*2"), 4.0);
    assert_eq!(ok("2/4"), 0.5);
    assert_eq!(ok("2^3"), 8.0);
    assert_eq!(ok("5%2"), 1.0);
}

#[test]
fn sci_precedence_et_associativite() {
    assert_eq!(ok("3 + 4*2 + 6"), 17.0);
    assert_eq!(ok("2^3^2"), 512.0);
    assert_eq!(ok("(2^3)^2"), 64.0);
    assert_eq!(ok("8-3-2"), 3.0);
    assert_eq!(ok("16/4/2"), 2.0);
    assert_eq!(ok("2*3^2"), 18.0);
    assert_eq!(ok("7%4*2"), 6.0);
}

/* ------------------------ Unaires ------------------------ */

#[test]
fn sci_moins_unaire() {
    assert_eq!(ok("-1 + 3"), 2.0);
    assert_eq!(ok("((-5+3) * 8)"), -16.0);
    assert_eq!(ok("-(3*2)"), -6.0);
    assert_eq!(ok("((-5+3) * (-8 + (-3 + 1)))"), 20.0);
}

#[test]
fn sci_plus_unaire() {
    assert_eq!(ok("+1 + 3"), 4.0);
    assert_eq!(ok("((+5+3) * 8)"), 64.0);
    assert_eq!(ok("+(3*2)"), 6.0);
    assert_eq!(ok("((+5+3) * (+8 + (+3 + 1)))"), 96.0);
}

#[test]
fn sci_signes_adjacents_au_milieu() {
    assert_eq!(ok("1 + - 3"), -2.0);
    assert_eq!(ok("1 - + 3"), -2.0);
    assert_eq!(ok("1 - - 3"), 4.0);
    assert_eq!(ok("1 + + 3"), 4.0);
}

#[test]
fn sci_signes_adjacents_en_tete() {
    assert_eq!(ok("+- 3"), -3.0);
    assert_eq!(ok("-+ 3"), -3.0);
    assert_eq!(ok("-- 3"), 3.0);
    assert_eq!(ok("++ 3"), 3.0);
    assert_eq!(ok("++(3-2)"), 1.0);
    assert_eq!(ok("+-(3-2)"), -1.0);
}

#[test]
fn sci_groupe_ferme_puis_signe() {
    assert_eq!(avec_var("(x)-1", "x", 4.0), 3.0);
    assert_eq!(ok("sqrt(9)-1"), 2.0);
}

/* ------------------------ Parenthèses ------------------------ */

#[test]
fn sci_parentheses_vides_tolerees() {
    assert_eq!(ok("((3*(2-(3))*4()))()"), -12.0);
}

#[test]
fn sci_parentheses_desequilibrees() {
    assert_eq!(evaluer("(3+4"), Err(ErreurEval::ParenthesesDesequilibrees));
    assert_eq!(evaluer("3+4)"), Err(ErreurEval::ParenthesesDesequilibrees));
    assert_eq!(evaluer("((1)"), Err(ErreurEval::ParenthesesDesequilibrees));
}

/* ------------------------ Variables ------------------------ */

#[test]
fn sci_variables() {
    assert_eq!(avec_var("myvar", "myvar", 2.0), 2.0);
    assert_eq!(avec_var("3 + myvar*3 - 2", "myvar", 5.0), 16.0);
    assert_eq!(
        evaluer("3+unknownvar"),
        Err(ErreurEval::VariableIndefinie("unknownvar".into()))
    );
}

/* ------------------------ Arithmétique IEEE ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert_eq!(ok("1/0"), f64::INFINITY);
    assert_eq!(ok("-1/0"), f64::NEG_INFINITY);
    assert!(ok("0/0").is_nan());
}

#[test]
fn sci_modulo_tronque() {
    assert_eq!(ok("5.9 % 2.1"), 1.0);
    // signe du dividende
    assert_eq!(ok("(0-7) % 2"), -1.0);
    assert_eq!(ok("7 % (0-2)"), 1.0);
    assert!(ok("3 % 0.5").is_nan());
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn sci_fonction_sans_argument() {
    let ctx = Contexte::new().avec_fonction("function", Fonction::libre(|_: &[Argument]| Ok(1.0)));
    assert_eq!(ctx.evaluer("function()"), Ok(1.0));
}

#[test]
fn sci_pi() {
    assert_eq!((ok("pi") * 100.0).round() / 100.0, 3.14);
}

#[test]
fn sci_integrees() {
    assert_eq!(ok("abs(-3)"), 3.0);
    assert_proche("sqrt(2)", std::f64::consts::SQRT_2);
    assert_proche("cbrt(27)", 3.0);
    assert_proche("sin(pi)", 0.0);
    assert_proche("cos(pi)", -1.0);
    assert_proche("tan(pi)", 0.0);
    assert_eq!(ok("asin(0)"), 0.0);
    assert_eq!(ok("acos(1)"), 0.0);
    assert_eq!(ok("atan(0)"), 0.0);
    assert_eq!(ok("floor(1.2)"), 1.0);
    assert_eq!(ok("ceil(1.8)"), 2.0);
    assert_eq!(ok("trunc(2.7)"), 2.0);
    assert_eq!(ok("round(2.6)"), 3.0);
    assert_eq!(ok("hypot(3, 4)"), 5.0);
}

#[test]
fn sci_integrees_dans_expression() {
    assert_eq!(ok("1 + hypot(3,4)*2"), 11.0);
    assert_eq!(ok("floor(2.5)^2"), 4.0);
}

#[test]
fn sci_arite_et_type() {
    assert_eq!(
        evaluer("hypot(3)"),
        Err(ErreurEval::MauvaiseArite {
            fonction: "hypot".into(),
            attendu: 2,
            recu: 1,
        })
    );
    assert_eq!(
        evaluer("sqrt(4,9)"),
        Err(ErreurEval::MauvaiseArite {
            fonction: "sqrt".into(),
            attendu: 1,
            recu: 2,
        })
    );
    assert_eq!(
        evaluer("sqrt(nope)"),
        Err(ErreurEval::MauvaisTypeArgument("nope".into()))
    );
}

#[test]
fn sci_jetons_non_reconnus() {
    assert_eq!(
        evaluer("3 $ 4"),
        Err(ErreurEval::JetonNonReconnu("$".into()))
    );
    assert_eq!(evaluer(".5"), Err(ErreurEval::JetonNonReconnu(".".into())));
}
