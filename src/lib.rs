// src/lib.rs
//
// Calcul RPN — évaluateur d’expressions arithmétiques embarquable
// ----------------------------------------------------------------
// But:
// - texte -> nombre (f64), ou erreur classée (ErreurEval)
// - opérateurs + - * / ^ %, parenthèses, variables et fonctions de l’appelant
// - intégrés : pi, abs, sqrt, cbrt, sin, cos, tan, asin, acos, atan,
//              floor, ceil, trunc, round, hypot
//
// Pas d’E/S, pas d’état global mutable : une évaluation ne fait que lire ses tables.

//! Évaluateur d’expressions arithmétiques (shunting-yard + RPN).
//!
//! ```
//! use calcul_rpn::{evaluer, Contexte, ErreurEval};
//!
//! assert_eq!(evaluer("3 + 4*2 + 6"), Ok(17.0));
//! assert_eq!(evaluer("2^3^2"), Ok(512.0));
//!
//! let ctx = Contexte::new().avec_variable("myvar", 5.0);
//! assert_eq!(ctx.evaluer("3 + myvar*3 - 2"), Ok(16.0));
//!
//! assert_eq!(evaluer("(3+4"), Err(ErreurEval::ParenthesesDesequilibrees));
//! ```

pub mod noyau;

pub use noyau::{
    evaluer, evaluer_avec, fusionner_builtins, Appelable, Argument, Arite, Contexte, Demarche,
    ErreurEval, Fonction, Fonctions, Variables,
};
