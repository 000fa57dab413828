//! Noyau d’évaluation flottante
//!
//! Organisation interne :
//! - erreur.rs     : classes d’erreurs (une variante par cause)
//! - reecriture.rs : réduction des signes adjacents ("+-" => "-", ...)
//! - jetons.rs     : tokenisation (0 injecté devant un signe unaire)
//! - registre.rs   : pi + fonctions intégrées, interface Appelable, tables fusionnées
//! - rpn.rs        : shunting-yard (avec appels de fonction) + repli RPN
//! - eval.rs       : pipeline complet + Contexte

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod reecriture;
pub mod registre;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreur::ErreurEval;
pub use eval::{evaluer, evaluer_avec, Contexte, Demarche};
pub use registre::{
    builtins, fusionner_builtins, Appelable, Argument, Arite, Fonction, Fonctions, Variables,
};
