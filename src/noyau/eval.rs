//! Noyau — évaluation (pipeline réel)
//!
//! espaces retirés -> réécriture des signes -> jetons -> RPN (identifiants résolus,
//! fonctions invoquées) -> repli sur pile -> nombre
//!
//! Remarque : les tables de l’appelant ne sont jamais modifiées ; les intégrés
//! sont consultés par référence (voir `Tables`), sans recopie par appel.

use std::sync::Arc;

use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize};
use super::reecriture::reecrire;
use super::registre::{Appelable, Fonctions, Tables, Variables};
use super::rpn::{evaluer_rpn, to_rpn};

/// Trace des étapes intermédiaires, en texte.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub reecrite: String,
    pub jetons: String,
    pub rpn: String,
}

/// Configuration d’une évaluation : variables et fonctions de l’appelant.
#[derive(Default, Clone)]
pub struct Contexte {
    variables: Variables,
    fonctions: Fonctions,
}

impl Contexte {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec_variable(mut self, nom: impl Into<String>, valeur: f64) -> Self {
        self.variables.insert(nom.into(), valeur);
        self
    }

    pub fn avec_fonction(mut self, nom: impl Into<String>, f: impl Appelable + 'static) -> Self {
        self.fonctions.insert(nom.into(), Arc::new(f));
        self
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn fonctions(&self) -> &Fonctions {
        &self.fonctions
    }

    pub fn evaluer(&self, expression: &str) -> Result<f64, ErreurEval> {
        evaluer_avec(expression, &self.variables, &self.fonctions)
    }

    /// Comme `evaluer`, avec la démarche (réécriture, jetons, RPN).
    pub fn evaluer_detaille(&self, expression: &str) -> Result<(f64, Demarche), ErreurEval> {
        let mut demarche = Demarche::default();
        let v = pipeline(
            expression,
            &Tables::new(&self.variables, &self.fonctions),
            Some(&mut demarche),
        )?;
        Ok((v, demarche))
    }
}

/// API publique : évalue une expression sans variables ni fonctions de l’appelant.
pub fn evaluer(expression: &str) -> Result<f64, ErreurEval> {
    evaluer_avec(expression, &Variables::new(), &Fonctions::new())
}

/// API publique : évalue une expression avec les tables de l’appelant
/// (prioritaires sur les intégrés de même nom).
pub fn evaluer_avec(
    expression: &str,
    variables: &Variables,
    fonctions: &Fonctions,
) -> Result<f64, ErreurEval> {
    pipeline(expression, &Tables::new(variables, fonctions), None)
}

fn pipeline(
    expression: &str,
    tables: &Tables<'_>,
    demarche: Option<&mut Demarche>,
) -> Result<f64, ErreurEval> {
    tracing::debug!(expression, "évaluation");

    // 0) Espaces retirés ; "rien" vaut 0
    let s: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return Ok(0.0);
    }

    // 1) Réécriture des signes adjacents
    let s = reecrire(&s);

    // 2) Jetons
    let jetons = tokenize(&s);
    let jetons_txt = format_tokens(&jetons);
    tracing::trace!(jetons = %jetons_txt);

    // 3) RPN
    let rpn = to_rpn(&jetons, tables)?;
    let rpn_txt = format_tokens(&rpn);
    tracing::trace!(rpn = %rpn_txt);

    if let Some(d) = demarche {
        *d = Demarche {
            reecrite: s,
            jetons: jetons_txt,
            rpn: rpn_txt,
        };
    }

    // 4) Repli
    let v = evaluer_rpn(rpn)?;
    tracing::debug!(resultat = v, "évaluation terminée");
    Ok(v)
}
