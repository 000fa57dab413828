// src/noyau/erreur.rs
//
// Erreurs du noyau : une variante par cause, détectées au plus tôt et
// propagées telles quelles jusqu’à l’appelant (pas de reprise interne).

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErreurEval {
    /// Jeton impossible à classer (ex: "." isolé, caractère hors alphabet).
    #[error("jeton non reconnu: \"{0}\"")]
    JetonNonReconnu(String),

    /// Identifiant absent des tables de variables et de fonctions.
    #[error("variable indéfinie: \"{0}\"")]
    VariableIndefinie(String),

    #[error("parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    /// Opérateur sans ses deux opérandes.
    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("opérateur inconnu: \"{0}\"")]
    OperateurInconnu(String),

    #[error("trop de valeurs en entrée")]
    TropDeValeurs,

    #[error("la fonction {fonction} attend {attendu} argument(s), reçu {recu}")]
    MauvaiseArite {
        fonction: String,
        attendu: usize,
        recu: usize,
    },

    #[error("argument de fonction de mauvais type: {0}")]
    MauvaisTypeArgument(String),
}
