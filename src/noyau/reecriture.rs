// src/noyau/reecriture.rs
//
// Réécriture des signes adjacents, avant tokenisation.
// Arithmétique des signes : "+-" => "-", "-+" => "-", "++" => "+", "--" => "+".
//
// NOTE:
// - Une seule passe, dans cet ordre (l’ordre compte).
// - Chaque remplacement est global, gauche -> droite, sans chevauchement.
// - Les suites de 3 signes ou plus peuvent survivre ("---3" => "+-3").

/// Paires de signes et leur réduction, dans l’ordre d’application.
const PAIRES: [(&str, &str); 4] = [("+-", "-"), ("-+", "-"), ("++", "+"), ("--", "+")];

/// Réduit les paires de signes adjacents en un seul signe effectif.
pub fn reecrire(expression: &str) -> String {
    PAIRES
        .iter()
        .fold(expression.to_string(), |acc, &(motif, signe)| {
            acc.replace(motif, signe)
        })
}
