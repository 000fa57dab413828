// src/noyau/jetons.rs

use std::fmt;

/// Les six opérateurs binaires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance, // ^
    Modulo,    // %
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Operateur> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            '%' => Some(Operateur::Modulo),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Puissance => '^',
            Operateur::Modulo => '%',
        }
    }

    /// Table fixe : {* / %} = 3, {+ -} = 2, ^ = 4.
    pub fn precedence(self) -> u8 {
        match self {
            Operateur::Plus | Operateur::Moins => 2,
            Operateur::Fois | Operateur::Divise | Operateur::Modulo => 3,
            Operateur::Puissance => 4,
        }
    }

    pub fn est_associatif_droite(self) -> bool {
        matches!(self, Operateur::Puissance)
    }

    /// Signes susceptibles d’être unaires (+/-).
    fn est_signe(self) -> bool {
        matches!(self, Operateur::Plus | Operateur::Moins)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Toujours fini (validé au scan).
    Num(f64),
    Op(Operateur),

    // Variables + fonctions : le parse décidera selon les tables.
    Ident(String),

    LPar,
    RPar,
    Virgule,

    // Texte non classable : le scan ne rejette rien, le parse le signalera.
    Inconnu(String),
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
            Tok::Ident(nom) => f.write_str(nom),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Virgule => f.write_str(","),
            Tok::Inconnu(texte) => f.write_str(texte),
        }
    }
}

/// Jeton multi-caractères en construction.
enum EnCours {
    Rien,
    Nombre { texte: String, decimale: bool },
    Ident(String),
}

/// État du scan.
struct Scan {
    out: Vec<Tok>,
    en_cours: EnCours,
    // Un chiffre ou un groupe fermé a-t-il déjà été vu dans le niveau de
    // parenthèses courant ? Un identifiant ne compte pas : "x*-1" donne "x * 0 - 1".
    operande_vue: bool,
}

impl Scan {
    /// Termine le jeton en construction (s’il y en a un).
    fn finir(&mut self) {
        match std::mem::replace(&mut self.en_cours, EnCours::Rien) {
            EnCours::Rien => {}
            EnCours::Nombre { texte, .. } => {
                let tok = match texte.parse::<f64>() {
                    Ok(v) if v.is_finite() => Tok::Num(v),
                    _ => Tok::Inconnu(texte),
                };
                self.out.push(tok);
            }
            EnCours::Ident(nom) => self.out.push(Tok::Ident(nom)),
        }
    }

    fn seul(&mut self, tok: Tok) {
        self.finir();
        self.out.push(tok);
    }

    fn chiffre(&mut self, c: char) {
        if let EnCours::Nombre { texte, .. } = &mut self.en_cours {
            texte.push(c);
        } else {
            self.finir();
            self.en_cours = EnCours::Nombre {
                texte: c.to_string(),
                decimale: false,
            };
        }
        self.operande_vue = true;
    }

    fn point(&mut self) {
        // un point ne prolonge qu’un nombre qui n’a pas encore de décimale
        if let EnCours::Nombre { texte, decimale } = &mut self.en_cours {
            if !*decimale {
                texte.push('.');
                *decimale = true;
                return;
            }
        }
        self.seul(Tok::Inconnu(".".into()));
    }

    fn lettre(&mut self, c: char) {
        if let EnCours::Ident(nom) = &mut self.en_cours {
            nom.push(c);
        } else {
            self.finir();
            self.en_cours = EnCours::Ident(c.to_string());
        }
    }

    fn operateur(&mut self, op: Operateur) {
        // signe en tête de niveau : "-x" => "0 - x"
        if op.est_signe() && matches!(self.en_cours, EnCours::Rien) && !self.operande_vue {
            self.out.push(Tok::Num(0.0));
            self.operande_vue = true;
        }
        self.seul(Tok::Op(op));
    }
}

/// Tokenize une chaîne en jetons.
/// N’échoue jamais : tout texte se découpe en *une* suite de jetons,
/// les jetons invalides (Inconnu) sont rejetés plus tard par le parse.
/// Supporte:
/// - nombres décimaux (ex: 12, 2.5, 3.)
/// - opérateurs + - * / ^ %
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z]+
/// - moins/plus unaire : un 0 explicite est injecté ("-5+3" => 0 - 5 + 3)
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut scan = Scan {
        out: Vec::new(),
        en_cours: EnCours::Rien,
        operande_vue: false,
    };

    for c in s.chars() {
        if c.is_whitespace() {
            continue;
        }

        if let Some(op) = Operateur::depuis_char(c) {
            scan.operateur(op);
            continue;
        }

        match c {
            '(' => {
                // nouveau niveau : aucune opérande encore
                scan.operande_vue = false;
                scan.seul(Tok::LPar);
            }
            ')' => {
                scan.seul(Tok::RPar);
                // le groupe fermé compte comme opérande du niveau englobant
                scan.operande_vue = true;
            }
            ',' => scan.seul(Tok::Virgule),
            '.' => scan.point(),
            _ if c.is_ascii_digit() => scan.chiffre(c),
            _ if c.is_ascii_alphabetic() => scan.lettre(c),
            _ => scan.seul(Tok::Inconnu(c.to_string())),
        }
    }

    scan.finir();
    scan.out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
