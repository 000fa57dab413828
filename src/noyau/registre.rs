// src/noyau/registre.rs
//
// Constantes et fonctions intégrées + interface d’appel.
// - Table fixe, construite une seule fois pour tout le processus (OnceLock).
// - Fusion par référence dans les tables de l’appelant (voir Tables) :
//   un nom fourni par l’appelant masque toujours l’intégré du même nom.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::erreur::ErreurEval;

pub type Variables = HashMap<String, f64>;
pub type Fonctions = HashMap<String, Arc<dyn Appelable>>;

/// Argument reçu par une fonction : nombre résolu, ou texte littéral résiduel.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Nombre(f64),
    Texte(String),
}

impl Argument {
    pub fn en_nombre(&self) -> Result<f64, ErreurEval> {
        match self {
            Argument::Nombre(v) => Ok(*v),
            Argument::Texte(t) => Err(ErreurEval::MauvaisTypeArgument(t.clone())),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Nombre(v) => write!(f, "{v}"),
            Argument::Texte(t) => f.write_str(t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Exacte(usize),
    /// Aucun contrôle du nombre d’arguments.
    Libre,
}

/// Tout ce qui peut être appelé depuis une expression.
pub trait Appelable: Send + Sync {
    fn arite(&self) -> Arite;

    /// Calcul brut (arité déjà vérifiée par `appeler`).
    fn calculer(&self, args: &[Argument]) -> Result<f64, ErreurEval>;

    /// Vérifie l’arité déclarée puis calcule.
    fn appeler(&self, nom: &str, args: &[Argument]) -> Result<f64, ErreurEval> {
        if let Arite::Exacte(attendu) = self.arite() {
            verifier_arite(nom, attendu, args)?;
        }
        self.calculer(args)
    }
}

fn verifier_arite(nom: &str, attendu: usize, args: &[Argument]) -> Result<(), ErreurEval> {
    if args.len() != attendu {
        return Err(ErreurEval::MauvaiseArite {
            fonction: nom.to_string(),
            attendu,
            recu: args.len(),
        });
    }
    Ok(())
}

/* ------------------------ Fonctions de l’appelant ------------------------ */

/// Fonction fournie par l’appelant (closure).
pub struct Fonction<F> {
    arite: Arite,
    f: F,
}

impl<F> Fonction<F> {
    /// Accepte n’importe quelle liste d’arguments.
    pub fn libre(f: F) -> Self
    where
        F: Fn(&[Argument]) -> Result<f64, ErreurEval> + Send + Sync,
    {
        Self {
            arite: Arite::Libre,
            f,
        }
    }

    /// Exige exactement `n` arguments (MauvaiseArite sinon).
    pub fn avec_arite(n: usize, f: F) -> Self
    where
        F: Fn(&[Argument]) -> Result<f64, ErreurEval> + Send + Sync,
    {
        Self {
            arite: Arite::Exacte(n),
            f,
        }
    }
}

impl<F> Appelable for Fonction<F>
where
    F: Fn(&[Argument]) -> Result<f64, ErreurEval> + Send + Sync,
{
    fn arite(&self) -> Arite {
        self.arite
    }

    fn calculer(&self, args: &[Argument]) -> Result<f64, ErreurEval> {
        (self.f)(args)
    }
}

/* ------------------------ Intégrés ------------------------ */

#[derive(Clone, Copy)]
enum Calcul {
    Unaire(fn(f64) -> f64),
    Binaire(fn(f64, f64) -> f64),
}

struct Integree {
    nom: &'static str,
    calcul: Calcul,
}

impl Appelable for Integree {
    fn arite(&self) -> Arite {
        match self.calcul {
            Calcul::Unaire(_) => Arite::Exacte(1),
            Calcul::Binaire(_) => Arite::Exacte(2),
        }
    }

    fn calculer(&self, args: &[Argument]) -> Result<f64, ErreurEval> {
        let x = args
            .iter()
            .map(Argument::en_nombre)
            .collect::<Result<Vec<f64>, _>>()?;

        match (self.calcul, x.as_slice()) {
            (Calcul::Unaire(f), [a]) => Ok(f(*a)),
            (Calcul::Binaire(f), [a, b]) => Ok(f(*a, *b)),
            // appel direct de calculer() sans passer par appeler()
            (Calcul::Unaire(_), _) => Err(arite_fausse(self.nom, 1, x.len())),
            (Calcul::Binaire(_), _) => Err(arite_fausse(self.nom, 2, x.len())),
        }
    }
}

fn arite_fausse(nom: &str, attendu: usize, recu: usize) -> ErreurEval {
    ErreurEval::MauvaiseArite {
        fonction: nom.to_string(),
        attendu,
        recu,
    }
}

/// Déclare des intégrées unaires à partir des méthodes de f64 du même nom.
macro_rules! unaires {
    ($($nom:ident),* $(,)?) => {
        [$(Integree {
            nom: stringify!($nom),
            calcul: Calcul::Unaire(f64::$nom),
        }),*]
    };
}

pub struct Registre {
    constantes: HashMap<&'static str, f64>,
    fonctions: HashMap<&'static str, Arc<dyn Appelable>>,
}

impl Registre {
    fn construire() -> Self {
        let constantes = HashMap::from([("pi", std::f64::consts::PI)]);

        let mut fonctions: HashMap<&'static str, Arc<dyn Appelable>> = HashMap::new();
        let unaires = unaires!(
            abs, sqrt, cbrt, sin, cos, tan, asin, acos, atan, floor, ceil, trunc, round,
        );
        for f in unaires {
            fonctions.insert(f.nom, Arc::new(f));
        }
        fonctions.insert(
            "hypot",
            Arc::new(Integree {
                nom: "hypot",
                calcul: Calcul::Binaire(f64::hypot),
            }),
        );

        Self {
            constantes,
            fonctions,
        }
    }

    pub fn constante(&self, nom: &str) -> Option<f64> {
        self.constantes.get(nom).copied()
    }

    pub fn fonction(&self, nom: &str) -> Option<&dyn Appelable> {
        self.fonctions.get(nom).map(|f| &**f)
    }

    pub fn noms_fonctions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fonctions.keys().copied()
    }
}

static REGISTRE: OnceLock<Registre> = OnceLock::new();

/// Registre des intégrés (construit au premier accès).
pub fn builtins() -> &'static Registre {
    REGISTRE.get_or_init(Registre::construire)
}

/// Copie les intégrés dans les tables de l’appelant, sans écraser ses entrées.
pub fn fusionner_builtins(variables: &mut Variables, fonctions: &mut Fonctions) {
    let reg = builtins();

    for (nom, valeur) in &reg.constantes {
        variables.entry((*nom).to_string()).or_insert(*valeur);
    }
    for (nom, f) in &reg.fonctions {
        fonctions
            .entry((*nom).to_string())
            .or_insert_with(|| Arc::clone(f));
    }
}

/// Vue fusionnée (par référence) : tables de l’appelant d’abord, puis intégrés.
#[derive(Clone, Copy)]
pub struct Tables<'a> {
    variables: &'a Variables,
    fonctions: &'a Fonctions,
}

impl<'a> Tables<'a> {
    pub fn new(variables: &'a Variables, fonctions: &'a Fonctions) -> Self {
        Self {
            variables,
            fonctions,
        }
    }

    pub fn variable(&self, nom: &str) -> Option<f64> {
        self.variables
            .get(nom)
            .copied()
            .or_else(|| builtins().constante(nom))
    }

    pub fn fonction(&self, nom: &str) -> Option<&'a dyn Appelable> {
        let fonctions: &'a Fonctions = self.fonctions;
        match fonctions.get(nom) {
            Some(f) => Some(&**f),
            None => builtins().fonction(nom),
        }
    }
}
