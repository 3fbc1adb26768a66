//! Erreurs (fatales) et diagnostics (non fatals) du noyau.
//!
//! - `ErreurCalcul` : l’évaluation s’arrête, aucune valeur n’est rendue.
//! - `Diagnostic`   : l’évaluation continue, la condition est seulement signalée
//!   (division par zéro -> 0, opérateur ignoré en mode indulgent).

use std::fmt;

/// Côté de parenthèse manquant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parenthese {
    Ouvrante,
    Fermante,
}

impl fmt::Display for Parenthese {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parenthese::Ouvrante => f.write_str("ouvrante"),
            Parenthese::Fermante => f.write_str("fermante"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalcul {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("entrée trop longue : {longueur} octets (max {max})")]
    EntreeTropLongue { longueur: usize, max: usize },

    /// Détectée avant toute tokenisation.
    #[error(
        "parenthèse {manquante} manquante ({ouvrantes} ouvrante(s), {fermantes} fermante(s))"
    )]
    ParenthesesDesequilibrees {
        manquante: Parenthese,
        ouvrantes: usize,
        fermantes: usize,
    },

    /// Comptes égaux mais ordre invalide, ex: ")(".
    #[error("parenthèse fermante sans ouvrante (jeton {position})")]
    ParentheseOrpheline { position: usize },

    /// Ni nombre, ni opérateur reconnu.
    #[error("symbole inconnu : '{0}'")]
    SymboleInconnu(String),

    /// Mode strict seulement : opérateur là où une valeur était attendue.
    #[error("opérateur inattendu '{operateur}' (jeton {position}) : une valeur était attendue")]
    OperateurInattendu { operateur: char, position: usize },

    #[error("opérandes manquantes pour '{operateur}'")]
    OperandesManquantes { operateur: char },

    /// La pile de nombres ne contient pas exactement une valeur à la fin.
    #[error("expression invalide : {restants} valeur(s) restante(s) au lieu d’une")]
    ResultatAmbigu { restants: usize },

    #[error("dépassement numérique : {gauche} {operateur} {droite}")]
    Depassement {
        gauche: String,
        operateur: char,
        droite: String,
    },
}

/// Condition signalée sans interrompre l’évaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// `gauche / 0` : 0 est déposé sur la pile à la place du quotient.
    DivisionParZero { gauche: String },

    /// Mode indulgent : opérateur ignoré (pas de valeur avant lui).
    OperateurIgnore { operateur: char, position: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DivisionParZero { gauche } => write!(
                f,
                "division par zéro ({gauche} / 0) : aucune réponse valide, 0 utilisé"
            ),
            Diagnostic::OperateurIgnore {
                operateur,
                position,
            } => write!(
                f,
                "opérateur '{operateur}' ignoré (jeton {position}) : aucune valeur avant lui"
            ),
        }
    }
}
