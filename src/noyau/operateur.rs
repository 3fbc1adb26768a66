// src/noyau/operateur.rs
//
// Opérateurs : ( ) ^ * / + -
//
// Règles (fixes, dérivées de l’identité seule):
// - précédence : parenthèses 0, + - 1, * / 2, ^ 3
// - associativité : gauche partout, sauf ^ (droite)
// - les parenthèses ne s’appliquent jamais (marqueurs de portée sur la pile)

use std::fmt;

use super::erreur::ErreurCalcul;
use super::nombre::Nombre;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    ParOuvrante,
    ParFermante,
    Puissance,
    Fois,
    Divise,
    Plus,
    Moins,
}

/// Issue d’une application : le quotient d’une division par zéro est remplacé par 0.
#[derive(Clone, Debug, PartialEq)]
pub enum Issue<T> {
    Valeur(T),
    DivisionParZero(T),
}

impl<T> Issue<T> {
    pub fn valeur(self) -> T {
        match self {
            Issue::Valeur(v) | Issue::DivisionParZero(v) => v,
        }
    }
}

impl Operateur {
    /// Tous les symboles reconnus (sert aussi à l’espacement des jetons).
    pub const SYMBOLES: [char; 7] = ['^', '(', ')', '*', '/', '+', '-'];

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '(' => Some(Operateur::ParOuvrante),
            ')' => Some(Operateur::ParFermante),
            '^' => Some(Operateur::Puissance),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            _ => None,
        }
    }

    /// Construit depuis un jeton d’un seul caractère.
    pub fn depuis_jeton(jeton: &str) -> Result<Self, ErreurCalcul> {
        let mut chars = jeton.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_symbol(c).ok_or_else(|| ErreurCalcul::SymboleInconnu(jeton.to_string()))
            }
            _ => Err(ErreurCalcul::SymboleInconnu(jeton.to_string())),
        }
    }

    pub fn symbole(&self) -> char {
        match self {
            Operateur::ParOuvrante => '(',
            Operateur::ParFermante => ')',
            Operateur::Puissance => '^',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Plus => '+',
            Operateur::Moins => '-',
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Operateur::ParOuvrante | Operateur::ParFermante => 0,
            Operateur::Plus | Operateur::Moins => 1,
            Operateur::Fois | Operateur::Divise => 2,
            Operateur::Puissance => 3,
        }
    }

    pub fn associativite(&self) -> Associativite {
        match self {
            Operateur::Puissance => Associativite::Droite,
            _ => Associativite::Gauche,
        }
    }

    pub fn is_open_brace(&self) -> bool {
        matches!(self, Operateur::ParOuvrante)
    }

    pub fn is_close_brace(&self) -> bool {
        matches!(self, Operateur::ParFermante)
    }

    pub fn is_minus(&self) -> bool {
        matches!(self, Operateur::Moins)
    }

    /// `self` (sommet de pile) doit être réduit avant d’empiler `entrant`.
    ///
    /// - précédences différentes : le sommet passe d’abord s’il lie plus fort
    /// - précédences égales : seulement si associatif à gauche
    ///   (5-3-2 => (5-3)-2 ; 2^3^2 => 2^(3^2))
    ///
    /// Une parenthèse ouvrante (0) n’est jamais réduite par un opérateur entrant.
    pub fn precede(&self, entrant: &Operateur) -> bool {
        if self.precedence() == entrant.precedence() {
            self.associativite() == Associativite::Gauche
        } else {
            entrant.precedence() < self.precedence()
        }
    }

    /// Applique l’opérateur : `first <op> second`.
    ///
    /// Panique sur une parenthèse : le moteur ne doit jamais en dépiler une
    /// pour l’appliquer.
    pub fn appliquer<T: Nombre>(&self, first: &T, second: &T) -> Result<Issue<T>, ErreurCalcul> {
        let v = match self {
            Operateur::Puissance => first.puissance(second),
            Operateur::Fois => first.multiplier(second),
            Operateur::Divise => {
                if second.is_zero() {
                    return Ok(Issue::DivisionParZero(T::zero()));
                }
                first.diviser(second)
            }
            Operateur::Plus => first.ajouter(second),
            Operateur::Moins => first.soustraire(second),
            Operateur::ParOuvrante | Operateur::ParFermante => {
                unreachable!("parenthèse appliquée comme opérateur arithmétique")
            }
        };

        v.map(Issue::Valeur).ok_or_else(|| ErreurCalcul::Depassement {
            gauche: first.to_string(),
            operateur: self.symbole(),
            droite: second.to_string(),
        })
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}
