// src/noyau/jetons.rs
//
// Jetons : contrôle des parenthèses, espacement, découpage, classement.
//
// L’espacement garantit que chaque opérateur/parenthèse devient son propre jeton ;
// les chiffres ne sont pas touchés, donc un littéral multi-caractères reste entier.

use super::erreur::{ErreurCalcul, Parenthese};
use super::nombre::Nombre;
use super::operateur::Operateur;

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton<T> {
    Nombre(T),
    Op(Operateur),
}

/// Compte `(` et `)` ; refuse si les comptes diffèrent (avant tout découpage).
pub fn verifier_parentheses(s: &str) -> Result<(), ErreurCalcul> {
    let ouvrantes = s.matches('(').count();
    let fermantes = s.matches(')').count();

    if ouvrantes == fermantes {
        return Ok(());
    }

    let manquante = if ouvrantes < fermantes {
        Parenthese::Ouvrante
    } else {
        Parenthese::Fermante
    };
    Err(ErreurCalcul::ParenthesesDesequilibrees {
        manquante,
        ouvrantes,
        fermantes,
    })
}

/// Entoure chaque symbole d’opérateur d’espaces : "4(5+3)" -> "4 ( 5 + 3 )" (espaces multiples).
pub fn espacer_operateurs(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if Operateur::SYMBOLES.contains(&c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Découpe sur les blancs ; les jetons vides disparaissent.
pub fn tokenize(espacee: &str) -> Vec<&str> {
    espacee.split_whitespace().collect()
}

/// Nombre d’abord (échec attendu pour chaque opérateur), sinon opérateur.
pub fn classer<T: Nombre>(jeton: &str) -> Result<Jeton<T>, ErreurCalcul> {
    match T::parse_litteral(jeton) {
        Some(v) => Ok(Jeton::Nombre(v)),
        None => Operateur::depuis_jeton(jeton).map(Jeton::Op),
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(jetons: &[&str]) -> String {
    jetons.join(" ")
}
