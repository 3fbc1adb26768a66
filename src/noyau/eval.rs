//! Noyau — évaluation (API publique minimale)
//!
//! parenthèses -> espacement -> jetons -> triage à deux piles -> valeur
//!
//! Raccourcis pour l’appelant qui n’a pas besoin de garder un `Evaluateur`.

use super::erreur::ErreurCalcul;
use super::nombre::Nombre;
use super::options::Options;
use super::triage::{Evaluateur, Evaluation};

/// Évalue une expression avec les options par défaut (mode indulgent, sans démarche).
pub fn eval_expression<T: Nombre>(expr_str: &str) -> Result<T, ErreurCalcul> {
    Evaluateur::<T>::new().compute(expr_str)
}

/// Évalue une expression et retourne aussi les diagnostics et la démarche (si demandée).
pub fn eval_expression_detaillee<T: Nombre>(
    expr_str: &str,
    options: Options,
) -> Result<Evaluation<T>, ErreurCalcul> {
    Evaluateur::<T>::avec_options(options).evaluer(expr_str)
}
