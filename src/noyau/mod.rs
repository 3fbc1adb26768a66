//! Noyau triage
//!
//! Organisation interne :
//! - nombre.rs    : trait Nombre (entiers, flottants, BigInt, BigRational)
//! - operateur.rs : ( ) ^ * / + - : précédence, associativité, application
//! - jetons.rs    : contrôle des parenthèses + espacement + tokenisation
//! - triage.rs    : évaluateur à deux piles (shunting-yard, sans AST)
//! - demarche.rs  : trace des piles (diagnostic)
//! - erreur.rs    : erreurs fatales + diagnostics
//! - options.rs   : mode indulgent/strict, trace, garde-fous
//! - eval.rs      : raccourcis publics

pub mod demarche;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod nombre;
pub mod operateur;
pub mod options;
pub mod triage;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use demarche::{Demarche, Etape};
pub use erreur::{Diagnostic, ErreurCalcul, Parenthese};
pub use eval::{eval_expression, eval_expression_detaillee};
pub use nombre::Nombre;
pub use operateur::{Associativite, Operateur};
pub use options::{Mode, Options};
pub use triage::{Evaluateur, Evaluation};
