//! Calculatrice triage — évaluation d’expressions infixes par gare de triage
//! (shunting-yard) à deux piles, sans arbre syntaxique.
//!
//! ```
//! use calculatrice_triage::{eval_expression, Evaluateur};
//!
//! assert_eq!(eval_expression::<i64>("5 + 8 * 10").unwrap(), 85);
//! assert_eq!(Evaluateur::<f64>::new().compute("4(5+3)").unwrap(), 32.0);
//! ```

pub mod noyau;

pub use noyau::{
    eval_expression, eval_expression_detaillee, Associativite, Demarche, Diagnostic, ErreurCalcul,
    Etape, Evaluateur, Evaluation, Mode, Nombre, Operateur, Options, Parenthese,
};
