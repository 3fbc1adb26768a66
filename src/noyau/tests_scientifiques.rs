//! Tests scientifiques (campagne) : invariants + taxonomie des erreurs + types numériques.
//!
//! But : vérifier les propriétés du triage sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Le moins unaire s’applique au prochain opérande (littéral ou groupe) :
//!   "-3 ^ 2" vaut donc (-3)^2 = 9, comme "-(3) ^ 2".
//! - Les entiers tronquent "/" et "^" (passage par f64 pour "^").
//! - Division par zéro : jamais fatale, 0 est substitué et un diagnostic est levé.

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::{Diagnostic, ErreurCalcul, Parenthese};
use super::options::Options;
use super::triage::Evaluateur;
use super::{eval_expression, eval_expression_detaillee};

fn eval_ok(expr: &str) -> i64 {
    eval_expression::<i64>(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_f(expr: &str) -> f64 {
    eval_expression::<f64>(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_eval(expr: &str, attendu: i64) {
    assert_eq!(eval_ok(expr), attendu, "expr={expr:?}");
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de référence ------------------------ */

#[test]
fn sci_proprietes_de_reference() {
    assert_eval("5 + 8 * 10", 85);
    assert_eval("2 ^ 3 ^ 2", 512);
    assert_eval("4(5+3)", 32);
    assert_eval("5 + 8 * -7", -51);
    assert_eval("--5", 5);
    assert_eval("-(3+2)", -5);
    assert_eval("5 / 0", 0);
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence_complete() {
    assert_eval("1 + 2 * 3 ^ 2", 19);
    assert_eval("2 ^ 2 * 3 + 1", 13);
    assert_eval("10 - 4 / 2", 8);
    assert_eval("(10 - 4) / 2", 3);
    assert_eval("2 * (3 + 4) * 5", 70);
}

#[test]
fn sci_associativite_gauche_equivalente_a_parenthesage() {
    for (plat, gauche) in [
        ("20 - 5 - 3 - 2", "((20 - 5) - 3) - 2"),
        ("64 / 4 / 2 / 2", "((64 / 4) / 2) / 2"),
        ("3 * 4 / 2 * 5", "((3 * 4) / 2) * 5"),
        ("9 - 3 + 2 - 1", "((9 - 3) + 2) - 1"),
    ] {
        assert_eq!(eval_ok(plat), eval_ok(gauche), "{plat:?} vs {gauche:?}");
    }
}

#[test]
fn sci_puissance_droite() {
    assert_eq!(eval_f("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval_f("(2 ^ 3) ^ 2"), 64.0);
    assert_eq!(eval_f("2 ^ 1 ^ 3 ^ 2"), 2.0);
    assert_eq!(eval_f("4 ^ -1"), 0.25);
}

/* ------------------------ Signes ------------------------ */

#[test]
fn sci_signes() {
    assert_eval("-5", -5);
    assert_eval("- 5 + 3", -2);
    assert_eval("-3 ^ 2", 9);
    assert_eval("-(3) ^ 2", 9);
    assert_eval("2 - -(-1)", 1);
    assert_eval("(-(-(4)))", 4);
    assert_eval("-2(3)", -6);
    assert_eval("-(2)(3)", -6);
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn sci_multiplication_implicite() {
    assert_eval("2(3)(4)", 24);
    assert_eval("(1+1)(2+2)", 8);
    assert_eval("3(2 + 1) ^ 2", 27);
    assert_eval("10 - 2(3)", 4);
}

/* ------------------------ Espacement ------------------------ */

#[test]
fn sci_espacement_indifferent() {
    let variantes = ["5+8*10", " 5 + 8 * 10 ", "5+ 8 *10", "\t5\n+8 * 10"];
    for v in variantes {
        assert_eval(v, 85);
    }
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn sci_parentheses_manquantes() {
    for (expr, cote) in [
        ("(5 + 3", Parenthese::Fermante),
        ("((1)", Parenthese::Fermante),
        ("5 + 3)", Parenthese::Ouvrante),
        ("(1))", Parenthese::Ouvrante),
    ] {
        match eval_expression::<i64>(expr) {
            Err(ErreurCalcul::ParenthesesDesequilibrees { manquante, .. }) => {
                assert_eq!(manquante, cote, "expr={expr:?}")
            }
            autre => panic!("expr={expr:?} : attendu parenthèses déséquilibrées, vu {autre:?}"),
        }
    }
}

#[test]
fn sci_division_par_zero_jamais_fatale() {
    for expr in ["5 / 0", "1 / (3 - 3)", "0 / 0", "2 * (7 / 0) + 4"] {
        let r = eval_expression_detaillee::<i64>(expr, Options::default())
            .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert!(r.division_par_zero(), "expr={expr:?}");
    }
    assert_eval("2 * (7 / 0) + 4", 4);

    let r = eval_expression_detaillee::<f64>("1/0 + 1/0", Options::default()).unwrap();
    assert_eq!(r.valeur, 0.0);
    assert_eq!(
        r.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::DivisionParZero { .. }))
            .count(),
        2
    );
}

#[test]
fn sci_litteraux_non_supportes() {
    for expr in ["1e5", "1,000 + 1", "x + 1", "sqrt(4)", "inf"] {
        assert!(
            matches!(
                eval_expression::<f64>(expr),
                Err(ErreurCalcul::SymboleInconnu(_))
            ),
            "expr={expr:?}"
        );
    }
}

#[test]
fn sci_indulgent_vs_strict() {
    let expr = "* 5 + / 3";
    let indulgent = eval_expression_detaillee::<i64>(expr, Options::default()).unwrap();
    assert_eq!(indulgent.valeur, 8);
    assert_eq!(indulgent.diagnostics.len(), 2);

    let strict = eval_expression_detaillee::<i64>(expr, Options::strict());
    assert_eq!(
        strict,
        Err(ErreurCalcul::OperateurInattendu {
            operateur: '*',
            position: 0
        })
    );
}

/* ------------------------ Types numériques ------------------------ */

#[test]
fn sci_types_entiers_etroits() {
    assert_eq!(eval_expression::<i8>("100 + 27"), Ok(127));
    assert!(matches!(
        eval_expression::<i8>("100 + 28"),
        Err(ErreurCalcul::Depassement { .. })
    ));
    assert_eq!(eval_expression::<i128>("2 ^ 100 / 2 ^ 99"), Ok(2));
}

#[test]
fn sci_rationnels_exacts() {
    let ev = Evaluateur::<BigRational>::new();
    assert_eq!(ev.compute("1 / 3 + 1 / 6"), Ok(rat(1, 2)));
    assert_eq!(ev.compute("(2 / 3) ^ 3"), Ok(rat(8, 27)));
    assert_eq!(ev.compute("2 ^ -2"), Ok(rat(1, 4)));
    assert_eq!(ev.compute("-1.25 * 4"), Ok(rat(-5, 1)));
    assert_eq!(ev.compute("5 / 0"), Ok(rat(0, 1)));
}

#[test]
fn sci_grands_entiers() {
    let ev = Evaluateur::<BigInt>::new();
    let attendu = BigInt::parse_bytes(b"1000000000000000000000000000000", 10).unwrap();
    assert_eq!(ev.compute("10 ^ 30"), Ok(attendu));
    assert_eq!(ev.compute("-7 / 2"), Ok(BigInt::from(-3)));
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let n = 500;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eval(&expr, 1);
    budget(t0, max);

    let expr = format!("{}1{}", "-(".repeat(n), ")".repeat(n));
    // n négations paires => positif
    assert_eval(&expr, 1);
    budget(t0, max);
}

#[test]
fn sci_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let expr = vec!["1"; 2000].join(" + ");
    assert_eval(&expr, 2000);

    let expr = vec!["2"; 30].join(" * ");
    assert_eval(&expr, 1 << 30);

    budget(t0, max);
}

#[test]
fn sci_puissances_enchainees_bornees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let grands = Evaluateur::<BigInt>::new();
    for expr in ["(10 ^ 4096) ^ 4096", "((10 ^ 4096) ^ 4096) ^ 4096", "(10 ^ 4096) ^ 512"] {
        assert!(
            matches!(grands.compute(expr), Err(ErreurCalcul::Depassement { operateur: '^', .. })),
            "expr={expr:?}"
        );
        budget(t0, max);
    }

    let exacts = Evaluateur::<BigRational>::new();
    assert!(matches!(
        exacts.compute("(10 ^ 4096) ^ 4096"),
        Err(ErreurCalcul::Depassement { operateur: '^', .. })
    ));
    budget(t0, max);

    // sous la borne : toujours exact
    let attendu = BigInt::from(2).pow(4096);
    assert_eq!(grands.compute("(2 ^ 64) ^ 64"), Ok(attendu));
    budget(t0, max);
}
