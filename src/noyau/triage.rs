// src/noyau/triage.rs
//
// Gare de triage (shunting-yard) à deux piles, évaluation directe (pas d’AST).
//
// Pipeline d’un appel:
//   contrôle parenthèses -> espacement -> jetons -> réductions -> vidage final
//
// Règles:
// - `prev_was_value` : le jeton précédent est une valeur complète
//   (nombre ou groupe fermé). Sert au moins unaire et à la multiplication implicite.
// - Moins unaire : bascule un drapeau de négation (deux moins s’annulent),
//   appliqué au prochain opérande : un littéral, ou un groupe entre parenthèses.
// - "4(" : un `*` implicite est empilé avant la parenthèse ouvrante.
// - État d’un appel (piles + drapeaux) = `Passe`, créée neuve à chaque appel.

use std::marker::PhantomData;

use super::demarche::{Demarche, Etape};
use super::erreur::{Diagnostic, ErreurCalcul};
use super::jetons::{
    classer, espacer_operateurs, format_tokens, tokenize, verifier_parentheses, Jeton,
};
use super::nombre::Nombre;
use super::operateur::{Issue, Operateur};
use super::options::{Mode, Options};

/// Résultat détaillé d’une évaluation réussie.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation<T> {
    pub valeur: T,
    /// Conditions non fatales rencontrées, dans l’ordre.
    pub diagnostics: Vec<Diagnostic>,
    /// Présente seulement si `Options::trace`.
    pub demarche: Option<Demarche>,
}

impl<T> Evaluation<T> {
    pub fn division_par_zero(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::DivisionParZero { .. }))
    }
}

/// Évaluateur générique sur un type numérique signé.
///
/// Ne contient que ses options : réutilisable (et partageable par `&`) sans fuite
/// d’état d’un appel à l’autre.
#[derive(Clone, Debug)]
pub struct Evaluateur<T> {
    options: Options,
    _nombre: PhantomData<fn() -> T>,
}

impl<T: Nombre> Default for Evaluateur<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Nombre> Evaluateur<T> {
    pub fn new() -> Self {
        Self::avec_options(Options::default())
    }

    pub fn avec_options(options: Options) -> Self {
        Self {
            options,
            _nombre: PhantomData,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Point d’entrée : la valeur seule.
    pub fn compute(&self, expression: &str) -> Result<T, ErreurCalcul> {
        self.evaluer(expression).map(|e| e.valeur)
    }

    /// Valeur + diagnostics + démarche (optionnelle).
    pub fn evaluer(&self, expression: &str) -> Result<Evaluation<T>, ErreurCalcul> {
        let s = expression.trim();
        if s.is_empty() {
            return Err(ErreurCalcul::EntreeVide);
        }
        if s.len() > self.options.longueur_max {
            return Err(ErreurCalcul::EntreeTropLongue {
                longueur: s.len(),
                max: self.options.longueur_max,
            });
        }

        // 0) parenthèses : rien n’est découpé si les comptes diffèrent
        if let Err(e) = verifier_parentheses(s) {
            tracing::warn!(expression = s, "{e}, expression non traitée");
            return Err(e);
        }

        // 1) espacement + jetons
        let espacee = espacer_operateurs(s);
        let jetons = tokenize(&espacee);
        tracing::debug!(jetons = %format_tokens(&jetons), "expression à évaluer");

        // 2) jetons -> piles
        let mut passe = Passe::new(&self.options, &espacee);
        for (position, jeton) in jetons.iter().enumerate() {
            passe.consommer(jeton, position)?;
        }

        // 3) vidage + extraction
        let evaluation = passe.terminer()?;
        tracing::debug!(resultat = %evaluation.valeur, "évaluation terminée");
        Ok(evaluation)
    }
}

/// Moins unaire vérifié : -i64::MIN n’existe pas.
fn nier<T: Nombre>(v: &T) -> Result<T, ErreurCalcul> {
    v.negatif().ok_or_else(|| ErreurCalcul::Depassement {
        gauche: "0".into(),
        operateur: '-',
        droite: v.to_string(),
    })
}

/// Groupe ouvert : négation en attente au moment de "(" + hauteur de la pile de nombres.
#[derive(Clone, Copy, Debug)]
struct Groupe {
    negatif: bool,
    base: usize,
}

/// État d’un seul appel.
struct Passe<'o, T> {
    options: &'o Options,
    nombres: Vec<T>,
    operateurs: Vec<Operateur>,
    groupes: Vec<Groupe>,
    negation_en_attente: bool,
    prev_was_value: bool,
    diagnostics: Vec<Diagnostic>,
    demarche: Option<Demarche>,
}

impl<'o, T: Nombre> Passe<'o, T> {
    fn new(options: &'o Options, espacee: &str) -> Self {
        Self {
            options,
            nombres: Vec::new(),
            operateurs: Vec::new(),
            groupes: Vec::new(),
            negation_en_attente: false,
            prev_was_value: false,
            diagnostics: Vec::new(),
            demarche: options.trace.then(|| Demarche::new(espacee)),
        }
    }

    fn consommer(&mut self, jeton: &str, position: usize) -> Result<(), ErreurCalcul> {
        match classer::<T>(jeton)? {
            Jeton::Nombre(v) => {
                let v = if self.negation_en_attente {
                    self.negation_en_attente = false;
                    nier(&v)?
                } else {
                    v
                };
                self.nombres.push(v);
                self.prev_was_value = true;
            }

            Jeton::Op(op) if op.is_open_brace() => {
                // 4(5+3) = 4 * (5+3)
                if self.prev_was_value {
                    self.empiler(Operateur::Fois)?;
                }
                self.groupes.push(Groupe {
                    negatif: std::mem::take(&mut self.negation_en_attente),
                    base: self.nombres.len(),
                });
                self.operateurs.push(op);
                self.prev_was_value = false;
            }

            Jeton::Op(op) if op.is_close_brace() => {
                self.fermer_groupe(position)?;
                // le groupe calculé se comporte comme une valeur
                self.prev_was_value = true;
            }

            Jeton::Op(op) if !self.prev_was_value => {
                if op.is_minus() {
                    // signe, pas soustraction
                    self.negation_en_attente = !self.negation_en_attente;
                } else {
                    self.operateur_inattendu(op, position)?;
                }
            }

            Jeton::Op(op) => {
                self.empiler(op)?;
                self.prev_was_value = false;
            }
        }

        self.noter_piles(jeton, position);
        Ok(())
    }

    /// Réduit tant que le sommet le précède, puis empile.
    fn empiler(&mut self, op: Operateur) -> Result<(), ErreurCalcul> {
        while let Some(&sommet) = self.operateurs.last() {
            if !sommet.precede(&op) {
                break;
            }
            self.operateurs.pop();
            self.reduire(sommet)?;
        }
        self.operateurs.push(op);
        Ok(())
    }

    /// Dépile jusqu’à '(' (jetée sans application), puis applique la négation du groupe.
    fn fermer_groupe(&mut self, position: usize) -> Result<(), ErreurCalcul> {
        loop {
            match self.operateurs.pop() {
                Some(op) if op.is_open_brace() => break,
                Some(op) => self.reduire(op)?,
                None => return Err(ErreurCalcul::ParentheseOrpheline { position }),
            }
        }

        if let Some(groupe) = self.groupes.pop() {
            // groupe vide "()" : rien à nier
            if groupe.negatif && self.nombres.len() > groupe.base {
                if let Some(sommet) = self.nombres.last_mut() {
                    *sommet = nier(sommet)?;
                }
            }
        }
        Ok(())
    }

    /// Applique `op` (déjà dépilé) aux deux opérandes du sommet, empile le résultat.
    /// L’opérande empilée en premier est celle de gauche.
    fn reduire(&mut self, op: Operateur) -> Result<(), ErreurCalcul> {
        let (Some(droite), Some(gauche)) = (self.nombres.pop(), self.nombres.pop()) else {
            return Err(ErreurCalcul::OperandesManquantes {
                operateur: op.symbole(),
            });
        };

        let resultat = match op.appliquer(&gauche, &droite)? {
            Issue::Valeur(v) => v,
            Issue::DivisionParZero(zero) => {
                tracing::warn!(%gauche, "division par zéro : aucune réponse valide, 0 utilisé");
                self.diagnostics.push(Diagnostic::DivisionParZero {
                    gauche: gauche.to_string(),
                });
                zero
            }
        };

        tracing::debug!("réduit {gauche} {op} {droite} = {resultat}");
        if let Some(d) = self.demarche.as_mut() {
            d.push(Etape::Reduction {
                gauche: gauche.to_string(),
                operateur: op.symbole(),
                droite: droite.to_string(),
                resultat: resultat.to_string(),
            });
        }

        self.nombres.push(resultat);
        Ok(())
    }

    fn operateur_inattendu(&mut self, op: Operateur, position: usize) -> Result<(), ErreurCalcul> {
        match self.options.mode {
            Mode::Strict => Err(ErreurCalcul::OperateurInattendu {
                operateur: op.symbole(),
                position,
            }),
            Mode::Indulgent => {
                let d = Diagnostic::OperateurIgnore {
                    operateur: op.symbole(),
                    position,
                };
                tracing::warn!("{d}");
                self.diagnostics.push(d);
                Ok(())
            }
        }
    }

    fn noter_piles(&mut self, jeton: &str, position: usize) {
        if self.demarche.is_none() && !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }

        let nombres: Vec<String> = self.nombres.iter().map(|n| n.to_string()).collect();
        let operateurs = self
            .operateurs
            .iter()
            .map(|o| o.symbole().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::trace!(jeton, position, nombres = ?nombres, operateurs = %operateurs, "piles");

        if let Some(d) = self.demarche.as_mut() {
            d.push(Etape::Jeton {
                jeton: jeton.to_string(),
                nombres,
                operateurs,
            });
        }
    }

    /// Vide la pile d’opérateurs ; il doit rester exactement une valeur.
    fn terminer(mut self) -> Result<Evaluation<T>, ErreurCalcul> {
        while let Some(op) = self.operateurs.pop() {
            self.reduire(op)?;
        }

        if self.nombres.len() != 1 {
            return Err(ErreurCalcul::ResultatAmbigu {
                restants: self.nombres.len(),
            });
        }
        let Some(valeur) = self.nombres.pop() else {
            return Err(ErreurCalcul::ResultatAmbigu { restants: 0 });
        };

        Ok(Evaluation {
            valeur,
            diagnostics: self.diagnostics,
            demarche: self.demarche,
        })
    }
}
