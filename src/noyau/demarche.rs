// src/noyau/demarche.rs
//
// Démarche : trace des états intermédiaires des piles (diagnostic seulement,
// jamais nécessaire au calcul). Les valeurs sont déjà mises en texte, donc
// la démarche n’est pas générique.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Etape {
    /// Un jeton consommé, avec les piles après coup.
    Jeton {
        jeton: String,
        nombres: Vec<String>,
        operateurs: String,
    },
    /// Une réduction : `gauche op droite = resultat`.
    Reduction {
        gauche: String,
        operateur: char,
        droite: String,
        resultat: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Demarche {
    pub expression_espacee: String,
    pub etapes: Vec<Etape>,
}

impl Demarche {
    pub fn new(expression_espacee: impl Into<String>) -> Self {
        Self {
            expression_espacee: expression_espacee.into(),
            etapes: Vec::new(),
        }
    }

    pub fn push(&mut self, etape: Etape) {
        self.etapes.push(etape);
    }

    pub fn reductions(&self) -> usize {
        self.etapes
            .iter()
            .filter(|e| matches!(e, Etape::Reduction { .. }))
            .count()
    }
}

impl fmt::Display for Etape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Etape::Jeton {
                jeton,
                nombres,
                operateurs,
            } => write!(
                f,
                "jeton {jeton:<4} | nombres: [{}] | opérateurs: [{operateurs}]",
                nombres.join(" ")
            ),
            Etape::Reduction {
                gauche,
                operateur,
                droite,
                resultat,
            } => write!(f, "  réduit {gauche} {operateur} {droite} = {resultat}"),
        }
    }
}

impl fmt::Display for Demarche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expression : {}", self.expression_espacee.trim())?;
        for e in &self.etapes {
            writeln!(f, "{e}")?;
        }
        Ok(())
    }
}
