//! Paramètres de l’évaluateur.
//!
//! Contrats :
//! - Valeurs par défaut sûres (mode indulgent, pas de démarche).
//! - Garde-fou : la longueur d’entrée est bornée (anti-gel).

/// Longueur d’entrée par défaut (octets).
pub const LONGUEUR_MAX_DEFAUT: usize = 10_000;

/// Borne absolue, quelle que soit la configuration.
pub const LONGUEUR_MAX_ABSOLUE: usize = 1_000_000;

/// Traitement d’un opérateur placé là où une valeur était attendue (ex: "+5", "5 * / 2").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// L’opérateur est ignoré et signalé par un `Diagnostic`.
    #[default]
    Indulgent,
    /// L’évaluation échoue (`ErreurCalcul::OperateurInattendu`).
    Strict,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    /// Enregistre l’état des piles après chaque jeton et chaque réduction.
    pub trace: bool,
    pub longueur_max: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            trace: false,
            longueur_max: LONGUEUR_MAX_DEFAUT,
        }
    }
}

impl Options {
    pub fn strict() -> Self {
        Self::default().avec_mode(Mode::Strict)
    }

    pub fn avec_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn avec_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Garde-fou : bornée à `LONGUEUR_MAX_ABSOLUE`.
    pub fn avec_longueur_max(mut self, longueur_max: usize) -> Self {
        self.longueur_max = longueur_max.min(LONGUEUR_MAX_ABSOLUE);
        self
    }
}
