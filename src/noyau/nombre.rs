// src/noyau/nombre.rs
//
// Type numérique générique du noyau.
//
// Contrats:
// - Signé obligatoirement (moins unaire = négation) : `Signed` en super-trait,
//   donc u8/u32/u64/... sont refusés à la compilation.
// - Lecture d’un littéral : Option (échec attendu pour chaque opérateur, pas d’erreur).
// - Arithmétique vérifiée : None = dépassement (jamais de wrap silencieux).
// - Division : le diviseur n’est jamais nul ici (filtré par l’opérateur).

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

/// Au-delà, une puissance exacte (BigInt / BigRational) passe par f64 (anti-gel).
const EXPOSANT_EXACT_MAX: u64 = 4096;

/// Taille estimée maximale (en bits) d’un résultat de puissance exacte ;
/// au-delà : f64 (donc dépassement si le résultat n’y tient pas).
const BITS_EXACT_MAX: u64 = 1 << 20;

/// Valeur manipulée par les piles de l’évaluateur.
pub trait Nombre: Signed + Clone + fmt::Debug + fmt::Display {
    /// Lit un jeton comme littéral de ce type (chiffres ASCII + point décimal optionnel).
    fn parse_litteral(jeton: &str) -> Option<Self>;

    fn ajouter(&self, autre: &Self) -> Option<Self>;
    fn soustraire(&self, autre: &Self) -> Option<Self>;
    fn multiplier(&self, autre: &Self) -> Option<Self>;
    fn diviser(&self, autre: &Self) -> Option<Self>;

    /// Moins unaire ; None si l’opposé n’existe pas dans le type (ex: -i64::MIN).
    fn negatif(&self) -> Option<Self>;

    /// Représentation intermédiaire large (pour `^`).
    fn vers_f64(&self) -> Option<f64>;

    /// Rétrécissement depuis l’intermédiaire f64 (troncature pour les entiers).
    fn depuis_f64(x: f64) -> Option<Self>;

    /// `self ^ exposant`, calculé en f64 puis rétréci vers Self.
    fn puissance(&self, exposant: &Self) -> Option<Self> {
        puissance_f64(self, exposant)
    }
}

fn puissance_f64<T: Nombre>(base: &T, exposant: &T) -> Option<T> {
    let b = base.vers_f64()?;
    let e = exposant.vers_f64()?;
    T::depuis_f64(b.powf(e))
}

/// Exposant borné ET résultat estimé borné (bits de la base × exposant).
fn puissance_exacte_permise(bits_base: u64, exposant: u64) -> bool {
    exposant <= EXPOSANT_EXACT_MAX && bits_base.saturating_mul(exposant) <= BITS_EXACT_MAX
}

/// Littéral décimal : au moins un chiffre, au plus un point, rien d’autre.
/// Refuse "1e5", "inf", "NaN", "1_000", "+3"...
pub(crate) fn est_litteral_decimal(jeton: &str) -> bool {
    let mut chiffres = 0usize;
    let mut points = 0usize;
    for c in jeton.chars() {
        match c {
            '0'..='9' => chiffres += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    chiffres > 0 && points <= 1
}

/* ------------------------ Entiers primitifs ------------------------ */

macro_rules! nombre_entier {
    ($($t:ty),* $(,)?) => {$(
        impl Nombre for $t {
            fn parse_litteral(jeton: &str) -> Option<Self> {
                if !est_litteral_decimal(jeton) {
                    return None;
                }
                // "2.5" échoue ici : pas un entier
                jeton.parse::<$t>().ok()
            }

            fn ajouter(&self, autre: &Self) -> Option<Self> {
                self.checked_add(*autre)
            }

            fn soustraire(&self, autre: &Self) -> Option<Self> {
                self.checked_sub(*autre)
            }

            fn multiplier(&self, autre: &Self) -> Option<Self> {
                self.checked_mul(*autre)
            }

            fn diviser(&self, autre: &Self) -> Option<Self> {
                // MIN / -1 => None
                self.checked_div(*autre)
            }

            fn negatif(&self) -> Option<Self> {
                self.checked_neg()
            }

            fn vers_f64(&self) -> Option<f64> {
                ToPrimitive::to_f64(self)
            }

            fn depuis_f64(x: f64) -> Option<Self> {
                <$t as FromPrimitive>::from_f64(x)
            }
        }
    )*};
}

nombre_entier!(i8, i16, i32, i64, i128, isize);

/* ------------------------ Flottants ------------------------ */

macro_rules! nombre_flottant {
    ($($t:ty),* $(,)?) => {$(
        impl Nombre for $t {
            fn parse_litteral(jeton: &str) -> Option<Self> {
                if !est_litteral_decimal(jeton) {
                    return None;
                }
                jeton.parse::<$t>().ok()
            }

            // IEEE : pas de dépassement “erreur”, ±inf fait partie du domaine
            fn ajouter(&self, autre: &Self) -> Option<Self> {
                Some(self + autre)
            }

            fn soustraire(&self, autre: &Self) -> Option<Self> {
                Some(self - autre)
            }

            fn multiplier(&self, autre: &Self) -> Option<Self> {
                Some(self * autre)
            }

            fn diviser(&self, autre: &Self) -> Option<Self> {
                Some(self / autre)
            }

            fn negatif(&self) -> Option<Self> {
                Some(-self)
            }

            fn vers_f64(&self) -> Option<f64> {
                Some(*self as f64)
            }

            fn depuis_f64(x: f64) -> Option<Self> {
                Some(x as $t)
            }
        }
    )*};
}

nombre_flottant!(f32, f64);

/* ------------------------ BigInt ------------------------ */

impl Nombre for BigInt {
    fn parse_litteral(jeton: &str) -> Option<Self> {
        if !est_litteral_decimal(jeton) || jeton.contains('.') {
            return None;
        }
        BigInt::parse_bytes(jeton.as_bytes(), 10)
    }

    fn ajouter(&self, autre: &Self) -> Option<Self> {
        Some(self + autre)
    }

    fn soustraire(&self, autre: &Self) -> Option<Self> {
        Some(self - autre)
    }

    fn multiplier(&self, autre: &Self) -> Option<Self> {
        Some(self * autre)
    }

    fn diviser(&self, autre: &Self) -> Option<Self> {
        // troncature vers zéro, comme les entiers primitifs
        Some(self / autre)
    }

    fn negatif(&self) -> Option<Self> {
        Some(-self)
    }

    fn vers_f64(&self) -> Option<f64> {
        ToPrimitive::to_f64(self)
    }

    fn depuis_f64(x: f64) -> Option<Self> {
        <BigInt as FromPrimitive>::from_f64(x)
    }

    /// Exposant entier positif borné (et résultat de taille bornée) : exact. Sinon : f64.
    fn puissance(&self, exposant: &Self) -> Option<Self> {
        match exposant.to_u64() {
            Some(n) if puissance_exacte_permise(self.bits(), n) => Some(self.pow(n as u32)),
            _ => puissance_f64(self, exposant),
        }
    }
}

/* ------------------------ BigRational ------------------------ */

impl Nombre for BigRational {
    /// Décimal exact : "2.5" -> 5/2, ".5" -> 1/2, "3." -> 3.
    fn parse_litteral(jeton: &str) -> Option<Self> {
        if !est_litteral_decimal(jeton) {
            return None;
        }
        let (entiere, fraction) = jeton.split_once('.').unwrap_or((jeton, ""));
        let chiffres = format!("{entiere}{fraction}");
        let numer = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
        let denom = BigInt::from(10).pow(fraction.len() as u32);
        Some(BigRational::new(numer, denom))
    }

    fn ajouter(&self, autre: &Self) -> Option<Self> {
        Some(self + autre)
    }

    fn soustraire(&self, autre: &Self) -> Option<Self> {
        Some(self - autre)
    }

    fn multiplier(&self, autre: &Self) -> Option<Self> {
        Some(self * autre)
    }

    fn diviser(&self, autre: &Self) -> Option<Self> {
        Some(self / autre)
    }

    fn negatif(&self) -> Option<Self> {
        Some(-self)
    }

    fn vers_f64(&self) -> Option<f64> {
        let n = self.numer().to_f64()?;
        let d = self.denom().to_f64()?;
        Some(n / d)
    }

    fn depuis_f64(x: f64) -> Option<Self> {
        BigRational::from_float(x)
    }

    /// Exposant entier borné (et résultat de taille bornée) : exact (0^-n refusé). Sinon : f64.
    fn puissance(&self, exposant: &Self) -> Option<Self> {
        if exposant.is_integer() {
            if let Some(n) = exposant.numer().to_i64() {
                let bits = self.numer().bits().max(self.denom().bits());
                if puissance_exacte_permise(bits, n.unsigned_abs()) {
                    if n < 0 && self.is_zero() {
                        return None;
                    }
                    return Some(rational_pow_int(self.clone(), n));
                }
            }
        }
        puissance_f64(self, exposant)
    }
}

/// Exponentiation rapide exacte ; base non nulle si exp < 0.
fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    let mut e = exp.unsigned_abs();
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }

    if exp < 0 {
        acc.recip()
    } else {
        acc
    }
}
