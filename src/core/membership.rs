//! # MembershipFunction — Grau de Pertinência
//!
//! Implementação das **funções de pertinência** que descrevem os termos
//! linguísticos de uma variável difusa. Uma função de pertinência mapeia um
//! valor crisp (nítido) para um grau de verdade em [0, 1].
//!
//! ## Formas Suportadas
//!
//! Apenas as duas formas que o domínio realmente usa:
//!
//! | Forma | Parâmetros | Perfil |
//! |-------|-----------|--------|
//! | [`Triangular`](MembershipFunction::Triangular) | a ≤ b ≤ c | rampa sobe em [a,b], pico em b, rampa desce em [b,c] |
//! | [`Trapezoidal`](MembershipFunction::Trapezoidal) | a ≤ b ≤ c ≤ d | rampa em [a,b], platô 1 em [b,c], rampa em [c,d] |
//!
//! ## Formas Degeneradas
//!
//! Segmentos de largura zero são válidos e viram **degraus** — nunca uma
//! divisão 0/0. Exemplos reais do domínio: `tri(0, 0, 40)` (pico na borda
//! esquerda) e `trap(18, 21, 23, 23)` (platô encostado na borda direita).
//! Em x = b o grau é sempre 1, inclusive nas formas degeneradas.
//!
//! ## Exemplo
//!
//! ```rust
//! use risco_difuso::core::MembershipFunction;
//!
//! let alta = MembershipFunction::triangular(60.0, 100.0, 100.0).unwrap();
//! assert_eq!(alta.evaluate(100.0), 1.0);
//! assert_eq!(alta.evaluate(80.0), 0.5);
//! assert_eq!(alta.evaluate(50.0), 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

/// Função de pertinência — mapeia um valor crisp para um grau em [0, 1].
///
/// Construída apenas pelos construtores validados
/// ([`triangular()`](MembershipFunction::triangular),
/// [`trapezoidal()`](MembershipFunction::trapezoidal)), que rejeitam
/// parâmetros fora de ordem ou não-finitos com
/// [`ConstructionError`] — depois de construída, `evaluate()` nunca falha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Triângulo com vértices em a (sobe), b (pico) e c (desce).
    Triangular { a: f64, b: f64, c: f64 },

    /// Trapézio com rampa em [a,b], platô em [b,c] e rampa em [c,d].
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Cria uma função triangular validada.
    ///
    /// # Erros
    ///
    /// [`ConstructionError::MalformedTriangular`] se a ordenação a ≤ b ≤ c
    /// for violada ou algum parâmetro não for finito.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, ConstructionError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        if !finite || a > b || b > c {
            return Err(ConstructionError::MalformedTriangular { a, b, c });
        }
        Ok(Self::Triangular { a, b, c })
    }

    /// Cria uma função trapezoidal validada.
    ///
    /// # Erros
    ///
    /// [`ConstructionError::MalformedTrapezoidal`] se a ordenação
    /// a ≤ b ≤ c ≤ d for violada ou algum parâmetro não for finito.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConstructionError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite();
        if !finite || a > b || b > c || c > d {
            return Err(ConstructionError::MalformedTrapezoidal { a, b, c, d });
        }
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Avalia o grau de pertinência de `x`, sempre em [0, 1].
    ///
    /// Fora do suporte (antes do primeiro ponto, depois do último) o grau é
    /// zero. Em x = b o grau é 1 — o teste vem **antes** dos testes de
    /// borda para que formas degeneradas como `tri(0, 0, 40)` avaliem 1 em
    /// x = 0 em vez de cair na regra "x ≤ a ⇒ 0".
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    // a < x < b implica b > a: a rampa tem largura não-nula
                    (x - a) / (b - a)
                } else {
                    // b < x < c implica c > b
                    (c - x) / (c - b)
                }
            }
            Self::Trapezoidal { a, b, c, d } => {
                if x >= b && x <= c {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        }
    }

    /// Suporte da função: o intervalo fora do qual o grau é zero.
    ///
    /// Usado na construção da base para alertar sobre termos cujo suporte
    /// nem intersecta o domínio da variável (termos inalcançáveis).
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }
}

/// Formatação legível: `tri(a, b, c)` ou `trap(a, b, c, d)`.
impl fmt::Display for MembershipFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Triangular { a, b, c } => write!(f, "tri({a}, {b}, {c})"),
            Self::Trapezoidal { a, b, c, d } => write!(f, "trap({a}, {b}, {c}, {d})"),
        }
    }
}
