//! # Defuzzificação — Centroide Discreto
//!
//! Converte o conjunto difuso agregado de uma variável de saída de volta
//! em um número crisp pela posição média ponderada:
//!
//! ```text
//! centroide = Σ(xᵢ · μᵢ) / Σ μᵢ
//! ```
//!
//! Quando Σμᵢ = 0 (nenhuma regra ativou a saída) o centroide é
//! **indefinido** — a função retorna `None` e o motor converte em
//! [`EvalError::NoActivation`](crate::error::EvalError::NoActivation) em
//! vez de devolver 0 ou NaN silenciosamente.

/// Centroide discreto de um conjunto difuso amostrado.
///
/// `xs` e `degrees` andam em paralelo (mesmo comprimento, garantido pelo
/// motor: o eixo sai de
/// [`LinguisticVariable::samples()`](crate::core::LinguisticVariable::samples)).
///
/// # Retorno
///
/// - `Some(valor)` — posição do centroide no domínio
/// - `None` — massa total zero, centroide indefinido
pub fn centroid(xs: &[f64], degrees: &[f64]) -> Option<f64> {
    let mut weighted = 0.0;
    let mut mass = 0.0;
    for (x, mu) in xs.iter().zip(degrees) {
        weighted += x * mu;
        mass += mu;
    }
    if mass == 0.0 {
        None // Conjunto identicamente zero — indefinido
    } else {
        Some(weighted / mass)
    }
}
