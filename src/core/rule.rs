//! # Rule — Regra Difusa
//!
//! Uma regra liga uma árvore de antecedentes ([`Expression`]) a um ou mais
//! consequentes ponderados: "SE (hora é noite E risco_zona é alto) ENTÃO
//! nivel_alerta é alto".

use serde::{Deserialize, Serialize};

use super::expression::Expression;

/// Consequente de regra: `(variável, termo)` com peso em (0, 1].
///
/// O peso escala a força de disparo da regra **antes** do corte de
/// implicação — uma regra com peso 0.5 nunca ativa seu consequente acima
/// de grau 0.5.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consequent {
    /// Nome da variável de saída.
    pub variable: String,
    /// Termo da variável de saída que a regra ativa.
    pub term: String,
    /// Peso da contribuição, em (0, 1]. Validado em
    /// [`RuleBaseBuilder::build()`](crate::core::RuleBaseBuilder::build).
    pub weight: f64,
}

impl Consequent {
    /// Consequente com peso pleno (1.0) — o caso comum.
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self::weighted(variable, term, 1.0)
    }

    /// Consequente com peso explícito.
    pub fn weighted(variable: impl Into<String>, term: impl Into<String>, weight: f64) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
            weight,
        }
    }
}

/// Regra difusa: antecedente + lista ordenada de consequentes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Árvore de antecedentes avaliada para obter a força de disparo.
    pub antecedent: Expression,
    /// Consequentes ativados pela força de disparo (ao menos um).
    pub consequents: Vec<Consequent>,
}

impl Rule {
    pub fn new(antecedent: Expression, consequents: Vec<Consequent>) -> Self {
        Self {
            antecedent,
            consequents,
        }
    }
}
