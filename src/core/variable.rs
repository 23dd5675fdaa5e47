//! # LinguisticVariable — Variável Linguística e Fuzzificação
//!
//! Uma [`LinguisticVariable`] descreve uma grandeza mensurável (hora do
//! dia, proporção de ocorrências, inclinação de tendência) por meio de
//! **termos difusos sobrepostos** em vez de limiares rígidos: "noite",
//! "risco alto", "idoso".
//!
//! ## Estrutura
//!
//! - **nome** — único dentro do seu papel (antecedente ou consequente)
//! - **domínio** `[min, max]` — faixa nominal dos valores crisp
//! - **resolução** — passo fixo usado **apenas** para discretizar o domínio
//!   na defuzzificação (ex.: 1.0 para faixas 0–100, 0.01 para faixas 0–1)
//! - **termos** — mapa nome-do-termo → [`MembershipFunction`]
//!
//! ## Política para Entradas Fora do Domínio
//!
//! A fuzzificação **não** faz clamp do valor de entrada: as funções de
//! pertinência são avaliadas no x original (fora do suporte elas retornam
//! zero suavemente). Quem registra que o valor estava fora do domínio é a
//! [`Session`](crate::session::Session) — assim o chamador consegue
//! distinguir "pertinência legitimamente quase nula" de "entrada sem
//! sentido" e decidir se rejeita.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::membership::MembershipFunction;
use crate::error::ConstructionError;

/// Papel de uma variável no sistema de inferência.
///
/// Os dicionários de antecedentes e consequentes são independentes — o
/// mesmo nome pode existir nos dois papéis sem conflito.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableRole {
    /// Variável de entrada — recebe valores crisp vinculados pela sessão.
    Antecedent,
    /// Variável de saída — recebe o conjunto agregado e a defuzzificação.
    Consequent,
}

impl VariableRole {
    /// Label legível em PT-BR do papel.
    pub fn label(&self) -> &str {
        match self {
            VariableRole::Antecedent => "antecedente",
            VariableRole::Consequent => "consequente",
        }
    }
}

/// Variável linguística: domínio nominal, resolução de amostragem e termos.
///
/// Imutável depois que a [`RuleBase`](crate::core::RuleBase) é construída —
/// os campos só são populados pelo
/// [`RuleBaseBuilder`](crate::core::RuleBaseBuilder).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    role: VariableRole,
    min: f64,
    max: f64,
    resolution: f64,
    terms: HashMap<String, MembershipFunction>,
}

impl LinguisticVariable {
    /// Cria uma variável validada, ainda sem termos.
    ///
    /// # Erros
    ///
    /// - [`ConstructionError::InvalidDomain`] se min ≥ max ou algum limite
    ///   não for finito
    /// - [`ConstructionError::InvalidResolution`] se a resolução não for
    ///   finita e positiva
    pub(crate) fn new(
        name: impl Into<String>,
        role: VariableRole,
        min: f64,
        max: f64,
        resolution: f64,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConstructionError::InvalidDomain {
                variable: name,
                min,
                max,
            });
        }
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ConstructionError::InvalidResolution {
                variable: name,
                resolution,
            });
        }
        Ok(Self {
            name,
            role,
            min,
            max,
            resolution,
            terms: HashMap::new(),
        })
    }

    /// Registra (ou substitui) um termo da variável.
    ///
    /// Se o suporte da função nem intersecta o domínio `[min, max]`, o
    /// termo jamais poderá ativar — isso é aceito, mas alertado via
    /// `tracing::warn!` para inspeção.
    pub(crate) fn add_term(&mut self, term: impl Into<String>, mf: MembershipFunction) {
        let term = term.into();
        let (lo, hi) = mf.support();
        if hi < self.min || lo > self.max {
            tracing::warn!(
                variable = %self.name,
                term = %term,
                funcao = %mf,
                "termo com suporte fora do domínio da variável — nunca ativará"
            );
        }
        self.terms.insert(term, mf);
    }

    /// Nome da variável.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Papel da variável (antecedente ou consequente).
    pub fn role(&self) -> VariableRole {
        self.role
    }

    /// Limite inferior do domínio nominal.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Limite superior do domínio nominal.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Passo de discretização usado na defuzzificação.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Função de pertinência de um termo, se existir.
    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms.get(name)
    }

    /// Mapa completo de termos da variável.
    pub fn terms(&self) -> &HashMap<String, MembershipFunction> {
        &self.terms
    }

    /// Verifica se um valor crisp cai dentro do domínio nominal.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Fuzzifica um valor crisp: avalia **todos** os termos no x original,
    /// sem clamp.
    ///
    /// # Retorno
    ///
    /// Mapa nome-do-termo → grau em [0, 1]. Fora do domínio a maioria das
    /// funções retorna 0 suavemente; o registro de "entrada fora do
    /// domínio" fica a cargo da sessão.
    pub fn fuzzify(&self, x: f64) -> HashMap<String, f64> {
        self.terms
            .iter()
            .map(|(term, mf)| (term.clone(), mf.evaluate(x)))
            .collect()
    }

    /// Eixo de amostragem do domínio para a defuzzificação:
    /// `min, min+r, min+2r, …` até `max`.
    ///
    /// A contagem de passos tolera o erro de ponto flutuante de divisões
    /// exatas (1.0 / 0.01 ≠ 100 em f64) para não perder o ponto final; o
    /// último ponto é grampeado em `max` para que termos com pico na borda
    /// sejam amostrados no pico exato.
    pub fn samples(&self) -> Vec<f64> {
        let ratio = (self.max - self.min) / self.resolution;
        let steps = if (ratio - ratio.round()).abs() < 1e-6 {
            ratio.round() as usize
        } else {
            ratio.floor() as usize
        };
        (0..=steps)
            .map(|i| (self.min + i as f64 * self.resolution).min(self.max))
            .collect()
    }
}

/// Formatação legível: `nome [min, max] (papel, N termos)`.
impl fmt::Display for LinguisticVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}] ({}, {} termos)",
            self.name,
            self.min,
            self.max,
            self.role.label(),
            self.terms.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hora() -> LinguisticVariable {
        let mut v =
            LinguisticVariable::new("hora", VariableRole::Antecedent, 0.0, 23.0, 1.0).unwrap();
        v.add_term(
            "noite",
            MembershipFunction::trapezoidal(18.0, 20.0, 23.0, 23.0).unwrap(),
        );
        v.add_term(
            "madrugada",
            MembershipFunction::trapezoidal(0.0, 0.0, 4.0, 6.0).unwrap(),
        );
        v
    }

    /// A fuzzificação retorna um grau para cada termo declarado.
    #[test]
    fn test_fuzzify_covers_all_terms() {
        let v = hora();
        let graus = v.fuzzify(19.0);
        assert_eq!(graus.len(), 2);
        assert_eq!(graus["noite"], 0.5);
        assert_eq!(graus["madrugada"], 0.0);
    }

    /// Valores fora do domínio não são clampados: avaliam suavemente
    /// (aqui, zero) e `contains` permite ao chamador detectar o caso.
    #[test]
    fn test_out_of_domain_evaluates_smoothly() {
        let v = hora();
        assert!(!v.contains(30.0));
        let graus = v.fuzzify(30.0);
        assert_eq!(graus["noite"], 0.0);
        assert_eq!(graus["madrugada"], 0.0);
    }

    /// Eixo de amostragem inclui os dois extremos do domínio.
    #[test]
    fn test_samples_include_endpoints() {
        let v = hora();
        let xs = v.samples();
        assert_eq!(xs.len(), 24);
        assert_eq!(xs[0], 0.0);
        assert_eq!(*xs.last().unwrap(), 23.0);
    }

    /// Divisão exata com resíduo de ponto flutuante (1.0 / 0.01) não pode
    /// perder o ponto final do eixo.
    #[test]
    fn test_samples_fractional_resolution() {
        let v =
            LinguisticVariable::new("proporcao", VariableRole::Antecedent, 0.0, 1.0, 0.01).unwrap();
        let xs = v.samples();
        assert_eq!(xs.len(), 101);
        assert_eq!(*xs.last().unwrap(), 1.0);
    }

    /// Domínio e resolução inválidos são rejeitados na construção.
    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(LinguisticVariable::new("v", VariableRole::Antecedent, 5.0, 5.0, 1.0).is_err());
        assert!(LinguisticVariable::new("v", VariableRole::Antecedent, 10.0, 0.0, 1.0).is_err());
        assert!(LinguisticVariable::new("v", VariableRole::Antecedent, 0.0, 1.0, 0.0).is_err());
        assert!(LinguisticVariable::new("v", VariableRole::Antecedent, 0.0, 1.0, -0.1).is_err());
    }
}
