//! # Erros — Taxonomia Explícita de Falhas
//!
//! Todos os erros do motor são **valores de retorno** — nenhum erro é
//! logado-e-engolido internamente, e o motor nunca faz retry (a computação
//! é determinística: repetir não muda o resultado).
//!
//! A taxonomia separa dois momentos distintos de falha:
//!
//! | Enum | Momento | Exemplo |
//! |------|---------|---------|
//! | [`ConstructionError`] | `build()` da base de regras | termo desconhecido numa regra |
//! | [`EvalError`] | consulta (bind/compute) | antecedente sem valor vinculado |
//!
//! Um [`ConstructionError`] é fatal na construção e **nunca** chega ao
//! tempo de consulta: uma [`RuleBase`](crate::core::RuleBase) que existe já
//! foi validada. Um [`EvalError`] tem escopo por sessão
//! ([`EvalError::MissingInput`]) ou por variável de saída
//! ([`EvalError::NoActivation`] — as demais saídas ainda computam).

use thiserror::Error;

use crate::core::VariableRole;

/// Erro fatal detectado durante a construção de uma
/// [`RuleBase`](crate::core::RuleBase).
///
/// Toda referência (variável, termo) e todo parâmetro numérico é validado
/// em [`RuleBaseBuilder::build()`](crate::core::RuleBaseBuilder::build) ou
/// antes — uma violação aqui jamais vira surpresa em tempo de consulta.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConstructionError {
    /// Parâmetros de função triangular fora de ordem (esperado a ≤ b ≤ c)
    /// ou não-finitos.
    #[error("função triangular malformada: a={a}, b={b}, c={c} (esperado a ≤ b ≤ c, finitos)")]
    MalformedTriangular { a: f64, b: f64, c: f64 },

    /// Parâmetros de função trapezoidal fora de ordem (esperado a ≤ b ≤ c ≤ d)
    /// ou não-finitos.
    #[error("função trapezoidal malformada: a={a}, b={b}, c={c}, d={d} (esperado a ≤ b ≤ c ≤ d, finitos)")]
    MalformedTrapezoidal { a: f64, b: f64, c: f64, d: f64 },

    /// Domínio inválido para uma variável linguística (esperado min < max,
    /// ambos finitos).
    #[error("domínio inválido para '{variable}': [{min}, {max}]")]
    InvalidDomain {
        variable: String,
        min: f64,
        max: f64,
    },

    /// Resolução de amostragem inválida (esperado valor finito > 0).
    #[error("resolução inválida para '{variable}': {resolution}")]
    InvalidResolution { variable: String, resolution: f64 },

    /// Variável declarada duas vezes no mesmo papel.
    #[error("variável '{name}' já declarada como {}", .role.label())]
    DuplicateVariable { name: String, role: VariableRole },

    /// Referência a uma variável que não foi declarada em papel algum.
    #[error("variável desconhecida: '{name}'")]
    UnknownVariable { name: String },

    /// Referência a um termo que a variável não define.
    #[error("termo desconhecido: '{variable}' não define '{term}'")]
    UnknownTerm { variable: String, term: String },

    /// Uma regra referencia a variável no papel errado — por exemplo, um
    /// antecedente da regra aponta para uma variável de saída.
    #[error("papel incorreto: '{variable}' não é {}", .expected.label())]
    RoleMismatch {
        variable: String,
        expected: VariableRole,
    },

    /// Peso de consequente fora do intervalo permitido (0, 1].
    #[error("peso inválido {weight} em '{variable} é {term}' (esperado 0 < peso ≤ 1)")]
    InvalidWeight {
        variable: String,
        term: String,
        weight: f64,
    },

    /// Regra sem nenhum consequente.
    #[error("regra #{index} não possui consequentes")]
    EmptyConsequents { index: usize },
}

/// Erro em tempo de consulta — vínculo de entradas ou passada de cômputo.
///
/// [`MissingInput`](EvalError::MissingInput) é global: aborta o cômputo da
/// sessão inteira (uma regra precisava de um antecedente nunca vinculado).
/// [`NoActivation`](EvalError::NoActivation) tem escopo por variável de
/// saída: as demais saídas da mesma passada ainda produzem valor.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// Tentativa de vincular/ler uma variável que a base não declara.
    #[error("variável '{0}' não é um antecedente declarado na base de regras")]
    UnknownVariable(String),

    /// Uma regra referencia um antecedente sem valor vinculado na sessão.
    /// Nunca é tratado silenciosamente como zero.
    #[error("antecedente '{0}' sem valor vinculado na sessão")]
    MissingInput(String),

    /// Nenhuma regra ativou a variável de saída: o conjunto agregado é
    /// identicamente zero e o centroide é indefinido — o motor sinaliza
    /// em vez de devolver 0 ou NaN.
    #[error("nenhuma regra ativou a saída '{0}'")]
    NoActivation(String),
}
