//! # Risco Difuso — Motor de Inferência Mamdani
//!
//! Motor reutilizável de **inferência difusa Mamdani** para escores de
//! risco derivados de estatísticas criminais: transforma medições crisp
//! (uma hora do dia, uma proporção, uma inclinação de tendência) em um
//! escore crisp via variáveis linguísticas, avaliação de regras e
//! defuzzificação por centroide.
//!
//! ## Arquitetura
//!
//! ```text
//! construção (uma vez)                consulta (por chamada)
//! ┌──────────────────────┐            ┌─────────────────────────┐
//! │ RuleBaseBuilder      │            │ Session                 │
//! │  declare_variable    │            │  bind_input(nome, x)    │
//! │  add_term            │──build()──▶│  compute()              │
//! │  add_rule            │  (valida)  │  outputs().crisp(nome)  │
//! └──────────────────────┘            └─────────────────────────┘
//!         RuleBase imutável — compartilhe por Arc, sem locks
//! ```
//!
//! Semântica Mamdani clássica: mínimo para E, máximo para OU, corte por
//! mínimo na implicação, máximo na agregação entre regras, centroide na
//! defuzzificação.
//!
//! ## Exemplo
//!
//! ```rust
//! use std::sync::Arc;
//! use risco_difuso::core::{
//!     Consequent, Expression, MembershipFunction, RuleBase, VariableRole,
//! };
//! use risco_difuso::session::Session;
//!
//! let mut b = RuleBase::builder();
//! b.declare_variable(VariableRole::Antecedent, "x", 0.0, 10.0, 0.1)?;
//! b.add_term("x", "cheio", MembershipFunction::triangular(0.0, 5.0, 10.0)?)?;
//! b.declare_variable(VariableRole::Consequent, "y", 0.0, 100.0, 1.0)?;
//! b.add_term("y", "alto", MembershipFunction::triangular(0.0, 50.0, 100.0)?)?;
//! b.add_rule(
//!     Expression::is("x", "cheio"),
//!     vec![Consequent::new("y", "alto")],
//! );
//! let base = Arc::new(b.build()?);
//!
//! let mut session = Session::new(base);
//! session.bind_input("x", 5.0)?;
//! let outputs = session.compute()?;
//! assert!((outputs.crisp("y")? - 50.0).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Erros São Valores
//!
//! Construção inválida é [`error::ConstructionError`] no `build()` — nunca
//! chega ao tempo de consulta. Em consulta, [`error::EvalError`] separa a
//! falha global ([`MissingInput`](error::EvalError::MissingInput)) da
//! falha por saída ([`NoActivation`](error::EvalError::NoActivation)); a
//! biblioteca não loga-e-engole nem faz retry.

/// Módulo `core` — tipos fundamentais: funções de pertinência, variáveis
/// linguísticas, expressões, regras e a base imutável.
pub mod core;

/// Módulo `error` — taxonomia de erros de construção e de consulta.
pub mod error;

/// Módulo `inference` — passada Mamdani sem estado e defuzzificação.
pub mod inference;

/// Módulo `presets` — as configurações de risco embarcadas do domínio
/// criminal.
pub mod presets;

/// Módulo `session` — sessão de avaliação com máquina de estados.
pub mod session;

// Re-exports dos tipos principais na raiz do crate.
pub use crate::core::{
    Consequent, Expression, LinguisticVariable, MembershipFunction, Rule, RuleBase,
    RuleBaseBuilder, VariableRole,
};
pub use crate::error::{ConstructionError, EvalError};
pub use crate::inference::MamdaniEngine;
pub use crate::session::{Outputs, Session, SessionState};
