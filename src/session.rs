//! # Session — Sessão de Avaliação por Consulta
//!
//! Uma [`Session`] é o estado mutável de **uma** consulta: vincula valores
//! crisp aos antecedentes declarados, dispara uma passada de cômputo no
//! [`MamdaniEngine`](crate::inference::MamdaniEngine) e expõe as saídas
//! crisp nomeadas. A sessão nunca muta a [`RuleBase`] — muitas sessões
//! podem compartilhar a mesma base (`Arc`) em threads concorrentes, desde
//! que cada chamador use a **sua** sessão.
//!
//! ## Máquina de Estados
//!
//! ```text
//! Unbound ──bind_input──▶ InputsBound ──compute──▶ Computed
//!                              ▲                      │
//!                              └──────bind_input──────┘   (invalida saídas)
//!
//! compute com falha global ──▶ Failed(motivo)
//! ```
//!
//! Falha **por saída** ([`EvalError::NoActivation`]) não derruba a sessão:
//! o estado vai a `Computed` e apenas aquele slot de saída carrega o erro —
//! as demais saídas computam normalmente.
//!
//! ## Entradas Fora do Domínio
//!
//! Vincular um valor fora de `[min, max]` **não** é rejeitado nem
//! clampado: a fuzzificação avalia o x original (tipicamente grau zero) e
//! o nome da variável fica registrado em
//! [`out_of_domain()`](Session::out_of_domain) — o chamador decide se
//! distingue "pertinência quase nula legítima" de "entrada sem sentido".

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::RuleBase;
use crate::error::EvalError;
use crate::inference::MamdaniEngine;

/// Estado do ciclo de vida de uma sessão.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// Criada, nenhuma entrada vinculada.
    Unbound,
    /// Ao menos uma entrada vinculada; saídas ainda não computadas (ou
    /// invalidadas por revinculação).
    InputsBound,
    /// Passada de cômputo concluída; saídas disponíveis.
    Computed,
    /// Falha global na última passada (ex.: antecedente sem valor).
    Failed(String),
}

/// Saídas crisp de uma passada, uma entrada por variável de saída
/// declarada.
///
/// Cada slot é `Ok(valor)` ou `Err(NoActivation)` — a falha de uma saída
/// não contamina as demais.
#[derive(Clone, Debug)]
pub struct Outputs {
    values: HashMap<String, Result<f64, EvalError>>,
}

impl Outputs {
    /// Valor crisp de uma saída.
    ///
    /// # Erros
    ///
    /// - [`EvalError::UnknownVariable`] se o nome não é uma saída declarada
    /// - [`EvalError::NoActivation`] se nenhuma regra ativou esta saída
    pub fn crisp(&self, name: &str) -> Result<f64, EvalError> {
        match self.values.get(name) {
            Some(Ok(value)) => Ok(*value),
            Some(Err(e)) => Err(e.clone()),
            None => Err(EvalError::UnknownVariable(name.to_string())),
        }
    }

    /// Itera sobre todas as saídas e seus resultados.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<f64, EvalError>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Número de variáveis de saída da passada.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sessão de avaliação: entradas vinculadas + saídas computadas sobre uma
/// base compartilhada.
pub struct Session {
    base: Arc<RuleBase>,
    inputs: HashMap<String, f64>,
    out_of_domain: HashSet<String>,
    state: SessionState,
    outputs: Option<Outputs>,
}

impl Session {
    /// Cria uma sessão vazia sobre uma base compartilhada.
    pub fn new(base: Arc<RuleBase>) -> Self {
        Self {
            base,
            inputs: HashMap::new(),
            out_of_domain: HashSet::new(),
            state: SessionState::Unbound,
            outputs: None,
        }
    }

    /// Base de regras da sessão.
    pub fn rule_base(&self) -> &RuleBase {
        &self.base
    }

    /// Estado atual da máquina de estados.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Nomes de antecedentes vinculados com valor fora do domínio nominal.
    ///
    /// O valor **não** foi clampado nem rejeitado — este conjunto existe
    /// para o chamador inspecionar e decidir.
    pub fn out_of_domain(&self) -> &HashSet<String> {
        &self.out_of_domain
    }

    /// Vincula um valor crisp a um antecedente declarado.
    ///
    /// Qualquer vínculo bem-sucedido leva a sessão a `InputsBound` e
    /// invalida saídas de um `compute()` anterior.
    ///
    /// # Erros
    ///
    /// [`EvalError::UnknownVariable`] se o nome não é um antecedente da
    /// base — o estado da sessão não muda.
    pub fn bind_input(&mut self, name: &str, value: f64) -> Result<(), EvalError> {
        let var = self
            .base
            .antecedent(name)
            .ok_or_else(|| EvalError::UnknownVariable(name.to_string()))?;

        if var.contains(value) {
            self.out_of_domain.remove(name);
        } else {
            tracing::warn!(
                variavel = %name,
                valor = value,
                dominio = %format!("[{}, {}]", var.min(), var.max()),
                "entrada fora do domínio — avaliada sem clamp, registrada para inspeção"
            );
            self.out_of_domain.insert(name.to_string());
        }

        self.inputs.insert(name.to_string(), value);
        self.outputs = None;
        self.state = SessionState::InputsBound;
        Ok(())
    }

    /// Roda a passada de inferência sobre as entradas vinculadas.
    ///
    /// Função pura das entradas atuais + base imutável: entradas idênticas
    /// produzem saídas idênticas, inclusive chamando `compute()` duas
    /// vezes seguidas.
    ///
    /// # Erros
    ///
    /// [`EvalError::MissingInput`] (global) — a sessão vai para
    /// `Failed(motivo)`. Falhas por saída ficam dentro de [`Outputs`].
    pub fn compute(&mut self) -> Result<&Outputs, EvalError> {
        match MamdaniEngine::evaluate(&self.base, &self.inputs) {
            Ok(values) => {
                self.state = SessionState::Computed;
                Ok(self.outputs.insert(Outputs { values }))
            }
            Err(e) => {
                self.outputs = None;
                self.state = SessionState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Saídas da última passada, se a sessão está em `Computed`.
    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Consequent, Expression, MembershipFunction, VariableRole};

    /// Cenário canônico: antecedente x (0–10, termo cheio = tri(0,5,10)),
    /// consequente y (0–100, termo alto = tri(0,50,100)), uma regra
    /// "x é cheio → y é alto".
    fn base_canonica() -> Arc<RuleBase> {
        let mut b = RuleBase::builder();
        b.declare_variable(VariableRole::Antecedent, "x", 0.0, 10.0, 0.1)
            .unwrap();
        b.add_term(
            "x",
            "cheio",
            MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap(),
        )
        .unwrap();
        b.declare_variable(VariableRole::Consequent, "y", 0.0, 100.0, 1.0)
            .unwrap();
        b.add_term(
            "y",
            "alto",
            MembershipFunction::triangular(0.0, 50.0, 100.0).unwrap(),
        )
        .unwrap();
        b.add_rule(
            Expression::is("x", "cheio"),
            vec![Consequent::new("y", "alto")],
        );
        Arc::new(b.build().unwrap())
    }

    /// x=5 → grau 1 → agregado é o termo `alto` inteiro → centroide 50.
    #[test]
    fn test_full_activation_centroid() {
        let mut s = Session::new(base_canonica());
        s.bind_input("x", 5.0).unwrap();
        let out = s.compute().unwrap();
        assert!((out.crisp("y").unwrap() - 50.0).abs() < 1e-6);
        assert_eq!(*s.state(), SessionState::Computed);
    }

    /// x=0 → grau 0 → nenhuma ativação para y, sinalizada por saída.
    #[test]
    fn test_zero_activation_reported() {
        let mut s = Session::new(base_canonica());
        s.bind_input("x", 0.0).unwrap();
        let out = s.compute().unwrap();
        assert_eq!(out.crisp("y"), Err(EvalError::NoActivation("y".into())));
        // Falha por saída não derruba a sessão
        assert_eq!(*s.state(), SessionState::Computed);
    }

    /// x=2.5 → grau 0.5 → corte simétrico em 0.5 → centroide continua 50.
    #[test]
    fn test_half_activation_keeps_axis() {
        let mut s = Session::new(base_canonica());
        s.bind_input("x", 2.5).unwrap();
        let out = s.compute().unwrap();
        assert!((out.crisp("y").unwrap() - 50.0).abs() < 1e-6);
    }

    /// Vincular variável não declarada falha e o estado permanece Unbound.
    #[test]
    fn test_unknown_bind_leaves_state() {
        let mut s = Session::new(base_canonica());
        assert_eq!(
            s.bind_input("fantasma", 1.0),
            Err(EvalError::UnknownVariable("fantasma".into()))
        );
        assert_eq!(*s.state(), SessionState::Unbound);
    }

    /// compute() sem vincular o antecedente referenciado: falha global,
    /// sessão em Failed.
    #[test]
    fn test_missing_input_fails_session() {
        let mut s = Session::new(base_canonica());
        assert_eq!(
            s.compute().unwrap_err(),
            EvalError::MissingInput("x".into())
        );
        assert!(matches!(s.state(), SessionState::Failed(_)));
        assert!(s.outputs().is_none());
    }

    /// Duas passadas sobre as mesmas entradas produzem saídas idênticas.
    #[test]
    fn test_compute_is_deterministic() {
        let mut s = Session::new(base_canonica());
        s.bind_input("x", 3.7).unwrap();
        let primeira = s.compute().unwrap().crisp("y").unwrap();
        let segunda = s.compute().unwrap().crisp("y").unwrap();
        assert_eq!(primeira, segunda);
    }

    /// Revincular depois de Computed invalida as saídas e volta a
    /// InputsBound.
    #[test]
    fn test_rebind_invalidates_outputs() {
        let mut s = Session::new(base_canonica());
        s.bind_input("x", 5.0).unwrap();
        s.compute().unwrap();
        assert!(s.outputs().is_some());

        s.bind_input("x", 0.0).unwrap();
        assert_eq!(*s.state(), SessionState::InputsBound);
        assert!(s.outputs().is_none());
    }

    /// Entrada fora do domínio é registrada, não clampada, e ainda computa.
    #[test]
    fn test_out_of_domain_flagged_not_clamped() {
        let mut s = Session::new(base_canonica());
        s.bind_input("x", 25.0).unwrap();
        assert!(s.out_of_domain().contains("x"));

        // Fora do suporte de todos os termos → sem ativação, sem pânico
        let out = s.compute().unwrap();
        assert!(matches!(out.crisp("y"), Err(EvalError::NoActivation(_))));

        // Revincular dentro do domínio limpa o registro
        s.bind_input("x", 5.0).unwrap();
        assert!(s.out_of_domain().is_empty());
    }

    /// Muitas sessões compartilham a mesma base concorrentemente e chegam
    /// ao mesmo resultado da avaliação sequencial.
    #[test]
    fn test_concurrent_sessions_share_base() {
        let base = base_canonica();

        let mut esperado = Session::new(base.clone());
        esperado.bind_input("x", 5.0).unwrap();
        let esperado = esperado.compute().unwrap().crisp("y").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let base = base.clone();
                std::thread::spawn(move || {
                    let mut s = Session::new(base);
                    s.bind_input("x", 5.0).unwrap();
                    s.compute().unwrap().crisp("y").unwrap()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), esperado);
        }
    }
}
