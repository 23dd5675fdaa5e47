//! # MamdaniEngine — Passada de Inferência
//!
//! Implementação da passada de inferência **Mamdani** clássica sobre uma
//! [`RuleBase`] imutável e um mapa de entradas crisp:
//!
//! ```text
//! entradas crisp
//!   ├── 1. Fuzzificação     — grau de cada termo de cada antecedente
//!   ├── 2. Força de disparo — min (E), max (OU), 1−x (NÃO) por regra
//!   ├── 3. Implicação       — corte min(força × peso, termo) por consequente
//!   ├── 4. Agregação        — máximo ponto-a-ponto entre regras
//!   └── 5. Defuzzificação   — centroide discreto por variável de saída
//! saídas crisp
//! ```
//!
//! O motor é **sem estado** — recebe a base por referência e devolve os
//! resultados, como uma função pura: entradas idênticas sempre produzem
//! saídas idênticas. Estado por consulta (valores vinculados, máquina de
//! estados) vive na [`Session`](crate::session::Session), que delega para
//! cá.
//!
//! ## Escopo de Falha
//!
//! - [`EvalError::MissingInput`] é **global**: alguma regra referencia um
//!   antecedente sem valor — a passada inteira aborta.
//! - [`EvalError::NoActivation`] é **por variável de saída**: as demais
//!   saídas da mesma passada ainda produzem valor.

use std::collections::HashMap;

use crate::core::{Expression, RuleBase};
use crate::error::EvalError;

use super::defuzz::centroid;

/// Motor de inferência Mamdani — struct sem estado, totalmente funcional.
pub struct MamdaniEngine;

impl MamdaniEngine {
    /// Roda uma passada completa de inferência.
    ///
    /// # Parâmetros
    ///
    /// - `base` — base de regras validada (imutável, compartilhável)
    /// - `inputs` — mapa nome-do-antecedente → valor crisp
    ///
    /// # Retorno
    ///
    /// Mapa com **todas** as variáveis de saída declaradas:
    /// `Ok(valor)` para as que ativaram, `Err(NoActivation)` para as que
    /// ficaram com agregado identicamente zero.
    ///
    /// # Erros
    ///
    /// [`EvalError::MissingInput`] se qualquer regra referencia um
    /// antecedente ausente de `inputs` — nunca tratado como zero.
    pub fn evaluate(
        base: &RuleBase,
        inputs: &HashMap<String, f64>,
    ) -> Result<HashMap<String, Result<f64, EvalError>>, EvalError> {
        // ── 1. Fuzzificação ─────────────────────────────────────────────
        // Grau de cada termo de cada antecedente vinculado. Entradas para
        // variáveis não referenciadas por regra alguma são inofensivas.
        let mut fuzzified: HashMap<&str, HashMap<String, f64>> =
            HashMap::with_capacity(inputs.len());
        for (name, value) in inputs {
            if let Some(var) = base.antecedent(name) {
                fuzzified.insert(name.as_str(), var.fuzzify(*value));
            }
        }

        // ── 2. Força de disparo ─────────────────────────────────────────
        // Calculada para todas as regras antes de qualquer agregação, para
        // que MissingInput aborte a passada antes de produzir saída parcial.
        let mut strengths = Vec::with_capacity(base.rule_count());
        for (index, rule) in base.rules().iter().enumerate() {
            let strength = firing_strength(&rule.antecedent, &fuzzified)?;
            tracing::trace!(regra = index, forca = strength, "força de disparo");
            strengths.push(strength);
        }

        // ── 3–5. Implicação, agregação e defuzzificação por saída ───────
        let mut outputs = HashMap::with_capacity(base.consequents().len());
        for (name, var) in base.consequents() {
            let xs = var.samples();
            let mut aggregated = vec![0.0f64; xs.len()];

            for (rule, &strength) in base.rules().iter().zip(&strengths) {
                for cons in rule.consequents.iter().filter(|c| &c.variable == name) {
                    // Corte de implicação: a regra nunca ativa o termo acima
                    // de força × peso
                    let cap = strength * cons.weight;
                    if cap == 0.0 {
                        continue;
                    }
                    // Termo garantido pelo build() da base
                    if let Some(mf) = var.term(&cons.term) {
                        for (i, x) in xs.iter().enumerate() {
                            let clipped = cap.min(mf.evaluate(*x));
                            if clipped > aggregated[i] {
                                aggregated[i] = clipped;
                            }
                        }
                    }
                }
            }

            let result = match centroid(&xs, &aggregated) {
                Some(value) => {
                    tracing::debug!(saida = %name, valor = value, "saída defuzzificada");
                    Ok(value)
                }
                None => {
                    tracing::debug!(saida = %name, "agregado sem massa — sem ativação");
                    Err(EvalError::NoActivation(name.clone()))
                }
            };
            outputs.insert(name.clone(), result);
        }

        Ok(outputs)
    }
}

/// Avalia recursivamente a força de disparo de uma árvore de antecedentes.
///
/// Semântica Mamdani: folha = grau fuzzificado do termo; `And` = mínimo;
/// `Or` = máximo; `Not` = 1 − x. Folha sem entrada vinculada é
/// [`EvalError::MissingInput`].
fn firing_strength(
    expr: &Expression,
    fuzzified: &HashMap<&str, HashMap<String, f64>>,
) -> Result<f64, EvalError> {
    match expr {
        Expression::Is { variable, term } => {
            let degrees = fuzzified
                .get(variable.as_str())
                .ok_or_else(|| EvalError::MissingInput(variable.clone()))?;
            // Termo garantido pelo build(); grau zero apenas se a base foi
            // construída fora do builder (impossível pela API pública)
            Ok(degrees.get(term).copied().unwrap_or(0.0))
        }
        Expression::And(l, r) => Ok(f64::min(
            firing_strength(l, fuzzified)?,
            firing_strength(r, fuzzified)?,
        )),
        Expression::Or(l, r) => Ok(f64::max(
            firing_strength(l, fuzzified)?,
            firing_strength(r, fuzzified)?,
        )),
        Expression::Not(e) => Ok(1.0 - firing_strength(e, fuzzified)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Consequent, MembershipFunction, RuleBase, VariableRole};

    /// Base com dois antecedentes e uma saída, para exercitar And/Or.
    fn base_dupla() -> RuleBase {
        let mut b = RuleBase::builder();
        b.declare_variable(VariableRole::Antecedent, "a", 0.0, 10.0, 1.0)
            .unwrap();
        b.add_term(
            "a",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
        )
        .unwrap();
        b.declare_variable(VariableRole::Antecedent, "b", 0.0, 10.0, 1.0)
            .unwrap();
        b.add_term(
            "b",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
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
            Expression::is("a", "alto").and(Expression::is("b", "alto")),
            vec![Consequent::new("y", "alto")],
        );
        b.build().unwrap()
    }

    fn inputs(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    /// E difuso = mínimo dos ramos; OU = máximo; NÃO = 1 − x.
    #[test]
    fn test_firing_strength_operators() {
        let mut fuzz: HashMap<&str, HashMap<String, f64>> = HashMap::new();
        fuzz.insert("a", HashMap::from([("t".to_string(), 0.3)]));
        fuzz.insert("b", HashMap::from([("t".to_string(), 0.8)]));

        let a = Expression::is("a", "t");
        let b = Expression::is("b", "t");

        let and = a.clone().and(b.clone());
        let or = a.clone().or(b.clone());
        let not = a.clone().not();
        assert_eq!(firing_strength(&and, &fuzz).unwrap(), 0.3);
        assert_eq!(firing_strength(&or, &fuzz).unwrap(), 0.8);
        assert!((firing_strength(&not, &fuzz).unwrap() - 0.7).abs() < 1e-12);

        // Comutatividade: a ordem de declaração dos ramos não importa
        let and_inv = b.clone().and(a.clone());
        let or_inv = b.clone().or(a.clone());
        assert_eq!(
            firing_strength(&and, &fuzz).unwrap(),
            firing_strength(&and_inv, &fuzz).unwrap()
        );
        assert_eq!(
            firing_strength(&or, &fuzz).unwrap(),
            firing_strength(&or_inv, &fuzz).unwrap()
        );

        // Associatividade: (a ∧ b) ∧ c == a ∧ (b ∧ c), idem para ∨
        fuzz.insert("c", HashMap::from([("t".to_string(), 0.5)]));
        let c = Expression::is("c", "t");
        let esq = a.clone().and(b.clone()).and(c.clone());
        let dir = a.clone().and(b.clone().and(c.clone()));
        assert_eq!(
            firing_strength(&esq, &fuzz).unwrap(),
            firing_strength(&dir, &fuzz).unwrap()
        );
        let esq = a.clone().or(b.clone()).or(c.clone());
        let dir = a.or(b.or(c));
        assert_eq!(
            firing_strength(&esq, &fuzz).unwrap(),
            firing_strength(&dir, &fuzz).unwrap()
        );
    }

    /// Antecedente referenciado sem valor vinculado aborta a passada.
    #[test]
    fn test_missing_input_aborts() {
        let base = base_dupla();
        let result = MamdaniEngine::evaluate(&base, &inputs(&[("a", 10.0)]));
        assert_eq!(result.unwrap_err(), EvalError::MissingInput("b".into()));
    }

    /// Duas regras na mesma saída agregam por máximo ponto-a-ponto: o
    /// resultado é o corte no máximo das forças, independente da ordem.
    #[test]
    fn test_aggregation_is_pointwise_max() {
        // a=3 dispara a regra 1 a 0.3; b=8 dispara a regra 2 a 0.8
        let mut b = RuleBase::builder();
        b.declare_variable(VariableRole::Antecedent, "a", 0.0, 10.0, 1.0)
            .unwrap();
        b.add_term(
            "a",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
        )
        .unwrap();
        b.declare_variable(VariableRole::Antecedent, "b", 0.0, 10.0, 1.0)
            .unwrap();
        b.add_term(
            "b",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
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
            Expression::is("a", "alto"),
            vec![Consequent::new("y", "alto")],
        );
        b.add_rule(
            Expression::is("b", "alto"),
            vec![Consequent::new("y", "alto")],
        );
        let base = b.build().unwrap();

        let out = MamdaniEngine::evaluate(&base, &inputs(&[("a", 3.0), ("b", 8.0)])).unwrap();
        // Conjunto simétrico cortado a 0.8 — centroide continua no eixo 50
        let y = out["y"].clone().unwrap();
        assert!((y - 50.0).abs() < 1e-6);
    }

    /// Peso de consequente escala o corte de implicação.
    #[test]
    fn test_weight_scales_clip() {
        let mut b = RuleBase::builder();
        b.declare_variable(VariableRole::Antecedent, "a", 0.0, 10.0, 1.0)
            .unwrap();
        b.add_term(
            "a",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
        )
        .unwrap();
        b.declare_variable(VariableRole::Consequent, "y", 0.0, 100.0, 1.0)
            .unwrap();
        // Termo assimétrico: o peso muda o corte e portanto o centroide
        b.add_term(
            "y",
            "alto",
            MembershipFunction::triangular(60.0, 100.0, 100.0).unwrap(),
        )
        .unwrap();
        b.add_rule(
            Expression::is("a", "alto"),
            vec![Consequent::weighted("y", "alto", 0.5)],
        );
        let base = b.build().unwrap();

        // Força plena (a=10 → grau 1) mas peso 0.5: corte em 0.5
        let out = MamdaniEngine::evaluate(&base, &inputs(&[("a", 10.0)])).unwrap();
        let y_ponderado = out["y"].clone().unwrap();

        // Referência: mesmo termo sem peso — corte em 1.0
        let mut b2 = RuleBase::builder();
        b2.declare_variable(VariableRole::Antecedent, "a", 0.0, 10.0, 1.0)
            .unwrap();
        b2.add_term(
            "a",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
        )
        .unwrap();
        b2.declare_variable(VariableRole::Consequent, "y", 0.0, 100.0, 1.0)
            .unwrap();
        b2.add_term(
            "y",
            "alto",
            MembershipFunction::triangular(60.0, 100.0, 100.0).unwrap(),
        )
        .unwrap();
        b2.add_rule(
            Expression::is("a", "alto"),
            vec![Consequent::new("y", "alto")],
        );
        let out2 = MamdaniEngine::evaluate(&b2.build().unwrap(), &inputs(&[("a", 10.0)])).unwrap();
        let y_pleno = out2["y"].clone().unwrap();

        // O corte a 0.5 achata o topo do triângulo assimétrico e puxa o
        // centroide para a esquerda do caso pleno
        assert!(y_ponderado < y_pleno);
    }

    /// Saída que nenhuma regra ativa falha sozinha; as demais computam.
    #[test]
    fn test_per_output_no_activation() {
        let mut b = RuleBase::builder();
        b.declare_variable(VariableRole::Antecedent, "a", 0.0, 10.0, 1.0)
            .unwrap();
        b.add_term(
            "a",
            "alto",
            MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap(),
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
        b.declare_variable(VariableRole::Consequent, "z", 0.0, 100.0, 1.0)
            .unwrap();
        b.add_term(
            "z",
            "alto",
            MembershipFunction::triangular(0.0, 50.0, 100.0).unwrap(),
        )
        .unwrap();
        // Apenas y é alvo de regra; z fica órfã
        b.add_rule(
            Expression::is("a", "alto"),
            vec![Consequent::new("y", "alto")],
        );
        let base = b.build().unwrap();

        let out = MamdaniEngine::evaluate(&base, &inputs(&[("a", 10.0)])).unwrap();
        assert!(out["y"].is_ok());
        assert_eq!(out["z"], Err(EvalError::NoActivation("z".into())));
    }
}
