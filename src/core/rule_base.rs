//! # RuleBase — Base de Regras Imutável
//!
//! A [`RuleBase`] é o contêiner central do motor: os dicionários de
//! variáveis (antecedentes e consequentes separados) e a sequência
//! ordenada de regras. É construída **uma única vez** via
//! [`RuleBaseBuilder`] e é somente-leitura daí em diante — pode ser
//! compartilhada por `Arc` entre quantos chamadores concorrentes forem
//! necessários, sem lock algum, porque nenhum método a muta.
//!
//! ## Validação Fail-Fast
//!
//! Toda referência `(variável, termo)` usada por qualquer regra precisa
//! existir no dicionário do papel correto **no momento do `build()`** —
//! uma violação é [`ConstructionError`] na construção, nunca surpresa em
//! tempo de consulta. Depois que uma `RuleBase` existe, o motor pode
//! assumir que toda referência resolve.
//!
//! ## Exemplo
//!
//! ```rust
//! use risco_difuso::core::{
//!     Consequent, Expression, MembershipFunction, RuleBase, VariableRole,
//! };
//!
//! let mut b = RuleBase::builder();
//! b.declare_variable(VariableRole::Antecedent, "hora", 0.0, 23.0, 1.0)?;
//! b.add_term("hora", "noite", MembershipFunction::trapezoidal(18.0, 20.0, 23.0, 23.0)?)?;
//! b.declare_variable(VariableRole::Consequent, "nivel_alerta", 0.0, 100.0, 1.0)?;
//! b.add_term("nivel_alerta", "alto", MembershipFunction::triangular(60.0, 100.0, 100.0)?)?;
//! b.add_rule(
//!     Expression::is("hora", "noite"),
//!     vec![Consequent::new("nivel_alerta", "alto")],
//! );
//! let base = b.build()?;
//! assert_eq!(base.rule_count(), 1);
//! # Ok::<(), risco_difuso::error::ConstructionError>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::membership::MembershipFunction;
use super::rule::{Consequent, Rule};
use super::variable::{LinguisticVariable, VariableRole};
use crate::error::ConstructionError;

/// Base de regras validada e imutável.
///
/// Só é obtida por [`RuleBaseBuilder::build()`], que garante os
/// invariantes; não há nenhum método de mutação. `Send + Sync` por
/// construção — compartilhe por `Arc<RuleBase>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuleBase {
    antecedents: HashMap<String, LinguisticVariable>,
    consequents: HashMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Inicia um builder vazio.
    pub fn builder() -> RuleBaseBuilder {
        RuleBaseBuilder::new()
    }

    /// Variável de entrada pelo nome.
    pub fn antecedent(&self, name: &str) -> Option<&LinguisticVariable> {
        self.antecedents.get(name)
    }

    /// Variável de saída pelo nome.
    pub fn consequent(&self, name: &str) -> Option<&LinguisticVariable> {
        self.consequents.get(name)
    }

    /// Dicionário completo de antecedentes.
    pub fn antecedents(&self) -> &HashMap<String, LinguisticVariable> {
        &self.antecedents
    }

    /// Dicionário completo de consequentes.
    pub fn consequents(&self) -> &HashMap<String, LinguisticVariable> {
        &self.consequents
    }

    /// Sequência ordenada de regras.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Número de regras da base.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Builder mutável da [`RuleBase`] — declara variáveis, registra termos,
/// acumula regras e valida tudo no [`build()`](RuleBaseBuilder::build).
///
/// Erros de referência em `add_term` são imediatos (a variável precisa
/// existir antes do termo); erros de referência em regras são adiados para
/// o `build()`, onde a base inteira é conhecida.
#[derive(Debug, Default)]
pub struct RuleBaseBuilder {
    antecedents: HashMap<String, LinguisticVariable>,
    consequents: HashMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
}

impl RuleBaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declara uma variável linguística no papel dado.
    ///
    /// # Erros
    ///
    /// - [`ConstructionError::DuplicateVariable`] se o nome já existe no
    ///   mesmo papel (papéis diferentes podem repetir nomes)
    /// - [`ConstructionError::InvalidDomain`] /
    ///   [`ConstructionError::InvalidResolution`] para parâmetros inválidos
    pub fn declare_variable(
        &mut self,
        role: VariableRole,
        name: &str,
        min: f64,
        max: f64,
        resolution: f64,
    ) -> Result<(), ConstructionError> {
        let dict = match role {
            VariableRole::Antecedent => &mut self.antecedents,
            VariableRole::Consequent => &mut self.consequents,
        };
        if dict.contains_key(name) {
            return Err(ConstructionError::DuplicateVariable {
                name: name.to_string(),
                role,
            });
        }
        let var = LinguisticVariable::new(name, role, min, max, resolution)?;
        dict.insert(name.to_string(), var);
        Ok(())
    }

    /// Registra um termo em uma variável já declarada.
    ///
    /// Procura o nome primeiro entre os antecedentes, depois entre os
    /// consequentes (nomes repetidos entre papéis recebem o termo no
    /// antecedente — declare nomes distintos se precisar dos dois).
    ///
    /// # Erros
    ///
    /// [`ConstructionError::UnknownVariable`] se o nome não foi declarado.
    pub fn add_term(
        &mut self,
        variable: &str,
        term: &str,
        mf: MembershipFunction,
    ) -> Result<(), ConstructionError> {
        let var = self
            .antecedents
            .get_mut(variable)
            .or_else(|| self.consequents.get_mut(variable))
            .ok_or_else(|| ConstructionError::UnknownVariable {
                name: variable.to_string(),
            })?;
        var.add_term(term, mf);
        Ok(())
    }

    /// Acumula uma regra. As referências são validadas no
    /// [`build()`](RuleBaseBuilder::build).
    pub fn add_rule(&mut self, antecedent: Expression, consequents: Vec<Consequent>) -> &mut Self {
        self.rules.push(Rule::new(antecedent, consequents));
        self
    }

    /// Valida a base inteira e a congela em uma [`RuleBase`] imutável.
    ///
    /// Verificações, por regra:
    ///
    /// 1. ao menos um consequente;
    /// 2. cada folha do antecedente referencia uma variável **de entrada**
    ///    declarada ([`RoleMismatch`](ConstructionError::RoleMismatch) se o
    ///    nome só existe como saída) com o termo existente;
    /// 3. cada consequente referencia uma variável **de saída** declarada
    ///    com o termo existente e peso em (0, 1].
    pub fn build(self) -> Result<RuleBase, ConstructionError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.consequents.is_empty() {
                return Err(ConstructionError::EmptyConsequents { index });
            }

            for (variable, term) in rule.antecedent.propositions() {
                let var = match self.antecedents.get(variable) {
                    Some(v) => v,
                    None if self.consequents.contains_key(variable) => {
                        return Err(ConstructionError::RoleMismatch {
                            variable: variable.to_string(),
                            expected: VariableRole::Antecedent,
                        });
                    }
                    None => {
                        return Err(ConstructionError::UnknownVariable {
                            name: variable.to_string(),
                        });
                    }
                };
                if var.term(term).is_none() {
                    return Err(ConstructionError::UnknownTerm {
                        variable: variable.to_string(),
                        term: term.to_string(),
                    });
                }
            }

            for cons in &rule.consequents {
                let var = match self.consequents.get(&cons.variable) {
                    Some(v) => v,
                    None if self.antecedents.contains_key(&cons.variable) => {
                        return Err(ConstructionError::RoleMismatch {
                            variable: cons.variable.clone(),
                            expected: VariableRole::Consequent,
                        });
                    }
                    None => {
                        return Err(ConstructionError::UnknownVariable {
                            name: cons.variable.clone(),
                        });
                    }
                };
                if var.term(&cons.term).is_none() {
                    return Err(ConstructionError::UnknownTerm {
                        variable: cons.variable.clone(),
                        term: cons.term.clone(),
                    });
                }
                if !cons.weight.is_finite() || cons.weight <= 0.0 || cons.weight > 1.0 {
                    return Err(ConstructionError::InvalidWeight {
                        variable: cons.variable.clone(),
                        term: cons.term.clone(),
                        weight: cons.weight,
                    });
                }
            }
        }

        tracing::debug!(
            antecedentes = self.antecedents.len(),
            consequentes = self.consequents.len(),
            regras = self.rules.len(),
            "base de regras validada e congelada"
        );

        Ok(RuleBase {
            antecedents: self.antecedents,
            consequents: self.consequents,
            rules: self.rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_minimo() -> RuleBaseBuilder {
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
        b
    }

    /// Base mínima constrói e congela com as contagens esperadas.
    #[test]
    fn test_build_ok() {
        let mut b = builder_minimo();
        b.add_rule(
            Expression::is("x", "cheio"),
            vec![Consequent::new("y", "alto")],
        );
        let base = b.build().unwrap();
        assert_eq!(base.rule_count(), 1);
        assert!(base.antecedent("x").is_some());
        assert!(base.consequent("y").is_some());
        assert!(base.antecedent("y").is_none());
    }

    /// Variável desconhecida em regra é erro de construção, não de consulta.
    #[test]
    fn test_unknown_variable_in_rule() {
        let mut b = builder_minimo();
        b.add_rule(
            Expression::is("nao_existe", "cheio"),
            vec![Consequent::new("y", "alto")],
        );
        assert_eq!(
            b.build().unwrap_err(),
            ConstructionError::UnknownVariable {
                name: "nao_existe".into()
            }
        );
    }

    /// Termo desconhecido em variável conhecida também falha no build.
    #[test]
    fn test_unknown_term_in_rule() {
        let mut b = builder_minimo();
        b.add_rule(
            Expression::is("x", "vazio"),
            vec![Consequent::new("y", "alto")],
        );
        assert!(matches!(
            b.build().unwrap_err(),
            ConstructionError::UnknownTerm { .. }
        ));
    }

    /// Antecedente apontando para variável de saída é papel incorreto.
    #[test]
    fn test_role_mismatch() {
        let mut b = builder_minimo();
        b.add_rule(
            Expression::is("y", "alto"),
            vec![Consequent::new("y", "alto")],
        );
        assert!(matches!(
            b.build().unwrap_err(),
            ConstructionError::RoleMismatch { .. }
        ));
    }

    /// Pesos fora de (0, 1] são rejeitados.
    #[test]
    fn test_invalid_weight() {
        for w in [0.0, -0.5, 1.5] {
            let mut b = builder_minimo();
            b.add_rule(
                Expression::is("x", "cheio"),
                vec![Consequent::weighted("y", "alto", w)],
            );
            assert!(matches!(
                b.build().unwrap_err(),
                ConstructionError::InvalidWeight { .. }
            ));
        }
    }

    /// Regra sem consequentes é rejeitada.
    #[test]
    fn test_empty_consequents() {
        let mut b = builder_minimo();
        b.add_rule(Expression::is("x", "cheio"), vec![]);
        assert_eq!(
            b.build().unwrap_err(),
            ConstructionError::EmptyConsequents { index: 0 }
        );
    }

    /// Nome duplicado no mesmo papel é rejeitado; em papéis diferentes, não.
    #[test]
    fn test_duplicate_variable() {
        let mut b = builder_minimo();
        assert!(matches!(
            b.declare_variable(VariableRole::Antecedent, "x", 0.0, 1.0, 0.1),
            Err(ConstructionError::DuplicateVariable { .. })
        ));
        // mesmo nome no outro papel é permitido
        b.declare_variable(VariableRole::Consequent, "x", 0.0, 1.0, 0.1)
            .unwrap();
    }

    /// Termo em variável não declarada falha imediatamente.
    #[test]
    fn test_add_term_unknown_variable() {
        let mut b = RuleBase::builder();
        let mf = MembershipFunction::triangular(0.0, 1.0, 2.0).unwrap();
        assert!(matches!(
            b.add_term("fantasma", "t", mf),
            Err(ConstructionError::UnknownVariable { .. })
        ));
    }
}
