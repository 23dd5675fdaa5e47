//! # Presets — Configurações de Risco Embarcadas
//!
//! As avaliações de risco que o sistema oferece, cada uma expressa como
//! uma **configuração declarativa** de [`RuleBase`] — variáveis, termos e
//! regras — em vez de um avaliador copiado-e-colado. Quem carrega e agrega
//! as estatísticas (proporções, hora do dia, inclinação de regressão) é o
//! chamador; aqui só entra a parte difusa.
//!
//! | Preset | Entradas | Saída |
//! |--------|----------|-------|
//! | [`victim_probability`] | hora, sexo | probabilidade (0–100) |
//! | [`violent_crime_alert`] | hora, risco_zona | nivel_alerta (0–100) |
//! | [`vulnerability_level`] | idade, risco_sexo, risco_zona | vulnerabilidade (0–100) |
//! | [`trend_alert`] | tendencia (inclinação mensal) | nivel_alerta (0–100) |
//! | [`zone_danger`] | ocorrencias, gravidade | perigo (0–1) |
//!
//! Cada construtor devolve uma base pronta para ser congelada em `Arc` e
//! compartilhada entre sessões.

use crate::core::{Consequent, Expression, MembershipFunction, RuleBase, VariableRole};
use crate::error::ConstructionError;

/// Sexo da potencial vítima, usado por [`victim_probability`] para
/// selecionar o termo do antecedente `sexo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Termo linguístico correspondente na variável `sexo`.
    pub fn term(&self) -> &'static str {
        match self {
            Sex::Male => "homem",
            Sex::Female => "mulher",
        }
    }

    /// Codificação crisp do sexo para vincular na sessão (0 = homem,
    /// 1 = mulher).
    pub fn crisp(&self) -> f64 {
        match self {
            Sex::Male => 0.0,
            Sex::Female => 1.0,
        }
    }
}

/// Termo de probabilidade a partir da frequência relativa de um delito.
///
/// Limiares do domínio: acima de 0.5 é alta, acima de 0.2 é média, o
/// resto é baixa.
fn probability_term(frequency: f64) -> &'static str {
    if frequency > 0.5 {
        "alta"
    } else if frequency > 0.2 {
        "media"
    } else {
        "baixa"
    }
}

/// Probabilidade de vitimização por hora e sexo.
///
/// Antecedentes:
/// - `hora` (0–23): `madrugada` trap(0,0,6,9), `dia` trap(6,9,18,21),
///   `noite` trap(18,21,23,23)
/// - `sexo` (0–1): `homem` tri(0,0,1), `mulher` tri(0,1,1)
///
/// Consequente: `probabilidade` (0–100) com `baixa` tri(0,0,40), `media`
/// tri(30,50,70), `alta` tri(60,100,100).
///
/// Uma regra por frequência relativa observada de delito: período noturno
/// (`madrugada` OU `noite`) E o sexo dado ativam o termo de probabilidade
/// escolhido por [`probability_term`]. Com `frequencies` vazio a base não
/// tem regras e toda passada termina em
/// [`NoActivation`](crate::error::EvalError::NoActivation).
pub fn victim_probability(
    sex: Sex,
    frequencies: &[f64],
) -> Result<RuleBase, ConstructionError> {
    let mut b = RuleBase::builder();

    b.declare_variable(VariableRole::Antecedent, "hora", 0.0, 23.0, 1.0)?;
    b.add_term(
        "hora",
        "madrugada",
        MembershipFunction::trapezoidal(0.0, 0.0, 6.0, 9.0)?,
    )?;
    b.add_term(
        "hora",
        "dia",
        MembershipFunction::trapezoidal(6.0, 9.0, 18.0, 21.0)?,
    )?;
    b.add_term(
        "hora",
        "noite",
        MembershipFunction::trapezoidal(18.0, 21.0, 23.0, 23.0)?,
    )?;

    b.declare_variable(VariableRole::Antecedent, "sexo", 0.0, 1.0, 0.01)?;
    b.add_term("sexo", "homem", MembershipFunction::triangular(0.0, 0.0, 1.0)?)?;
    b.add_term("sexo", "mulher", MembershipFunction::triangular(0.0, 1.0, 1.0)?)?;

    b.declare_variable(VariableRole::Consequent, "probabilidade", 0.0, 100.0, 1.0)?;
    b.add_term(
        "probabilidade",
        "baixa",
        MembershipFunction::triangular(0.0, 0.0, 40.0)?,
    )?;
    b.add_term(
        "probabilidade",
        "media",
        MembershipFunction::triangular(30.0, 50.0, 70.0)?,
    )?;
    b.add_term(
        "probabilidade",
        "alta",
        MembershipFunction::triangular(60.0, 100.0, 100.0)?,
    )?;

    // O período noturno é a união de dois termos — OU difuso, mesmo máximo
    // ponto-a-ponto de uma pertinência composta
    for frequency in frequencies {
        b.add_rule(
            Expression::is("hora", "madrugada")
                .or(Expression::is("hora", "noite"))
                .and(Expression::is("sexo", sex.term())),
            vec![Consequent::new("probabilidade", probability_term(*frequency))],
        );
    }

    b.build()
}

/// Nível de alerta por delito violento, por hora e risco da zona.
///
/// Antecedentes: `hora` (0–23) em quatro faixas (`madrugada`, `manha`,
/// `tarde`, `noite`) e `risco_zona` (0–1, frequência relativa de delitos
/// violentos na zona). Consequente: `nivel_alerta` (0–100).
///
/// As três últimas regras dependem só da zona — garantem alguma ativação
/// em qualquer hora do dia.
pub fn violent_crime_alert() -> Result<RuleBase, ConstructionError> {
    let mut b = RuleBase::builder();

    b.declare_variable(VariableRole::Antecedent, "hora", 0.0, 23.0, 1.0)?;
    b.add_term(
        "hora",
        "madrugada",
        MembershipFunction::trapezoidal(0.0, 0.0, 4.0, 6.0)?,
    )?;
    b.add_term(
        "hora",
        "manha",
        MembershipFunction::trapezoidal(5.0, 7.0, 10.0, 12.0)?,
    )?;
    b.add_term(
        "hora",
        "tarde",
        MembershipFunction::trapezoidal(12.0, 14.0, 17.0, 18.0)?,
    )?;
    b.add_term(
        "hora",
        "noite",
        MembershipFunction::trapezoidal(18.0, 20.0, 23.0, 23.0)?,
    )?;

    b.declare_variable(VariableRole::Antecedent, "risco_zona", 0.0, 1.0, 0.01)?;
    add_risk_terms(&mut b, "risco_zona")?;

    b.declare_variable(VariableRole::Consequent, "nivel_alerta", 0.0, 100.0, 1.0)?;
    add_level_terms(&mut b, "nivel_alerta")?;

    b.add_rule(
        Expression::is("hora", "noite").and(Expression::is("risco_zona", "alto")),
        vec![Consequent::new("nivel_alerta", "alto")],
    );
    b.add_rule(
        Expression::is("hora", "madrugada").and(Expression::is("risco_zona", "medio")),
        vec![Consequent::new("nivel_alerta", "medio")],
    );
    b.add_rule(
        Expression::is("hora", "manha").and(Expression::is("risco_zona", "baixo")),
        vec![Consequent::new("nivel_alerta", "baixo")],
    );
    b.add_rule(
        Expression::is("hora", "tarde").and(Expression::is("risco_zona", "medio")),
        vec![Consequent::new("nivel_alerta", "medio")],
    );
    b.add_rule(
        Expression::is("risco_zona", "alto"),
        vec![Consequent::new("nivel_alerta", "alto")],
    );
    b.add_rule(
        Expression::is("risco_zona", "medio"),
        vec![Consequent::new("nivel_alerta", "medio")],
    );
    b.add_rule(
        Expression::is("risco_zona", "baixo"),
        vec![Consequent::new("nivel_alerta", "baixo")],
    );

    b.build()
}

/// Nível de vulnerabilidade individual por idade, sexo e zona.
///
/// Antecedentes: `idade` (0–100: `jovem` tri(0,15,30), `adulto`
/// tri(25,40,60), `idoso` tri(55,75,100)), `risco_sexo` e `risco_zona`
/// (0–1, proporções observadas). Consequente: `vulnerabilidade` (0–100)
/// em cinco níveis, de `muito_baixa` a `muito_alta`.
///
/// A regra puramente etária (`jovem` OU `adulto` OU `idoso` → `media`)
/// ancora a saída no meio da escala para qualquer idade válida; as demais
/// dez regras puxam para cima ou para baixo conforme as proporções.
pub fn vulnerability_level() -> Result<RuleBase, ConstructionError> {
    let mut b = RuleBase::builder();

    b.declare_variable(VariableRole::Antecedent, "idade", 0.0, 100.0, 1.0)?;
    b.add_term(
        "idade",
        "jovem",
        MembershipFunction::triangular(0.0, 15.0, 30.0)?,
    )?;
    b.add_term(
        "idade",
        "adulto",
        MembershipFunction::triangular(25.0, 40.0, 60.0)?,
    )?;
    b.add_term(
        "idade",
        "idoso",
        MembershipFunction::triangular(55.0, 75.0, 100.0)?,
    )?;

    b.declare_variable(VariableRole::Antecedent, "risco_sexo", 0.0, 1.0, 0.01)?;
    add_risk_terms(&mut b, "risco_sexo")?;
    b.declare_variable(VariableRole::Antecedent, "risco_zona", 0.0, 1.0, 0.01)?;
    add_risk_terms(&mut b, "risco_zona")?;

    b.declare_variable(VariableRole::Consequent, "vulnerabilidade", 0.0, 100.0, 1.0)?;
    b.add_term(
        "vulnerabilidade",
        "muito_baixa",
        MembershipFunction::triangular(0.0, 0.0, 20.0)?,
    )?;
    b.add_term(
        "vulnerabilidade",
        "baixa",
        MembershipFunction::triangular(10.0, 25.0, 40.0)?,
    )?;
    b.add_term(
        "vulnerabilidade",
        "media",
        MembershipFunction::triangular(30.0, 50.0, 70.0)?,
    )?;
    b.add_term(
        "vulnerabilidade",
        "alta",
        MembershipFunction::triangular(60.0, 75.0, 90.0)?,
    )?;
    b.add_term(
        "vulnerabilidade",
        "muito_alta",
        MembershipFunction::triangular(80.0, 100.0, 100.0)?,
    )?;

    let idade = |t: &str| Expression::is("idade", t);
    let sexo = |t: &str| Expression::is("risco_sexo", t);
    let zona = |t: &str| Expression::is("risco_zona", t);
    let nivel = |t: &str| vec![Consequent::new("vulnerabilidade", t)];

    b.add_rule(
        idade("jovem").and(sexo("alto")).and(zona("alto")),
        nivel("muito_alta"),
    );
    b.add_rule(
        idade("jovem").and(sexo("medio")).and(zona("alto")),
        nivel("alta"),
    );
    b.add_rule(
        idade("adulto").and(sexo("medio")).and(zona("medio")),
        nivel("media"),
    );
    b.add_rule(
        idade("idoso").and(sexo("alto")).and(zona("medio")),
        nivel("alta"),
    );
    b.add_rule(
        idade("idoso").and(sexo("alto")).and(zona("alto")),
        nivel("muito_alta"),
    );
    b.add_rule(
        idade("jovem").or(idade("adulto")).or(idade("idoso")),
        nivel("media"),
    );
    b.add_rule(
        idade("idoso").and(sexo("medio")).and(zona("baixo")),
        nivel("baixa"),
    );
    b.add_rule(
        idade("idoso").and(sexo("baixo")).and(zona("baixo")),
        nivel("muito_baixa"),
    );
    b.add_rule(sexo("baixo").and(zona("baixo")), nivel("muito_baixa"));
    b.add_rule(sexo("medio").and(zona("medio")), nivel("media"));
    b.add_rule(sexo("alto").and(zona("alto")), nivel("muito_alta"));

    b.build()
}

/// Alerta por tendência de crescimento mensal de delitos.
///
/// Antecedente: `tendencia` (−10 a 10, inclinação da regressão linear das
/// contagens mensais): `estavel` tri(−1,0,1), `crescente` tri(0,3,6),
/// `acelerada` tri(5,10,10). Consequente: `nivel_alerta` (0–100).
pub fn trend_alert() -> Result<RuleBase, ConstructionError> {
    let mut b = RuleBase::builder();

    b.declare_variable(VariableRole::Antecedent, "tendencia", -10.0, 10.0, 1.0)?;
    b.add_term(
        "tendencia",
        "estavel",
        MembershipFunction::triangular(-1.0, 0.0, 1.0)?,
    )?;
    b.add_term(
        "tendencia",
        "crescente",
        MembershipFunction::triangular(0.0, 3.0, 6.0)?,
    )?;
    b.add_term(
        "tendencia",
        "acelerada",
        MembershipFunction::triangular(5.0, 10.0, 10.0)?,
    )?;

    b.declare_variable(VariableRole::Consequent, "nivel_alerta", 0.0, 100.0, 1.0)?;
    add_level_terms(&mut b, "nivel_alerta")?;

    b.add_rule(
        Expression::is("tendencia", "estavel"),
        vec![Consequent::new("nivel_alerta", "baixo")],
    );
    b.add_rule(
        Expression::is("tendencia", "crescente"),
        vec![Consequent::new("nivel_alerta", "medio")],
    );
    b.add_rule(
        Expression::is("tendencia", "acelerada"),
        vec![Consequent::new("nivel_alerta", "alto")],
    );

    b.build()
}

/// Nível de perigo de uma zona por volume e gravidade das ocorrências.
///
/// Antecedentes: `ocorrencias` (0–100, contagem na zona) e `gravidade`
/// (0–10, gravidade média). Consequente: `perigo` em escala 0–1 com
/// resolução 0.1 — a única saída do catálogo que não usa a escala 0–100.
pub fn zone_danger() -> Result<RuleBase, ConstructionError> {
    let mut b = RuleBase::builder();

    b.declare_variable(VariableRole::Antecedent, "ocorrencias", 0.0, 100.0, 1.0)?;
    b.add_term(
        "ocorrencias",
        "baixo",
        MembershipFunction::triangular(0.0, 0.0, 30.0)?,
    )?;
    b.add_term(
        "ocorrencias",
        "medio",
        MembershipFunction::triangular(20.0, 50.0, 80.0)?,
    )?;
    b.add_term(
        "ocorrencias",
        "alto",
        MembershipFunction::triangular(60.0, 100.0, 100.0)?,
    )?;

    b.declare_variable(VariableRole::Antecedent, "gravidade", 0.0, 10.0, 1.0)?;
    b.add_term(
        "gravidade",
        "leve",
        MembershipFunction::triangular(0.0, 0.0, 3.0)?,
    )?;
    b.add_term(
        "gravidade",
        "moderada",
        MembershipFunction::triangular(2.0, 5.0, 8.0)?,
    )?;
    b.add_term(
        "gravidade",
        "grave",
        MembershipFunction::triangular(6.0, 10.0, 10.0)?,
    )?;

    b.declare_variable(VariableRole::Consequent, "perigo", 0.0, 1.0, 0.1)?;
    b.add_term(
        "perigo",
        "baixo",
        MembershipFunction::triangular(0.0, 0.0, 0.5)?,
    )?;
    b.add_term(
        "perigo",
        "medio",
        MembershipFunction::triangular(0.3, 0.5, 0.7)?,
    )?;
    b.add_term(
        "perigo",
        "alto",
        MembershipFunction::triangular(0.5, 1.0, 1.0)?,
    )?;

    b.add_rule(
        Expression::is("ocorrencias", "alto").and(Expression::is("gravidade", "grave")),
        vec![Consequent::new("perigo", "alto")],
    );
    b.add_rule(
        Expression::is("ocorrencias", "medio").and(Expression::is("gravidade", "moderada")),
        vec![Consequent::new("perigo", "medio")],
    );
    b.add_rule(
        Expression::is("ocorrencias", "baixo").and(Expression::is("gravidade", "leve")),
        vec![Consequent::new("perigo", "baixo")],
    );

    b.build()
}

/// Três termos de risco em escala 0–1: `baixo` tri(0,0,0.3), `medio`
/// tri(0.2,0.5,0.7), `alto` tri(0.6,1,1) — compartilhados por todas as
/// variáveis de proporção do catálogo.
fn add_risk_terms(
    b: &mut crate::core::RuleBaseBuilder,
    variable: &str,
) -> Result<(), ConstructionError> {
    b.add_term(
        variable,
        "baixo",
        MembershipFunction::triangular(0.0, 0.0, 0.3)?,
    )?;
    b.add_term(
        variable,
        "medio",
        MembershipFunction::triangular(0.2, 0.5, 0.7)?,
    )?;
    b.add_term(
        variable,
        "alto",
        MembershipFunction::triangular(0.6, 1.0, 1.0)?,
    )?;
    Ok(())
}

/// Três níveis de alerta em escala 0–100: `baixo` tri(0,0,40), `medio`
/// tri(30,50,70), `alto` tri(60,100,100).
fn add_level_terms(
    b: &mut crate::core::RuleBaseBuilder,
    variable: &str,
) -> Result<(), ConstructionError> {
    b.add_term(
        variable,
        "baixo",
        MembershipFunction::triangular(0.0, 0.0, 40.0)?,
    )?;
    b.add_term(
        variable,
        "medio",
        MembershipFunction::triangular(30.0, 50.0, 70.0)?,
    )?;
    b.add_term(
        variable,
        "alto",
        MembershipFunction::triangular(60.0, 100.0, 100.0)?,
    )?;
    Ok(())
}
