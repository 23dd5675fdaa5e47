//! # Demo — Avaliações de Risco com o Motor Difuso
//!
//! Binário de demonstração: constrói as bases do catálogo
//! ([`presets`](risco_difuso::presets)), avalia cenários de exemplo com
//! entradas que o chamador real derivaria das estatísticas (proporções,
//! hora do dia, inclinação de tendência) e imprime o resumo em JSON.
//!
//! A biblioteca em si não faz I/O algum — logging estruturado e impressão
//! acontecem só aqui.
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Executar com o passo-a-passo do motor
//! RUST_LOG=debug cargo run
//! ```

use std::sync::Arc;

use anyhow::Result;
use chrono::Timelike;
use rayon::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use risco_difuso::presets::{self, Sex};
use risco_difuso::{EvalError, RuleBase, Session};

/// Avalia uma sessão descartável sobre uma base compartilhada.
fn run_scenario(
    base: &Arc<RuleBase>,
    inputs: &[(&str, f64)],
    output: &str,
) -> Result<Result<f64, EvalError>> {
    let mut session = Session::new(base.clone());
    for (name, value) in inputs {
        session.bind_input(name, *value)?;
    }
    Ok(session.compute()?.crisp(output))
}

/// Converte a saída de um cenário em JSON: número ou `null` com motivo.
fn to_json(result: &Result<f64, EvalError>) -> serde_json::Value {
    match result {
        Ok(value) => json!({ "valor": value }),
        Err(e) => json!({ "valor": null, "motivo": e.to_string() }),
    }
}

fn main() -> Result<()> {
    // Aceita RUST_LOG para configurar o nível, como de costume
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🌆 Risco Difuso — demo do motor Mamdani");

    // ── Probabilidade de vitimização na hora atual ──────────────────────
    // Frequências relativas de exemplo dos delitos observados na zona
    let hora_atual = chrono::Local::now().hour() as f64;
    let vitimizacao = Arc::new(presets::victim_probability(
        Sex::Female,
        &[0.55, 0.25, 0.10],
    )?);
    let probabilidade = run_scenario(
        &vitimizacao,
        &[("hora", hora_atual), ("sexo", Sex::Female.crisp())],
        "probabilidade",
    )?;
    match &probabilidade {
        Ok(v) => tracing::info!(hora = hora_atual, valor = v, "probabilidade de vitimização"),
        // De dia as regras noturnas não disparam — saída sem ativação é
        // um resultado legítimo, não um bug
        Err(e) => tracing::info!(hora = hora_atual, motivo = %e, "sem ativação para a hora atual"),
    }

    // ── Vulnerabilidade individual ──────────────────────────────────────
    let vulnerabilidade_base = Arc::new(presets::vulnerability_level()?);
    let vulnerabilidade = run_scenario(
        &vulnerabilidade_base,
        &[("idade", 65.0), ("risco_sexo", 0.72), ("risco_zona", 0.38)],
        "vulnerabilidade",
    )?;

    // ── Alerta por tendência mensal ─────────────────────────────────────
    let tendencia_base = Arc::new(presets::trend_alert()?);
    let tendencia = run_scenario(&tendencia_base, &[("tendencia", 4.2)], "nivel_alerta")?;

    // ── Perigo da zona ──────────────────────────────────────────────────
    let perigo_base = Arc::new(presets::zone_danger()?);
    let perigo = run_scenario(
        &perigo_base,
        &[("ocorrencias", 37.0), ("gravidade", 6.5)],
        "perigo",
    )?;

    // ── Varredura paralela: alerta por delito violento, hora a hora ─────
    // Uma base imutável, 24 sessões independentes em paralelo — o modelo
    // de concorrência do motor: Arc compartilhado, sessão por chamador
    let alerta_base = Arc::new(presets::violent_crime_alert()?);
    let varredura: Vec<serde_json::Value> = (0..24)
        .into_par_iter()
        .map(|hora| {
            let resultado = run_scenario(
                &alerta_base,
                &[("hora", f64::from(hora)), ("risco_zona", 0.65)],
                "nivel_alerta",
            )?;
            Ok(json!({ "hora": hora, "nivel_alerta": to_json(&resultado) }))
        })
        .collect::<Result<_>>()?;

    let resumo = json!({
        "probabilidade_vitimizacao": to_json(&probabilidade),
        "vulnerabilidade": to_json(&vulnerabilidade),
        "alerta_tendencia": to_json(&tendencia),
        "perigo_zona": to_json(&perigo),
        "varredura_alerta_por_hora": varredura,
    });
    println!("{}", serde_json::to_string_pretty(&resumo)?);

    tracing::info!("✅ demo concluída");
    Ok(())
}
