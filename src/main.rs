#![allow(dead_code)]
//! # Sistema Especialista de Crédito — Encadeamento para Trás
//!
//! **Ponto de entrada** do avaliador de crédito.
//!
//! Carrega o conhecimento (regras + vocabulário), abre uma sessão e conduz
//! o diálogo no console: o motor só pergunta o que não consegue deduzir.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (stderr)
//!   ├── Carrega o conhecimento (--knowledge ou base embutida)
//!   ├── Aplica --goal e --fact
//!   ├── Escolhe o sink (texto, --json, --trace-json)
//!   └── Orchestrator::evaluate(ConsoleOracle, sink)
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Avaliação interativa com a base embutida
//! cargo run
//!
//! # Mostrando o raciocínio, com dois fatos já conhecidos
//! cargo run -- --trace --fact historial_credito=bueno --fact empleo=estable
//!
//! # Relatório em JSON, logs detalhados
//! RUST_LOG=debug cargo run -- --json --knowledge data/credito.json
//! ```

/// Módulo `core` — tipos fundamentais: Proposition, Rule, FactBase, Vocabulary.
mod core;

/// Módulo `error` — erros do domínio (thiserror).
mod error;

/// Módulo `inference` — motor de encadeamento para trás.
mod inference;

/// Módulo `knowledge` — carregamento do documento de regras.
mod knowledge;

/// Módulo `oracle` — fontes externas de fatos (console, roteirizado).
mod oracle;

/// Módulo `orchestrator` — conduz uma avaliação completa.
mod orchestrator;

/// Módulo `presentation` — eventos de rastreamento e sinks.
mod presentation;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::knowledge::Knowledge;
use crate::oracle::ConsoleOracle;
use crate::orchestrator::Orchestrator;
use crate::presentation::{ConsoleSink, JsonLinesSink, TraceSink};

/// Argumentos de linha de comando.
#[derive(Debug, Parser)]
#[command(name = "credit-expert")]
#[command(about = "Sistema experto de aprobación de crédito (encadenamiento hacia atrás)", long_about = None)]
struct Cli {
    /// Documento de conhecimento JSON (padrão: base de crédito embutida)
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Objetivo a provar no lugar do configurado
    #[arg(short, long)]
    goal: Option<String>,

    /// Fato conhecido de antemão (`atributo=valor` ou nome), repetível
    #[arg(short, long = "fact", value_name = "FATO")]
    facts: Vec<String>,

    /// Mostra o raciocínio passo a passo
    #[arg(short, long)]
    trace: bool,

    /// Imprime o relatório final como JSON
    #[arg(long)]
    json: bool,

    /// Imprime cada evento de rastreamento como uma linha JSON
    #[arg(long)]
    trace_json: bool,
}

/// Função principal do avaliador.
///
/// # Erros
///
/// Retorna erro se o conhecimento não puder ser carregado, se um `--fact`
/// ou `--goal` for malformado, ou se a resolução encontrar um ciclo ou
/// exceder a profundidade máxima.
fn main() -> Result<()> {
    // Logs em stderr para não misturar com o diálogo.
    // Exemplo: RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut knowledge = match &cli.knowledge {
        Some(path) => Knowledge::load(path)?,
        None => Knowledge::builtin()?,
    };
    if let Some(goal) = &cli.goal {
        knowledge
            .set_goal(goal)
            .with_context(|| format!("Objetivo inválido: {goal}"))?;
    }
    for fact in &cli.facts {
        knowledge
            .assume(fact)
            .with_context(|| format!("Fato inválido: {fact}"))?;
    }

    let textual = !cli.json && !cli.trace_json;
    if textual {
        if let Some(title) = &knowledge.title {
            println!("\n{title}");
            println!("{}", "-".repeat(title.chars().count()));
        }
        println!("Analizando solicitud...");
    }

    let mut sink: Box<dyn TraceSink> = if cli.trace_json {
        Box::new(JsonLinesSink::new(io::stdout()))
    } else if cli.json {
        Box::new(JsonLinesSink::summary_only(io::stdout()))
    } else {
        Box::new(ConsoleSink::new(io::stdout(), cli.trace))
    };
    let mut oracle = ConsoleOracle::stdio();

    let orchestrator = Orchestrator::new(knowledge);
    let report = orchestrator
        .evaluate(&mut oracle, sink.as_mut())
        .context("Falha na avaliação")?;

    tracing::debug!(
        session = %report.session,
        facts = report.facts.len(),
        "Relatório emitido"
    );
    Ok(())
}
