//! # Sinks de Texto e JSON
//!
//! [`ConsoleSink`] imprime o rastreamento (opcional) e o resumo final em
//! espanhol, no formato do sistema especialista:
//!
//! ```text
//! Verificando el objetivo: 'credito_aprobado'...
//!   -> Encontrada una regla (R2) para 'credito_aprobado'. Condiciones a evaluar: [historial_credito=bueno, empleo=estable]
//!   -> El hecho 'historial_credito=bueno' es un dato conocido.
//!   ...
//! === RESULTADO ===
//! ✓ Crédito APROBADO
//!
//! Hechos determinantes:
//! - historial credito: bueno
//! - credito aprobado
//! ```
//!
//! [`JsonLinesSink`] emite cada evento (e o resumo) como uma linha JSON.

use std::io::Write;

use super::{SessionReport, TraceEvent, TraceSink};
use crate::core::FactValue;
use crate::oracle::console::humanize;
use crate::oracle::Answer;

/// Sink de texto legível.
pub struct ConsoleSink<W> {
    output: W,
    show_trace: bool,
    /// Profundidade do objetivo aberto mais recente.
    depth: usize,
}

impl<W: Write> ConsoleSink<W> {
    /// `show_trace = false` imprime apenas o resumo final.
    pub fn new(output: W, show_trace: bool) -> Self {
        Self {
            output,
            show_trace,
            depth: 0,
        }
    }

    /// Devolve o escritor.
    pub fn into_output(self) -> W {
        self.output
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            tracing::debug!(error = %e, "ConsoleSink: falha de escrita ignorada");
        }
    }

    /// Linha `-> ...` no nível do objetivo corrente.
    fn step(&mut self, text: std::fmt::Arguments<'_>) {
        let indent = "  ".repeat(self.depth + 1);
        self.line(format_args!("{}-> {}", indent, text))
    }
}

impl<W: Write> TraceSink for ConsoleSink<W> {
    fn event(&mut self, event: &TraceEvent) {
        if !self.show_trace {
            return;
        }
        match event {
            TraceEvent::Evaluating { goal, depth } => {
                self.depth = *depth;
                self.line(format_args!("{}Verificando el objetivo: '{}'...", "  ".repeat(*depth), goal))
            }
            TraceEvent::KnownFact { goal, holds: true } => {
                self.step(format_args!("El hecho '{}' es un dato conocido.", goal))
            }
            TraceEvent::KnownFact { goal, holds: false } => {
                self.step(format_args!("El hecho '{}' contradice los datos conocidos.", goal))
            }
            TraceEvent::CandidateRule {
                goal,
                rule,
                label,
                premises,
            } => {
                let premises: Vec<String> = premises.iter().map(|p| p.to_string()).collect();
                let rule = match label {
                    Some(label) => format!("{}: {}", rule, label),
                    None => rule.to_string(),
                };
                self.step(format_args!(
                    "Encontrada una regla ({}) para '{}'. Condiciones a evaluar: [{}]",
                    rule,
                    goal,
                    premises.join(", ")
                ))
            }
            TraceEvent::PremiseFailed { premise, .. } => self.step(format_args!(
                "No se pudo probar la condición '{}'. Fallando la regla.",
                premise
            )),
            TraceEvent::OracleConsulted { key, answer, .. } => {
                let answer = match answer {
                    Answer::Choice(option) => option.as_str(),
                    Answer::Yes => "sí",
                    Answer::No => "no",
                };
                self.step(format_args!("Respuesta para '{}': {}", key, answer))
            }
            TraceEvent::FactRecorded { .. } => {}
            TraceEvent::Proved { goal, .. } => {
                self.step(format_args!(
                    "Todas las condiciones para '{}' se cumplieron. ¡Objetivo probado!",
                    goal
                ));
                self.depth = self.depth.saturating_sub(1);
            }
            TraceEvent::NotProved { goal } => {
                self.step(format_args!("No se pudo probar el objetivo '{}'.", goal));
                self.depth = self.depth.saturating_sub(1);
            }
        }
    }

    fn summary(&mut self, report: &SessionReport) {
        self.line(format_args!("\n=== RESULTADO ==="));
        let mark = if report.proved() { "✓" } else { "✗" };
        self.line(format_args!("{} {}", mark, report.headline));

        for outcome in report.outcomes.iter().skip(1) {
            let status = if outcome.proved { "probado" } else { "no probado" };
            self.line(format_args!("  ({}: {})", humanize(&outcome.goal.to_string()), status));
        }

        self.line(format_args!("\nHechos determinantes:"));
        for (key, value) in report.facts.iter() {
            match value {
                FactValue::Flag => self.line(format_args!("- {}", humanize(key))),
                FactValue::Value(v) => self.line(format_args!("- {}: {}", humanize(key), v)),
            }
        }
    }
}

/// Sink de JSON por linha (um evento por linha; o resumo como último objeto).
pub struct JsonLinesSink<W> {
    output: W,
    with_events: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            with_events: true,
        }
    }

    /// Emite apenas o resumo final.
    pub fn summary_only(output: W) -> Self {
        Self {
            output,
            with_events: false,
        }
    }

    fn write_json<T: serde::Serialize>(&mut self, value: &T) {
        let written = serde_json::to_writer(&mut self.output, value)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.output));
        if let Err(e) = written {
            tracing::debug!(error = %e, "JsonLinesSink: falha de escrita ignorada");
        }
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn event(&mut self, event: &TraceEvent) {
        if self.with_events {
            self.write_json(event);
        }
    }

    fn summary(&mut self, report: &SessionReport) {
        self.write_json(report);
    }
}
