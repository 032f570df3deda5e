//! # Apresentação — Destino dos Eventos de Rastreamento
//!
//! O resolvedor informa o que está fazendo através do trait [`TraceSink`].
//! O fluxo é **de mão única**: nenhum método devolve valor, e uma falha ao
//! exibir (terminal fechado, pipe quebrado) é engolida pelo próprio sink,
//! sem afetar a resolução.
//!
//! | Sink | Saída |
//! |------|-------|
//! | [`ConsoleSink`] | Texto legível (trace opcional + resumo) |
//! | [`JsonLinesSink`] | Um objeto JSON por linha |
//! | [`RecordingSink`] | Guarda os eventos em memória |

/// Sub-módulo com os eventos e o relatório de sessão.
pub mod events;

/// Sub-módulo com os sinks de texto e JSON.
pub mod console;

pub use console::{ConsoleSink, JsonLinesSink};
pub use events::{GoalOutcome, SessionReport, TraceEvent};

/// Receptor de eventos de rastreamento.
pub trait TraceSink {
    /// Recebe um evento, na ordem em que ocorreu.
    fn event(&mut self, event: &TraceEvent);

    /// Recebe o resumo final da sessão.
    fn summary(&mut self, _report: &SessionReport) {}
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn event(&mut self, event: &TraceEvent) {
        (**self).event(event)
    }

    fn summary(&mut self, report: &SessionReport) {
        (**self).summary(report)
    }
}

/// Sink que guarda eventos e resumos em memória.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<TraceEvent>,
    pub reports: Vec<SessionReport>,
}

impl RecordingSink {
    /// Sink vazio.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for RecordingSink {
    fn event(&mut self, event: &TraceEvent) {
        self.events.push(event.clone());
    }

    fn summary(&mut self, report: &SessionReport) {
        self.reports.push(report.clone());
    }
}
