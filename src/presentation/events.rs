//! # Eventos de Rastreamento da Resolução
//!
//! Define o enum [`TraceEvent`] — tudo o que o resolvedor comunica durante
//! uma prova — e o [`SessionReport`], o resumo final de uma sessão.
//!
//! ## Sequência dos Eventos
//!
//! ```text
//! Evaluating → KnownFact → Proved | NotProved
//! Evaluating → OracleConsulted → FactRecorded? → Proved | NotProved
//! Evaluating → [CandidateRule → (Evaluating ...)* → PremiseFailed?]*
//!            → FactRecorded → Proved
//!            ou NotProved
//! ```
//!
//! Todo `Evaluating` é fechado por exatamente um `Proved` ou `NotProved`
//! (exceto quando a resolução aborta com erro).
//!
//! ## Serialização
//!
//! Usa `#[serde(tag = "type")]` para produzir JSON com discriminador:
//!
//! ```json
//! { "type": "CandidateRule", "goal": "credito_aprobado", "rule": 1, "label": "buen historial y empleo estable", "premises": ["historial_credito=bueno", "empleo=estable"] }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::{FactBase, FactValue, Proposition, RuleId};
use crate::oracle::Answer;

/// Evento emitido pelo resolvedor, em ordem de ocorrência.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TraceEvent {
    /// Início da avaliação de um objetivo (ou premissa).
    Evaluating {
        goal: Proposition,
        /// Profundidade na cadeia de objetivos (0 = objetivo principal).
        depth: usize,
    },

    /// O objetivo foi decidido pelos fatos já registrados.
    KnownFact { goal: Proposition, holds: bool },

    /// Uma regra candidata começa a ser tentada.
    CandidateRule {
        goal: Proposition,
        rule: RuleId,
        /// Rótulo da regra no documento de conhecimento.
        label: Option<String>,
        premises: Vec<Proposition>,
    },

    /// Uma premissa falhou; a regra é rejeitada.
    PremiseFailed {
        goal: Proposition,
        rule: RuleId,
        premise: Proposition,
    },

    /// O oráculo foi consultado para uma folha.
    OracleConsulted {
        goal: Proposition,
        key: String,
        answer: Answer,
    },

    /// Novo fato gravado na base.
    FactRecorded { key: String, value: FactValue },

    /// Objetivo provado; `rule` é a regra creditada, se houver.
    Proved {
        goal: Proposition,
        rule: Option<RuleId>,
    },

    /// Objetivo não provável (resultado normal, não erro).
    NotProved { goal: Proposition },
}

/// Resultado de um objetivo avaliado na sessão.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoalOutcome {
    pub goal: Proposition,
    pub proved: bool,
}

/// Resumo final de uma sessão: veredito **junto** com todos os fatos que o
/// determinaram, para que o usuário possa auditar a decisão.
#[derive(Clone, Debug, Serialize)]
pub struct SessionReport {
    /// Identificador da sessão (UUID v4).
    pub session: Uuid,
    /// Início da sessão.
    pub started_at: DateTime<Utc>,
    /// Frase de veredito para exibição.
    pub headline: String,
    /// Objetivos avaliados, na ordem (o primeiro é o principal).
    pub outcomes: Vec<GoalOutcome>,
    /// Fatos acumulados, em ordem de inserção.
    pub facts: FactBase,
    /// Total de perguntas feitas ao oráculo.
    pub oracle_calls: usize,
}

impl SessionReport {
    /// O objetivo principal foi provado?
    pub fn proved(&self) -> bool {
        self.outcomes.first().is_some_and(|o| o.proved)
    }
}
