//! # Orquestrador — Uma Avaliação Completa
//!
//! O [`Orchestrator`] conduz **uma sessão** do começo ao fim: registra os
//! fatos iniciais, prova o objetivo principal e, se ele falhar, tenta o
//! objetivo de rejeição para que o relatório mostre o motivo.
//!
//! ## Fluxo
//!
//! ```text
//! Knowledge (engine + objetivos + fatos iniciais)
//!   │
//!   ├── 1. abre Session(oracle, sink)
//!   ├── 2. assume(fatos iniciais)
//!   ├── 3. prove(goal)
//!   ├── 4. se falhou e há rejection_goal → prove(rejection_goal)
//!   └── 5. SessionReport (veredito + fatos) → sink.summary
//! ```
//!
//! O relatório sempre leva **todos** os fatos que determinaram o veredito.

use crate::error::ResolveError;
use crate::knowledge::Knowledge;
use crate::oracle::FactOracle;
use crate::presentation::{GoalOutcome, SessionReport, TraceSink};

/// Conduz avaliações sobre um conhecimento carregado.
pub struct Orchestrator {
    knowledge: Knowledge,
}

impl Orchestrator {
    pub fn new(knowledge: Knowledge) -> Self {
        Self { knowledge }
    }

    /// Executa uma avaliação completa e devolve o relatório.
    ///
    /// Cada chamada usa uma sessão nova: nada é compartilhado entre avaliações.
    ///
    /// # Erros
    ///
    /// Propaga [`ResolveError`] (ciclo ou profundidade) de qualquer objetivo.
    pub fn evaluate(
        &self,
        oracle: &mut dyn FactOracle,
        sink: &mut dyn TraceSink,
    ) -> Result<SessionReport, ResolveError> {
        let knowledge = &self.knowledge;
        let mut session = knowledge.engine.session(oracle, sink);

        for fact in &knowledge.facts {
            session.assume(fact);
        }

        let proved = session.prove(&knowledge.goal)?;
        let mut outcomes = vec![GoalOutcome {
            goal: knowledge.goal.clone(),
            proved,
        }];

        if !proved {
            if let Some(rejection) = &knowledge.rejection_goal {
                let rejected = session.prove(rejection)?;
                outcomes.push(GoalOutcome {
                    goal: rejection.clone(),
                    proved: rejected,
                });
            }
        }

        let headline = if proved {
            &knowledge.messages.proved
        } else {
            &knowledge.messages.not_proved
        };

        tracing::info!(
            session = %session.id(),
            goal = %knowledge.goal,
            proved,
            oracle_calls = session.oracle_calls(),
            "Avaliação concluída"
        );

        Ok(session.report(headline.as_str(), outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FactValue, Proposition};
    use crate::oracle::ScriptedOracle;
    use crate::presentation::RecordingSink;
    use pretty_assertions::assert_eq;

    fn orchestrator(facts: &[&str]) -> Orchestrator {
        let mut knowledge = Knowledge::builtin().unwrap();
        for fact in facts {
            knowledge.assume(fact).unwrap();
        }
        Orchestrator::new(knowledge)
    }

    /// Aprovação não tenta o objetivo de rejeição
    #[test]
    fn test_approved() {
        let orchestrator = orchestrator(&["historial_credito=bueno", "empleo=estable"]);
        let mut oracle = ScriptedOracle::new().choose("ingresos", "medios");
        let mut sink = RecordingSink::new();

        let report = orchestrator.evaluate(&mut oracle, &mut sink).unwrap();
        assert!(report.proved());
        assert_eq!(report.headline, "Crédito APROBADO");
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.oracle_calls, 1);
        assert_eq!(report.facts.get("credito_aprobado"), Some(&FactValue::Flag));
        assert_eq!(sink.reports.len(), 1);
    }

    /// Rejeição: o relatório mostra o objetivo de rejeição e seus fatos
    #[test]
    fn test_rejected() {
        let orchestrator = orchestrator(&["historial_credito=malo"]);
        let mut oracle = ScriptedOracle::new()
            .choose("ingresos", "bajos")
            .choose("propiedades", "0");
        let mut sink = RecordingSink::new();

        let report = orchestrator.evaluate(&mut oracle, &mut sink).unwrap();
        assert!(!report.proved());
        assert_eq!(report.headline, "Crédito RECHAZADO");
        assert_eq!(
            report.outcomes[1],
            GoalOutcome {
                goal: Proposition::fact("credito_rechazado"),
                proved: true,
            }
        );
        assert!(report
            .facts
            .contains_proposition(&Proposition::parse("historial_credito=malo").unwrap()));
    }

    /// Cada avaliação começa com uma base de fatos nova
    #[test]
    fn test_fresh_session_per_evaluation() {
        let orchestrator = orchestrator(&[]);
        let mut sink = RecordingSink::new();

        let mut first = ScriptedOracle::new().choose("historial_credito", "bueno").choose("empleo", "estable");
        let report = orchestrator.evaluate(&mut first, &mut sink).unwrap();
        assert!(report.proved());

        let mut second = ScriptedOracle::new();
        let report = orchestrator.evaluate(&mut second, &mut sink).unwrap();
        assert!(!report.proved());
        assert_ne!(sink.reports[0].session, sink.reports[1].session);
        assert!(report.facts.get("credito_aprobado").is_none());
    }

    /// Erros de resolução são propagados
    #[test]
    fn test_cycle_propagates() {
        let knowledge = Knowledge::from_json(
            r#"{ "goal": "a", "rules": [
                { "premises": ["b"], "conclusion": "a" },
                { "premises": ["a"], "conclusion": "b" }
            ] }"#,
        )
        .unwrap();
        let orchestrator = Orchestrator::new(knowledge);
        let mut oracle = ScriptedOracle::new();
        let mut sink = RecordingSink::new();

        assert!(matches!(
            orchestrator.evaluate(&mut oracle, &mut sink),
            Err(ResolveError::CyclicDependency { .. })
        ));
        assert!(sink.reports.is_empty());
    }
}
