//! # Resolvedor — Encadeamento para Trás
//!
//! Prova um objetivo reduzindo-o recursivamente a premissas, sobre uma
//! árvore E/OU implícita:
//!
//! - nós **OU**: regras alternativas com a mesma conclusão (ordem de carregamento)
//! - nós **E**: premissas de uma regra (esquerda para direita, curto-circuito)
//!
//! ## Algoritmo por Objetivo
//!
//! ```text
//! 1. Já é fato?                         → verdadeiro (sem consultar regras)
//! 2. Asserção sobre atributo conhecido  → compara com o valor registrado
//! 3. Operador de ordem (>=, <, ...)     → nunca encadeia; vai ao oráculo
//! 4. Há regras que concluem o objetivo? → tenta cada uma; a 1ª que vale grava o fato
//! 5. Folha                              → pergunta ao oráculo (uma vez por sessão)
//! ```
//!
//! ## Pilha Explícita
//!
//! A busca não usa recursão nativa: cada objetivo em expansão é um [`Frame`]
//! numa pilha que carrega a cadeia de ancestrais. Isso permite:
//!
//! - detectar ciclos (`A ⇐ B ⇐ A`) → [`ResolveError::CyclicDependency`]
//! - limitar a profundidade → [`ResolveError::DepthExceeded`]
//!
//! ## Sessões
//!
//! O [`Engine`] (regras + vocabulário) é imutável e pode abrir várias
//! [`Session`]s independentes. Cada sessão tem sua própria [`FactBase`],
//! seu oráculo e seu sink.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::{FactBase, FactValue, Proposition, Rule, RuleId, RuleStore, Value, Vocabulary};
use crate::error::ResolveError;
use crate::oracle::{Answer, FactOracle, Question};
use crate::presentation::{GoalOutcome, SessionReport, TraceEvent, TraceSink};

/// Profundidade máxima padrão da cadeia de objetivos.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Regras e vocabulário, injetados na construção e somente leitura depois.
#[derive(Clone, Debug)]
pub struct Engine {
    rules: RuleStore,
    vocabulary: Vocabulary,
    max_depth: usize,
}

impl Engine {
    /// Cria o motor com a profundidade padrão ([`DEFAULT_MAX_DEPTH`]).
    pub fn new(rules: RuleStore, vocabulary: Vocabulary) -> Self {
        Self {
            rules,
            vocabulary,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Ajusta o limite de profundidade da cadeia de objetivos.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Abre uma sessão com base de fatos vazia.
    pub fn session<'a>(
        &'a self,
        oracle: &'a mut dyn FactOracle,
        sink: &'a mut dyn TraceSink,
    ) -> Session<'a> {
        let session = Session {
            engine: self,
            oracle,
            sink,
            facts: FactBase::new(),
            consulted: HashMap::new(),
            oracle_calls: 0,
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        };
        tracing::debug!(session = %session.id, rules = self.rules.len(), "Sessão aberta");
        session
    }
}

/// Sessão de avaliação: base de fatos própria, descartada ao final.
pub struct Session<'a> {
    engine: &'a Engine,
    oracle: &'a mut dyn FactOracle,
    sink: &'a mut dyn TraceSink,
    facts: FactBase,
    /// Respostas do oráculo por chave; garante uma pergunta por chave.
    consulted: HashMap<String, Answer>,
    oracle_calls: usize,
    id: Uuid,
    started_at: DateTime<Utc>,
}

/// Objetivo em expansão: regras candidatas e posição atual.
struct Frame<'a> {
    goal: Proposition,
    candidates: Vec<&'a Rule>,
    /// Índice da regra sendo tentada em `candidates`.
    rule: usize,
    /// Índice da próxima premissa da regra atual.
    premise: usize,
}

/// Resultado de abrir um objetivo.
enum Step<'a> {
    /// Decidido sem expandir regras.
    Resolved(bool),
    /// Precisa tentar regras.
    Expand(Frame<'a>),
}

impl<'a> Session<'a> {
    /// Identificador da sessão.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Fatos acumulados até agora.
    pub fn facts(&self) -> &FactBase {
        &self.facts
    }

    /// Total de perguntas feitas ao oráculo nesta sessão.
    pub fn oracle_calls(&self) -> usize {
        self.oracle_calls
    }

    /// Registra um fato fornecido de antemão (primeira escrita vence).
    pub fn assume(&mut self, proposition: &Proposition) -> bool {
        self.record(proposition)
    }

    /// Tenta provar `goal`.
    ///
    /// `Ok(false)` significa "não provável" — resultado normal. Os fatos
    /// descobertos no caminho ficam na base da sessão.
    ///
    /// # Erros
    ///
    /// - [`ResolveError::CyclicDependency`] — o objetivo depende de si mesmo
    /// - [`ResolveError::DepthExceeded`] — cadeia mais longa que `max_depth`
    pub fn prove(&mut self, goal: &Proposition) -> Result<bool, ResolveError> {
        let engine = self.engine;
        let mut stack: Vec<Frame<'a>> = Vec::new();

        // Resultado da última sub-prova concluída, entregue ao frame do topo.
        let mut pending = match self.open(goal, &stack)? {
            Step::Resolved(holds) => return Ok(self.finish(goal, holds)),
            Step::Expand(frame) => {
                stack.push(frame);
                None
            }
        };

        while let Some(frame) = stack.last_mut() {
            if let Some(holds) = pending.take() {
                if holds {
                    frame.premise += 1;
                } else {
                    let rule = frame.candidates[frame.rule];
                    self.emit(TraceEvent::PremiseFailed {
                        goal: frame.goal.clone(),
                        rule: rule.id,
                        premise: rule.premises[frame.premise].clone(),
                    });
                    tracing::debug!(goal = %frame.goal, rule = %rule.id, "Regra rejeitada");
                    frame.rule += 1;
                    frame.premise = 0;
                    self.announce(frame);
                }
            }

            let Some(rule) = frame.candidates.get(frame.rule).copied() else {
                // Todas as regras candidatas falharam.
                let Some(done) = stack.pop() else { break };
                self.emit(TraceEvent::NotProved { goal: done.goal });
                pending = Some(false);
                continue;
            };

            if frame.premise == rule.premises.len() {
                let Some(done) = stack.pop() else { break };
                self.conclude(&done.goal, rule.id);
                pending = Some(true);
                continue;
            }

            let premise = &rule.premises[frame.premise];
            match self.open(premise, &stack)? {
                Step::Resolved(holds) => pending = Some(self.finish(premise, holds)),
                Step::Expand(child) => stack.push(child),
            }
        }

        let proved = pending.unwrap_or(false);
        tracing::info!(
            session = %self.id,
            goal = %goal,
            proved,
            facts = self.facts.len(),
            rules = engine.rules.len(),
            "Objetivo avaliado"
        );
        Ok(proved)
    }

    /// Monta o relatório final e o entrega ao sink.
    pub fn report(&mut self, headline: impl Into<String>, outcomes: Vec<GoalOutcome>) -> SessionReport {
        let report = SessionReport {
            session: self.id,
            started_at: self.started_at,
            headline: headline.into(),
            outcomes,
            facts: self.facts.clone(),
            oracle_calls: self.oracle_calls,
        };
        self.sink.summary(&report);
        report
    }

    /// Passos 1–5 para um objetivo que acaba de ser alcançado.
    fn open(&mut self, goal: &Proposition, stack: &[Frame<'a>]) -> Result<Step<'a>, ResolveError> {
        let depth = stack.len();
        self.emit(TraceEvent::Evaluating {
            goal: goal.clone(),
            depth,
        });

        // 1. Já estabelecido nesta sessão.
        if self.facts.contains_proposition(goal) {
            self.emit(TraceEvent::KnownFact {
                goal: goal.clone(),
                holds: true,
            });
            return Ok(Step::Resolved(true));
        }

        // 2. Atributo já tem outro valor: a comparação decide.
        if goal.is_relational() && self.facts.is_known(goal.key()) {
            self.emit(TraceEvent::KnownFact {
                goal: goal.clone(),
                holds: false,
            });
            return Ok(Step::Resolved(false));
        }

        // 3/4. Operadores de ordem são sempre folhas.
        let is_ordering = goal.operator().is_some_and(|op| op.is_ordering());
        if !is_ordering {
            let engine: &'a Engine = self.engine;
            let candidates: Vec<&'a Rule> = engine.rules.rules_concluding(goal).collect();
            if !candidates.is_empty() {
                if stack.iter().any(|frame| frame.goal == *goal) {
                    let chain = stack
                        .iter()
                        .map(|frame| frame.goal.to_string())
                        .chain(std::iter::once(goal.to_string()))
                        .collect();
                    return Err(ResolveError::CyclicDependency { chain });
                }
                if depth >= engine.max_depth {
                    return Err(ResolveError::DepthExceeded {
                        goal: goal.to_string(),
                        limit: engine.max_depth,
                    });
                }
                let frame = Frame {
                    goal: goal.clone(),
                    candidates,
                    rule: 0,
                    premise: 0,
                };
                self.announce(&frame);
                return Ok(Step::Expand(frame));
            }
        }

        // 5. Folha: já perguntada (recusa, "não", ou sim/não de ordem) ou nova pergunta.
        let options = self.options_for(goal);
        let key = Question { goal, options }.key();
        if let Some(answer) = self.consulted.get(&key) {
            let holds = *answer == Answer::Yes;
            self.emit(TraceEvent::KnownFact {
                goal: goal.clone(),
                holds,
            });
            return Ok(Step::Resolved(holds));
        }
        Ok(Step::Resolved(self.consult(goal, options)))
    }

    /// Pergunta ao oráculo e reavalia o objetivo com a resposta.
    fn consult(&mut self, goal: &Proposition, options: Option<&'a [String]>) -> bool {
        let question = Question { goal, options };
        let key = question.key();
        let answer = self.oracle.ask(&question);
        self.oracle_calls += 1;
        self.emit(TraceEvent::OracleConsulted {
            goal: goal.clone(),
            key: key.clone(),
            answer: answer.clone(),
        });

        let holds = match (&answer, options) {
            (Answer::Choice(option), Some(opts)) if opts.contains(option) => {
                self.record_value(goal.key(), Value::parse(option));
                self.facts.contains_proposition(goal)
            }
            (Answer::Yes, None) => {
                self.record(goal);
                true
            }
            (Answer::No, _) => false,
            (answer, _) => {
                tracing::warn!(key = %key, answer = ?answer, "Oráculo: resposta incompatível com a pergunta");
                false
            }
        };

        self.consulted.insert(key, answer);
        holds
    }

    fn options_for(&self, goal: &Proposition) -> Option<&'a [String]> {
        let engine: &'a Engine = self.engine;
        goal.attribute().and_then(|attribute| engine.vocabulary.options(attribute))
    }

    /// Uma regra teve todas as premissas provadas.
    fn conclude(&mut self, goal: &Proposition, rule: RuleId) {
        tracing::debug!(goal = %goal, rule = %rule, "Objetivo provado por regra");
        self.record(goal);
        self.emit(TraceEvent::Proved {
            goal: goal.clone(),
            rule: Some(rule),
        });
    }

    /// Fecha um objetivo decidido sem regras.
    fn finish(&mut self, goal: &Proposition, holds: bool) -> bool {
        let event = if holds {
            TraceEvent::Proved {
                goal: goal.clone(),
                rule: None,
            }
        } else {
            TraceEvent::NotProved { goal: goal.clone() }
        };
        self.emit(event);
        holds
    }

    /// Anuncia a regra atual do frame, se ainda houver uma.
    fn announce(&mut self, frame: &Frame<'a>) {
        if let Some(rule) = frame.candidates.get(frame.rule) {
            self.emit(TraceEvent::CandidateRule {
                goal: frame.goal.clone(),
                rule: rule.id,
                label: rule.label.clone(),
                premises: rule.premises.clone(),
            });
        }
    }

    fn record(&mut self, proposition: &Proposition) -> bool {
        let recorded = self.facts.record(proposition);
        if recorded {
            self.emit_recorded(proposition.key());
        }
        recorded
    }

    fn record_value(&mut self, attribute: &str, value: Value) -> bool {
        let recorded = self.facts.set(attribute, FactValue::Value(value));
        if recorded {
            self.emit_recorded(attribute);
        }
        recorded
    }

    fn emit_recorded(&mut self, key: &str) {
        if let Some(value) = self.facts.get(key).cloned() {
            self.emit(TraceEvent::FactRecorded {
                key: key.to_string(),
                value,
            });
        }
    }

    fn emit(&mut self, event: TraceEvent) {
        self.sink.event(&event);
    }
}
