//! # ScriptedOracle — Respostas Pré-definidas
//!
//! Oráculo não interativo: responde a partir de uma tabela montada de
//! antemão e conta quantas vezes cada chave foi perguntada. Serve para
//! testes e para avaliações em lote.
//!
//! ```rust
//! let mut oracle = ScriptedOracle::new()
//!     .choose("ingresos", "medios")
//!     .affirm("garantia_disponible");
//! ```
//!
//! Chaves sem resposta recebem [`Answer::No`].

use std::collections::HashMap;

use super::{Answer, FactOracle, Question};

/// Oráculo com respostas fixas e registro de chamadas.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOracle {
    choices: HashMap<String, String>,
    affirmed: HashMap<String, bool>,
    calls: Vec<String>,
}

impl ScriptedOracle {
    /// Oráculo sem respostas: recusa tudo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resposta para a pergunta enumerada sobre `attribute`.
    pub fn choose(mut self, attribute: impl Into<String>, option: impl Into<String>) -> Self {
        self.choices.insert(attribute.into(), option.into());
        self
    }

    /// "Sim" para a pergunta sim/não sobre `proposition` (forma textual).
    pub fn affirm(mut self, proposition: impl Into<String>) -> Self {
        self.affirmed.insert(proposition.into(), true);
        self
    }

    /// Chaves perguntadas, na ordem.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Quantas vezes `key` foi perguntada.
    pub fn calls_for(&self, key: &str) -> usize {
        self.calls.iter().filter(|k| *k == key).count()
    }
}

impl FactOracle for ScriptedOracle {
    fn ask(&mut self, question: &Question<'_>) -> Answer {
        let key = question.key();
        let answer = match question.options {
            Some(_) => self
                .choices
                .get(&key)
                .map(|option| Answer::Choice(option.clone()))
                .unwrap_or(Answer::No),
            None if self.affirmed.get(&key).copied().unwrap_or(false) => Answer::Yes,
            None => Answer::No,
        };
        tracing::debug!(key = %key, answer = ?answer, "Oráculo: resposta roteirizada");
        self.calls.push(key);
        answer
    }
}
