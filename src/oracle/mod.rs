//! # Oráculo de Fatos
//!
//! Quando o resolvedor chega a uma **folha** (proposição que nenhuma regra
//! conclui), a resposta vem de fora, através do trait [`FactOracle`].
//!
//! ## Duas Formas de Pergunta
//!
//! | Forma | Quando | Resposta |
//! |-------|--------|----------|
//! | Enumerada | O atributo tem domínio no [`Vocabulary`](crate::core::Vocabulary) | [`Answer::Choice`] com uma das opções |
//! | Sim/Não | Sem domínio | [`Answer::Yes`] ou [`Answer::No`] |
//!
//! A validação de entrada (repetir a pergunta, interpretar "sí") é
//! responsabilidade do oráculo — o resolvedor nunca repete perguntas.
//!
//! ## Implementações
//!
//! - [`ConsoleOracle`] — interativo, lê de qualquer `BufRead`
//! - [`ScriptedOracle`] — respostas pré-definidas (testes, execuções em lote)

use serde::Serialize;

use crate::core::Proposition;

/// Sub-módulo com o oráculo interativo de console.
pub mod console;

/// Sub-módulo com o oráculo de respostas pré-definidas.
pub mod scripted;

pub use console::ConsoleOracle;
pub use scripted::ScriptedOracle;

/// Pergunta feita ao oráculo.
#[derive(Clone, Copy, Debug)]
pub struct Question<'a> {
    /// Objetivo que motivou a pergunta.
    pub goal: &'a Proposition,
    /// Opções ordenadas do atributo; `None` para pergunta sim/não.
    pub options: Option<&'a [String]>,
}

impl<'a> Question<'a> {
    /// Chave perguntada: o atributo (enumerada) ou a proposição inteira (sim/não).
    pub fn key(&self) -> String {
        match self.options {
            Some(_) => self.goal.key().to_string(),
            None => self.goal.to_string(),
        }
    }
}

/// Resposta do oráculo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Answer {
    /// Opção escolhida, devolvida literalmente.
    Choice(String),
    /// Resposta afirmativa a uma pergunta sim/não.
    Yes,
    /// Negativa, ou recusa em responder.
    No,
}

/// Fonte externa de fatos para folhas não deriváveis.
pub trait FactOracle {
    /// Responde uma pergunta. Para perguntas enumeradas, deve devolver uma
    /// das opções oferecidas (ou [`Answer::No`] para recusar).
    fn ask(&mut self, question: &Question<'_>) -> Answer;
}

impl<T: FactOracle + ?Sized> FactOracle for &mut T {
    fn ask(&mut self, question: &Question<'_>) -> Answer {
        (**self).ask(question)
    }
}
