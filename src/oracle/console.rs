//! # ConsoleOracle — Perguntas Interativas
//!
//! Faz as perguntas do resolvedor ao usuário num terminal (ou em qualquer
//! par `BufRead`/`Write`, o que permite testar com buffers em memória).
//!
//! ## Pergunta Enumerada
//!
//! ```text
//! ¿Cuál es su historial credito?
//! 1. bueno
//! 2. regular
//! 3. malo
//! Seleccione una opción: _
//! ```
//!
//! Entrada não numérica ou fora do intervalo repete a pergunta. Fim da
//! entrada (EOF) é tratado como recusa.
//!
//! ## Pergunta Sim/Não
//!
//! Lida uma única vez. São afirmativas `s`, `si`, `sí`, `y` e `yes`,
//! ignorando maiúsculas e acentos; qualquer outra coisa é "não".

use std::io::{self, BufRead, Stdout, Write};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::{Answer, FactOracle, Question};

const AFFIRMATIVE: &[&str] = &["s", "si", "y", "yes"];

/// Oráculo interativo sobre um par leitor/escritor.
pub struct ConsoleOracle<R, W> {
    input: R,
    output: W,
}

impl ConsoleOracle<io::StdinLock<'static>, Stdout> {
    /// Oráculo sobre stdin/stdout do processo.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOracle<R, W> {
    /// Cria o oráculo sobre um leitor e um escritor quaisquer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Devolve o escritor (útil em testes para inspecionar o que foi exibido).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Lê uma linha. `None` em EOF ou erro de leitura.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                tracing::warn!(error = %e, "Oráculo: falha ao ler entrada");
                None
            }
        }
    }

    /// Pergunta enumerada: repete até receber um índice válido.
    fn choose(&mut self, attribute: &str, options: &[String]) -> Answer {
        // Falhas de escrita no terminal não interrompem a avaliação.
        let _ = writeln!(self.output, "\n¿Cuál es su {}?", humanize(attribute));
        for (i, option) in options.iter().enumerate() {
            let _ = writeln!(self.output, "{}. {}", i + 1, option);
        }

        loop {
            let _ = write!(self.output, "Seleccione una opción: ");
            let _ = self.output.flush();

            let Some(line) = self.read_line() else {
                tracing::warn!(attribute, "Oráculo: entrada encerrada, pergunta recusada");
                return Answer::No;
            };

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    return Answer::Choice(options[n - 1].clone());
                }
                Ok(_) => {
                    let _ = writeln!(self.output, "Opción inválida. Intente nuevamente.");
                }
                Err(_) => {
                    let _ = writeln!(self.output, "Por favor ingrese un número.");
                }
            }
        }
    }

    /// Pergunta sim/não: uma única leitura.
    fn confirm(&mut self, question: &str) -> Answer {
        let _ = writeln!(self.output, "\n¿{}? (s/n)", humanize(question).replace('=', " "));
        let _ = self.output.flush();

        match self.read_line() {
            Some(line) if is_affirmative(&line) => Answer::Yes,
            _ => Answer::No,
        }
    }
}

impl<R: BufRead, W: Write> FactOracle for ConsoleOracle<R, W> {
    fn ask(&mut self, question: &Question<'_>) -> Answer {
        match question.options {
            Some(options) => self.choose(question.goal.key(), options),
            None => self.confirm(&question.goal.to_string()),
        }
    }
}

/// `historial_credito` → `historial credito`
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

/// Resposta afirmativa, sem distinguir maiúsculas nem acentos.
fn is_affirmative(answer: &str) -> bool {
    let folded: String = answer
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    AFFIRMATIVE.contains(&folded.as_str())
}
