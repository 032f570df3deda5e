//! # Vocabulary — Domínios Enumerados dos Atributos
//!
//! Tabela `atributo → opções válidas (ordenadas)`. É o que permite ao
//! oráculo perguntar "escolha uma opção" em vez de sim/não:
//!
//! ```text
//! ingresos          → [altos, medios, bajos]
//! propiedades       → [0, 1, 2, 3+]
//! ```
//!
//! Construída uma vez junto com as regras e somente leitura depois disso.

use std::collections::HashMap;

/// Domínios enumerados por atributo.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    domains: HashMap<String, Vec<String>>,
}

impl Vocabulary {
    /// Vocabulário vazio: todas as folhas viram perguntas sim/não.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define as opções de um atributo (a ordem é a ordem de exibição).
    pub fn with_domain<I, S>(mut self, attribute: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(attribute, options);
        self
    }

    /// Versão mutável de [`with_domain`](Vocabulary::with_domain).
    pub fn insert<I, S>(&mut self, attribute: impl Into<String>, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains.insert(
            attribute.into(),
            options.into_iter().map(Into::into).collect(),
        );
    }

    /// Opções do atributo, se ele tiver domínio enumerado.
    pub fn options(&self, attribute: &str) -> Option<&[String]> {
        self.domains.get(attribute).map(Vec::as_slice)
    }

    /// `true` se `option` pertence ao domínio de `attribute`.
    pub fn allows(&self, attribute: &str, option: &str) -> bool {
        self.options(attribute)
            .is_some_and(|opts| opts.iter().any(|o| o == option))
    }

    /// Número de atributos com domínio.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// `true` se nenhum domínio foi definido.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
