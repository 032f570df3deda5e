//! # Erros do Domínio
//!
//! Taxonomia de erros do motor de encadeamento:
//!
//! | Erro | Quando | Tratamento |
//! |------|--------|------------|
//! | [`PropositionError`] | Texto de proposição inválido | Aborta o carregamento |
//! | [`ResolveError`] | Ciclo ou profundidade excedida | Propaga de `prove` |
//! | [`KnowledgeError`] | Documento de conhecimento inconsistente | Aborta o carregamento |
//!
//! Um objetivo **não provável** não é erro: `prove` retorna `Ok(false)`.

use thiserror::Error;

/// Falha ao construir uma [`Proposition`](crate::core::Proposition).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropositionError {
    /// Texto vazio ou só com espaços.
    #[error("proposição vazia")]
    Empty,

    /// Operador fora de `=`, `>=`, `<=`, `>`, `<`.
    #[error("operador desconhecido '{operator}' em '{text}'")]
    UnknownOperator { text: String, operator: String },

    /// Atributo ausente antes do operador.
    #[error("atributo ausente em '{0}'")]
    MissingAttribute(String),

    /// Valor ausente depois do operador.
    #[error("valor ausente em '{0}'")]
    MissingValue(String),

    /// Operador de ordem com valor sem interpretação numérica.
    #[error("valor '{value}' não é numérico para o operador '{operator}' em '{text}'")]
    NotNumeric {
        text: String,
        operator: String,
        value: String,
    },
}

/// Falha durante a resolução de um objetivo.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// O objetivo já estava na cadeia de ancestrais.
    #[error("dependência cíclica: {}", chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    /// A cadeia de objetivos ultrapassou o limite configurado.
    #[error("profundidade máxima {limit} excedida ao provar '{goal}'")]
    DepthExceeded { goal: String, limit: usize },
}

/// Documento de conhecimento inválido.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// Premissa ou conclusão malformada numa regra.
    #[error("regra #{index}: {source}")]
    Rule {
        index: usize,
        #[source]
        source: PropositionError,
    },

    /// Objetivo principal ou de rejeição malformado.
    #[error("objetivo '{text}': {source}")]
    Goal {
        text: String,
        #[source]
        source: PropositionError,
    },

    /// Fato pré-carregado malformado.
    #[error("fato '{text}': {source}")]
    Fact {
        text: String,
        #[source]
        source: PropositionError,
    },

    /// Fato pré-carregado com operador de ordem: não define um valor.
    #[error("fato '{0}': apenas fatos simples ou asserções '=' podem ser pré-carregados")]
    OrderingFact(String),

    /// Regra que conclui uma asserção de ordem nunca seria usada.
    #[error("regra #{index}: a conclusão '{conclusion}' usa um operador de ordem")]
    OrderingConclusion { index: usize, conclusion: String },

    /// Atributo do vocabulário sem nenhuma opção.
    #[error("atributo '{0}' do vocabulário não tem opções")]
    EmptyDomain(String),
}
