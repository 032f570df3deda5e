//! # Módulo Core — Modelo de Conhecimento
//!
//! Tipos fundamentais sobre os quais o resolvedor trabalha:
//!
//! - [`Proposition`] — fato simples ou asserção `atributo OP valor`
//! - [`Operator`] / [`Value`] — operadores e valores (com normalização `"N+"`)
//! - [`Rule`] / [`RuleStore`] — regras ordenadas, indexadas por conclusão
//! - [`FactBase`] — memória de trabalho da sessão (primeira escrita vence)
//! - [`Vocabulary`] — domínios enumerados usados pelo oráculo
//!
//! ## Exemplo
//!
//! ```rust
//! use crate::core::{FactBase, Proposition};
//!
//! let mut facts = FactBase::new();
//! facts.record(&Proposition::parse("propiedades=3+")?);
//! assert!(facts.contains_proposition(&Proposition::parse("propiedades>=2")?));
//! ```

/// Proposições, operadores e valores.
pub mod proposition;

/// Regras e o store ordenado.
pub mod rule;

/// Base de fatos da sessão.
pub mod fact_base;

/// Domínios enumerados dos atributos.
pub mod vocabulary;

pub use fact_base::{FactBase, FactValue};
pub use proposition::{Operator, Proposition, Value};
pub use rule::{Rule, RuleId, RuleStore};
pub use vocabulary::Vocabulary;
