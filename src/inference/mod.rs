//! # Módulo Inference — Motor de Encadeamento para Trás
//!
//! Este módulo contém o **motor de inferência** do sistema especialista de
//! crédito: dado um objetivo (`credito_aprobado`), decide se ele pode ser
//! provado a partir das regras, dos fatos já conhecidos e das respostas do
//! oráculo.
//!
//! ## Fluxo
//!
//! ```text
//! Engine (regras + vocabulário, imutável)
//!    │ session(oracle, sink)
//!    ▼
//! Session (base de fatos própria)
//!    │ prove(objetivo)
//!    ├── fato conhecido? ──────────────► verdadeiro
//!    ├── regras candidatas (OU, em ordem)
//!    │     └── premissas (E, esquerda → direita)
//!    └── folha ──► FactOracle (uma pergunta por chave)
//! ```
//!
//! Veja [`Engine`] e [`Session`] para detalhes.

/// Sub-módulo com o resolvedor de pilha explícita.
pub mod resolver;

pub use resolver::{Engine, Session, DEFAULT_MAX_DEPTH};
