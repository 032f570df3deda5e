//! # Conhecimento — Carregamento do Documento de Regras
//!
//! Módulo responsável por desserializar o **documento de conhecimento**
//! (JSON) e convertê-lo em um [`Engine`] pronto para abrir sessões.
//!
//! ## Formato
//!
//! ```json
//! {
//!   "goal": "credito_aprobado",
//!   "rejection_goal": "credito_rechazado",
//!   "vocabulary": { "ingresos": ["altos", "medios", "bajos"] },
//!   "rules": [
//!     { "label": "...", "premises": ["ingresos=altos", "deudas=bajas"], "conclusion": "credito_aprobado" }
//!   ],
//!   "facts": ["historial_credito=bueno"],
//!   "max_depth": 64
//! }
//! ```
//!
//! Só `goal` e `rules` são obrigatórios. Sem `--knowledge`, o binário usa a
//! base de avaliação de crédito embutida (`data/credito.json`).
//!
//! ## Quando o Documento é Rejeitado?
//!
//! - proposição malformada (regra, objetivo ou fato)
//! - regra cuja conclusão usa operador de ordem
//! - fato pré-carregado com operador de ordem
//! - atributo do vocabulário sem opções

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Proposition, RuleStore, Vocabulary};
use crate::error::KnowledgeError;
use crate::inference::{Engine, DEFAULT_MAX_DEPTH};

/// Base de crédito embutida no binário.
const BUILTIN_CREDIT: &str = include_str!("../data/credito.json");

/// Documento de conhecimento como está no disco.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Título exibido antes da avaliação.
    #[serde(default)]
    pub title: Option<String>,
    pub goal: String,
    #[serde(default)]
    pub rejection_goal: Option<String>,
    #[serde(default)]
    pub messages: Messages,
    /// Atributo → opções, na ordem de exibição.
    #[serde(default)]
    pub vocabulary: IndexMap<String, Vec<String>>,
    pub rules: Vec<RuleDocument>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Uma regra no documento.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub premises: Vec<String>,
    pub conclusion: String,
}

/// Frases do veredito.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub proved: String,
    pub not_proved: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            proved: "Objetivo probado".into(),
            not_proved: "Objetivo no probado".into(),
        }
    }
}

/// Conhecimento validado: motor + objetivos + fatos iniciais.
#[derive(Clone, Debug)]
pub struct Knowledge {
    pub title: Option<String>,
    pub engine: Engine,
    pub goal: Proposition,
    pub rejection_goal: Option<Proposition>,
    /// Fatos a registrar no início de cada sessão.
    pub facts: Vec<Proposition>,
    pub messages: Messages,
}

impl Knowledge {
    /// Base de avaliação de crédito embutida.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CREDIT).context("Base de conhecimento embutida inválida")
    }

    /// Carrega um documento de conhecimento do disco.
    ///
    /// # Erros
    ///
    /// Retorna erro se o arquivo não puder ser lido, não for JSON válido,
    /// ou violar alguma das regras de validação do módulo.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler {}", path.display()))?;
        let knowledge = Self::from_json(&json)
            .with_context(|| format!("Falha ao carregar {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            rules = knowledge.engine.rules().len(),
            "Conhecimento carregado"
        );
        Ok(knowledge)
    }

    /// Desserializa e valida um documento.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: KnowledgeDocument =
            serde_json::from_str(json).context("Falha ao desserializar o documento de conhecimento")?;
        Ok(Self::from_document(document)?)
    }

    /// Valida o documento e constrói o motor.
    pub fn from_document(document: KnowledgeDocument) -> Result<Self, KnowledgeError> {
        let mut vocabulary = Vocabulary::new();
        for (attribute, options) in document.vocabulary {
            if options.is_empty() {
                return Err(KnowledgeError::EmptyDomain(attribute));
            }
            vocabulary.insert(attribute, options);
        }

        let mut rules = RuleStore::default();
        for (position, rule) in document.rules.into_iter().enumerate() {
            let index = position + 1;
            let premises = rule
                .premises
                .iter()
                .map(|text| Proposition::parse(text))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| KnowledgeError::Rule { index, source })?;
            let conclusion = Proposition::parse(&rule.conclusion)
                .map_err(|source| KnowledgeError::Rule { index, source })?;
            if conclusion.operator().is_some_and(|op| op.is_ordering()) {
                return Err(KnowledgeError::OrderingConclusion {
                    index,
                    conclusion: rule.conclusion,
                });
            }
            rules.push(rule.label, premises, conclusion);
        }

        let goal = parse_goal(&document.goal)?;
        let rejection_goal = document.rejection_goal.as_deref().map(parse_goal).transpose()?;
        let facts = document
            .facts
            .iter()
            .map(|text| parse_fact(text))
            .collect::<Result<Vec<_>, _>>()?;

        let engine = Engine::new(rules, vocabulary)
            .with_max_depth(document.max_depth.unwrap_or(DEFAULT_MAX_DEPTH));

        Ok(Self {
            title: document.title,
            engine,
            goal,
            rejection_goal,
            facts,
            messages: document.messages,
        })
    }

    /// Substitui o objetivo principal.
    pub fn set_goal(&mut self, text: &str) -> Result<(), KnowledgeError> {
        self.goal = parse_goal(text)?;
        Ok(())
    }

    /// Acrescenta um fato inicial (`atributo=valor` ou nome simples).
    ///
    /// Valores fora do domínio do atributo são aceitos com aviso.
    pub fn assume(&mut self, text: &str) -> Result<(), KnowledgeError> {
        let fact = parse_fact(text)?;
        if let (Some(attribute), Some(value)) = (fact.attribute(), fact.value()) {
            let vocabulary = self.engine.vocabulary();
            if vocabulary.options(attribute).is_some()
                && !vocabulary.allows(attribute, &value.to_string())
            {
                tracing::warn!(fact = %fact, "Valor fora do vocabulário do atributo");
            }
        }
        self.facts.push(fact);
        Ok(())
    }
}

fn parse_goal(text: &str) -> Result<Proposition, KnowledgeError> {
    Proposition::parse(text).map_err(|source| KnowledgeError::Goal {
        text: text.to_string(),
        source,
    })
}

fn parse_fact(text: &str) -> Result<Proposition, KnowledgeError> {
    let fact = Proposition::parse(text).map_err(|source| KnowledgeError::Fact {
        text: text.to_string(),
        source,
    })?;
    if fact.operator().is_some_and(|op| op.is_ordering()) {
        return Err(KnowledgeError::OrderingFact(text.to_string()));
    }
    Ok(fact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuleId;
    use crate::error::PropositionError;
    use pretty_assertions::assert_eq;

    /// A base embutida tem as 9 regras e os 5 atributos de crédito
    #[test]
    fn test_builtin() {
        let knowledge = Knowledge::builtin().unwrap();
        assert_eq!(knowledge.engine.rules().len(), 9);
        assert_eq!(knowledge.engine.vocabulary().len(), 5);
        assert_eq!(knowledge.goal, Proposition::fact("credito_aprobado"));
        assert_eq!(
            knowledge.rejection_goal,
            Some(Proposition::fact("credito_rechazado"))
        );
        assert_eq!(
            knowledge.engine.vocabulary().options("propiedades").unwrap(),
            &["0", "1", "2", "3+"]
        );
        let r5 = knowledge.engine.rules().get(RuleId(4)).unwrap();
        assert_eq!(r5.to_string(), "R5: [propiedades>=2] => garantia=excelente");
        assert_eq!(knowledge.messages.proved, "Crédito APROBADO");
    }

    /// Campos opcionais assumem valores padrão
    #[test]
    fn test_minimal_document() {
        let knowledge = Knowledge::from_json(
            r#"{ "goal": "meta", "rules": [ { "conclusion": "meta" } ], "max_depth": 3 }"#,
        )
        .unwrap();
        assert_eq!(knowledge.engine.max_depth(), 3);
        assert!(knowledge.rejection_goal.is_none());
        assert!(knowledge.engine.vocabulary().is_empty());
        assert_eq!(knowledge.messages, Messages::default());
        assert!(knowledge.engine.rules().get(RuleId(0)).unwrap().premises.is_empty());
    }

    /// Proposição malformada aponta a regra (numerada a partir de 1)
    #[test]
    fn test_malformed_rule() {
        let document: KnowledgeDocument = serde_json::from_str(
            r#"{ "goal": "meta", "rules": [
                { "premises": ["a"], "conclusion": "meta" },
                { "premises": ["a!=b"], "conclusion": "meta" }
            ] }"#,
        )
        .unwrap();
        match Knowledge::from_document(document) {
            Err(KnowledgeError::Rule {
                index: 2,
                source: PropositionError::UnknownOperator { .. },
            }) => {}
            other => panic!("erro inesperado: {:?}", other.map(|_| ())),
        }
    }

    /// Conclusões e fatos com operador de ordem são rejeitados
    #[test]
    fn test_ordering_rejected() {
        let conclusion: KnowledgeDocument = serde_json::from_str(
            r#"{ "goal": "meta", "rules": [ { "premises": [], "conclusion": "x>=2" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            Knowledge::from_document(conclusion),
            Err(KnowledgeError::OrderingConclusion { index: 1, .. })
        ));

        let mut knowledge = Knowledge::builtin().unwrap();
        assert!(matches!(
            knowledge.assume("propiedades>=2"),
            Err(KnowledgeError::OrderingFact(_))
        ));
        knowledge.assume("propiedades=2").unwrap();
        assert_eq!(knowledge.facts, vec![Proposition::parse("propiedades=2").unwrap()]);
    }

    /// Domínio vazio no vocabulário é erro
    #[test]
    fn test_empty_domain() {
        let document: KnowledgeDocument = serde_json::from_str(
            r#"{ "goal": "meta", "vocabulary": { "empleo": [] }, "rules": [] }"#,
        )
        .unwrap();
        assert!(matches!(
            Knowledge::from_document(document),
            Err(KnowledgeError::EmptyDomain(attr)) if attr == "empleo"
        ));
    }

    /// Arquivo inexistente produz erro com contexto
    #[test]
    fn test_load_missing_file() {
        let err = Knowledge::load(Path::new("/nonexistent/credito.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/credito.json"));
    }

    /// Objetivo pode ser trocado na linha de comando
    #[test]
    fn test_set_goal() {
        let mut knowledge = Knowledge::builtin().unwrap();
        knowledge.set_goal("credito_rechazado").unwrap();
        assert_eq!(knowledge.goal, Proposition::fact("credito_rechazado"));
        assert!(knowledge.set_goal("").is_err());
    }
}
