//! # FactBase — Memória de Trabalho da Sessão
//!
//! A [`FactBase`] guarda tudo o que já foi provado ou informado durante uma
//! sessão de avaliação: `atributo → valor` para asserções e `nome → verdadeiro`
//! para fatos simples.
//!
//! ## Política de Escrita
//!
//! - **Primeira escrita vence**: um atributo já registrado nunca é sobrescrito.
//! - **Sem retração**: entradas nunca são removidas.
//! - **Ordem de inserção** preservada, para o relatório final de auditoria.
//!
//! Uma escrita conflitante (valor diferente para um atributo já registrado) é
//! descartada e registrada em log `warn` — duas regras podem "provar" fatos
//! contraditórios e o motor apenas sinaliza isso.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::proposition::{Proposition, Value};

/// Valor registrado para uma chave da base de fatos.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FactValue {
    /// Fato simples estabelecido (`true`).
    Flag,
    /// Valor de um atributo.
    Value(Value),
}

/// Serializa `Flag` como `true` e valores na forma textual.
impl Serialize for FactValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FactValue::Flag => serializer.serialize_bool(true),
            FactValue::Value(value) => value.serialize(serializer),
        }
    }
}

/// Base de fatos de uma sessão, em ordem de inserção.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FactBase {
    facts: IndexMap<String, FactValue>,
}

impl FactBase {
    /// Cria uma base de fatos vazia.
    pub fn new() -> Self {
        Self::default()
    }

    /// Valor registrado para `attribute`, se houver.
    pub fn get(&self, attribute: &str) -> Option<&FactValue> {
        self.facts.get(attribute)
    }

    /// Registra um valor. **Não sobrescreve** um valor existente.
    ///
    /// Retorna `true` se a escrita teve efeito. Reescrever o mesmo valor
    /// é inócuo e retorna `false`.
    pub fn set(&mut self, attribute: impl Into<String>, value: FactValue) -> bool {
        let attribute = attribute.into();
        if let Some(existing) = self.facts.get(&attribute) {
            if *existing != value {
                tracing::warn!(
                    attribute = %attribute,
                    existing = ?existing,
                    rejected = ?value,
                    "FactBase: escrita conflitante descartada"
                );
            }
            return false;
        }
        tracing::debug!(attribute = %attribute, value = ?value, "FactBase: fato registrado");
        self.facts.insert(attribute, value);
        true
    }

    /// Registra a proposição como fato: `atributo → valor` para asserções
    /// `=`, `nome → Flag` para fatos simples.
    ///
    /// Asserções de ordem (`>=`...) não determinam um valor único; para elas
    /// nada é registrado e o retorno é `false`.
    pub fn record(&mut self, proposition: &Proposition) -> bool {
        match proposition {
            Proposition::Fact { name } => self.set(name.clone(), FactValue::Flag),
            Proposition::Assertion {
                attribute,
                operator,
                value,
            } if !operator.is_ordering() => {
                self.set(attribute.clone(), FactValue::Value(value.clone()))
            }
            Proposition::Assertion { .. } => false,
        }
    }

    /// A proposição já é satisfeita pelos fatos registrados?
    ///
    /// - fato simples: a chave existe como `Flag`
    /// - asserção: o valor registrado satisfaz operador/valor
    ///   ([`Operator::holds`](super::Operator::holds))
    pub fn contains_proposition(&self, proposition: &Proposition) -> bool {
        match (proposition, self.facts.get(proposition.key())) {
            (Proposition::Fact { .. }, Some(FactValue::Flag)) => true,
            (
                Proposition::Assertion {
                    operator, value, ..
                },
                Some(FactValue::Value(stored)),
            ) => operator.holds(stored, value),
            _ => false,
        }
    }

    /// `true` se já existe qualquer valor para a chave.
    pub fn is_known(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Itera os fatos em ordem de inserção.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Número de fatos registrados.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// `true` se nenhum fato foi registrado.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(text: &str) -> Proposition {
        Proposition::parse(text).unwrap()
    }

    /// Segunda escrita com outro valor não altera o fato
    #[test]
    fn test_first_write_wins() {
        let mut facts = FactBase::new();
        assert!(facts.set("ingresos", FactValue::Value(Value::parse("medios"))));
        assert!(!facts.set("ingresos", FactValue::Value(Value::parse("altos"))));
        assert_eq!(
            facts.get("ingresos"),
            Some(&FactValue::Value(Value::Label("medios".into())))
        );
        assert_eq!(facts.len(), 1);
    }

    /// Fatos simples e asserções de igualdade
    #[test]
    fn test_contains_proposition() {
        let mut facts = FactBase::new();
        facts.record(&p("credito_aprobado"));
        facts.record(&p("historial_credito=bueno"));

        assert!(facts.contains_proposition(&p("credito_aprobado")));
        assert!(facts.contains_proposition(&p("historial_credito=bueno")));
        assert!(!facts.contains_proposition(&p("historial_credito=malo")));
        assert!(!facts.contains_proposition(&p("empleo=estable")));
    }

    /// Asserções relacionais usam a mesma rotina de comparação
    #[test]
    fn test_contains_relational() {
        let mut facts = FactBase::new();
        facts.record(&p("propiedades=3+"));
        assert!(facts.contains_proposition(&p("propiedades>=2")));
        assert!(!facts.contains_proposition(&p("propiedades<2")));
        assert!(!facts.contains_proposition(&p("propiedades=3")));
    }

    /// Asserções de ordem não registram valor
    #[test]
    fn test_record_ordering_is_noop() {
        let mut facts = FactBase::new();
        assert!(!facts.record(&p("propiedades>=2")));
        assert!(facts.is_empty());
    }

    /// Um fato simples não satisfaz uma asserção sobre a mesma chave
    #[test]
    fn test_flag_vs_value() {
        let mut facts = FactBase::new();
        facts.record(&p("garantia"));
        assert!(!facts.contains_proposition(&p("garantia=excelente")));
        assert!(facts.is_known("garantia"));
    }

    /// Ordem de inserção e serialização do relatório
    #[test]
    fn test_insertion_order_serialization() {
        let mut facts = FactBase::new();
        facts.record(&p("propiedades=2"));
        facts.record(&p("garantia=excelente"));
        facts.record(&p("credito_aprobado"));
        let keys: Vec<&str> = facts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["propiedades", "garantia", "credito_aprobado"]);
        assert_eq!(
            serde_json::to_string(&facts).unwrap(),
            r#"{"propiedades":"2","garantia":"excelente","credito_aprobado":true}"#
        );
    }
}
