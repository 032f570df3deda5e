//! # Proposition — Fatos e Asserções sobre Atributos
//!
//! Uma [`Proposition`] é a unidade que o motor tenta provar. Existem duas formas:
//!
//! | Forma | Texto | Exemplo |
//! |-------|-------|---------|
//! | Fato simples | `nome` | `credito_aprobado` |
//! | Asserção | `atributo OP valor` | `ingresos=altos`, `propiedades>=2` |
//!
//! ## Operadores
//!
//! `=` compara igualdade exata (rótulo ou número). Os operadores de **ordem**
//! (`>=`, `<=`, `>`, `<`) exigem valores com interpretação numérica.
//!
//! ## Valores Ordinais
//!
//! Rótulos como `"2"` são números. Um rótulo aberto `"3+"` significa
//! "3 ou mais" e é normalizado para o seu limite inferior (3) nas
//! comparações de ordem:
//!
//! ```text
//! propiedades = "3+"
//!   propiedades>=2  → 3 >= 2 → verdadeiro
//!   propiedades<2   → 3 <  2 → falso
//! ```
//!
//! O texto é interpretado **uma única vez**, no carregamento. Durante a
//! resolução o motor só manipula a forma estruturada.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PropositionError;

/// Forma geral `atributo OP valor`. Textos com mais de um grupo de
/// operadores não casam e são rejeitados.
static ASSERTION_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<attribute>[^<>=!]*)(?P<operator>[<>=!]+)(?P<value>[^<>=!]*)$").unwrap()
});

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!'];

/// Operador de uma asserção.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl Operator {
    /// Símbolo textual do operador.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    /// Reconhece um símbolo. `None` para qualquer outra sequência.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Operator::Eq),
            ">=" => Some(Operator::Ge),
            "<=" => Some(Operator::Le),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            _ => None,
        }
    }

    /// `true` para `>=`, `<=`, `>` e `<`.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, Operator::Eq)
    }

    /// Rotina de comparação única do motor.
    ///
    /// Usada tanto pela [`FactBase`](super::FactBase) ("isto já é um fato?")
    /// quanto pela avaliação de premissas relacionais. `stored` é o valor
    /// registrado; `expected` é o valor da proposição.
    ///
    /// - `=` exige igualdade estrutural (`"3+"` não é igual a `3`)
    /// - operadores de ordem comparam limites inferiores; sem limite → `false`
    pub fn holds(&self, stored: &Value, expected: &Value) -> bool {
        let ordering = || Some(stored.lower_bound()?.cmp(&expected.lower_bound()?));
        match self {
            Operator::Eq => stored == expected,
            Operator::Ge => ordering().is_some_and(|o| o != Ordering::Less),
            Operator::Le => ordering().is_some_and(|o| o != Ordering::Greater),
            Operator::Gt => ordering() == Some(Ordering::Greater),
            Operator::Lt => ordering() == Some(Ordering::Less),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Valor de um atributo: número, contagem aberta (`"N+"`) ou rótulo categórico.
///
/// Serializa sempre na forma textual (`2`, `"3+"`, `"altos"` → `"2"`, `"3+"`, `"altos"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Value {
    /// Inteiro exato, ex: `"2"`.
    Number(i64),
    /// "N ou mais", ex: `"3+"`.
    AtLeast(i64),
    /// Rótulo sem interpretação numérica, ex: `"altos"`.
    Label(String),
}

impl Value {
    /// Interpreta o texto de um valor. Nunca falha: o que não é numérico vira rótulo.
    ///
    /// Sinal `+` à esquerda não é numérico (`"+5"` é rótulo).
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(bound) = text.strip_suffix('+') {
            if let Some(n) = integer(bound.trim()) {
                return Value::AtLeast(n);
            }
        }
        match integer(text) {
            Some(n) => Value::Number(n),
            None => Value::Label(text.to_string()),
        }
    }

    /// Limite inferior numérico usado pelos operadores de ordem.
    pub fn lower_bound(&self) -> Option<i64> {
        match self {
            Value::Number(n) | Value::AtLeast(n) => Some(*n),
            Value::Label(_) => None,
        }
    }
}

fn integer(text: &str) -> Option<i64> {
    if text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::AtLeast(n) => write!(f, "{}+", n),
            Value::Label(label) => f.write_str(label),
        }
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        value.to_string()
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::parse(&text)
    }
}

/// Proposição: fato simples ou asserção `atributo OP valor`.
///
/// A igualdade é estrutural (atributo + operador + valor, ou nome),
/// e é ela que o [`RuleStore`](super::RuleStore) usa para casar conclusões.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Proposition {
    /// Fato booleano identificado só pelo nome.
    Fact { name: String },
    /// Asserção sobre o valor de um atributo.
    Assertion {
        attribute: String,
        operator: Operator,
        value: Value,
    },
}

impl Proposition {
    /// Constrói um fato simples.
    pub fn fact(name: impl Into<String>) -> Self {
        Proposition::Fact { name: name.into() }
    }

    /// Constrói uma asserção, validando a combinação operador/valor.
    pub fn assertion(
        attribute: impl Into<String>,
        operator: Operator,
        value: Value,
    ) -> Result<Self, PropositionError> {
        let attribute = attribute.into();
        if operator.is_ordering() && value.lower_bound().is_none() {
            return Err(PropositionError::NotNumeric {
                text: format!("{}{}{}", attribute, operator, value),
                operator: operator.symbol().to_string(),
                value: value.to_string(),
            });
        }
        Ok(Proposition::Assertion {
            attribute,
            operator,
            value,
        })
    }

    /// Interpreta a forma textual compacta.
    ///
    /// # Erros
    ///
    /// - [`PropositionError::Empty`] — texto vazio
    /// - [`PropositionError::UnknownOperator`] — `!=`, `=>`, `==`, operadores repetidos...
    /// - [`PropositionError::MissingAttribute`] / [`PropositionError::MissingValue`]
    /// - [`PropositionError::NotNumeric`] — `>=` etc. com valor não numérico
    pub fn parse(text: &str) -> Result<Self, PropositionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PropositionError::Empty);
        }
        if !trimmed.contains(OPERATOR_CHARS) {
            return Ok(Proposition::fact(trimmed));
        }

        let Some(caps) = ASSERTION_SYNTAX.captures(trimmed) else {
            let operator: String = trimmed.chars().filter(|c| OPERATOR_CHARS.contains(c)).collect();
            return Err(PropositionError::UnknownOperator {
                text: trimmed.to_string(),
                operator,
            });
        };

        let symbol = &caps["operator"];
        let operator = Operator::from_symbol(symbol).ok_or_else(|| {
            PropositionError::UnknownOperator {
                text: trimmed.to_string(),
                operator: symbol.to_string(),
            }
        })?;

        let attribute = caps["attribute"].trim();
        if attribute.is_empty() {
            return Err(PropositionError::MissingAttribute(trimmed.to_string()));
        }
        let value = caps["value"].trim();
        if value.is_empty() {
            return Err(PropositionError::MissingValue(trimmed.to_string()));
        }

        Self::assertion(attribute, operator, Value::parse(value))
    }

    /// `true` para asserções `atributo OP valor`.
    pub fn is_relational(&self) -> bool {
        matches!(self, Proposition::Assertion { .. })
    }

    /// Chave na base de fatos: o atributo de uma asserção ou o nome de um fato.
    pub fn key(&self) -> &str {
        match self {
            Proposition::Fact { name } => name,
            Proposition::Assertion { attribute, .. } => attribute,
        }
    }

    /// Nome, se for fato simples.
    pub fn name(&self) -> Option<&str> {
        match self {
            Proposition::Fact { name } => Some(name),
            Proposition::Assertion { .. } => None,
        }
    }

    /// Atributo, se for asserção.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Proposition::Assertion { attribute, .. } => Some(attribute),
            Proposition::Fact { .. } => None,
        }
    }

    /// Operador, se for asserção.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Proposition::Assertion { operator, .. } => Some(*operator),
            Proposition::Fact { .. } => None,
        }
    }

    /// Valor de comparação, se for asserção.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Proposition::Assertion { value, .. } => Some(value),
            Proposition::Fact { .. } => None,
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Fact { name } => f.write_str(name),
            Proposition::Assertion {
                attribute,
                operator,
                value,
            } => write!(f, "{}{}{}", attribute, operator, value),
        }
    }
}

impl From<Proposition> for String {
    fn from(proposition: Proposition) -> Self {
        proposition.to_string()
    }
}

impl std::str::FromStr for Proposition {
    type Err = PropositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Proposition::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Texto sem operador vira fato simples
    #[test]
    fn test_parse_plain_fact() {
        let p = Proposition::parse("  credito_aprobado ").unwrap();
        assert_eq!(p, Proposition::fact("credito_aprobado"));
        assert!(!p.is_relational());
        assert_eq!(p.key(), "credito_aprobado");
        assert_eq!(p.name(), Some("credito_aprobado"));
    }

    /// Todos os operadores reconhecidos, com e sem espaços
    #[test]
    fn test_parse_operators() {
        let cases = [
            ("ingresos=altos", Operator::Eq, Value::Label("altos".into())),
            ("propiedades >= 2", Operator::Ge, Value::Number(2)),
            ("propiedades<=3+", Operator::Le, Value::AtLeast(3)),
            ("edad>18", Operator::Gt, Value::Number(18)),
            ("deudas < 5", Operator::Lt, Value::Number(5)),
        ];
        for (text, op, value) in cases {
            let p = Proposition::parse(text).unwrap();
            assert!(p.is_relational());
            assert_eq!(p.operator(), Some(op), "{}", text);
            assert_eq!(p.value(), Some(&value), "{}", text);
        }
    }

    /// Operadores desconhecidos são erro de construção
    #[test]
    fn test_unknown_operator() {
        for text in ["a!=b", "a=>2", "a==b", "a=b=c", "a<>1"] {
            let err = Proposition::parse(text).unwrap_err();
            assert!(
                matches!(err, PropositionError::UnknownOperator { .. }),
                "{}: {:?}",
                text,
                err
            );
        }
    }

    /// Operador de ordem exige valor numérico
    #[test]
    fn test_ordering_requires_number() {
        let err = Proposition::parse("ingresos>=altos").unwrap_err();
        assert!(matches!(err, PropositionError::NotNumeric { .. }));
        // Igualdade aceita rótulo
        assert!(Proposition::parse("ingresos=altos").is_ok());
    }

    /// Atributo ou valor ausentes
    #[test]
    fn test_missing_parts() {
        assert_eq!(
            Proposition::parse("=2").unwrap_err(),
            PropositionError::MissingAttribute("=2".into())
        );
        assert_eq!(
            Proposition::parse("propiedades>=").unwrap_err(),
            PropositionError::MissingValue("propiedades>=".into())
        );
        assert_eq!(Proposition::parse("   ").unwrap_err(), PropositionError::Empty);
    }

    /// "3 ou mais" comparado com limite menor
    #[test]
    fn test_open_ended_normalization() {
        let stored = Value::parse("3+");
        assert_eq!(stored.lower_bound(), Some(3));
        assert!(Operator::Ge.holds(&stored, &Value::Number(2)));
        assert!(!Operator::Lt.holds(&stored, &Value::Number(2)));
        assert!(Operator::Ge.holds(&stored, &Value::Number(3)));
        // Igualdade é estrutural
        assert!(!Operator::Eq.holds(&stored, &Value::Number(3)));
        assert!(Operator::Eq.holds(&stored, &Value::AtLeast(3)));
    }

    /// Sinal `+` à esquerda não é numérico
    #[test]
    fn test_leading_plus_is_label() {
        assert_eq!(Value::parse("+5"), Value::Label("+5".into()));
        assert_eq!(Value::parse("+3+"), Value::Label("+3+".into()));
        assert_eq!(Value::parse("-1"), Value::Number(-1));
        assert!(matches!(
            Proposition::parse("propiedades>=+2"),
            Err(PropositionError::NotNumeric { .. })
        ));
    }

    /// Rótulos nunca satisfazem operadores de ordem
    #[test]
    fn test_label_ordering_is_false() {
        let stored = Value::Label("altos".into());
        assert!(!Operator::Gt.holds(&stored, &Value::Number(0)));
        assert!(Operator::Eq.holds(&stored, &Value::parse("altos")));
    }

    /// A forma textual é reproduzida sem espaços
    #[test]
    fn test_display() {
        let p = Proposition::parse("propiedades >= 3+").unwrap();
        assert_eq!(p.to_string(), "propiedades>=3+");
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"propiedades>=3+\"");
    }
}
