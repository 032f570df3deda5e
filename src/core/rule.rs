//! # Rule — Regras de Produção
//!
//! Uma [`Rule`] liga uma lista ordenada de **premissas** a exatamente uma
//! **conclusão**:
//!
//! ```text
//! R2: historial_credito=bueno ∧ empleo=estable  ⇒  credito_aprobado
//! ```
//!
//! Várias regras podem ter a mesma conclusão — basta uma delas ser satisfeita
//! (disjunção). A **ordem de carregamento** importa: o resolvedor tenta as
//! regras nessa ordem e fica com a primeira que funcionar.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::proposition::Proposition;

/// Identificador estável de uma regra: a sua posição no carregamento.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(pub usize);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0 + 1)
    }
}

/// Regra imutável: premissas (conjunção, esquerda para direita) ⇒ conclusão.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleId,
    /// Rótulo opcional vindo do documento de conhecimento.
    pub label: Option<String>,
    pub premises: Vec<Proposition>,
    pub conclusion: Proposition,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let premises: Vec<String> = self.premises.iter().map(|p| p.to_string()).collect();
        write!(f, "{}: [{}] => {}", self.id, premises.join(", "), self.conclusion)
    }
}

/// Conjunto ordenado de regras, somente leitura depois de construído.
///
/// Mantém um índice `conclusão → regras` para que a busca por conclusão
/// não percorra a lista inteira a cada objetivo.
#[derive(Clone, Debug, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    by_conclusion: HashMap<Proposition, Vec<RuleId>>,
    /// Quantas buscas por conclusão foram feitas.
    #[cfg(test)]
    lookups: std::cell::Cell<usize>,
}

impl RuleStore {
    /// Constrói o store a partir de pares `(premissas, conclusão)` na ordem dada.
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (Vec<Proposition>, Proposition)>,
    {
        let mut store = Self::default();
        for (premises, conclusion) in rules {
            store.push(None, premises, conclusion);
        }
        store
    }

    /// Acrescenta uma regra ao final. Usado apenas durante a construção.
    pub(crate) fn push(
        &mut self,
        label: Option<String>,
        premises: Vec<Proposition>,
        conclusion: Proposition,
    ) -> RuleId {
        let id = RuleId(self.rules.len());
        self.by_conclusion
            .entry(conclusion.clone())
            .or_default()
            .push(id);
        self.rules.push(Rule {
            id,
            label,
            premises,
            conclusion,
        });
        id
    }

    /// Todas as regras cuja conclusão é **exatamente** `goal`, na ordem de carregamento.
    ///
    /// Uma sequência vazia não é erro: sinaliza ao resolvedor que `goal` é uma folha.
    pub fn rules_concluding<'a>(&'a self, goal: &Proposition) -> impl Iterator<Item = &'a Rule> + 'a {
        #[cfg(test)]
        self.lookups.set(self.lookups.get() + 1);
        self.by_conclusion
            .get(goal)
            .into_iter()
            .flatten()
            .map(move |id| &self.rules[id.0])
    }

    /// Regra pelo identificador.
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    #[cfg(test)]
    pub(crate) fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Número de regras.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` se não há regras.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
