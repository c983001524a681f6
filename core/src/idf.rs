use crate::{QaError, Result, Term};
use std::collections::{HashMap, HashSet};

/// Term -> `ln(N / df)` over one collection. Read-only once built; weights from
/// different collections are not comparable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    weights: HashMap<Term, f64>,
    members: usize,
}

impl IdfTable {
    /// Weight of `term`, or `None` when no member of the collection contains it.
    pub fn weight(&self, term: &str) -> Option<f64> { self.weights.get(term).copied() }
    pub fn contains(&self, term: &str) -> bool { self.weights.contains_key(term) }
    pub fn len(&self) -> usize { self.weights.len() }
    pub fn is_empty(&self) -> bool { self.weights.is_empty() }
    /// Size of the collection the table was computed from.
    pub fn members(&self) -> usize { self.members }
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }
}

/// Compute IDF weights over a collection of term sequences.
///
/// Document frequency counts members containing a term at least once, so a
/// term repeated inside one member still counts once. Fails only when the
/// collection has no members.
pub fn compute_idfs<'a, I>(members: I) -> Result<IdfTable>
where
    I: IntoIterator<Item = &'a [Term]>,
{
    let mut df: HashMap<&'a str, u32> = HashMap::new();
    let mut n = 0usize;
    for terms in members {
        n += 1;
        let seen: HashSet<&'a str> = terms.iter().map(String::as_str).collect();
        for term in seen {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    if n == 0 {
        return Err(QaError::EmptyCollection);
    }
    let weights = df
        .into_iter()
        .map(|(term, df_t)| (term.to_string(), (n as f64 / df_t as f64).ln()))
        .collect();
    Ok(IdfTable { weights, members: n })
}
