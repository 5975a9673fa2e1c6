use std::fmt::{Debug, Display};
use std::ops::Index;
use std::rc::Rc;

use fxhash::FxHashSet;

use super::types::Lit;

/// An immutable set of literals. Literals are kept sorted and deduplicated, so two clauses with
/// the same literals compare (and hash) equal regardless of how they were written. Cloning only
/// bumps a reference count, which lets simplified formulas share untouched clauses with the
/// formula they came from.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    lits: Rc<[Lit]>,
}

impl Clause {
    pub fn new(lits: &[Lit]) -> Self {
        let mut lits = lits.to_vec();
        lits.sort();
        lits.dedup();
        Self { lits: lits.into() }
    }

    /// The empty clause (a contradiction).
    pub fn empty() -> Self {
        Self {
            lits: Rc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.lits.len() == 1
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lit> {
        self.lits.iter()
    }

    pub fn contains(&self, l: Lit) -> bool {
        self.lits.binary_search(&l).is_ok()
    }

    /// Whether the clause holds both `v` and `-v` for some variable. Since literals are sorted by
    /// variable, complementary pairs sit next to each other.
    pub fn is_tautology(&self) -> bool {
        self.lits.windows(2).any(|w| w[0] == !w[1])
    }

    /// Union of both clauses minus the clashing pair `{l, -l}`, where `l` is in `self`.
    fn resolvent_on(&self, other: &Clause, l: Lit) -> Clause {
        let lits = self
            .iter()
            .chain(other.iter())
            .copied()
            .filter(|x| *x != l && *x != !l)
            .collect::<Vec<_>>();
        Clause::new(&lits)
    }
}

/// All resolvents of `a` and `b`: one for every literal of `a` whose negation is in `b`. Clauses
/// clashing on more than one literal yield several (tautological) resolvents; callers decide
/// whether to keep those.
pub fn resolve(a: &Clause, b: &Clause) -> FxHashSet<Clause> {
    a.iter()
        .filter(|l| b.contains(!**l))
        .map(|l| a.resolvent_on(b, *l))
        .collect()
}

/// Resolvent of `pos` (containing `l`) and `neg` (containing `-l`) on the given literal.
pub fn resolve_on(pos: &Clause, neg: &Clause, l: Lit) -> Clause {
    pos.resolvent_on(neg, l)
}

impl Index<usize> for Clause {
    type Output = Lit;
    fn index(&self, i: usize) -> &Lit {
        &self.lits[i]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = std::slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Clause::new(&iter.into_iter().collect::<Vec<_>>())
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit_str = self
            .lits
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{}}}", lit_str)
    }
}

impl Debug for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Clause {{ size: {}, lits: {} }}", self.len(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(ints: &[i64]) -> Clause {
        ints.iter().map(|i| Lit::try_from(*i).unwrap()).collect()
    }

    #[test]
    fn construction_sorts_and_dedups() {
        let c = clause(&[3, -1, 3, 2]);
        assert_eq!(c.len(), 3);
        assert_eq!(c, clause(&[-1, 2, 3]));
        assert!(c.contains(Lit::neg(1)));
        assert!(!c.contains(Lit::pos(1)));
    }

    #[test]
    fn tautology_detection() {
        assert!(clause(&[1, 2, -1]).is_tautology());
        assert!(!clause(&[1, 2, -3]).is_tautology());
        assert!(!Clause::empty().is_tautology());
    }

    #[test]
    fn resolve_single_clash() {
        let rs = resolve(&clause(&[1, 2]), &clause(&[-1, 3]));
        assert_eq!(rs.len(), 1);
        assert!(rs.contains(&clause(&[2, 3])));
    }

    #[test]
    fn resolve_units_gives_empty_clause() {
        let rs = resolve(&clause(&[1]), &clause(&[-1]));
        assert!(rs.contains(&Clause::empty()));
    }

    #[test]
    fn resolve_double_clash_yields_tautologies() {
        let rs = resolve(&clause(&[1, 2]), &clause(&[-1, -2]));
        assert_eq!(rs.len(), 2);
        assert!(rs.iter().all(Clause::is_tautology));
    }

    #[test]
    fn resolve_against_tautology_drops_both_polarities() {
        // {-4} and {4, -4} are both satisfiable, yet their resolvent is the empty clause
        let rs = resolve(&clause(&[-4]), &clause(&[4, -4]));
        assert_eq!(rs.len(), 1);
        assert!(rs.contains(&Clause::empty()));
        assert!(clause(&[4, -4]).is_tautology());
    }

    #[test]
    fn resolve_without_clash_is_empty_set() {
        assert!(resolve(&clause(&[1, 2]), &clause(&[1, 3])).is_empty());
    }

    #[test]
    fn resolve_is_symmetric() {
        let a = clause(&[1, -2, 4]);
        let b = clause(&[-1, 2, 5]);
        assert_eq!(resolve(&a, &b), resolve(&b, &a));
    }
}
