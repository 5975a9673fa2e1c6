use std::fmt::Display;

use fxhash::FxHashSet;

use super::types::{Lit, Var};

/// Set of literals currently forced true. For every variable at most one of `v`, `-v` is ever
/// present; `insert` refuses a literal whose negation is already in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    lits: FxHashSet<Lit>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `l`. Returns false (and leaves the assignment untouched) if `!l` is already assigned.
    pub fn insert(&mut self, l: Lit) -> bool {
        if self.lits.contains(&!l) {
            return false;
        }
        self.lits.insert(l);
        true
    }

    /// Copy of this assignment extended by `l`. Used to hand each search branch its own snapshot.
    pub fn with(&self, l: Lit) -> Option<Assignment> {
        let mut a = self.clone();
        a.insert(l).then_some(a)
    }

    /// Whether `l` is true under the assignment.
    pub fn is_true(&self, l: Lit) -> bool {
        self.lits.contains(&l)
    }

    /// Whether `l` is false under the assignment (i.e. its negation is true).
    pub fn is_false(&self, l: Lit) -> bool {
        self.lits.contains(&!l)
    }

    pub fn is_assigned(&self, v: Var) -> bool {
        self.is_true(Lit::pos(v)) || self.is_true(Lit::neg(v))
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lit> {
        self.lits.iter()
    }

    /// Literals in variable order, for stable output.
    pub fn sorted(&self) -> Vec<Lit> {
        let mut lits = self.lits.iter().copied().collect::<Vec<_>>();
        lits.sort();
        lits
    }
}

impl FromIterator<Lit> for Assignment {
    /// Collects literals, keeping the first polarity seen for each variable.
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        let mut a = Assignment::new();
        for l in iter {
            a.insert(l);
        }
        a
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_str = self
            .sorted()
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", display_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_refuses_contradiction() {
        let mut a = Assignment::new();
        assert!(a.insert(Lit::pos(1)));
        assert!(a.insert(Lit::pos(1)));
        assert!(!a.insert(Lit::neg(1)));
        assert_eq!(a.len(), 1);
        assert!(a.is_true(Lit::pos(1)));
        assert!(a.is_false(Lit::neg(1)));
        assert!(a.is_assigned(1));
        assert!(!a.is_assigned(2));
    }

    #[test]
    fn with_leaves_original_untouched() {
        let a = [Lit::pos(1)].into_iter().collect::<Assignment>();
        let b = a.with(Lit::neg(2)).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        assert!(a.with(Lit::neg(1)).is_none());
    }

    #[test]
    fn display_is_sorted() {
        let a = [Lit::neg(3), Lit::pos(1), Lit::neg(2)]
            .into_iter()
            .collect::<Assignment>();
        assert_eq!(a.to_string(), "1 -2 -3");
    }
}
