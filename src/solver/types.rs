use std::fmt::Display;
use std::ops::Not;

use ordered_float::NotNan;

use super::error::SolverError;

/// Let us use f64s as Ord
pub type F64 = NotNan<f64>;

/// Representation of a variable. Valid variables start at 1.
pub type Var = u32;

/// Representation of a Literal: a variable plus its sign. Following the MiniSat convention, a
/// TRUE sign == NEGATIVE.
///
/// The signed-integer form maps `v` to `Lit { var: v, sign: false }` and `-v` to
/// `Lit { var: v, sign: true }`; `0` has no literal.
///
/// Ordering is by variable first, then positive before negative. Every heuristic tie-break in
/// the solvers relies on it.
#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lit {
    var: Var,
    sign: bool,
}

impl Lit {
    pub fn new(var: Var, sign: bool) -> Lit {
        assert!(var > 0, "variable 0 has no literal");
        Lit { var, sign }
    }

    pub fn pos(var: Var) -> Lit {
        Lit::new(var, false)
    }

    pub fn neg(var: Var) -> Lit {
        Lit::new(var, true)
    }

    // Returns true if sign is negative.
    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn var(&self) -> Var {
        self.var
    }

    /// Signed-integer form of the literal.
    pub fn to_i64(&self) -> i64 {
        if self.sign {
            -(self.var as i64)
        } else {
            self.var as i64
        }
    }
}

impl TryFrom<i64> for Lit {
    type Error = SolverError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(SolverError::ZeroLiteral {
                clause: 0,
                position: 0,
            });
        }
        let var = Var::try_from(value.unsigned_abs())
            .map_err(|_| SolverError::VariableOutOfRange(value))?;
        Ok(Lit::new(var, value < 0))
    }
}

impl Not for Lit {
    type Output = Self;
    fn not(self) -> Lit {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.sign() { "-" } else { "" }, self.var())
    }
}

// Status markers. Unknown is only reported when a configured resource bound stops a solver
// before it reaches a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Unknown,
    SAT,
    UNSAT,
}

impl SolveStatus {
    pub fn from_sat(sat: bool) -> SolveStatus {
        if sat {
            SolveStatus::SAT
        } else {
            SolveStatus::UNSAT
        }
    }

    pub fn is_sat(&self) -> bool {
        matches!(self, SolveStatus::SAT)
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveStatus::UNSAT)
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::SAT => "SAT",
            SolveStatus::UNSAT => "UNSAT",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_form_round_trips() {
        let l = Lit::try_from(-7).unwrap();
        assert_eq!(l.var(), 7);
        assert!(l.sign());
        assert_eq!(l.to_i64(), -7);
        assert_eq!((!l).to_i64(), 7);
        assert_eq!(l.to_string(), "-7");
    }

    #[test]
    fn zero_literal_is_rejected() {
        assert!(matches!(
            Lit::try_from(0),
            Err(SolverError::ZeroLiteral { .. })
        ));
    }

    #[test]
    fn oversized_variable_is_rejected() {
        let big = i64::from(u32::MAX) + 1;
        assert!(matches!(
            Lit::try_from(big),
            Err(SolverError::VariableOutOfRange(v)) if v == big
        ));
    }

    #[test]
    #[should_panic]
    fn variable_zero_panics() {
        Lit::pos(0);
    }

    #[test]
    fn ordering_puts_positive_first() {
        let mut lits = vec![Lit::neg(2), Lit::pos(3), Lit::pos(2), Lit::neg(1)];
        lits.sort();
        let ints = lits.iter().map(Lit::to_i64).collect::<Vec<_>>();
        assert_eq!(ints, vec![-1, 2, -2, 3]);
    }
}
