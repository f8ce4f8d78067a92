//! Binary boolean operators accepted by [`Builder::apply`][crate::builder::Builder::apply].

use std::fmt;

use crate::error::BddError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum BoolOp {
    And = 0,
    Iff = 1,
    Implies = 2,
    Or = 3,
    Xor = 4,
}

impl BoolOp {
    pub const ALL: [BoolOp; 5] = [
        BoolOp::And,
        BoolOp::Iff,
        BoolOp::Implies,
        BoolOp::Or,
        BoolOp::Xor,
    ];

    /// Evaluate the operator on two truth values.
    ///
    /// ```
    /// use robdd::op::BoolOp;
    ///
    /// assert!(BoolOp::Implies.eval(false, true));
    /// assert!(!BoolOp::Implies.eval(true, false));
    /// assert!(BoolOp::Iff.eval(false, false));
    /// ```
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            BoolOp::And => a && b,
            BoolOp::Iff => a == b,
            BoolOp::Implies => !a || b,
            BoolOp::Or => a || b,
            BoolOp::Xor => a != b,
        }
    }

    /// Return the operator code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BoolOp {
    type Error = BddError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        BoolOp::ALL
            .into_iter()
            .find(|op| op.code() == code)
            .ok_or(BddError::UnknownOperator(code))
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoolOp::And => "AND",
            BoolOp::Iff => "IFF",
            BoolOp::Implies => "IMPLIES",
            BoolOp::Or => "OR",
            BoolOp::Xor => "XOR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_tables() {
        // Rows: (a, b) = (0,0), (0,1), (1,0), (1,1)
        let rows = [(false, false), (false, true), (true, false), (true, true)];
        let table = |op: BoolOp| rows.map(|(a, b)| op.eval(a, b));

        assert_eq!(table(BoolOp::And), [false, false, false, true]);
        assert_eq!(table(BoolOp::Or), [false, true, true, true]);
        assert_eq!(table(BoolOp::Xor), [false, true, true, false]);
        assert_eq!(table(BoolOp::Iff), [true, false, false, true]);
        assert_eq!(table(BoolOp::Implies), [true, true, false, true]);
    }

    #[test]
    fn test_codes() {
        for op in BoolOp::ALL {
            assert_eq!(BoolOp::try_from(op.code()), Ok(op));
        }
        assert_eq!(BoolOp::try_from(5), Err(BddError::UnknownOperator(5)));
        assert_eq!(BoolOp::try_from(255), Err(BddError::UnknownOperator(255)));
    }
}
