//! Comparison operators for hard constraints.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Comparison applied between an aggregate stat total and a threshold.
///
/// Parsing is strict: only the five symbols below are accepted.
///
/// # Examples
///
/// ```
/// use u_loadout::model::Operator;
///
/// let op: Operator = "<=".parse().unwrap();
/// assert_eq!(op, Operator::Le);
/// assert!(op.holds(30.0, 30.0, 1e-4));
/// assert!("=>".parse::<Operator>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    #[cfg_attr(feature = "serde", serde(rename = "=="))]
    Eq,
    #[cfg_attr(feature = "serde", serde(rename = "<"))]
    Lt,
    #[cfg_attr(feature = "serde", serde(rename = ">"))]
    Gt,
}

impl Operator {
    /// All operators, in symbol order.
    pub const ALL: [Operator; 5] = [
        Operator::Le,
        Operator::Ge,
        Operator::Eq,
        Operator::Lt,
        Operator::Gt,
    ];

    /// The operator's symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Lt => "<",
            Operator::Gt => ">",
        }
    }

    /// Exact check of a final total against `threshold`.
    ///
    /// `tolerance` only affects `==`, which holds when
    /// `|value - threshold| < tolerance`.
    #[inline]
    pub fn holds(self, value: f64, threshold: f64, tolerance: f64) -> bool {
        match self {
            Operator::Le => value <= threshold,
            Operator::Ge => value >= threshold,
            Operator::Eq => (value - threshold).abs() < tolerance,
            Operator::Lt => value < threshold,
            Operator::Gt => value > threshold,
        }
    }

    /// Whether some total in `[min, max]` could still satisfy the operator.
    ///
    /// Used for feasibility pruning: `min` and `max` are the lowest and
    /// highest totals reachable from the current partial assignment.
    #[inline]
    pub fn reachable(self, min: f64, max: f64, threshold: f64, tolerance: f64) -> bool {
        match self {
            Operator::Le => min <= threshold,
            Operator::Ge => max >= threshold,
            Operator::Eq => min <= threshold + tolerance && max >= threshold - tolerance,
            Operator::Lt => min < threshold,
            Operator::Gt => max > threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "==" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            other => Err(ModelError::UnknownOperator(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    #[test]
    fn test_parse_all_symbols() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>(), Ok(op));
            assert_eq!(op.to_string(), op.symbol());
        }
    }

    #[test]
    fn test_parse_is_exact() {
        for padded in [" >= ", "<= ", "\t=="] {
            assert_eq!(
                padded.parse::<Operator>(),
                Err(ModelError::UnknownOperator(padded.to_string()))
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["", "=", "!=", "=<", "<>", "lte", "<=="] {
            assert_eq!(
                bad.parse::<Operator>(),
                Err(ModelError::UnknownOperator(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_holds() {
        assert!(Operator::Le.holds(30.0, 30.0, EPS));
        assert!(!Operator::Le.holds(30.1, 30.0, EPS));
        assert!(Operator::Ge.holds(10.0, 10.0, EPS));
        assert!(!Operator::Ge.holds(9.9, 10.0, EPS));
        assert!(Operator::Lt.holds(9.9, 10.0, EPS));
        assert!(!Operator::Lt.holds(10.0, 10.0, EPS));
        assert!(Operator::Gt.holds(10.1, 10.0, EPS));
        assert!(!Operator::Gt.holds(10.0, 10.0, EPS));
    }

    #[test]
    fn test_equality_uses_tolerance() {
        assert!(Operator::Eq.holds(15.0, 15.0, EPS));
        assert!(Operator::Eq.holds(15.00005, 15.0, EPS));
        assert!(!Operator::Eq.holds(15.001, 15.0, EPS));
    }

    #[test]
    fn test_reachable_ranges() {
        // current range [5, 20]
        assert!(Operator::Le.reachable(5.0, 20.0, 5.0, EPS));
        assert!(!Operator::Le.reachable(5.0, 20.0, 4.0, EPS));
        assert!(Operator::Ge.reachable(5.0, 20.0, 20.0, EPS));
        assert!(!Operator::Ge.reachable(5.0, 20.0, 21.0, EPS));
        assert!(!Operator::Lt.reachable(5.0, 20.0, 5.0, EPS));
        assert!(!Operator::Gt.reachable(5.0, 20.0, 20.0, EPS));
        assert!(Operator::Eq.reachable(5.0, 20.0, 12.0, EPS));
        assert!(Operator::Eq.reachable(5.0, 20.0, 20.00005, EPS));
        assert!(!Operator::Eq.reachable(5.0, 20.0, 25.0, EPS));
        assert!(!Operator::Eq.reachable(5.0, 20.0, 4.0, EPS));
    }
}
