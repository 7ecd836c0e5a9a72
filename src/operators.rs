//! Arithmetic operator registry.
//!
//! The language has exactly four operators, all prefix and all variadic:
//!
//! ```scheme
//! (+ 1 2 3)    ; 6    sum, identity 0
//! (* 2 3 4)    ; 24   product, identity 1
//! (- 10 1 2)   ; 7    first minus the sum of the rest
//! (/ 100 5 2)  ; 10   first divided by the product of the rest
//! ```
//!
//! ## Semantics
//!
//! - All arithmetic is `f32`; there is no integer mode.
//! - Division by zero follows IEEE 754 (`inf`, `-inf` or `NaN`) and is not an error.
//! - The reader guarantees at least two operands, but every operator is total over any
//!   operand count so the evaluator never needs an arity check.
//!
//! ## Adding New Operators
//!
//! 1. **Add a variant** to [`Operator`]; the exhaustive matches below stop compiling
//!    until the symbol and the implementation are filled in
//! 2. **Implement the function** following the signature `fn(&[f32]) -> f32`
//! 3. **Add it to `OPERATORS`** so the symbol lookup can find it

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// One of the four arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The symbol naming this operator in source text
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Look up an operator by its symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATOR_SYMBOLS.get(symbol).copied()
    }

    /// Apply this operator to already-evaluated operands, left to right
    pub fn apply(self, operands: &[f32]) -> f32 {
        match self {
            Operator::Add => builtin_add(operands),
            Operator::Subtract => builtin_sub(operands),
            Operator::Multiply => builtin_mul(operands),
            Operator::Divide => builtin_div(operands),
        }
    }

    /// All operators, in registry order
    pub fn all() -> &'static [Operator] {
        &OPERATORS
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

//
// Builtin Operator Implementations
//

fn builtin_add(args: &[f32]) -> f32 {
    let mut sum: f32 = 0.0;
    for &arg in args {
        sum += arg;
    }
    sum
}

fn builtin_mul(args: &[f32]) -> f32 {
    let mut product: f32 = 1.0;
    for &arg in args {
        product *= arg;
    }
    product
}

// a - (b + c + ...): the tail is summed first, then subtracted once
fn builtin_sub(args: &[f32]) -> f32 {
    match args.split_first() {
        Some((first, rest)) => first - builtin_add(rest),
        None => builtin_add(args),
    }
}

// a / (b * c * ...): the tail is multiplied first, then divided once
fn builtin_div(args: &[f32]) -> f32 {
    match args.split_first() {
        Some((first, rest)) => first / builtin_mul(rest),
        None => builtin_mul(args),
    }
}

/// Global registry of all operators.
static OPERATORS: [Operator; 4] = [
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
];

/// Lazy static map from symbol to Operator (private - use Operator::from_symbol)
static OPERATOR_SYMBOLS: LazyLock<HashMap<&'static str, Operator>> =
    LazyLock::new(|| OPERATORS.iter().map(|op| (op.symbol(), *op)).collect());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        let test_cases = vec![
            ("+", Some(Operator::Add)),
            ("-", Some(Operator::Subtract)),
            ("*", Some(Operator::Multiply)),
            ("/", Some(Operator::Divide)),
            ("%", None),
            ("", None),
            ("++", None),
            ("ERROR", None),
            ("add", None),
        ];

        for (i, (symbol, expected)) in test_cases.into_iter().enumerate() {
            assert_eq!(
                Operator::from_symbol(symbol),
                expected,
                "Lookup test #{}: '{symbol}'",
                i + 1
            );
        }

        for op in Operator::all() {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(*op));
            assert_eq!(op.to_string(), op.symbol());
        }
    }

    #[test]
    fn test_apply_data_driven() {
        let test_cases: Vec<(Operator, Vec<f32>, f32)> = vec![
            // Sums
            (Operator::Add, vec![10.0, 10.0, 10.0], 30.0),
            (Operator::Add, vec![1.5, -0.5], 1.0),
            (Operator::Add, vec![], 0.0),
            // Products
            (Operator::Multiply, vec![5.0, 2.0], 10.0),
            (Operator::Multiply, vec![2.0, 3.0, 4.0], 24.0),
            (Operator::Multiply, vec![], 1.0),
            // Left-fold subtraction
            (Operator::Subtract, vec![8.0, 3.0], 5.0),
            (Operator::Subtract, vec![10.0, 1.0, 2.0], 7.0),
            (Operator::Subtract, vec![-4.0], -4.0),
            (Operator::Subtract, vec![], 0.0),
            // Left-fold division
            (Operator::Divide, vec![20.0, 4.0], 5.0),
            (Operator::Divide, vec![100.0, 5.0, 2.0], 10.0),
            (Operator::Divide, vec![1.0, 4.0], 0.25),
            (Operator::Divide, vec![7.0], 7.0),
            (Operator::Divide, vec![], 1.0),
        ];

        for (i, (op, operands, expected)) in test_cases.iter().enumerate() {
            assert_eq!(
                op.apply(operands),
                *expected,
                "Apply test #{}: ({op} {operands:?})",
                i + 1
            );
        }
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert_eq!(Operator::Divide.apply(&[1.0, 0.0]), f32::INFINITY);
        assert_eq!(Operator::Divide.apply(&[-1.0, 0.0]), f32::NEG_INFINITY);
        assert!(Operator::Divide.apply(&[0.0, 0.0]).is_nan());
        // Any zero factor in the tail zeroes the divisor
        assert_eq!(Operator::Divide.apply(&[6.0, 3.0, 0.0]), f32::INFINITY);
    }
}
