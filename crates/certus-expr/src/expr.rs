//! Expression trees.
//!
//! `Expr` keeps the shape an equation builder constructed: repeated
//! symbols are kept as repeated terms, and multiplication or division of
//! an accumulated sum stays a wrapped node so it renders parenthesized.
//! Builders only ever combine unknowns linearly; `Expr::linear_form`
//! enforces that when flattening.

use std::fmt;

use certus_rational::Rational;
use num_traits::{One, Zero};

use crate::linear::{LinearForm, NonLinearError};
use crate::unknown::Unknown;

/// A binary operator appearing in generated equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

impl Op {
    /// Returns the display symbol for this operator.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
    }

    /// Parses an operator from its display symbol.
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A symbolic expression.
///
/// Linearity is an invariant maintained by the builders, not by the type:
/// `Mul` and `Div` nodes always have a constant operand in generated
/// expressions, and `linear_form` rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A numeric literal.
    Number(Rational),
    /// An unknown.
    Symbol(Unknown),
    /// Sum of expressions: a + b + c + ...
    ///
    /// Invariant: at least 2 arguments. A `Neg` argument renders as a
    /// subtracted term.
    Add(Vec<Expr>),
    /// Negation: -expr.
    Neg(Box<Expr>),
    /// Product: lhs * rhs.
    Mul(Box<Expr>, Box<Expr>),
    /// Quotient: lhs / rhs.
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a numeric literal.
    #[must_use]
    pub fn number(value: impl Into<Rational>) -> Self {
        Expr::Number(value.into())
    }

    /// Creates a symbol node for an unknown.
    #[must_use]
    pub fn symbol(unknown: &Unknown) -> Self {
        Expr::Symbol(unknown.clone())
    }

    /// Appends `rhs` as an added term, flattening nested sums.
    #[must_use]
    pub fn plus(self, rhs: Expr) -> Self {
        match self {
            Expr::Add(mut args) => {
                args.push(rhs);
                Expr::Add(args)
            }
            lhs => Expr::Add(vec![lhs, rhs]),
        }
    }

    /// Appends `rhs` as a subtracted term.
    #[must_use]
    pub fn minus(self, rhs: Expr) -> Self {
        self.plus(Expr::Neg(Box::new(rhs)))
    }

    /// Multiplies the whole expression by `rhs`.
    #[must_use]
    pub fn times(self, rhs: Expr) -> Self {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }

    /// Divides the whole expression by `rhs`.
    #[must_use]
    pub fn divided_by(self, rhs: Expr) -> Self {
        Expr::Div(Box::new(self), Box::new(rhs))
    }

    /// Builds a `coefficient*unknown` term, omitting a coefficient of one.
    #[must_use]
    pub fn scaled_symbol(coefficient: &Rational, unknown: &Unknown) -> Self {
        if coefficient.is_one() {
            Expr::symbol(unknown)
        } else {
            Expr::Mul(
                Box::new(Expr::Number(coefficient.clone())),
                Box::new(Expr::symbol(unknown)),
            )
        }
    }

    /// Flattens the tree into `Σ coefficient·unknown + constant`.
    ///
    /// # Errors
    ///
    /// Returns an error for any shape outside the linear fragment:
    /// products of two unknowns, an unknown in a divisor, or division
    /// by zero.
    pub fn linear_form(&self) -> Result<LinearForm, NonLinearError> {
        match self {
            Expr::Number(n) => Ok(LinearForm::constant(n.clone())),
            Expr::Symbol(u) => Ok(LinearForm::unknown(u.clone())),
            Expr::Add(args) => {
                let mut sum = LinearForm::zero();
                for arg in args {
                    sum = sum.add(&arg.linear_form()?);
                }
                Ok(sum)
            }
            Expr::Neg(inner) => Ok(inner.linear_form()?.negated()),
            Expr::Mul(lhs, rhs) => {
                let l = lhs.linear_form()?;
                let r = rhs.linear_form()?;
                if let Some(scalar) = l.as_constant() {
                    Ok(r.scale(scalar))
                } else if let Some(scalar) = r.as_constant() {
                    Ok(l.scale(scalar))
                } else {
                    Err(NonLinearError::ProductOfUnknowns)
                }
            }
            Expr::Div(lhs, rhs) => {
                let l = lhs.linear_form()?;
                let r = rhs.linear_form()?;
                let Some(divisor) = r.as_constant() else {
                    return Err(NonLinearError::UnknownInDivisor);
                };
                if divisor.is_zero() {
                    return Err(NonLinearError::DivisionByZero);
                }
                Ok(l.scale(&divisor.recip()))
            }
        }
    }

    /// Collects the unknowns referenced by this expression, in first
    /// occurrence order.
    pub fn collect_unknowns(&self, out: &mut Vec<Unknown>) {
        match self {
            Expr::Number(_) => {}
            Expr::Symbol(u) => {
                if !out.contains(u) {
                    out.push(u.clone());
                }
            }
            Expr::Add(args) => {
                for arg in args {
                    arg.collect_unknowns(out);
                }
            }
            Expr::Neg(inner) => inner.collect_unknowns(out),
            Expr::Mul(l, r) | Expr::Div(l, r) => {
                l.collect_unknowns(out);
                r.collect_unknowns(out);
            }
        }
    }

    /// Collects every numeric literal in the expression, in render order.
    ///
    /// These are exactly the constants a reader sees, which is what the
    /// integrality and range checks care about.
    pub fn collect_numbers(&self, out: &mut Vec<Rational>) {
        match self {
            Expr::Number(n) => out.push(n.clone()),
            Expr::Symbol(_) => {}
            Expr::Add(args) => {
                for arg in args {
                    arg.collect_numbers(out);
                }
            }
            Expr::Neg(inner) => inner.collect_numbers(out),
            Expr::Mul(l, r) | Expr::Div(l, r) => {
                l.collect_numbers(out);
                r.collect_numbers(out);
            }
        }
    }

    /// Collects the operators this expression renders, in render order.
    pub fn collect_operators(&self, out: &mut Vec<Op>) {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => {}
            Expr::Add(args) => {
                for (i, arg) in args.iter().enumerate() {
                    match arg {
                        Expr::Neg(inner) => {
                            out.push(Op::Sub);
                            inner.collect_operators(out);
                        }
                        other => {
                            if i > 0 {
                                out.push(Op::Add);
                            }
                            other.collect_operators(out);
                        }
                    }
                }
            }
            Expr::Neg(inner) => {
                out.push(Op::Sub);
                inner.collect_operators(out);
            }
            Expr::Mul(l, r) => {
                out.push(Op::Mul);
                l.collect_operators(out);
                r.collect_operators(out);
            }
            Expr::Div(l, r) => {
                out.push(Op::Div);
                l.collect_operators(out);
                r.collect_operators(out);
            }
        }
    }

    /// Returns true if any unknown appears as a symbol more than once.
    ///
    /// Coefficients don't count: `2*x` is one occurrence, `x + x` is two.
    #[must_use]
    pub fn has_repeated_symbol(&self) -> bool {
        let mut seen: Vec<(Unknown, usize)> = Vec::new();
        self.count_symbols(&mut seen);
        seen.iter().any(|(_, count)| *count >= 2)
    }

    fn count_symbols(&self, seen: &mut Vec<(Unknown, usize)>) {
        match self {
            Expr::Number(_) => {}
            Expr::Symbol(u) => {
                if let Some(entry) = seen.iter_mut().find(|(s, _)| s == u) {
                    entry.1 += 1;
                } else {
                    seen.push((u.clone(), 1));
                }
            }
            Expr::Add(args) => {
                for arg in args {
                    arg.count_symbols(seen);
                }
            }
            Expr::Neg(inner) => inner.count_symbols(seen),
            Expr::Mul(l, r) | Expr::Div(l, r) => {
                l.count_symbols(seen);
                r.count_symbols(seen);
            }
        }
    }

    /// Writes the expression, parenthesizing sums and negations so the
    /// rendered string parses back to the same value.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Add(_) | Expr::Neg(_) => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => match n.to_decimal_string() {
                Some(s) => f.write_str(&s),
                None => write!(f, "{n}"),
            },
            Expr::Symbol(u) => write!(f, "{u}"),
            Expr::Add(args) => {
                for (i, arg) in args.iter().enumerate() {
                    match arg {
                        Expr::Neg(inner) => {
                            if i == 0 {
                                write!(f, "-")?;
                            } else {
                                write!(f, " - ")?;
                            }
                            inner.fmt_operand(f)?;
                        }
                        other => {
                            if i > 0 {
                                write!(f, " + ")?;
                            }
                            write!(f, "{other}")?;
                        }
                    }
                }
                Ok(())
            }
            Expr::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_operand(f)
            }
            Expr::Mul(l, r) => {
                // Coefficient products keep the legacy compact style.
                if let (Expr::Number(_), Expr::Symbol(_)) = (l.as_ref(), r.as_ref()) {
                    write!(f, "{l}*{r}")
                } else {
                    l.fmt_operand(f)?;
                    write!(f, " * ")?;
                    r.fmt_operand(f)
                }
            }
            Expr::Div(l, r) => {
                l.fmt_operand(f)?;
                write!(f, " / ")?;
                r.fmt_operand(f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Unknown {
        Unknown::new("x")
    }

    fn y() -> Unknown {
        Unknown::new("y")
    }

    #[test]
    fn test_display_repeated_sum() {
        let e = Expr::symbol(&x()).plus(Expr::symbol(&x())).plus(Expr::symbol(&x()));
        assert_eq!(e.to_string(), "x + x + x");
        assert!(e.has_repeated_symbol());
    }

    #[test]
    fn test_display_mixed_signs() {
        let e = Expr::number(7).plus(Expr::number(5)).minus(Expr::symbol(&y()));
        assert_eq!(e.to_string(), "7 + 5 - y");
    }

    #[test]
    fn test_display_coefficient() {
        let e = Expr::scaled_symbol(&Rational::from(2), &y());
        assert_eq!(e.to_string(), "2*y");
        let one = Expr::scaled_symbol(&Rational::from(1), &y());
        assert_eq!(one.to_string(), "y");
    }

    #[test]
    fn test_display_parenthesized_chain() {
        let e = Expr::number(7).plus(Expr::number(5)).times(Expr::number(3));
        assert_eq!(e.to_string(), "(7 + 5) * 3");
        let d = e.divided_by(Expr::number(4));
        assert_eq!(d.to_string(), "(7 + 5) * 3 / 4");
    }

    #[test]
    fn test_display_decimal() {
        let e = Expr::number(Rational::from_scaled(25, 1));
        assert_eq!(e.to_string(), "2.5");
    }

    #[test]
    fn test_linear_form_folds_chain() {
        // (x + 2) * 3 => 3x + 6
        let e = Expr::symbol(&x()).plus(Expr::number(2)).times(Expr::number(3));
        let form = e.linear_form().unwrap();
        assert_eq!(form.coefficient(&x()), Rational::from(3));
        assert_eq!(form.constant_term(), &Rational::from(6));
    }

    #[test]
    fn test_linear_form_merges_repeats() {
        let e = Expr::symbol(&x())
            .plus(Expr::symbol(&x()))
            .minus(Expr::symbol(&y()));
        let form = e.linear_form().unwrap();
        assert_eq!(form.coefficient(&x()), Rational::from(2));
        assert_eq!(form.coefficient(&y()), Rational::from(-1));
    }

    #[test]
    fn test_linear_form_rejects_products() {
        let e = Expr::symbol(&x()).times(Expr::symbol(&y()));
        assert!(matches!(
            e.linear_form(),
            Err(NonLinearError::ProductOfUnknowns)
        ));

        let d = Expr::number(1).divided_by(Expr::symbol(&x()));
        assert!(matches!(
            d.linear_form(),
            Err(NonLinearError::UnknownInDivisor)
        ));
    }

    #[test]
    fn test_collect_operators() {
        let e = Expr::number(7)
            .minus(Expr::number(5))
            .times(Expr::number(3));
        let mut ops = Vec::new();
        e.collect_operators(&mut ops);
        assert_eq!(ops, vec![Op::Mul, Op::Sub]);
    }

    #[test]
    fn test_display_idempotent() {
        let e = Expr::symbol(&x())
            .plus(Expr::scaled_symbol(&Rational::from(2), &y()))
            .minus(Expr::number(4));
        assert_eq!(e.to_string(), e.to_string());
        assert_eq!(e.to_string(), "x + 2*y - 4");
    }
}
