//! Pattern-override builder.
//!
//! A pattern pins the shape of an equation with placeholders, e.g.
//! `"{x} + {x} = {const1}"`. Placeholders carrying a standard pool name
//! (`x`, `y`, ...) are unknowns; any other name is a constant. Pinned
//! `values` are honored as-is; per equation, the last unpinned constant
//! is derived from the pre-assigned solution so the equation holds, and
//! the remaining constants are sampled.
//!
//! Templates are parsed once at configuration time with every constant
//! set to one, which catches syntax errors and nonlinear shapes before a
//! single sample is drawn.

use certus_expr::{Equation, Expr, Solution, Unknown};
use certus_rational::Rational;
use num_traits::Zero;
use rand::Rng;

use crate::config::EquationPattern;
use crate::sampler::sample_value;
use crate::validate::{Candidate, Rejection};

/// Sampled constants and solutions stay within `max_value / 3` so derived
/// constants have headroom under the value bound.
const SAMPLE_DIVISOR: i64 = 3;

// ---------------------------------------------------------------------
// Template syntax
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(Rational),
    Placeholder(String),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '{' => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
                        Some(c) => return Err(format!("invalid placeholder character `{c}`")),
                        None => return Err("unclosed placeholder".to_string()),
                    }
                }
                if name.is_empty() {
                    return Err("empty placeholder".to_string());
                }
                tokens.push(Token::Placeholder(name));
            }
            '0'..='9' => {
                let mut digits = String::new();
                let mut fraction_digits: u32 = 0;
                let mut seen_dot = false;
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(c);
                        if seen_dot {
                            fraction_digits += 1;
                        }
                        chars.next();
                    } else if c == '.' && !seen_dot {
                        seen_dot = true;
                        chars.next();
                    } else {
                        break;
                    }
                }
                let scaled: i64 = digits
                    .parse()
                    .map_err(|_| format!("number out of range: `{digits}`"))?;
                tokens.push(Token::Number(Rational::from_scaled(scaled, fraction_digits)));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            other => return Err(format!("unexpected character `{other}`")),
        }
    }
    Ok(tokens)
}

/// One side of a parsed template. Mirrors [`Expr`] with placeholders as
/// leaves; instantiation substitutes each placeholder and preserves the
/// written shape.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Number(Rational),
    Placeholder(String),
    Add(Vec<Node>),
    Neg(Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
}

impl Node {
    fn push_added(self, rhs: Node) -> Node {
        match self {
            Node::Add(mut args) => {
                args.push(rhs);
                Node::Add(args)
            }
            lhs => Node::Add(vec![lhs, rhs]),
        }
    }

    fn collect_placeholders(&self, out: &mut Vec<String>) {
        match self {
            Node::Number(_) => {}
            Node::Placeholder(name) => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            Node::Add(args) => {
                for arg in args {
                    arg.collect_placeholders(out);
                }
            }
            Node::Neg(inner) => inner.collect_placeholders(out),
            Node::Mul(l, r) | Node::Div(l, r) => {
                l.collect_placeholders(out);
                r.collect_placeholders(out);
            }
        }
    }

    /// Substitutes placeholders and rebuilds the expression tree.
    fn instantiate<F>(&self, subst: &F) -> Expr
    where
        F: Fn(&str) -> Expr,
    {
        match self {
            Node::Number(n) => Expr::Number(n.clone()),
            Node::Placeholder(name) => subst(name),
            Node::Add(args) => Expr::Add(args.iter().map(|a| a.instantiate(subst)).collect()),
            Node::Neg(inner) => Expr::Neg(Box::new(inner.instantiate(subst))),
            Node::Mul(l, r) => Expr::Mul(
                Box::new(l.instantiate(subst)),
                Box::new(r.instantiate(subst)),
            ),
            Node::Div(l, r) => Expr::Div(
                Box::new(l.instantiate(subst)),
                Box::new(r.instantiate(subst)),
            ),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse(input: &str) -> Result<Node, String> {
        let mut parser = Parser {
            tokens: tokenize(input)?,
            pos: 0,
        };
        let node = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            return Err("trailing input after expression".to_string());
        }
        Ok(node)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expr(&mut self) -> Result<Node, String> {
        let mut node = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    node = node.push_added(rhs);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    node = node.push_added(Node::Neg(Box::new(rhs)));
                }
                _ => return Ok(node),
            }
        }
    }

    fn term(&mut self) -> Result<Node, String> {
        let mut node = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    node = Node::Mul(Box::new(node), Box::new(rhs));
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    node = Node::Div(Box::new(node), Box::new(rhs));
                }
                _ => return Ok(node),
            }
        }
    }

    fn factor(&mut self) -> Result<Node, String> {
        match self.next() {
            Some(Token::Minus) => Ok(Node::Neg(Box::new(self.factor()?))),
            Some(Token::Open) => {
                let node = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(node),
                    _ => Err("missing closing parenthesis".to_string()),
                }
            }
            Some(Token::Number(n)) => Ok(Node::Number(n)),
            Some(Token::Placeholder(name)) => Ok(Node::Placeholder(name)),
            _ => Err("expected a value".to_string()),
        }
    }
}

/// A pattern parsed into its two sides.
struct ParsedPattern {
    left: Node,
    right: Node,
}

fn parse_pattern(template: &str) -> Result<ParsedPattern, String> {
    let mut sides = template.split('=');
    let (Some(left), Some(right), None) = (sides.next(), sides.next(), sides.next()) else {
        return Err("template must contain exactly one `=`".to_string());
    };
    Ok(ParsedPattern {
        left: Parser::parse(left)?,
        right: Parser::parse(right)?,
    })
}

fn placeholders(pattern: &ParsedPattern) -> Vec<String> {
    let mut names = Vec::new();
    pattern.left.collect_placeholders(&mut names);
    pattern.right.collect_placeholders(&mut names);
    names
}

/// Validates a template at configuration time: it must parse, reference
/// at least one unknown, stay inside the linear fragment, and pin only
/// names it actually contains.
pub(crate) fn check_template(pattern: &EquationPattern) -> Result<(), String> {
    let parsed = parse_pattern(&pattern.template)?;
    let names = placeholders(&parsed);

    if !names.iter().any(|n| Unknown::is_pool_name(n)) {
        return Err("template references no unknown".to_string());
    }
    for (pinned, _) in &pattern.values {
        if !names.contains(pinned) {
            return Err(format!("pinned value for absent placeholder `{pinned}`"));
        }
    }

    // Linearity probe: unknowns stay symbolic, constants take their
    // pinned value or one. Pinned values participate so a pinned zero
    // divisor is caught here rather than at build time.
    let probe = |name: &str| {
        if Unknown::is_pool_name(name) {
            return Expr::symbol(&Unknown::new(name));
        }
        let value = pattern
            .values
            .iter()
            .find(|(n, _)| n == name)
            .map_or_else(|| Rational::from(1), |(_, v)| v.clone());
        Expr::Number(value)
    };
    let eq = Equation::new(
        parsed.left.instantiate(&probe),
        parsed.right.instantiate(&probe),
    );
    eq.normalized().map_err(|e| e.to_string())?;
    Ok(())
}

// ---------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------

/// Builds a candidate from the pattern override.
///
/// The unknowns are everything the templates name, in first-appearance
/// order; their values come from pins where given and sampling otherwise.
/// Per equation, the last unpinned constant is derived so the equation
/// holds; an equation with nothing to derive must already hold, or the
/// candidate is rejected.
pub(crate) fn build<R: Rng + ?Sized>(
    rng: &mut R,
    patterns: &[EquationPattern],
    max_value: i64,
    allow_decimals: bool,
) -> Result<Candidate, Rejection> {
    let parsed: Vec<ParsedPattern> = patterns
        .iter()
        .map(|p| {
            parse_pattern(&p.template)
                .map_err(|e| Rejection::Defect(format!("unvalidated template: {e}")))
        })
        .collect::<Result<_, _>>()?;

    // Unknowns across all patterns, first-appearance order. Pins win over
    // sampling; the first pin for a name wins over later ones.
    let mut unknowns: Vec<Unknown> = Vec::new();
    for pattern in &parsed {
        for name in placeholders(pattern) {
            if Unknown::is_pool_name(&name) && !unknowns.iter().any(|u| u.name() == name) {
                unknowns.push(Unknown::new(name));
            }
        }
    }
    let bound = (max_value / SAMPLE_DIVISOR).max(1);
    let entries = unknowns
        .iter()
        .map(|u| {
            let pinned = patterns
                .iter()
                .flat_map(|p| &p.values)
                .find(|(name, _)| name == u.name())
                .map(|(_, v)| v.clone());
            (
                u.clone(),
                pinned.unwrap_or_else(|| sample_value(rng, bound, allow_decimals)),
            )
        })
        .collect();
    let solution = Solution::new(entries);

    let mut equations = Vec::with_capacity(parsed.len());
    for (pattern, source) in parsed.iter().zip(patterns) {
        let names = placeholders(pattern);
        let mut constants: Vec<(String, Rational)> = Vec::new();
        let mut derived: Option<String> = None;
        let free: Vec<&String> = names
            .iter()
            .filter(|n| !Unknown::is_pool_name(n))
            .filter(|n| !source.values.iter().any(|(pinned, _)| &pinned == n))
            .collect();
        for (i, name) in free.iter().enumerate() {
            if i + 1 == free.len() {
                derived = Some((*name).clone());
            } else {
                constants.push(((*name).clone(), sample_value(rng, bound, allow_decimals)));
            }
        }
        constants.extend(source.values.iter().cloned());

        if let Some(name) = &derived {
            let value = derive_constant(pattern, name, &constants, &solution)?;
            constants.push((name.clone(), value));
        }

        // The displayed equation: unknowns stay symbolic, constants are
        // their resolved values.
        let lookup = |name: &str| -> Expr {
            if Unknown::is_pool_name(name) {
                Expr::symbol(&Unknown::new(name))
            } else {
                let value = constants
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(Rational::zero);
                Expr::Number(value)
            }
        };
        let eq = Equation::new(
            pattern.left.instantiate(&lookup),
            pattern.right.instantiate(&lookup),
        );

        // Nothing derivable: the equation must hold as written.
        if derived.is_none() {
            let row = eq
                .normalized()
                .map_err(|e| Rejection::Defect(format!("nonlinear pattern equation: {e}")))?;
            let residual = row.eval(|u| solution.get(u).cloned());
            if !residual.is_zero() {
                return Err(Rejection::PatternUnsatisfied);
            }
        }
        equations.push(eq);
    }

    Ok(Candidate {
        equations,
        unknowns,
        solution,
    })
}

/// Solves the equation for one constant placeholder, everything else
/// substituted. The relation is linear, `a·c + k = 0`, so `c = -k / a`.
fn derive_constant(
    pattern: &ParsedPattern,
    name: &str,
    constants: &[(String, Rational)],
    solution: &Solution,
) -> Result<Rational, Rejection> {
    let marker = Unknown::new(name);
    let lookup = |placeholder: &str| -> Expr {
        if placeholder == name {
            return Expr::symbol(&marker);
        }
        if Unknown::is_pool_name(placeholder) {
            let value = solution
                .get(&Unknown::new(placeholder))
                .cloned()
                .unwrap_or_else(Rational::zero);
            return Expr::Number(value);
        }
        let value = constants
            .iter()
            .find(|(n, _)| n == placeholder)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(Rational::zero);
        Expr::Number(value)
    };
    let eq = Equation::new(
        pattern.left.instantiate(&lookup),
        pattern.right.instantiate(&lookup),
    );
    // Division by a sampled-to-zero constant or a square of the derived
    // constant both land here; the pattern is too constrained, not buggy.
    let row = eq.normalized().map_err(|_| Rejection::PatternUnsatisfied)?;
    let a = row.coefficient(&marker);
    if a.is_zero() {
        // The constant cancels out; treat as nothing to derive.
        let residual = row.constant_term();
        if residual.is_zero() {
            return Ok(Rational::zero());
        }
        return Err(Rejection::PatternUnsatisfied);
    }
    Ok(-row.constant_term() / a)
}
