// src/parser.rs

/// A parsed clause: a predicate name plus its raw string arguments.
/// `days:monday,tuesday` parses to name `days`, args `["monday", "tuesday"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub name: String,
    pub args: Vec<String>,
}

/// The one logical joiner an expression may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

/// An expression is a single clause, or exactly two clauses joined by
/// one combinator. No nesting, no precedence beyond "first match wins".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression<'a> {
    Single(&'a str),
    Pair {
        left: &'a str,
        op: Combinator,
        right: &'a str,
    },
}

/// Split a clause on the first `:` into name and comma-separated args.
/// An empty remainder yields no args, not one empty arg. The separators
/// are structural; argument text never contains `:` or `,` as data.
pub fn parse_clause(clause: &str) -> Clause {
    match clause.split_once(':') {
        Some((name, rest)) => {
            let args = if rest.is_empty() {
                Vec::new()
            } else {
                rest.split(',').map(|a| a.trim().to_string()).collect()
            };
            Clause {
                name: name.trim().to_string(),
                args,
            }
        }
        None => Clause {
            name: clause.trim().to_string(),
            args: Vec::new(),
        },
    }
}

/// Scan for the first `&&` or `||` and split there. Clause text is
/// limited to alphanumerics, `_`, `:` and `,`, so a plain substring
/// search is unambiguous and needs no quoting logic. Anything after
/// the first combinator belongs to the right operand, including any
/// further combinator text (which will then fail clause parsing).
pub fn split_expression(expr: &str) -> Expression<'_> {
    let and = expr.find("&&");
    let or = expr.find("||");
    let (at, op) = match (and, or) {
        (Some(a), Some(o)) if a <= o => (a, Combinator::And),
        (Some(_), Some(o)) => (o, Combinator::Or),
        (Some(a), None) => (a, Combinator::And),
        (None, Some(o)) => (o, Combinator::Or),
        (None, None) => return Expression::Single(expr),
    };
    Expression::Pair {
        left: &expr[..at],
        op,
        right: &expr[at + 2..],
    }
}
