pub mod clock;
pub mod context;
pub mod env;
pub mod errors;
pub mod predicates; // fixed predicate table
mod comparison;
mod parser;

use errors::{EvalError, Result};
use parser::{Combinator, Expression};
use predicates::{Invocation, Registry};
use std::sync::Arc;
use tracing::{debug, trace};

pub use clock::Clock;
pub use context::Context;
pub use env::{EnvLookup, MapEnv, ProcessEnv};

/// The main evaluator. Holds an immutable context snapshot, a "today"
/// captured once at construction, and the predicate table; evaluating
/// never mutates any of them, so instances can be shared or used one
/// per request without coordination.
pub struct Evaluator {
    context: Context,
    clock: Clock,
    env: Arc<dyn EnvLookup>,
    registry: Registry,
}

impl Evaluator {
    /// Build an evaluator over `context`, with today's date and the
    /// process environment as the external lookup.
    pub fn new(context: Context) -> Self {
        Self {
            context,
            clock: Clock::now(),
            env: Arc::new(ProcessEnv),
            registry: Registry::with_builtins(),
        }
    }

    /// Pin the clock, e.g. to a known date in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the external key-value provider used by `env`.
    pub fn with_env(mut self, env: impl EnvLookup + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Evaluate an expression: a single clause, or two clauses joined
    /// by `&&` or `||`. The combinator short-circuits, so the right
    /// clause of a decided expression is never evaluated and can
    /// neither fail nor flip a coin. A failing left clause always
    /// propagates; there is no fallback-on-error.
    pub fn evaluate(&self, expression: &str) -> Result<bool> {
        match parser::split_expression(expression.trim()) {
            Expression::Single(clause) => self.evaluate_clause(clause),
            Expression::Pair { left, op, right } => {
                debug!(?op, left, right, "combined expression");
                match op {
                    Combinator::And => Ok(self.evaluate_clause(left)? && self.evaluate_clause(right)?),
                    Combinator::Or => Ok(self.evaluate_clause(left)? || self.evaluate_clause(right)?),
                }
            }
        }
    }

    /// Evaluate a single clause such as `days:monday,tuesday` or
    /// `always`. Any failure (unknown predicate, missing key, bad
    /// argument) surfaces as `InvalidClause` wrapping the cause.
    pub fn evaluate_clause(&self, clause: &str) -> Result<bool> {
        self.clause_inner(clause)
            .map_err(|source| EvalError::InvalidClause {
                clause: clause.to_string(),
                source: Box::new(source),
            })
    }

    fn clause_inner(&self, clause: &str) -> Result<bool> {
        let parsed = parser::parse_clause(clause);
        let predicate = self
            .registry
            .get(&parsed.name)
            .ok_or_else(|| EvalError::UnknownPredicate(parsed.name.clone()))?;
        let arity = predicate.arity();
        if !arity.contains(&parsed.args.len()) {
            return Err(EvalError::Argument(format!(
                "{} takes {} argument(s), got {}",
                parsed.name,
                describe_arity(&arity),
                parsed.args.len()
            )));
        }
        trace!(name = %parsed.name, args = ?parsed.args, "dispatching predicate");
        let inv = Invocation {
            context: &self.context,
            clock: &self.clock,
            env: self.env.as_ref(),
        };
        predicate.check(&inv, &parsed.args)
    }
}

fn describe_arity(arity: &std::ops::RangeInclusive<usize>) -> String {
    match (*arity.start(), *arity.end()) {
        (lo, hi) if lo == hi => lo.to_string(),
        (lo, usize::MAX) => format!("at least {lo}"),
        (lo, hi) => format!("{lo} to {hi}"),
    }
}

/// Convenience: evaluate one expression against a context, using the
/// real clock and process environment.
pub fn evaluate(expression: &str, context: Context) -> Result<bool> {
    Evaluator::new(context).evaluate(expression)
}
