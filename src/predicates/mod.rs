use crate::clock::Clock;
use crate::context::Context;
use crate::env::EnvLookup;
use crate::errors::Result;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Everything a predicate may consult: the data bag, the fixed "today"
/// snapshot, and the external key-value provider.
pub struct Invocation<'a> {
    pub context: &'a Context,
    pub clock: &'a Clock,
    pub env: &'a dyn EnvLookup,
}

/// A named boolean-producing check. Arity is validated by the clause
/// evaluator before `check` is called, so implementations may index
/// into `args` up to the lower bound of their declared range.
pub trait Predicate: Send + Sync {
    fn name(&self) -> &'static str;
    fn arity(&self) -> RangeInclusive<usize>;
    fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool>;
}

/// The fixed predicate table, constructed once per evaluator. Lookup
/// miss means the clause named an unknown predicate.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<&'static str, Arc<dyn Predicate>>>,
}

impl Registry {
    pub fn with_builtins() -> Self {
        let mut map: HashMap<&'static str, Arc<dyn Predicate>> = HashMap::new();
        map.insert("always", Arc::new(builtins::Always));
        map.insert("never", Arc::new(builtins::Never));
        map.insert("random", Arc::new(builtins::Random));
        map.insert("sometimes", Arc::new(builtins::Sometimes));
        map.insert("days", Arc::new(builtins::Days));
        map.insert("months", Arc::new(builtins::Months));
        map.insert("weekday", Arc::new(builtins::IsWeekday));
        map.insert("weekend", Arc::new(builtins::IsWeekend));
        map.insert("exists", Arc::new(builtins::Exists));
        map.insert("eq", Arc::new(builtins::Eq));
        map.insert("neq", Arc::new(builtins::Neq));
        map.insert("lt", Arc::new(builtins::Lt));
        map.insert("lte", Arc::new(builtins::Lte));
        map.insert("gt", Arc::new(builtins::Gt));
        map.insert("gte", Arc::new(builtins::Gte));
        map.insert("env", Arc::new(builtins::Env));
        Self {
            inner: Arc::new(map),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Predicate>> {
        self.inner.get(name).cloned()
    }
}

pub mod builtins {
    use super::*;
    use crate::clock::{parse_month, parse_weekday};
    use crate::comparison::{compare, loose_eq};
    use crate::context::truthy;
    use crate::errors::EvalError;
    use std::cmp::Ordering;

    pub struct Always;
    impl Predicate for Always {
        fn name(&self) -> &'static str {
            "always"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=0
        }
        fn check(&self, _inv: &Invocation<'_>, _args: &[String]) -> Result<bool> {
            Ok(true)
        }
    }

    pub struct Never;
    impl Predicate for Never {
        fn name(&self) -> &'static str {
            "never"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=0
        }
        fn check(&self, _inv: &Invocation<'_>, _args: &[String]) -> Result<bool> {
            Ok(false)
        }
    }

    /// A fair coin flip. Non-deterministic on purpose; never fails.
    pub struct Random;
    impl Predicate for Random {
        fn name(&self) -> &'static str {
            "random"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=0
        }
        fn check(&self, _inv: &Invocation<'_>, _args: &[String]) -> Result<bool> {
            Ok(rand::random())
        }
    }

    /// Alias of `random`.
    pub struct Sometimes;
    impl Predicate for Sometimes {
        fn name(&self) -> &'static str {
            "sometimes"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=0
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            Random.check(inv, args)
        }
    }

    /// True iff any argument names today's day of the week.
    pub struct Days;
    impl Predicate for Days {
        fn name(&self) -> &'static str {
            "days"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            1..=usize::MAX
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            let today = inv.clock.weekday();
            for arg in args {
                let day = parse_weekday(arg).ok_or_else(|| {
                    EvalError::Argument(format!("`{arg}` is not a day of the week"))
                })?;
                if day == today {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }

    /// True iff any argument names the current month.
    pub struct Months;
    impl Predicate for Months {
        fn name(&self) -> &'static str {
            "months"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            1..=usize::MAX
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            let current = inv.clock.month();
            for arg in args {
                let month = parse_month(arg)
                    .ok_or_else(|| EvalError::Argument(format!("`{arg}` is not a month")))?;
                if month == current {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }

    pub struct IsWeekday;
    impl Predicate for IsWeekday {
        fn name(&self) -> &'static str {
            "weekday"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=0
        }
        fn check(&self, inv: &Invocation<'_>, _args: &[String]) -> Result<bool> {
            Ok(inv.clock.is_weekday())
        }
    }

    pub struct IsWeekend;
    impl Predicate for IsWeekend {
        fn name(&self) -> &'static str {
            "weekend"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=0
        }
        fn check(&self, inv: &Invocation<'_>, _args: &[String]) -> Result<bool> {
            Ok(inv.clock.is_weekend())
        }
    }

    /// True iff the key is present with a truthy value. An absent key is
    /// a valid negative result here, not an error: presence is exactly
    /// what this predicate tests.
    pub struct Exists;
    impl Predicate for Exists {
        fn name(&self) -> &'static str {
            "exists"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            1..=1
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            Ok(inv.context.get(&args[0]).map(truthy).unwrap_or(false))
        }
    }

    fn lookup<'a>(inv: &'a Invocation<'_>, key: &str) -> Result<&'a serde_json::Value> {
        inv.context
            .get(key)
            .ok_or_else(|| EvalError::MissingKey(key.to_string()))
    }

    pub struct Eq;
    impl Predicate for Eq {
        fn name(&self) -> &'static str {
            "eq"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            2..=2
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            Ok(loose_eq(lookup(inv, &args[0])?, &args[1]))
        }
    }

    pub struct Neq;
    impl Predicate for Neq {
        fn name(&self) -> &'static str {
            "neq"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            2..=2
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            Ok(!loose_eq(lookup(inv, &args[0])?, &args[1]))
        }
    }

    fn ordered(
        inv: &Invocation<'_>,
        args: &[String],
        accept: fn(Ordering) -> bool,
    ) -> Result<bool> {
        let ord = compare(lookup(inv, &args[0])?, &args[1])?;
        Ok(accept(ord))
    }

    pub struct Lt;
    impl Predicate for Lt {
        fn name(&self) -> &'static str {
            "lt"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            2..=2
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            ordered(inv, args, |o| o == Ordering::Less)
        }
    }

    pub struct Lte;
    impl Predicate for Lte {
        fn name(&self) -> &'static str {
            "lte"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            2..=2
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            ordered(inv, args, |o| o != Ordering::Greater)
        }
    }

    pub struct Gt;
    impl Predicate for Gt {
        fn name(&self) -> &'static str {
            "gt"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            2..=2
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            ordered(inv, args, |o| o == Ordering::Greater)
        }
    }

    pub struct Gte;
    impl Predicate for Gte {
        fn name(&self) -> &'static str {
            "gte"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            2..=2
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            ordered(inv, args, |o| o != Ordering::Less)
        }
    }

    /// True iff the external provider's value for the first argument
    /// equals any of the remaining arguments. With fewer than two
    /// arguments there is nothing to match against, so the answer is
    /// false, not an error; an unset variable likewise answers false.
    pub struct Env;
    impl Predicate for Env {
        fn name(&self) -> &'static str {
            "env"
        }
        fn arity(&self) -> RangeInclusive<usize> {
            0..=usize::MAX
        }
        fn check(&self, inv: &Invocation<'_>, args: &[String]) -> Result<bool> {
            let (name, candidates) = match args.split_first() {
                Some((name, rest)) if !rest.is_empty() => (name, rest),
                _ => return Ok(false),
            };
            Ok(match inv.env.lookup(name) {
                Some(value) => candidates.iter().any(|c| *c == value),
                None => false,
            })
        }
    }
}
