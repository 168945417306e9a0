use chrono::NaiveDate;
use criteria::{Clock, Context, Evaluator, MapEnv};
use serde_json::json;

fn ctx() -> Context {
    Context::from_iter([("x", json!(10)), ("y", json!(20))])
}

// 2017-03-29 is a Wednesday
fn wednesday() -> Clock {
    Clock::fixed(NaiveDate::from_ymd_opt(2017, 3, 29).unwrap())
}

// 2017-04-08 is a Saturday
fn saturday() -> Clock {
    Clock::fixed(NaiveDate::from_ymd_opt(2017, 4, 8).unwrap())
}

#[test]
fn test_always() {
    let ev = Evaluator::new(Context::new());
    assert!(ev.evaluate_clause("always").unwrap());
}

#[test]
fn test_never() {
    let ev = Evaluator::new(Context::new());
    assert!(!ev.evaluate_clause("never").unwrap());
}

#[test]
fn test_random_never_fails() {
    let ev = Evaluator::new(Context::new());
    for _ in 0..32 {
        ev.evaluate_clause("random").unwrap();
        ev.evaluate_clause("sometimes").unwrap();
    }
}

#[test]
fn test_days() {
    let ev = Evaluator::new(Context::new()).with_clock(wednesday());
    assert!(ev.evaluate_clause("days:3").unwrap());
    assert!(ev.evaluate_clause("days:wednesday").unwrap());
    assert!(ev.evaluate_clause("days:WEDNESDAY").unwrap());
    assert!(ev.evaluate_clause("days:wed").unwrap());
    assert!(ev.evaluate_clause("days:monday,tuesday,wednesday").unwrap());
    assert!(ev.evaluate_clause("days:wednesday,thursday,friday").unwrap());
    assert!(!ev.evaluate_clause("days:5").unwrap());
    assert!(!ev.evaluate_clause("days:friday").unwrap());
}

#[test]
fn test_months() {
    let ev = Evaluator::new(Context::new()).with_clock(wednesday());
    assert!(ev.evaluate_clause("months:3").unwrap());
    assert!(ev.evaluate_clause("months:march").unwrap());
    assert!(ev.evaluate_clause("months:mar").unwrap());
    assert!(ev.evaluate_clause("months:march,april,may").unwrap());
    assert!(ev.evaluate_clause("months:mar,apr,may").unwrap());
    assert!(!ev.evaluate_clause("months:12").unwrap());
    assert!(!ev.evaluate_clause("months:december").unwrap());
    assert!(!ev.evaluate_clause("months:dec").unwrap());
}

#[test]
fn test_weekday_weekend() {
    let midweek = Evaluator::new(Context::new()).with_clock(wednesday());
    assert!(midweek.evaluate_clause("weekday").unwrap());
    assert!(!midweek.evaluate_clause("weekend").unwrap());

    let weekend = Evaluator::new(Context::new()).with_clock(saturday());
    assert!(weekend.evaluate_clause("weekend").unwrap());
    assert!(!weekend.evaluate_clause("weekday").unwrap());
}

#[test]
fn test_exists() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("exists:x").unwrap());
    assert!(ev.evaluate_clause("exists:y").unwrap());
    // absent key is a valid negative result, not an error
    assert!(!ev.evaluate_clause("exists:z").unwrap());
}

#[test]
fn test_exists_falsy_values() {
    let ev = Evaluator::new(Context::from_iter([
        ("zero", json!(0)),
        ("blank", json!("")),
        ("off", json!(false)),
        ("nothing", json!(null)),
        ("name", json!("ada")),
    ]));
    assert!(!ev.evaluate_clause("exists:zero").unwrap());
    assert!(!ev.evaluate_clause("exists:blank").unwrap());
    assert!(!ev.evaluate_clause("exists:off").unwrap());
    assert!(!ev.evaluate_clause("exists:nothing").unwrap());
    assert!(ev.evaluate_clause("exists:name").unwrap());
}

#[test]
fn test_eq() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("eq:x,10").unwrap());
    assert!(!ev.evaluate_clause("eq:x,20").unwrap());
}

#[test]
fn test_eq_string_value_numeric_coercion() {
    let ev = Evaluator::new(Context::from_iter([("v", json!("10"))]));
    assert!(ev.evaluate_clause("eq:v,10").unwrap());
}

#[test]
fn test_neq() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("neq:x,9").unwrap());
    assert!(!ev.evaluate_clause("neq:x,10").unwrap());
}

#[test]
fn test_lt() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("lt:x,20").unwrap());
    assert!(!ev.evaluate_clause("lt:x,9").unwrap());
}

#[test]
fn test_lte() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("lte:x,20").unwrap());
    assert!(ev.evaluate_clause("lte:x,10").unwrap());
    assert!(!ev.evaluate_clause("lte:x,9").unwrap());
}

#[test]
fn test_gt() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("gt:x,5").unwrap());
    assert!(!ev.evaluate_clause("gt:x,11").unwrap());
}

#[test]
fn test_gte() {
    let ev = Evaluator::new(ctx());
    assert!(ev.evaluate_clause("gte:x,5").unwrap());
    assert!(ev.evaluate_clause("gte:x,10").unwrap());
    assert!(!ev.evaluate_clause("gte:x,11").unwrap());
}

#[test]
fn test_lexicographic_comparison_for_strings() {
    let ev = Evaluator::new(Context::from_iter([("name", json!("banana"))]));
    assert!(ev.evaluate_clause("gt:name,apple").unwrap());
    assert!(!ev.evaluate_clause("lt:name,apple").unwrap());
}

#[test]
fn test_env() {
    let ev = Evaluator::new(Context::new()).with_env(MapEnv::new().set("APP_ENV", "production"));
    assert!(ev.evaluate_clause("env:APP_ENV,production").unwrap());
    assert!(ev.evaluate_clause("env:APP_ENV,staging,production").unwrap());
    assert!(!ev.evaluate_clause("env:APP_ENV,staging").unwrap());
    // nothing to match against: false, not an error
    assert!(!ev.evaluate_clause("env:APP_ENV").unwrap());
    // unset variable: also false
    assert!(!ev.evaluate_clause("env:NO_SUCH_VAR,production").unwrap());
}

#[test]
fn test_env_with_no_arguments() {
    // fewer than two arguments includes zero: still false, not an error
    let ev = Evaluator::new(Context::new()).with_env(MapEnv::new().set("APP_ENV", "production"));
    assert!(!ev.evaluate_clause("env").unwrap());
    assert!(!ev.evaluate_clause("env:").unwrap());
}
