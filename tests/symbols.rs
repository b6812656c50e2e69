use std::{
    collections::{BTreeSet, HashMap},
    io,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, Barrier,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use boolexpr::{
    BoolExpr, CachedSymbols, EvalError, Symbol, SymbolMap, Symbols, Value, eval, list_symbols, parse,
};
use rstest::rstest;

fn counting(calls: &Arc<AtomicUsize>, value: i64) -> Symbol {
    let calls = Arc::clone(calls);
    Symbol::lazy(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        value
    })
}

fn used(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs.iter().map(|(name, value)| ((*name).to_string(), value.clone())).collect()
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(ToString::to_string).collect()
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_are_thread_safe() {
    assert_send_sync::<BoolExpr>();
    assert_send_sync::<SymbolMap>();
    assert_send_sync::<CachedSymbols>();
    assert_send_sync::<EvalError>();
}

#[test]
fn symbol_map_lookups() {
    let mut symbols = SymbolMap::new().with("x", 1).with("name", "bob");
    symbols.insert("ratio", 0.5);

    assert_eq!(symbols.len(), 3);
    assert!(symbols.contains("ratio"));
    assert!(!symbols.contains("y"));
    assert_eq!(symbols.get("x").unwrap(), Value::Integer(1));
    assert_eq!(symbols.get("name").unwrap(), Value::Str("bob".to_string()));
    assert!(matches!(symbols.get("y"), Err(EvalError::SymbolNotFound { name }) if name == "y"));

    let previous = symbols.insert("x", 2);
    assert!(matches!(previous, Some(Symbol::Value(Value::Integer(1)))));
    assert_eq!(symbols.get("x").unwrap(), Value::Integer(2));
}

#[test]
fn symbol_map_from_pairs_and_json() {
    let symbols: SymbolMap = [("a", Symbol::from(1)), ("b", Symbol::from(true))].into_iter().collect();
    assert!(eval("a = 1 and b = true", &symbols).unwrap());

    let serde_json::Value::Object(object) =
        serde_json::json!({ "age": 30, "score": 7.5, "name": "ann", "admin": false, "tags": ["x"] })
    else {
        unreachable!()
    };
    let symbols = SymbolMap::from_json(object);

    assert_eq!(symbols.get("age").unwrap(), Value::Integer(30));
    assert_eq!(symbols.get("score").unwrap(), Value::Real(7.5));
    assert!(eval(r#"age > 18 and name = "ann" and admin = false"#, &symbols).unwrap());
    assert!(matches!(symbols.get("tags"),
                     Err(EvalError::SymbolTypeUnknown { kind, .. }) if kind == "array"));
}

#[test]
fn custom_symbol_sources() {
    struct Upper;

    impl Symbols for Upper {
        fn get(&self, name: &str) -> Result<Value, EvalError> {
            Ok(Value::Str(name.to_uppercase()))
        }
    }

    assert!(eval(r#"abc = "ABC""#, &Upper).unwrap());
    assert!(eval(r#"abc = "ABC""#, &Arc::new(Upper)).unwrap());
}

#[test]
fn cached_direct_values() {
    let symbols = CachedSymbols::new(SymbolMap::new().with("x", 1).with("y", 2));

    assert!(eval("x = 1 and x != 0 and y = 2 and y != 0", &symbols).unwrap());
    assert_eq!(symbols.used(), used(&[("x", Value::Integer(1)), ("y", Value::Integer(2))]));
}

#[test]
fn cached_resolvers_run_once() {
    let x_calls = Arc::new(AtomicUsize::new(0));
    let y_calls = Arc::new(AtomicUsize::new(0));
    let symbols = CachedSymbols::new(SymbolMap::new().with("x", counting(&x_calls, 1))
                                                     .with("y", counting(&y_calls, 2)));

    assert!(eval("x = 1 and x != 0 and y = 2 and y != 0", &symbols).unwrap());
    assert!(eval("x = 1 or y = 3", &symbols).unwrap());

    assert_eq!(symbols.used(), used(&[("x", Value::Integer(1)), ("y", Value::Integer(2))]));
    assert_eq!(x_calls.load(Ordering::SeqCst), 1);
    assert_eq!(y_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cached_records_only_consulted_symbols() {
    let symbols = CachedSymbols::new(SymbolMap::new().with("x", Symbol::lazy(|| 1))
                                                     .with("y", Symbol::lazy(|| 2)));

    assert!(!eval("x = 0 and y = 0", &symbols).unwrap());
    assert_eq!(symbols.used(), used(&[("x", Value::Integer(1))]));
    assert!(symbols.failed().is_empty());
}

#[test]
fn cached_records_symbols_before_a_failure() {
    let symbols =
        CachedSymbols::new(SymbolMap::new().with("x", Symbol::lazy(|| 1))
                                           .with("y", Symbol::lazy(|| 2))
                                           .with("z", Symbol::try_lazy(|| Err::<i64, _>("Z errored"))));

    let e = symbols.get("z").unwrap_err();
    assert_eq!(e.to_string(), "Symbol 'z': Z errored");

    assert!(eval("x = 1 and y = 2 and z = 3", &symbols).is_err());
    assert_eq!(symbols.used(), used(&[("x", Value::Integer(1)), ("y", Value::Integer(2))]));
    assert_eq!(symbols.failed(), names(&["z"]));
}

#[test]
fn cached_failures_are_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let symbols = CachedSymbols::new(SymbolMap::new().with("z",
                                                           Symbol::try_lazy(move || {
                                                               if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                                                                   Err(io::Error::other("not yet"))
                                                               } else {
                                                                   Ok(3)
                                                               }
                                                           })));

    let e = eval("z = 3", &symbols).unwrap_err();
    assert!(e.to_string().contains("not yet"));
    assert_eq!(symbols.failed(), names(&["z"]));
    assert!(symbols.used().is_empty());

    assert!(eval("z = 3", &symbols).unwrap());
    assert!(eval("z = 3", &symbols).unwrap());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert!(symbols.failed().is_empty());
    assert_eq!(symbols.used(), used(&[("z", Value::Integer(3))]));
}

#[test]
fn cached_unknown_symbols_are_not_recorded() {
    let symbols = CachedSymbols::new(SymbolMap::new());

    assert!(matches!(symbols.get("nope"), Err(EvalError::SymbolNotFound { name }) if name == "nope"));
    assert!(symbols.used().is_empty());
    assert!(symbols.failed().is_empty());
}

#[test]
fn cached_json_entries() {
    let symbols = CachedSymbols::new(SymbolMap::new().with("n", serde_json::json!(4))
                                                     .with("bad", serde_json::Value::Null));

    assert!(eval("n = 4.0", &symbols).unwrap());
    assert!(matches!(eval("bad = 1", &symbols),
                     Err(boolexpr::Error::Eval(EvalError::SymbolTypeUnknown { .. }))));
    assert_eq!(symbols.failed(), names(&["bad"]));
}

#[test]
fn cached_resolver_runs_once_under_contention() {
    const THREADS: usize = 16;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let symbols = CachedSymbols::new(SymbolMap::new().with("slow",
                                                           Symbol::lazy(move || {
                                                               counter.fetch_add(1, Ordering::SeqCst);
                                                               thread::sleep(Duration::from_millis(50));
                                                               42
                                                           })));
    let tree = parse("slow = 42 and slow > 0").unwrap();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS).map(|_| {
                                              scope.spawn(|| {
                                                       barrier.wait();
                                                       tree.evaluate(&symbols)
                                                   })
                                          })
                                          .collect();

        for handle in handles {
            assert!(handle.join().unwrap().unwrap());
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(symbols.used(), used(&[("slow", Value::Integer(42))]));
}

#[test]
fn cached_waiters_share_a_failure() {
    const THREADS: usize = 8;

    let symbols = CachedSymbols::new(SymbolMap::new().with("flaky",
                                                           Symbol::try_lazy(|| {
                                                               thread::sleep(Duration::from_millis(20));
                                                               Err::<i64, _>("backend down")
                                                           })));
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS).map(|_| {
                                              scope.spawn(|| {
                                                       barrier.wait();
                                                       symbols.get("flaky")
                                                   })
                                          })
                                          .collect();

        for handle in handles {
            let e = handle.join().unwrap().unwrap_err();
            assert!(matches!(&e, EvalError::Source { name, .. } if name == "flaky"));
        }
    });

    assert_eq!(symbols.failed(), names(&["flaky"]));
}

#[test]
fn cached_panicking_resolver_releases_its_slot() {
    let panicked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&panicked);
    let symbols = CachedSymbols::new(SymbolMap::new().with("x",
                                                           Symbol::lazy(move || {
                                                               assert!(flag.swap(true, Ordering::SeqCst),
                                                                       "first call panics");
                                                               7
                                                           })));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| symbols.get("x")));
    assert!(outcome.is_err());
    assert!(panicked.load(Ordering::SeqCst));

    assert_eq!(symbols.get("x").unwrap(), Value::Integer(7));
    assert_eq!(symbols.used(), used(&[("x", Value::Integer(7))]));
}

#[test]
fn list_symbols_across_groups_and_lines() {
    const SOURCE: &str = r#"
a >= b or
c < d or
( e = "hello" or f = "world" ) and
g = h or
a = b"#;

    let tree = parse(SOURCE).unwrap();

    assert_eq!(list_symbols(&tree), names(&["a", "b", "c", "d", "e", "f", "g", "h"]));
    assert_eq!(tree.symbols(), list_symbols(&tree));
}

#[rstest]
#[case::literals_only("1 = 1.0 and \"a\" < \"b\"", &[])]
#[case::both_sides("x > y", &["x", "y"])]
#[case::duplicates("x = 1 or x = 2 or (x = 3)", &["x"])]
#[case::deep_nesting("(((a = 1) and (b = 2)) or ((c = 3)))", &["a", "b", "c"])]
#[case::short_circuited_operands("1 = 2 and hidden = 1", &["hidden"])]
fn list_symbols_cases(#[case] src: &str, #[case] expected: &[&str]) {
    assert_eq!(list_symbols(&parse(src).unwrap()), names(expected));
}
