use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::EvalResult,
        symbols::core::{Symbol, SymbolMap, Symbols},
        value::core::Value,
    },
};

/// A memoizing symbol source that is safe to share between threads.
///
/// Each name is resolved the first time it is requested and the value is
/// reused for every later request, so a lazy entry runs at most once per
/// `CachedSymbols` instance. When several threads request an unresolved name
/// at the same time, one of them runs the resolver while the others wait for
/// its outcome.
///
/// Failures are not cached: every waiter of the failed attempt receives the
/// same error, and the next request after that runs the resolver again.
///
/// The instance also records which names were resolved and to what, which
/// lets callers audit the inputs behind a result.
///
/// # Example
/// ```
/// use std::sync::{
///     Arc,
///     atomic::{AtomicUsize, Ordering},
/// };
///
/// use boolexpr::{CachedSymbols, Symbol, SymbolMap, Value, eval};
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let symbols = CachedSymbols::new(SymbolMap::new().with("x",
///                                                        Symbol::lazy(move || {
///                                                            counter.fetch_add(1, Ordering::SeqCst);
///                                                            1
///                                                        })));
///
/// assert!(eval("x = 1 and x != 0 and x > 0", &symbols).unwrap());
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// assert_eq!(symbols.used().get("x"), Some(&Value::Integer(1)));
/// ```
#[derive(Debug, Default)]
pub struct CachedSymbols {
    entries: SymbolMap,
    slots:   Mutex<HashMap<String, Arc<Slot>>>,
    used:    Mutex<HashMap<String, Value>>,
    failed:  Mutex<BTreeSet<String>>,
}

impl CachedSymbols {
    /// Wraps a symbol table with memoization.
    #[must_use]
    pub fn new(entries: impl Into<SymbolMap>) -> Self {
        Self { entries: entries.into(),
               ..Self::default() }
    }

    /// Every name resolved so far, with the value it resolved to.
    ///
    /// For lazy entries this is the value the resolver returned. Names whose
    /// resolution failed are not included; see [`CachedSymbols::failed`].
    #[must_use]
    pub fn used(&self) -> HashMap<String, Value> {
        self.used.lock().clone()
    }

    /// Names whose resolver failed and has not succeeded since.
    #[must_use]
    pub fn failed(&self) -> BTreeSet<String> {
        self.failed.lock().clone()
    }

    /// Returns the slot for `name`, creating it on first use.
    fn slot(&self, name: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(name) {
            return Arc::clone(slot);
        }
        let slot = Arc::new(Slot::default());
        slots.insert(name.to_string(), Arc::clone(&slot));
        slot
    }

    /// Runs the entry's resolution and keeps the bookkeeping records.
    fn resolve_entry(&self, name: &str, symbol: &Symbol) -> EvalResult<Value> {
        debug!(symbol = name, "resolving symbol");

        match symbol.resolve(name) {
            Ok(value) => {
                self.used.lock().insert(name.to_string(), value.clone());
                self.failed.lock().remove(name);
                Ok(value)
            },
            Err(error) => {
                debug!(symbol = name, %error, "symbol resolution failed");
                self.failed.lock().insert(name.to_string());
                Err(error)
            },
        }
    }
}

impl Symbols for CachedSymbols {
    fn get(&self, name: &str) -> EvalResult<Value> {
        let symbol = self.entries
                         .entry(name)
                         .ok_or_else(|| EvalError::SymbolNotFound { name: name.to_string() })?;

        self.slot(name).get_or_resolve(name, || self.resolve_entry(name, symbol))
    }
}

/// A one-shot cell for a single name.
///
/// The state mutex is only held while reading or publishing the state, never
/// while the resolver runs.
#[derive(Debug, Default)]
struct Slot {
    inner: Mutex<SlotInner>,
    ready: Condvar,
}

#[derive(Debug, Default)]
struct SlotInner {
    state:    SlotState,
    attempts: u64,
}

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Vacant,
    Resolving {
        attempt: u64,
    },
    Resolved(Value),
    Failed {
        attempt: u64,
        error:   EvalError,
    },
}

impl Slot {
    /// Returns the cached value, waits for a resolution in progress, or runs
    /// `resolve` itself.
    fn get_or_resolve(&self,
                      name: &str,
                      resolve: impl FnOnce() -> EvalResult<Value>)
                      -> EvalResult<Value> {
        let mut inner = self.inner.lock();
        let mut waited_on = None;

        loop {
            let attempt = match &inner.state {
                SlotState::Resolved(value) => {
                    trace!(symbol = name, "symbol cache hit");
                    return Ok(value.clone());
                },
                SlotState::Failed { attempt, error } if waited_on == Some(*attempt) => {
                    return Err(error.clone());
                },
                SlotState::Resolving { attempt } => *attempt,
                SlotState::Vacant | SlotState::Failed { .. } => break,
            };
            waited_on = Some(attempt);
            self.ready.wait(&mut inner);
        }

        inner.attempts += 1;
        let attempt = inner.attempts;
        inner.state = SlotState::Resolving { attempt };
        drop(inner);

        let pending = Pending { slot:    self,
                                settled: false, };
        let outcome = resolve();
        pending.settle(match &outcome {
                           Ok(value) => SlotState::Resolved(value.clone()),
                           Err(error) => SlotState::Failed { attempt,
                                                             error: error.clone() },
                       });

        outcome
    }

    /// Stores a new state and wakes every waiter.
    fn publish(&self, state: SlotState) {
        self.inner.lock().state = state;
        self.ready.notify_all();
    }
}

/// Marks a slot as being resolved by the current thread.
///
/// If the resolver panics, dropping the guard resets the slot to vacant so
/// waiting threads retry instead of blocking forever.
struct Pending<'a> {
    slot:    &'a Slot,
    settled: bool,
}

impl Pending<'_> {
    fn settle(mut self, state: SlotState) {
        self.slot.publish(state);
        self.settled = true;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.slot.publish(SlotState::Vacant);
        }
    }
}
