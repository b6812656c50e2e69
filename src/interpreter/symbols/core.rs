use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Error type accepted from fallible resolvers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A zero-argument callable that produces a symbol's value on demand.
pub type Resolver = Arc<dyn Fn() -> Result<Value, BoxError> + Send + Sync>;

/// A source of named values for the evaluator.
///
/// Implementations decide how a name maps to a value: a fixed table, a
/// lookup into request data, a cached computation. The evaluator only calls
/// [`Symbols::get`] for symbols it actually needs, so operands skipped by a
/// short-circuit are never requested.
pub trait Symbols {
    /// Resolves `name` to a value.
    ///
    /// # Errors
    /// - `SymbolNotFound` if the source has no such name.
    /// - `SymbolTypeUnknown` if the name holds an unsupported kind of value.
    /// - `Source` if computing the value failed.
    fn get(&self, name: &str) -> EvalResult<Value>;
}

impl<T: Symbols + ?Sized> Symbols for &T {
    fn get(&self, name: &str) -> EvalResult<Value> {
        (**self).get(name)
    }
}

impl<T: Symbols + ?Sized> Symbols for Arc<T> {
    fn get(&self, name: &str) -> EvalResult<Value> {
        (**self).get(name)
    }
}

/// One entry of a symbol table.
#[derive(Clone)]
pub enum Symbol {
    /// A fixed value.
    Value(Value),
    /// A loosely typed value converted when resolved. `null`, arrays and
    /// objects resolve to `SymbolTypeUnknown`.
    Json(serde_json::Value),
    /// A callable invoked to produce the value.
    Lazy(Resolver),
}

impl Symbol {
    /// Wraps an infallible callable.
    ///
    /// # Example
    /// ```
    /// use boolexpr::{Symbol, SymbolMap, eval};
    ///
    /// let symbols = SymbolMap::new().with("hour", Symbol::lazy(|| 9));
    /// assert!(eval("hour >= 8 and hour < 18", &symbols).unwrap());
    /// ```
    pub fn lazy<F, T>(resolver: F) -> Self
        where F: Fn() -> T + Send + Sync + 'static,
              T: Into<Value>
    {
        Self::Lazy(Arc::new(move || -> Result<Value, BoxError> { Ok(resolver().into()) }))
    }

    /// Wraps a fallible callable. Its errors surface as
    /// [`EvalError::Source`] carrying the symbol's name.
    pub fn try_lazy<F, T, E>(resolver: F) -> Self
        where F: Fn() -> Result<T, E> + Send + Sync + 'static,
              T: Into<Value>,
              E: Into<BoxError>
    {
        Self::Lazy(Arc::new(move || -> Result<Value, BoxError> {
                                match resolver() {
                                    Ok(value) => Ok(value.into()),
                                    Err(error) => Err(error.into()),
                                }
                            }))
    }

    /// Produces the entry's value, invoking the resolver if there is one.
    ///
    /// # Errors
    /// - `SymbolTypeUnknown` for a JSON entry that is not a scalar.
    /// - `Source` if the resolver fails.
    pub fn resolve(&self, name: &str) -> EvalResult<Value> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Json(json) => match Value::from_json(json) {
                Some(value) => Ok(value),
                None => Err(EvalError::SymbolTypeUnknown { name: name.to_string(),
                                                           kind: Value::json_kind(json).to_string(), }),
            },
            Self::Lazy(resolver) => {
                resolver().map_err(|source| EvalError::Source { name:   name.to_string(),
                                                                source: Arc::from(source), })
            },
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<Value> for Symbol {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Symbol {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for Symbol {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for Symbol {
    fn from(value: f64) -> Self {
        Self::Value(value.into())
    }
}

impl From<bool> for Symbol {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}

impl From<serde_json::Value> for Symbol {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// A plain symbol table.
///
/// Every lookup resolves the entry again: a lazy entry referenced three times
/// in one expression runs three times. Use
/// [`CachedSymbols`](crate::interpreter::symbols::cached::CachedSymbols) for
/// entries that are costly or have side effects.
#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    entries: HashMap<String, Symbol>,
}

impl SymbolMap {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from the members of a JSON object.
    #[must_use]
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
        object.into_iter().collect()
    }

    /// Adds or replaces an entry, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, symbol: impl Into<Symbol>) -> Option<Symbol> {
        self.entries.insert(name.into(), symbol.into())
    }

    /// Adds or replaces an entry, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, symbol: impl Into<Symbol>) -> Self {
        self.insert(name, symbol);
        self
    }

    /// The raw entry for `name`, without resolving it.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    /// Returns `true` if the table has an entry for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Symbols for SymbolMap {
    fn get(&self, name: &str) -> EvalResult<Value> {
        self.entry(name)
            .ok_or_else(|| EvalError::SymbolNotFound { name: name.to_string() })?
            .resolve(name)
    }
}

impl From<HashMap<String, Symbol>> for SymbolMap {
    fn from(entries: HashMap<String, Symbol>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Symbol>> FromIterator<(K, V)> for SymbolMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Symbol>> Extend<(K, V)> for SymbolMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, symbol) in iter {
            self.insert(name, symbol);
        }
    }
}
