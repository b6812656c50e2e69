/// The symbol source abstraction and the plain map implementation.
///
/// Declares the `Symbols` trait the evaluator resolves names through, the
/// `Symbol` entry type (scalar, JSON scalar or lazy resolver) and
/// `SymbolMap`, which resolves entries afresh on every lookup.
pub mod core;

/// The memoizing, thread-safe symbol source.
///
/// `CachedSymbols` resolves each name at most once for its lifetime, even
/// when many threads ask for the same name at the same time, and records
/// every name it resolved together with the resulting value.
pub mod cached;
