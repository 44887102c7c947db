//! Generic score document model.
//!
//! A score is an untyped audio processing graph: nodes carry a `kind` string plus
//! free-form `config` values and automation `params`. Interpreting those fields is left
//! to the typed contracts in `nfgrapher-contract`; this crate only guarantees that the
//! document is structurally well formed and that it round-trips through JSON unchanged.

pub mod load;
pub mod score;
pub mod version;

#[cfg(any(test, feature = "fuzzing"))]
pub use load::fuzz_parse_score;
pub use load::{load_score, parse_score, parse_score_str, ScoreError};
pub use score::{
    Command, CommandArgs, ConfigMap, Edge, Graph, LoadingPolicy, Node, ParamMap, Score, Script,
};
pub use version::Version;

/// Re-exported so callers can build `config` and `args` values without a direct dependency.
pub use serde_json::Value;
