//! Forward evaluation engine.
//!
//! Stateless building blocks shared by the metrics and the solvers:
//!
//! - [`clamp`]: bounding of probability-typed values
//! - [`guard`]: typed rejection of out-of-domain inputs
//! - [`recurrence`]: Erlang B, extended Erlang B, Engset B, Erlang C
//! - [`rates`]: birth/death rate derivation from call volume and AHT

pub mod clamp;
pub mod guard;
pub mod rates;
pub mod recurrence;

pub use clamp::{clamp, clamp_to};
pub use rates::TrafficRates;
pub use recurrence::{engset_b, erlang_b, erlang_b_ext, erlang_c};
