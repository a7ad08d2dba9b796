//! # erlang-planner
//!
//! Queueing-theory capacity planning for call centres and trunk groups.
//!
//! - Loss systems: Erlang B, Erlang B with retries, Engset
//! - Delay systems: Erlang C and the metrics derived from it (service
//!   level, ASA, queue length, abandonment)
//! - Inverse solvers: trunks for a blocking target, load for a trunk
//!   group, agents for a service level, calls for a headcount
//!
//! Every operation exists twice: a typed function returning
//! [`ErlangResult`], and a method on [`calculator::ErlangCalculator`]
//! that collapses any error to zero.
//!
//! ## Example
//!
//! ```rust
//! use erlang_planner::prelude::*;
//!
//! let config = ErlangConfig::builder()
//!     .time_interval(HOUR_SECS)
//!     .build();
//!
//! // 200 calls an hour, 5 minute handling time, 80% within 20 seconds
//! let staff = agents(&config, 0.8, 20.0, 200.0, 300.0)?;
//! assert_eq!(staff, 21);
//! # Ok::<(), erlang_planner::ErlangError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp,             // Exact comparisons mirror the recurrence's fixed points
    clippy::suboptimal_flops,      // Recurrences are written as published
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::doc_markdown,
)]

pub mod calculator;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod solvers;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::ErlangCalculator;
    pub use crate::config::{ErlangConfig, ErlangConfigBuilder, HALF_HOUR_SECS, HOUR_SECS};
    pub use crate::engine::{clamp, engset_b, erlang_b, erlang_b_ext, erlang_c, TrafficRates};
    pub use crate::error::{ErlangError, ErlangResult};
    pub use crate::metrics::{
        abandon, asa, queue_size, queue_time, queued, sla, trunks, utilisation, StaffingReport,
    };
    pub use crate::solvers::{
        agents, agents_asa, call_capacity, fractional_agents, fractional_call_capacity,
        looping_traffic, nb_agents, nb_trunks, number_trunks, servers, service_time, traffic,
    };
}

/// Re-export for public API
pub use error::{ErlangError, ErlangResult};
