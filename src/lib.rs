//! Order-preserving parallel conversion over striped SPSC lanes.
//!
//! A [`Parser`] takes items of an input type `I` from a single pushing
//! thread, converts them on `N` worker threads with a pure function
//! `f: (&I, &mut O)`, and returns items of the output type `O` to a single
//! popping thread in exactly the push order — at millions of items per
//! second, with no global lock.
//!
//! The trick is the striped queue bank: `N` single-producer/single-consumer
//! ring queues on each side of the workers, walked in lock-step round-robin
//! by the pusher and the popper. Every cursor in the system has exactly one
//! writer, every cursor lives on its own cache line, and global FIFO falls
//! out of per-lane FIFO plus the shared walk order.
//!
//! ```no_run
//! use parser_rs::{Parser, ParserConfig};
//!
//! let config = ParserConfig { lanes: 4, init_capacity: 4096, max_capacity: usize::MAX };
//! let mut parser = Parser::with_config(
//!     |n: &u64, out: &mut String| {
//!         use std::fmt::Write;
//!         write!(out, "{n}").unwrap();
//!     },
//!     config,
//! )?;
//!
//! for i in 0..1_000_000u64 {
//!     assert!(parser.push(i));
//! }
//! parser.start_wait()?;
//! parser.stop_wait();
//! while let Some(text) = parser.pop() {
//!     let _ = text;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module map
//!
//! - [`spsc`]: the segmented wait-free SPSC ring queue.
//! - [`lanes`]: the striped bank and its round-robin cursors.
//! - [`parser`]: the façade — construction, push/pop, start/stop.
//! - [`record`]: the key/value event-record shape used by the motivating
//!   workload; the core never inspects it.
//!
//! Worker loops and lifecycle plumbing are internal.

pub mod lanes;
pub mod parser;
pub mod record;
pub mod spsc;

mod lifecycle;
mod worker;

pub use lanes::{LaneReceiver, LaneSubmitter};
pub use lifecycle::AlreadyRunning;
pub use parser::{BuildError, Parser, ParserConfig, DEFAULT_INIT_CAPACITY};
pub use record::{EventRecord, KeyValue};
pub use spsc::{spsc_channel, SpscConsumer, SpscProducer};
