//! rc module: talking to the RTags daemon through its query tool.
//!
//! Nothing here holds a connection to rdm. Each query spawns `rc`, which
//! connects, asks, prints and exits.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           caller (editor / CLI)          │
//! │  - builds an Invocation                 │
//! │  - blocks in RcHandle::join()           │
//! └─────────────────────────────────────────┘
//!           │ one thread per query
//!           ▼
//! ┌─────────────────────────────────────────┐
//! │           rc  (child process)            │
//! │  --no-color --absolute-path             │
//! │  --verify-version=124 ...               │
//! └─────────────────────────────────────────┘
//!           │ unix socket
//!           ▼
//! ┌─────────────────────────────────────────┐
//! │           rdm  (indexing daemon)         │
//! └─────────────────────────────────────────┘
//! ```

pub mod call;
pub mod client;
pub mod command;
pub mod exit_code;

pub use call::{InvocationResult, RcCall, RcHandle};
pub use client::RcClient;
pub use command::{base_flags, format_flags, Invocation, PROTOCOL_VERSION};
pub use exit_code::{classify, Classification, RcExitCode, Severity};
