//! Portage - encrypt and decrypt data through a remote transit-encryption
//! service.
//!
//! The tool holds no cryptographic material: every transform is delegated to
//! a secrets-management backend that exposes `encrypt`/`decrypt` endpoints
//! under a named key. What lives here is the plumbing around that call:
//! request shaping, bounded-size batching with order-preserving reassembly,
//! and file/stream handling.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── transform     # encrypt/decrypt subcommand flow
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # Flag + env fallback resolution
//!     ├── client        # Transit trait + HTTP client
//!     ├── protocol      # Wire request/response types
//!     ├── pipeline      # Batched bulk transform pipeline
//!     └── file_ops      # Line splitting, destination resolution, I/O
//! ```

pub mod cli;
pub mod core;
pub mod error;
