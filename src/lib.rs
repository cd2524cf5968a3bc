//! # pixela-rust
//!
//! Pixela 像素记录服务的类型化异步客户端。
//!
//! Typed asynchronous client for the [Pixela](https://pixe.la) pixel-tracking
//! service.
//!
//! ## Overview
//!
//! Every Pixela endpoint (users, graphs, pixels, webhooks) is described by an
//! immutable request descriptor. Descriptors are produced by staged builders
//! that only expose `build()` once every mandatory field has been supplied, and
//! are executed by one generic pipeline: JSON encoding on a dedicated codec
//! pool, a single HTTP send, a response reader chain and error decoration.
//!
//! ## Core Ideas
//!
//! - **Compile-time ordering**: a missing mandatory field is a type error, not a runtime error
//! - **One pipeline**: all endpoints share encode → send → read → decode
//! - **Honest errors**: only server-reported failures carry request diagnostics
//! - **Single flight**: increment, decrement and webhook invocation hit the network once per handle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixela::PixelaClient;
//!
//! #[tokio::main]
//! async fn main() -> pixela::Result<()> {
//!     let client = PixelaClient::from_env()?;
//!     let pixela = client.user("alice", "secret-token")?;
//!
//!     let create = pixela
//!         .create_graph()
//!         .id("steps")?
//!         .name("Steps")
//!         .unit("step")
//!         .int()
//!         .shibafu()
//!         .build();
//!     pixela.send(&create).await?;
//!
//!     let graph = pixela.graph("steps")?;
//!     graph.increment().await?;
//!     let svg = pixela.send(&graph.svg()).await?;
//!     println!("{} bytes of SVG", svg.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client and client builder |
//! | [`user`] | User registration and the per-user context |
//! | [`graph`] | Graph endpoints and the graph handle |
//! | [`pixel`] | Pixel endpoints, increment and decrement |
//! | [`webhook`] | Webhook endpoints |
//! | [`request`] | Request descriptors and result shapes |
//! | [`pipeline`] | Execution pipeline, reader chain, single-flight handles |
//! | [`codec`] | JSON codec on its own worker pool |
//! | [`transport`] | HTTP transport |
//! | [`credentials`] | Local credential file |

pub mod client;
pub mod codec;
pub mod config;
pub mod credentials;
pub mod graph;
pub mod pipeline;
pub mod pixel;
pub mod request;
pub mod transport;
pub mod types;
pub mod user;
pub mod webhook;

// Re-export main types for convenience
pub use client::{PixelaClient, PixelaClientBuilder};
pub use config::PixelaConfig;
pub use credentials::Credentials;
pub use pipeline::SingleFlight;
pub use request::{Empty, RawText, RequestDescriptor, Structured};
pub use user::Pixela;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
