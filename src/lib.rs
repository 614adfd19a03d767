//! Postcraft — client for the Postcraft content studio API.
//!
//! Decodes the chat endpoint's server-sent-event stream into typed events and
//! polls background generation tasks until they finish.
//!
//! # Quick Start
//!
//! ```no_run
//! use postcraft::prelude::*;
//!
//! # async fn example() -> postcraft::error::Result<()> {
//! let client = ApiClient::new(ClientConfig::from_env())?;
//!
//! let request = ChatRequest::new("Write three tweets about our spring sale");
//! let summary = client
//!     .stream_chat("token", &request, &mut |event: StreamEvent| println!("{event:?}"))
//!     .await?;
//! println!("{} events", summary.delivered);
//!
//! let status = client
//!     .wait_for_task("token", "task-123", &client.poll_options(), None)
//!     .await?;
//! println!("{:?}", status.result);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod prelude;
pub mod sse;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
