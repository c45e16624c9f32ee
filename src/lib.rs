//! # todolist
//!
//! A minimal task list: a REST API over a `todos` table and a single-view
//! client that creates, edits and deletes tasks through it.
//!
//! - [`api`]: axum routes and handlers for `/api/todos`
//! - [`domain`]: the `Task` entity and its identifier
//! - [`infrastructure`]: configuration and the `TaskStore` backends
//! - [`client`]: the `TodoApi` seam and its HTTP implementation
//! - [`ui`]: view state, reducer and controller for the client

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod ui;
