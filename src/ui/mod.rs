//! Single-view task client.
//!
//! State lives in [`ViewState`] and changes only through [`reduce`].
//! [`TodoView`] executes the requests chosen by [`request_for`] against a
//! [`TodoApi`](crate::client::TodoApi). [`Screen`] maps key events to
//! actions and [`render`] draws the result with ratatui.

pub mod controller;
pub mod render;
pub mod screen;
pub mod view_model;

pub use controller::TodoView;
pub use render::render;
pub use screen::{Focus, KeyOutcome, Screen};
pub use view_model::{
    Action, CREATE_LABEL, EDIT_LABEL, Mode, Request, ViewState, reduce, request_for,
};
