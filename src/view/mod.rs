//! View state management
//!
//! UI-agnostic presentation logic. Frontends feed user interactions in as
//! [`ViewEvent`]s and receive output through the [`Renderer`] trait.
//!
//! # Architecture
//!
//! - `state`: the two-mode state machine and its single transition function
//! - `controller`: the session object owning items, tags, state and bookmarks
//! - `render`: container identities, detail views and the renderer trait
//! - `error`: load, filter and lookup failures as seen by the view

pub mod controller;
pub mod error;
pub mod render;
pub mod state;

pub use controller::{NO_RESULTS, ViewController, Visible, render_failure};
pub use error::ViewError;
pub use render::{Container, DetailView, Renderer};
pub use state::{ViewEvent, ViewState};
