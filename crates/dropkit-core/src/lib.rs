//! Core types for the **dropkit** picker widgets.
//!
//! `dropkit-core` holds the small Elm-style contract every dropkit widget is
//! written against: state changes happen in `update`, rendering in `view`,
//! and anything the owner must act on leaves as a [`Command`].  Global input
//! (outside clicks, Escape anywhere on screen) arrives through
//! [`Listener`]s that a component declares only while it needs them.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Stateful widget that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Messages a component hands back to its owner |
//! | [`InputEvent`] | Terminal input as seen by listeners |
//! | [`Listener`] / [`ListenerSet`] | Global input sources, attached and detached by diffing |
//! | [`TestHarness`](testing::TestHarness) | Headless driver for unit-testing a component |

pub mod command;
pub mod component;
pub mod event;
pub mod input;
pub mod listener;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::{hit_any, pointer_down, InputEvent};
pub use input::{global_input, GlobalInput};
pub use listener::{Listener, ListenerId, ListenerSet};
