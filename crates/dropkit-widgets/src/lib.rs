//! The option picker and the pieces it is built from.
//!
//! [`Picker`] implements [`dropkit_core::Component`], so it embeds in any
//! dropkit host and composes within [`ratatui`] layouts.  The pure parts
//! (grouping, filtering, selection algebra, the interaction state machine)
//! are exposed on their own and carry no rendering state.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`option`] | [`SelectOption`], one choosable entry |
//! | [`index`] | Lookup by value and grouping in first-seen order |
//! | [`filter`] | Case-insensitive narrowing by label or description |
//! | [`selection`] | Single/multi values and the choose/clear rules |
//! | [`controller`] | Closed / open / searching state machine |
//! | [`summary`] | Trigger text for a value |
//! | [`picker`] | The picker component |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | [`PickerConfig`] behaviour and text settings |
//! | [`error`] | [`PickError`] |
//! | [`highlight`] | Keyboard highlight over header and option rows |
//! | [`key`] | Key bindings and help text |
//! | [`text`] | Display width and truncation |

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod index;
pub mod key;
pub mod option;
pub mod picker;
pub mod selection;
pub mod summary;
pub mod text;

pub use config::PickerConfig;
pub use controller::{Controller, Effect, Event, InteractionState, Transition};
pub use error::PickError;
pub use index::{group, GroupKey, GroupedOptions, OptionIndex};
pub use option::SelectOption;
pub use picker::{Picker, PickerStyle};
pub use selection::{Mode, Next, SelectionValue};
