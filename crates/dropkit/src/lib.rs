//! **dropkit** -- a searchable, groupable option picker for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything needed to embed a
//! picker from a single dependency:
//!
//! ```toml
//! [dependencies]
//! dropkit = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`dropkit_core`] are available at the crate root
//!   ([`Component`], [`Command`], [`Listener`], [`ListenerSet`], etc.).
//! * The [`widgets`] module re-exports everything from [`dropkit_widgets`].
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use dropkit::widgets::picker::Message;
//! use dropkit::widgets::{Picker, PickerConfig, SelectOption};
//! use dropkit::Component;
//!
//! let mut picker = Picker::new(
//!     vec![
//!         SelectOption::new("kyiv", "Kyiv").with_group("North"),
//!         SelectOption::new("odesa", "Odesa").with_group("South"),
//!     ],
//!     PickerConfig::single().with_search(true),
//! );
//! picker.focus();
//!
//! for msg in picker.update(Message::Select("odesa".into())).into_messages() {
//!     if let Message::Changed(value) = msg {
//!         picker.set_value(value)?;
//!     }
//! }
//! assert_eq!(picker.summary(), "Odesa");
//! ```

pub use dropkit_core::*;
pub mod widgets {
    pub use dropkit_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;

#[cfg(test)]
mod tests {
    use super::widgets::picker::Message;
    use super::widgets::{Picker, PickerConfig, SelectOption, SelectionValue};
    use super::Component;

    #[test]
    fn picker_is_reachable_through_the_umbrella() {
        let mut picker = Picker::new(
            vec![SelectOption::new("odesa", "Odesa").with_group("South")],
            PickerConfig::single(),
        );
        let messages = picker.update(Message::Select("odesa".into())).into_messages();
        assert_eq!(
            messages,
            vec![Message::Changed(SelectionValue::single("odesa"))]
        );
        picker.set_value(SelectionValue::single("odesa")).unwrap();
        assert_eq!(picker.summary(), "Odesa");
    }
}
