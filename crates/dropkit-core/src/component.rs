use crate::command::Command;
use crate::listener::Listener;
use ratatui::{layout::Rect, Frame};

/// A reusable widget that owns local state and renders into a given [`Rect`].
///
/// Components follow the Elm shape: input arrives as messages, [`update`]
/// mutates local state and returns a [`Command`] describing anything the
/// owner has to act on, and [`view`] draws the current state.  The owner
/// decides *where* a component renders by handing it a sub-region of the
/// frame.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// lift commands with [`Command::map`]:
///
/// ```rust,ignore
/// use dropkit_core::{Command, Component};
/// use dropkit_widgets::picker::{self, Picker};
///
/// enum AppMsg { Region(picker::Message) }
///
/// fn update(app: &mut App, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::Region(picker::Message::Changed(next)) => {
///             if app.region_picker.set_value(next.clone()).is_ok() {
///                 app.region = next;
///             }
///             Command::none()
///         }
///         AppMsg::Region(m) => app.region_picker.update(m).map(AppMsg::Region),
///     }
/// }
/// ```
///
/// [`update`]: Component::update
/// [`view`]: Component::view
pub trait Component: Send + 'static {
    /// The component's message type, covering both inbound input and the
    /// outbound notifications it emits through [`Command`]s.
    type Message: Send + 'static;

    /// Process a message, mutate local state, and return a [`Command`].
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area` of the [`Frame`].
    ///
    /// Overlays (dropdown lists) may draw outside `area`, but must clear what
    /// they cover first.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Global listeners this component needs in its current state.
    ///
    /// Called after every update.  The owner hands the result to a
    /// [`ListenerSet`](crate::listener::ListenerSet), which starts listeners
    /// that appeared and aborts those that disappeared, so a component only
    /// receives global input while it asks for it.
    ///
    /// The default implementation requests nothing.
    fn listeners(&self) -> Vec<Listener<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus.
    fn focused(&self) -> bool {
        false
    }
}
