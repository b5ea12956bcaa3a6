use crate::command::Command;
use crate::component::Component;
use crate::listener::ListenerId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless harness that drives a [`Component`] without a real terminal.
///
/// The harness plays the owner's role: every message a component emits is
/// recorded in the [`outbox`](TestHarness::outbox) and queued for delivery
/// back into the component, exactly as a parent routing the child's
/// commands would.  No tokio runtime or TTY is needed; listeners are only
/// inspected by id, never attached.
///
/// # Example
///
/// ```rust,ignore
/// use dropkit_core::testing::TestHarness;
///
/// let mut h = TestHarness::new(Picker::new(options, PickerConfig::default()));
/// h.send(Message::Open);
/// assert_eq!(h.active_listeners().len(), 1);
///
/// let screen = h.render_string(30, 8);
/// assert!(screen.contains("Alpha"));
/// ```
pub struct TestHarness<C: Component> {
    component: C,
    pending: Vec<C::Message>,
    outbox: Vec<C::Message>,
}

impl<C> TestHarness<C>
where
    C: Component,
    C::Message: Clone,
{
    /// Wrap a component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Deliver a message, triggering a single update.
    ///
    /// Emitted messages are recorded and queued; call
    /// [`drain_messages`](TestHarness::drain_messages) to deliver them.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.collect(cmd);
    }

    /// Deliver queued messages until the component stops emitting.
    pub fn drain_messages(&mut self) {
        while !self.pending.is_empty() {
            let messages: Vec<_> = self.pending.drain(..).collect();
            for msg in messages {
                let cmd = self.component.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Every message the component has emitted so far, in order.
    pub fn outbox(&self) -> &[C::Message] {
        &self.outbox
    }

    /// Take the recorded messages, leaving the outbox empty.
    pub fn take_outbox(&mut self) -> Vec<C::Message> {
        std::mem::take(&mut self.outbox)
    }

    /// Ids of the listeners the component currently declares.
    pub fn active_listeners(&self) -> Vec<ListenerId> {
        self.component
            .listeners()
            .iter()
            .map(|listener| listener.id().clone())
            .collect()
    }

    /// Shared access to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component, bypassing the message cycle.
    ///
    /// This is how a test plays the owner feeding a controlled value back.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component into `area` of a `width` x `height` buffer.
    pub fn render_in(&self, width: u16, height: u16, area: Rect) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| self.component.view(frame, area))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the component into the top row of a `width` x `height` buffer,
    /// leaving the rest free for overlays.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        self.render_in(width, height, Rect::new(0, 0, width, height.min(1)))
    }

    /// Render and return the visible content as a plain string, rows joined
    /// by newlines.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        for msg in cmd.into_messages() {
            self.outbox.push(msg.clone());
            self.pending.push(msg);
        }
    }
}

/// Concatenate a buffer's cells row by row.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
