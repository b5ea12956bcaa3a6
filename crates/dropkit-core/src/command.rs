/// A side effect returned from [`Component::update`](crate::Component::update).
///
/// The picker widgets never perform I/O on their own; everything a component
/// wants the host to know about (a proposed value change, an overlay that
/// was dismissed) travels upward as a message wrapped in a `Command`.  The
/// host either feeds those messages back into its own update loop or, in
/// tests, collects them through [`TestHarness`](crate::testing::TestHarness).
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to report:
/// let cmd = Command::none();
///
/// // Propose a new value to the owner of the picker:
/// let cmd = Command::message(Message::Changed(next));
///
/// // Lift a child command into the parent's message type:
/// let cmd = picker.update(msg).map(AppMsg::Picker);
/// ```
#[must_use = "commands carry messages the host has to deliver"]
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    Batch(Vec<Command<Msg>>),
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Deliver a message immediately after the current update.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Combine several commands; their messages are delivered in order.
    ///
    /// No-op commands are dropped, and a batch of one collapses to that
    /// command.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_else(Command::none),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(self, f: impl Fn(Msg) -> NewMsg) -> Command<NewMsg> {
        self.map_ref(&f)
    }

    fn map_ref<NewMsg: Send + 'static>(self, f: &dyn Fn(Msg) -> NewMsg) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Message(msg) => Command::message(f(msg)),
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(cmds.into_iter().map(|cmd| cmd.map_ref(f)).collect()),
            },
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is a single immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// Flatten the command into the messages it carries, in delivery order.
    pub fn into_messages(self) -> Vec<Msg> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<Msg>) {
        match self.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => out.push(msg),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_into(out);
                }
            }
        }
    }
}

impl<Msg: Send + 'static> Default for Command<Msg> {
    fn default() -> Self {
        Command::none()
    }
}
