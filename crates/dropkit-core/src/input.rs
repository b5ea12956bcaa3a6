//! The document-level input listener.

use crate::event::InputEvent;
use crate::listener::{Listener, ListenerId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Marker type naming global input listeners in [`ListenerId`]s.
pub struct GlobalInput;

/// A listener receiving every terminal event, not only those routed to the
/// component by its owner.
///
/// `key` distinguishes listeners of different component instances, so two
/// open pickers each hold their own attachment.  The `map` closure returns
/// `Some(msg)` to forward an event or `None` to drop it.
///
/// # Example
///
/// ```rust,ignore
/// fn listeners(&self) -> Vec<Listener<Message>> {
///     vec![global_input(self.instance, |event| match event {
///         InputEvent::Key(key) => Some(Message::KeyPress(key)),
///         InputEvent::Mouse(mouse) => Some(Message::Pointer(mouse)),
///         _ => None,
///     })]
/// }
/// ```
pub fn global_input<Msg: Send + 'static>(
    key: u64,
    map: impl Fn(InputEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Listener<Msg> {
    let map = Arc::new(map);

    // The EventStream is created inside the spawned task: constructing it on
    // every declaration would touch crossterm's global reader while another
    // stream is polling it.
    Listener {
        id: ListenerId::new::<GlobalInput>(key),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            tokio::spawn(async move {
                let stream = EventStream::new().filter_map(move |result| {
                    let map = map.clone();
                    async move {
                        match result {
                            Ok(event) => map(InputEvent::from(event)),
                            Err(err) => {
                                tracing::debug!(%err, "dropping unreadable terminal event");
                                None
                            }
                        }
                    }
                });
                futures::pin_mut!(stream);
                while let Some(msg) = stream.next().await {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            })
            .abort_handle()
        }),
    }
}
