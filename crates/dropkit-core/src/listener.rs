use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A global input source a component wants attached while it is in a given
/// state.
///
/// Listeners are declared from [`Component::listeners`](crate::Component::listeners)
/// and are never started by the component itself.  A [`ListenerSet`] owned
/// by the host compares the declared set after every update and attaches or
/// detaches the difference, so "attach on open, detach on close" is a
/// consequence of what the component declares, not of lifecycle hooks.
pub struct Listener<Msg: Send + 'static> {
    pub(crate) id: ListenerId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity used to diff listeners between updates.
///
/// Two declarations with equal ids are the same listener: the running one is
/// kept and the new declaration is discarded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId {
    type_id: TypeId,
    discriminant: u64,
}

impl ListenerId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self::new::<T>(hasher.finish())
    }
}

fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) -> AbortHandle {
    tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            if tx.send(msg).is_err() {
                break;
            }
        }
    })
    .abort_handle()
}

impl<Msg: Send + 'static> Listener<Msg> {
    /// Create from a raw stream and id.
    pub fn from_stream(id: ListenerId, stream: BoxStream<'static, Msg>) -> Self {
        Listener {
            id,
            spawn: Box::new(move |tx| forward(stream, tx)),
        }
    }

    /// The identity this listener is diffed by.
    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Listener<NewMsg> {
        Listener {
            id: self.id,
            spawn: Box::new(move |new_tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);

                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if new_tx.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });

                // Aborting the source drops inner_tx, which ends the mapper.
                abort
            }),
        }
    }
}

/// The set of listeners currently attached on behalf of one host.
///
/// Call [`reconcile`](ListenerSet::reconcile) with the component's declared
/// listeners after every update, and [`shutdown`](ListenerSet::shutdown) on
/// teardown.  Requires a tokio runtime.
pub struct ListenerSet<Msg: Send + 'static> {
    active: HashMap<ListenerId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> ListenerSet<Msg> {
    /// Create a set that forwards listener output into `msg_tx`.
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Attach declared listeners that are not running and detach running
    /// listeners that are no longer declared.
    pub fn reconcile(&mut self, declared: Vec<Listener<Msg>>) {
        let mut declared: HashMap<ListenerId, Listener<Msg>> = declared
            .into_iter()
            .map(|listener| (listener.id.clone(), listener))
            .collect();

        self.active.retain(|id, handle| {
            let keep = declared.contains_key(id);
            if !keep {
                tracing::trace!(?id, "detaching listener");
                handle.abort();
            }
            keep
        });

        for (id, listener) in declared.drain() {
            if !self.active.contains_key(&id) {
                tracing::trace!(?id, "attaching listener");
                let handle = (listener.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    /// Detach every listener.
    pub fn shutdown(&mut self) {
        for (id, handle) in self.active.drain() {
            tracing::trace!(?id, "detaching listener on shutdown");
            handle.abort();
        }
    }

    /// Number of attached listeners.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether the listener with `id` is attached.
    pub fn is_active(&self, id: &ListenerId) -> bool {
        self.active.contains_key(id)
    }
}

impl<Msg: Send + 'static> Drop for ListenerSet<Msg> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: ListenerId) -> Listener<i32> {
        Listener::from_stream(id, Box::pin(futures::stream::pending()))
    }

    #[test]
    fn listener_id_equality() {
        assert_eq!(ListenerId::of::<String>(), ListenerId::of::<String>());
        assert_ne!(ListenerId::of::<String>(), ListenerId::of::<i32>());
        assert_ne!(ListenerId::new::<String>(1), ListenerId::new::<String>(2));
    }

    #[test]
    fn listener_id_with_str() {
        let a = ListenerId::with_str::<String>("a");
        assert_ne!(a, ListenerId::with_str::<String>("b"));
        assert_eq!(a, ListenerId::with_str::<String>("a"));
    }

    #[tokio::test]
    async fn reconcile_attaches_new() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut set = ListenerSet::new(tx);

        let id = ListenerId::of::<String>();
        set.reconcile(vec![pending(id.clone())]);
        assert_eq!(set.active_count(), 1);
        assert!(set.is_active(&id));
    }

    #[tokio::test]
    async fn reconcile_detaches_removed() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut set = ListenerSet::new(tx);

        set.reconcile(vec![pending(ListenerId::of::<String>())]);
        assert_eq!(set.active_count(), 1);

        set.reconcile(vec![]);
        assert_eq!(set.active_count(), 0);
    }

    #[tokio::test]
    async fn reconcile_keeps_existing() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut set = ListenerSet::new(tx);

        let id = ListenerId::of::<String>();
        set.reconcile(vec![pending(id.clone())]);
        set.reconcile(vec![pending(id.clone())]);
        assert_eq!(set.active_count(), 1);
        assert!(set.is_active(&id));
    }

    #[tokio::test]
    async fn shutdown_detaches_everything() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut set = ListenerSet::new(tx);

        set.reconcile(vec![
            pending(ListenerId::new::<String>(1)),
            pending(ListenerId::new::<String>(2)),
        ]);
        assert_eq!(set.active_count(), 2);

        set.shutdown();
        assert_eq!(set.active_count(), 0);
    }

    #[tokio::test]
    async fn mapped_listener_forwards_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let mut set = ListenerSet::new(tx);

        let source = Listener::from_stream(
            ListenerId::of::<u8>(),
            Box::pin(futures::stream::iter(vec![1, 2])),
        );
        set.reconcile(vec![source.map(|n: i32| format!("got {n}"))]);

        assert_eq!(rx.recv().await.as_deref(), Some("got 1"));
        assert_eq!(rx.recv().await.as_deref(), Some("got 2"));
    }
}
