/**
 * Push Channel
 *
 * A push channel is one long-lived server-to-client event stream bound to a
 * single employee. The sending half lives in a `PushChannel` handle that the
 * channel registry owns; the receiving half lives in a `Subscription` that the
 * transport turns into an SSE response body.
 *
 * # State Machine
 *
 * ```text
 *          complete()        time_out()         fail()
 *   Open ─────────────► Completed   Open ──► TimedOut   Open ──► Errored
 * ```
 *
 * Every transition goes through `terminate`, which succeeds at most once per
 * channel. Terminating drops the sending half, so the subscriber's stream ends
 * after the events already buffered are drained, and runs the lifecycle hook
 * registered for the state that was reached.
 *
 * # Timeouts
 *
 * A channel has no server-side deadline by default. The connection stays open
 * until the client disconnects or a proxy in front of the server closes it.
 * Deployments that want a hard limit set a maximum lifetime on the
 * subscription stream, which ends it in the `TimedOut` state.
 */

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::stream::{self, Stream};
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::backend::error::SendError;
use crate::shared::{PushEvent, UserId};

/// Unique identity of one push channel
///
/// Two subscriptions from the same employee share a `UserId` but never a
/// `ChannelId`, which is how cleanup tells a stale channel from its
/// replacement.
pub type ChannelId = Uuid;

/// Lifecycle state of a push channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelState {
    /// Events can be sent
    Open = 0,
    /// The client disconnected, or the channel was closed by the server
    Completed = 1,
    /// The subscription reached its maximum lifetime
    TimedOut = 2,
    /// Writing to the channel failed
    Errored = 3,
}

impl ChannelState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Open,
            1 => Self::Completed,
            2 => Self::TimedOut,
            _ => Self::Errored,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Self::Open
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::TimedOut => "timed out",
            Self::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Callback run once when a channel reaches a terminal state
pub type LifecycleHook = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct LifecycleHooks {
    on_completion: Option<LifecycleHook>,
    on_timeout: Option<LifecycleHook>,
    on_error: Option<LifecycleHook>,
}

impl LifecycleHooks {
    fn slot(&mut self, state: ChannelState) -> Option<&mut Option<LifecycleHook>> {
        match state {
            ChannelState::Open => None,
            ChannelState::Completed => Some(&mut self.on_completion),
            ChannelState::TimedOut => Some(&mut self.on_timeout),
            ChannelState::Errored => Some(&mut self.on_error),
        }
    }
}

struct ChannelInner {
    id: ChannelId,
    user_id: UserId,
    state: AtomicU8,
    sender: Mutex<Option<mpsc::Sender<PushEvent>>>,
    hooks: Mutex<LifecycleHooks>,
}

/// Lock a std mutex, recovering the data if a previous holder panicked
///
/// Nothing guarded here can be left half-updated by a panic, so the poison
/// flag carries no information.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to one open server-push connection
///
/// Cloning the handle is cheap and every clone refers to the same channel.
#[derive(Clone)]
pub struct PushChannel {
    inner: Arc<ChannelInner>,
}

impl PushChannel {
    /// Allocate a new channel for `user_id`
    ///
    /// `capacity` bounds how many events may wait for a slow subscriber
    /// before further sends fail with `SendError::ChannelFull`. It is
    /// clamped to at least one so the initial liveness event always fits.
    ///
    /// Returns the channel handle and the receiving half for the transport.
    pub fn new(user_id: UserId, capacity: usize) -> (Self, mpsc::Receiver<PushEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let channel = Self {
            inner: Arc::new(ChannelInner {
                id: Uuid::new_v4(),
                user_id,
                state: AtomicU8::new(ChannelState::Open as u8),
                sender: Mutex::new(Some(tx)),
                hooks: Mutex::new(LifecycleHooks::default()),
            }),
        };
        (channel, rx)
    }

    pub fn id(&self) -> ChannelId {
        self.inner.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.inner.user_id
    }

    pub fn state(&self) -> ChannelState {
        ChannelState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    pub fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    /// Write an event to the channel without waiting
    ///
    /// # Errors
    ///
    /// * `SendError::ChannelClosed` - the channel is terminal or the
    ///   subscriber's stream has been dropped
    /// * `SendError::ChannelFull` - the subscriber has too many undelivered
    ///   events; this event is dropped
    pub fn send(&self, event: PushEvent) -> Result<(), SendError> {
        // `terminate` flips the state while holding this lock, so the state
        // read here cannot change before the send completes.
        let sender = lock(&self.inner.sender);
        if !self.is_open() {
            return Err(SendError::ChannelClosed);
        }
        let tx = sender.as_ref().ok_or(SendError::ChannelClosed)?;
        tx.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => SendError::ChannelFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }

    /// Move the channel from `Open` to `state`
    ///
    /// Returns `false` when the channel was already terminal (or `state` is
    /// `Open`), in which case nothing happens.
    pub fn terminate(&self, state: ChannelState) -> bool {
        if !state.is_terminal() {
            return false;
        }

        let mut sender = lock(&self.inner.sender);
        let transitioned = self
            .inner
            .state
            .compare_exchange(
                ChannelState::Open as u8,
                state as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if !transitioned {
            return false;
        }
        sender.take();
        drop(sender);

        tracing::debug!(
            "[Channel] Channel {} for {} {}",
            self.inner.id,
            self.inner.user_id,
            state
        );

        let hook = lock(&self.inner.hooks)
            .slot(state)
            .and_then(Option::take);
        if let Some(hook) = hook {
            hook();
        }
        true
    }

    /// The client went away or the server closed the channel
    pub fn complete(&self) -> bool {
        self.terminate(ChannelState::Completed)
    }

    /// The subscription outlived its maximum lifetime
    pub fn time_out(&self) -> bool {
        self.terminate(ChannelState::TimedOut)
    }

    /// Writing to the channel failed
    pub fn fail(&self) -> bool {
        self.terminate(ChannelState::Errored)
    }

    /// Run `hook` once when the channel completes
    pub fn on_completion(&self, hook: impl FnOnce() + Send + 'static) {
        self.register_hook(ChannelState::Completed, Box::new(hook));
    }

    /// Run `hook` once when the channel times out
    pub fn on_timeout(&self, hook: impl FnOnce() + Send + 'static) {
        self.register_hook(ChannelState::TimedOut, Box::new(hook));
    }

    /// Run `hook` once when the channel errors
    pub fn on_error(&self, hook: impl FnOnce() + Send + 'static) {
        self.register_hook(ChannelState::Errored, Box::new(hook));
    }

    // A hook registered after its state was reached runs right away. The
    // state is read under the hooks lock, and `terminate` publishes the state
    // before taking that lock, so exactly one side ends up running the hook.
    fn register_hook(&self, state: ChannelState, hook: LifecycleHook) {
        let mut hooks = lock(&self.inner.hooks);
        if self.state() == state {
            drop(hooks);
            hook();
            return;
        }
        if let Some(slot) = hooks.slot(state) {
            *slot = Some(hook);
        }
    }
}

impl fmt::Debug for PushChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushChannel")
            .field("id", &self.inner.id)
            .field("user_id", &self.inner.user_id)
            .field("state", &self.state())
            .finish()
    }
}

impl PartialEq for PushChannel {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for PushChannel {}

/// Receiving side of a push channel, held by the transport
///
/// Dropping a subscription means the client is gone, so the channel is
/// completed on drop.
pub struct Subscription {
    channel: PushChannel,
    receiver: mpsc::Receiver<PushEvent>,
}

impl Subscription {
    pub fn new(channel: PushChannel, receiver: mpsc::Receiver<PushEvent>) -> Self {
        Self { channel, receiver }
    }

    pub fn channel(&self) -> &PushChannel {
        &self.channel
    }

    /// Wait for the next event
    ///
    /// Returns `None` once the channel is terminal and every buffered event
    /// has been received.
    pub async fn recv(&mut self) -> Option<PushEvent> {
        self.receiver.recv().await
    }

    /// Turn the subscription into a stream of events
    ///
    /// With `max_lifetime` set the stream ends in the `TimedOut` state once
    /// that much time has passed; with `None` it runs until the channel is
    /// closed or the stream is dropped.
    pub fn into_stream(
        self,
        max_lifetime: Option<Duration>,
    ) -> impl Stream<Item = PushEvent> + Send + 'static {
        let deadline = max_lifetime.map(|lifetime| tokio::time::Instant::now() + lifetime);

        stream::unfold(self, move |mut subscription| async move {
            let next = match deadline {
                Some(deadline) => {
                    tokio::select! {
                        event = subscription.receiver.recv() => event,
                        _ = tokio::time::sleep_until(deadline) => {
                            tracing::info!(
                                "[Channel] Subscription for {} reached its maximum lifetime",
                                subscription.channel.user_id()
                            );
                            subscription.channel.time_out();
                            None
                        }
                    }
                }
                None => subscription.receiver.recv().await,
            };
            next.map(|event| (event, subscription))
        })
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.channel.complete();
    }
}
