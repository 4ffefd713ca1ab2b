//! The binding builder.
//!
//! [`Keasy`] accumulates an event kind, a target, a callback, an optional
//! delay and an optional key filter across chained calls. Every call that
//! changes the configuration ends in [`Keasy::rebuild`], which tears down
//! the active binding and subscribes a freshly built handler, so at most one
//! listener per builder is ever registered.
//!
//! ```ignore
//! let hub = Arc::new(EventHub::new());
//! let mut save = keasy::keydown();
//! save.attach_to(hub.clone())?
//!     .match_keys("CTRL+S")
//!     .after(300, keasy::MILLISECONDS)?
//!     .on_trigger(|| println!("saved"));
//! ```

use crate::debounce::Debouncer;
use crate::error::KeasyError;
use crate::listener::{Callback, Listener, ListenerBinding};
use crate::target::EventSource;
use crate::timer::{TimerHost, TokioTimers};
use crate::units::{TimeUnit, to_millis};
use keasy_keys::{KeyCombination, KeyEventKind, KeyMatcher};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Named callbacks, for bindings that refer to their action by name.
#[derive(Clone, Default)]
pub struct ActionMap {
    actions: HashMap<String, Callback>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.actions.get(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Debug for ActionMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.actions.keys()).finish()
    }
}

/// The currently registered handler and where it is registered.
struct ActiveBinding {
    binding: ListenerBinding,
    target: Option<Arc<dyn EventSource>>,
    debouncer: Option<Arc<Debouncer>>,
}

/// Fluent builder for one keyboard binding.
///
/// The binding lives as long as the builder: dropping a `Keasy` removes its
/// listener and cancels any pending delayed call.
pub struct Keasy {
    kind: KeyEventKind,
    target: Option<Arc<dyn EventSource>>,
    callback: Option<Callback>,
    delay: Option<Duration>,
    combination: Option<KeyCombination>,
    timers: Option<Arc<dyn TimerHost>>,
    active: Option<ActiveBinding>,
}

impl Default for Keasy {
    fn default() -> Self {
        Self::new()
    }
}

impl Keasy {
    /// A builder listening for key-down events, with nothing else configured.
    ///
    /// Delays use the tokio runtime current at the time [`Keasy::after`] is
    /// called unless a timer host is supplied with [`Keasy::with_timers`].
    pub fn new() -> Self {
        Self {
            kind: KeyEventKind::Down,
            target: None,
            callback: None,
            delay: None,
            combination: None,
            timers: None,
            active: None,
        }
    }

    /// A builder that schedules delayed dispatch on `timers`.
    pub fn with_timers(timers: Arc<dyn TimerHost>) -> Self {
        let mut keasy = Self::new();
        keasy.timers = Some(timers);
        keasy
    }

    /// Select the event kind by name.
    ///
    /// Accepts canonical names (`"keyup"`) and the namespaced selectors
    /// ([`crate::UP`]). Anything unrecognized selects key-down.
    pub fn when(&mut self, event_type: &str) -> &mut Self {
        let kind = KeyEventKind::from_name(event_type).unwrap_or_else(|| {
            log::debug!("Unknown event type '{}', using keydown", event_type);
            KeyEventKind::Down
        });
        self.when_kind(kind)
    }

    pub fn when_kind(&mut self, kind: KeyEventKind) -> &mut Self {
        self.kind = kind;
        if self.active.is_some() {
            self.rebuild();
        }
        self
    }

    /// Bind to `target`.
    ///
    /// # Errors
    /// Returns [`KeasyError::InvalidTarget`] if `target` accepts no listeners;
    /// the previous target, if any, stays in place.
    pub fn attach_to(&mut self, target: Arc<dyn EventSource>) -> Result<&mut Self, KeasyError> {
        if !target.accepts_listeners() {
            return Err(KeasyError::InvalidTarget(target.describe()));
        }
        self.detach();
        self.target = Some(target);
        self.rebuild();
        Ok(self)
    }

    /// Set the callback run when a qualifying event arrives.
    pub fn on_trigger<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self.rebuild();
        self
    }

    /// Set the callback to the action registered under `name`.
    ///
    /// # Errors
    /// Returns [`KeasyError::InvalidCallback`] if `actions` has no such entry.
    pub fn on_action(&mut self, name: &str, actions: &ActionMap) -> Result<&mut Self, KeasyError> {
        let callback = actions
            .get(name)
            .cloned()
            .ok_or_else(|| KeasyError::InvalidCallback(name.to_string()))?;
        self.callback = Some(callback);
        self.rebuild();
        Ok(self)
    }

    /// Debounce dispatch: the callback runs once the target has been quiet
    /// for `amount` `unit`s after the last qualifying event.
    ///
    /// Non-positive amounts clamp to zero, which still defers the callback
    /// through the timer host.
    ///
    /// # Errors
    /// - [`KeasyError::InvalidAmount`] if the delay overflows
    /// - [`KeasyError::TimerUnavailable`] if no timer host was supplied and
    ///   there is no current tokio runtime
    pub fn after(&mut self, amount: i64, unit: TimeUnit) -> Result<&mut Self, KeasyError> {
        let millis = to_millis(amount, unit)?;
        if self.timers.is_none() {
            self.timers = Some(Arc::new(TokioTimers::current()?));
        }
        self.delay = Some(Duration::from_millis(millis));
        self.rebuild();
        Ok(self)
    }

    /// Only react to events matching `spec` (e.g. `"CTRL+K"`).
    ///
    /// An empty `spec` clears the filter. Empty tokens such as the one in
    /// `"CTRL+"` are kept as required keys and so never match.
    pub fn match_keys(&mut self, spec: &str) -> &mut Self {
        self.combination = if spec.is_empty() {
            None
        } else {
            Some(KeyMatcher::parse(spec).combination().clone())
        };
        self.rebuild();
        self
    }

    /// Remove the active listener, cancelling any pending delayed call.
    /// Calling this with nothing bound does nothing.
    pub fn detach(&mut self) -> &mut Self {
        if let Some(active) = self.active.take() {
            active.binding.unbind(active.target.as_deref());
            if let Some(debouncer) = active.debouncer {
                debouncer.cancel();
            }
        }
        self
    }

    /// Replace the active listener with one built from the current
    /// configuration.
    pub fn rebuild(&mut self) -> &mut Self {
        self.detach();

        let (listener, debouncer) = self.build_handler();
        let binding = ListenerBinding::new(self.kind, listener);
        binding.bind(self.target.as_deref());

        self.active = Some(ActiveBinding {
            binding,
            target: self.target.clone(),
            debouncer,
        });
        self
    }

    /// Build the dispatch handler: key filter first, then debounce, then
    /// the callback. Filtered-out events never reach the debounce timer.
    fn build_handler(&self) -> (Listener, Option<Arc<Debouncer>>) {
        let invoke: Callback = match &self.callback {
            Some(callback) => Arc::clone(callback),
            None => Arc::new(|| log::trace!("Event caught with no callback configured")),
        };

        let (fire, debouncer) = match (self.delay, &self.timers) {
            (Some(delay), Some(timers)) => {
                let debouncer = Arc::new(Debouncer::new(delay, Arc::clone(timers), invoke));
                let trigger = Arc::clone(&debouncer);
                let fire: Callback = Arc::new(move || trigger.trigger());
                (fire, Some(debouncer))
            }
            _ => (invoke, None),
        };

        let matcher = self.combination.clone().map(KeyMatcher::new);
        let listener = Listener::new(move |event| {
            if let Some(matcher) = &matcher {
                match matcher.matches(event) {
                    Ok(true) => {}
                    Ok(false) => return,
                    Err(e) => {
                        log::debug!("Ignoring event: {}", e);
                        return;
                    }
                }
            }
            fire();
        });

        (listener, debouncer)
    }

    pub fn kind(&self) -> KeyEventKind {
        self.kind
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    pub fn combination(&self) -> Option<&KeyCombination> {
        self.combination.as_ref()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Whether a listener is currently registered on a target.
    pub fn is_bound(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.target.is_some())
    }

    /// Whether a debounced call is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.active
            .as_ref()
            .and_then(|active| active.debouncer.as_ref())
            .is_some_and(|debouncer| debouncer.is_pending())
    }
}

impl Drop for Keasy {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Keasy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keasy")
            .field("kind", &self.kind)
            .field("target", &self.target.as_ref().map(|t| t.describe()))
            .field("has_callback", &self.callback.is_some())
            .field("delay", &self.delay)
            .field("combination", &self.combination)
            .field("bound", &self.is_bound())
            .finish()
    }
}
