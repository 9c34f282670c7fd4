//! Session store: owns the live canvas state, dispatches actions, notifies
//! subscribers and keeps storage in sync.

use crate::action::CanvasAction;
use crate::reducer::reduce;
use crate::state::{CanvasSnapshot, CanvasState};
use crate::storage::{STORAGE_KEY, SnapshotStorage, Storage, StorageError, create_default_storage};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("canvas state accessed outside of a CanvasProvider")]
    OutsideProvider,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Key the durable snapshot is read from and written to.
    pub storage_key: String,
    /// Write the durable snapshot back to storage. When false the store
    /// still restores from storage but never writes.
    pub persist: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            persist: true,
        }
    }
}

type Subscriber = Rc<dyn Fn(&CanvasState)>;
type SubscriberList = RefCell<Vec<(u64, Subscriber)>>;

/// Owns the live [`CanvasState`] for a session.
pub struct CanvasStore {
    state: RefCell<Rc<CanvasState>>,
    storage: Box<dyn Storage>,
    config: StoreConfig,
    /// Last snapshot successfully written to storage.
    persisted: RefCell<Option<CanvasSnapshot>>,
    subscribers: Rc<SubscriberList>,
    next_subscriber_id: Cell<u64>,
    /// Actions dispatched while another dispatch is still notifying.
    queued: RefCell<VecDeque<CanvasAction>>,
    dispatching: Cell<bool>,
}

impl CanvasStore {
    /// Create a store, restoring the saved canvas if there is one.
    ///
    /// The restored (or default) snapshot becomes the single history entry
    /// and is written back to storage right away.
    pub fn new(storage: Box<dyn Storage>, config: StoreConfig) -> Self {
        let snapshot = restore_snapshot(storage.as_ref(), &config.storage_key);
        let store = Self {
            state: RefCell::new(Rc::new(CanvasState::with_initial_history(snapshot))),
            storage,
            config,
            persisted: RefCell::new(None),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscriber_id: Cell::new(0),
            queued: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        };
        store.sync_storage(&store.state());
        store
    }

    /// Create a store with the default configuration.
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self::new(storage, StoreConfig::default())
    }

    /// Create a store on the platform's default storage.
    pub fn open_default(config: StoreConfig) -> StoreResult<Self> {
        let storage = create_default_storage()?;
        Ok(Self::new(Box::new(storage), config))
    }

    /// Current state.
    pub fn state(&self) -> Rc<CanvasState> {
        Rc::clone(&self.state.borrow())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The backing storage.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Apply an action.
    ///
    /// The new state replaces the current one, is persisted if its durable
    /// part changed, and is then handed to every subscriber.
    ///
    /// Actions dispatched from a subscriber are queued and applied once every
    /// subscriber has seen the current state, so notifications always arrive
    /// in dispatch order.
    pub fn dispatch(&self, action: CanvasAction) {
        self.queued.borrow_mut().push_back(action);
        if self.dispatching.get() {
            log::trace!("Queued action dispatched during notification");
            return;
        }

        let _dispatching = DispatchScope::enter(&self.dispatching);
        while let Some(action) = self.next_queued() {
            self.apply(action);
        }
    }

    fn next_queued(&self) -> Option<CanvasAction> {
        self.queued.borrow_mut().pop_front()
    }

    fn apply(&self, action: CanvasAction) {
        let current = self.state();
        let next = Rc::new(reduce(&current, action));
        *self.state.borrow_mut() = Rc::clone(&next);

        self.sync_storage(&next);
        self.notify(&next);
    }

    /// Register a callback run after every dispatch.
    ///
    /// The callback stays registered until the returned guard is dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&CanvasState) + 'static) -> Subscription {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Write the current snapshot to storage, reporting failures.
    pub fn save_now(&self) -> StoreResult<()> {
        let snapshot = self.state().snapshot();
        self.storage
            .save(&self.config.storage_key, &snapshot)
            .inspect_err(|e| log::error!("Failed to save canvas: {}", e))?;
        *self.persisted.borrow_mut() = Some(snapshot);
        Ok(())
    }

    fn sync_storage(&self, state: &CanvasState) {
        if !self.config.persist {
            return;
        }

        let snapshot = state.snapshot();
        if self.persisted.borrow().as_ref() == Some(&snapshot) {
            return;
        }

        match self.storage.save(&self.config.storage_key, &snapshot) {
            Ok(()) => *self.persisted.borrow_mut() = Some(snapshot),
            Err(e) => log::warn!("Failed to persist canvas: {}", e),
        }
    }

    fn notify(&self, state: &CanvasState) {
        // Callbacks may subscribe.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(state);
        }
    }
}

/// Marks a dispatch in progress; cleared on drop, including on unwind.
struct DispatchScope<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchScope<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchScope<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

fn restore_snapshot(storage: &dyn Storage, key: &str) -> CanvasSnapshot {
    match storage.load(key) {
        Ok(snapshot) => {
            log::info!("Restored canvas with {} shapes", snapshot.shapes.len());
            snapshot
        }
        Err(StorageError::NotFound(_)) => {
            log::debug!("No saved canvas under {:?}, starting fresh", key);
            CanvasSnapshot::default()
        }
        Err(e) => {
            log::warn!("Ignoring saved canvas: {}", e);
            CanvasSnapshot::default()
        }
    }
}

/// Keeps a subscriber registered. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    subscribers: Weak<SubscriberList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Shared handle to a session store.
pub type CanvasHandle = Rc<CanvasStore>;

thread_local! {
    static CURRENT_STORE: RefCell<Option<CanvasHandle>> = const { RefCell::new(None) };
}

/// Makes a store reachable through [`use_canvas_state`].
pub struct CanvasProvider;

impl CanvasProvider {
    /// Run `f` with `handle` as the current store.
    ///
    /// Scopes nest; the enclosing store is current again once `f` returns.
    pub fn provide<R>(handle: CanvasHandle, f: impl FnOnce() -> R) -> R {
        let previous = CURRENT_STORE.with(|current| current.replace(Some(handle)));
        let _scope = ProviderScope { previous };
        f()
    }
}

struct ProviderScope {
    previous: Option<CanvasHandle>,
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_STORE.with(|current| *current.borrow_mut() = previous);
    }
}

/// The store of the innermost enclosing [`CanvasProvider::provide`] call.
pub fn use_canvas_state() -> StoreResult<CanvasHandle> {
    CURRENT_STORE
        .with(|current| current.borrow().clone())
        .ok_or(StoreError::OutsideProvider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Freehand, Rectangle, Shape};
    use crate::storage::MemoryStorage;
    use crate::tools::ToolKind;
    use kurbo::Point;

    fn stroke() -> Shape {
        Shape::from(Freehand::from_points(vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)]))
    }

    fn memory_store() -> CanvasStore {
        CanvasStore::with_storage(Box::new(MemoryStorage::new()))
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_fresh_store_seeds_history() {
        let store = memory_store();
        let state = store.state();

        assert!(state.is_empty());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history.index(), Some(0));
        assert_eq!(state.history.current(), Some(&CanvasSnapshot::default()));
    }

    #[test]
    fn test_persists_on_open() {
        let store = memory_store();
        let saved = store.storage().load(STORAGE_KEY).unwrap();
        assert_eq!(saved, CanvasSnapshot::default());
    }

    #[test]
    fn test_restores_saved_canvas() {
        let storage = MemoryStorage::new();
        let mut snapshot = CanvasSnapshot::default();
        snapshot.shapes.push(stroke());
        snapshot.shapes.push(Shape::from(Rectangle::new(Point::ZERO, 10.0, 10.0)));
        snapshot.active_tool = ToolKind::Freehand;
        storage.save(STORAGE_KEY, &snapshot).unwrap();

        let store = CanvasStore::with_storage(Box::new(storage));
        let state = store.state();

        assert_eq!(state.len(), 2);
        assert_eq!(state.active_tool, ToolKind::Freehand);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history.index(), Some(0));
        assert!(!state.history.can_undo());
    }

    #[test]
    fn test_malformed_blob_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.write(STORAGE_KEY, "{\"shapes\": [").unwrap();

        let store = CanvasStore::with_storage(Box::new(storage));

        assert_eq!(store.state().snapshot(), CanvasSnapshot::default());
        assert_eq!(store.state().history.len(), 1);
        // The unreadable blob is replaced by the defaults.
        assert_eq!(
            store.storage().load(STORAGE_KEY).unwrap(),
            CanvasSnapshot::default()
        );
    }

    #[test]
    fn test_dispatch_persists_durable_state() {
        let store = memory_store();
        store.dispatch(CanvasAction::AddShape(stroke()));

        let saved = store.storage().load(STORAGE_KEY).unwrap();
        assert_eq!(saved.shapes.len(), 1);
        assert_eq!(saved.shapes[0].id(), store.state().shapes[0].id());
        assert_eq!(saved.selected_shape_ids, store.state().selected_shape_ids);
    }

    #[test]
    fn test_undo_is_persisted() {
        let store = memory_store();
        store.dispatch(CanvasAction::AddShape(stroke()));
        store.dispatch(CanvasAction::Undo);

        let saved = store.storage().load(STORAGE_KEY).unwrap();
        assert!(saved.shapes.is_empty());
    }

    #[test]
    fn test_custom_key_and_no_persist() {
        let config = StoreConfig {
            storage_key: "scratch".to_string(),
            persist: false,
        };
        let store = CanvasStore::new(Box::new(MemoryStorage::new()), config);
        store.dispatch(CanvasAction::AddShape(stroke()));

        assert_eq!(store.storage().read("scratch").unwrap(), None);
        assert_eq!(store.storage().read(STORAGE_KEY).unwrap(), None);

        store.save_now().unwrap();
        assert_eq!(store.storage().load("scratch").unwrap().shapes.len(), 1);
    }

    #[test]
    fn test_write_failures_do_not_block_dispatch() {
        let store = CanvasStore::with_storage(Box::new(FailingStorage));
        store.dispatch(CanvasAction::AddShape(stroke()));

        assert_eq!(store.state().len(), 1);
        assert!(matches!(
            store.save_now(),
            Err(StoreError::Storage(StorageError::Io(_)))
        ));
    }

    #[test]
    fn test_dispatch_replaces_state() {
        let store = memory_store();
        let before = store.state();
        store.dispatch(CanvasAction::SetZoom(2.0));

        assert!((before.zoom_level - 1.0).abs() < f64::EPSILON);
        assert!((store.state().zoom_level - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_subscribers_notified_in_order() {
        let store = memory_store();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let calls = Rc::clone(&calls);
            store.subscribe(move |state| calls.borrow_mut().push(("first", state.len())))
        };
        let second = {
            let calls = Rc::clone(&calls);
            store.subscribe(move |state| calls.borrow_mut().push(("second", state.len())))
        };

        store.dispatch(CanvasAction::AddShape(stroke()));
        assert_eq!(*calls.borrow(), vec![("first", 1), ("second", 1)]);

        drop(first);
        store.dispatch(CanvasAction::AddShape(stroke()));
        assert_eq!(
            *calls.borrow(),
            vec![("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(store.subscriber_count(), 1);
        drop(second);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_store() {
        let store = memory_store();
        let subscription = store.subscribe(|_| {});
        drop(store);
        drop(subscription);
    }

    #[test]
    fn test_subscriber_can_read_store() {
        let store: CanvasHandle = Rc::new(memory_store());
        let seen = Rc::new(Cell::new(0));

        let _subscription = {
            let weak = Rc::downgrade(&store);
            let seen = Rc::clone(&seen);
            store.subscribe(move |_| {
                if let Some(store) = weak.upgrade() {
                    seen.set(store.state().len());
                }
            })
        };

        store.dispatch(CanvasAction::AddShape(stroke()));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_dispatch_from_subscriber_is_applied_after_notification() {
        let store: CanvasHandle = Rc::new(memory_store());
        let first_seen = Rc::new(RefCell::new(Vec::new()));
        let second_seen = Rc::new(RefCell::new(Vec::new()));

        let _first = {
            let weak = Rc::downgrade(&store);
            let seen = Rc::clone(&first_seen);
            store.subscribe(move |state| {
                seen.borrow_mut().push(state.zoom_level);
                if (state.zoom_level - 2.0).abs() < f64::EPSILON {
                    if let Some(store) = weak.upgrade() {
                        store.dispatch(CanvasAction::SetZoom(3.0));
                    }
                }
            })
        };
        let _second = {
            let seen = Rc::clone(&second_seen);
            store.subscribe(move |state| seen.borrow_mut().push(state.zoom_level))
        };

        store.dispatch(CanvasAction::SetZoom(2.0));

        assert!((store.state().zoom_level - 3.0).abs() < f64::EPSILON);
        assert_eq!(*first_seen.borrow(), vec![2.0, 3.0]);
        assert_eq!(*second_seen.borrow(), vec![2.0, 3.0]);
        assert_eq!(
            second_seen.borrow().last().copied(),
            Some(store.state().zoom_level)
        );

        store.dispatch(CanvasAction::SetZoom(1.0));
        assert_eq!(*second_seen.borrow(), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_use_outside_provider() {
        assert!(matches!(use_canvas_state(), Err(StoreError::OutsideProvider)));
    }

    #[test]
    fn test_provider_scopes() {
        let outer: CanvasHandle = Rc::new(memory_store());
        let inner: CanvasHandle = Rc::new(memory_store());

        CanvasProvider::provide(Rc::clone(&outer), || {
            let found = use_canvas_state().unwrap();
            assert!(Rc::ptr_eq(&found, &outer));

            CanvasProvider::provide(Rc::clone(&inner), || {
                let found = use_canvas_state().unwrap();
                assert!(Rc::ptr_eq(&found, &inner));
                found.dispatch(CanvasAction::SetActiveTool(ToolKind::Line));
            });

            let found = use_canvas_state().unwrap();
            assert!(Rc::ptr_eq(&found, &outer));
        });

        assert!(use_canvas_state().is_err());
        assert_eq!(inner.state().active_tool, ToolKind::Line);
        assert_eq!(outer.state().active_tool, ToolKind::Select);
    }

    #[test]
    fn test_provide_returns_value() {
        let store: CanvasHandle = Rc::new(memory_store());
        let tool = CanvasProvider::provide(store, || {
            use_canvas_state().map(|s| s.state().active_tool)
        });
        assert_eq!(tool.unwrap(), ToolKind::Select);
    }
}
