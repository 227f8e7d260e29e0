use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::debug;

use crate::date::holidaydate::HolidayDate;
use crate::holiday::holidayid::HolidayId;

/// Custom holiday resolution: `(region, date, fallback) -> id`.
///
/// The fallback runs the default matcher for the same date and region; a
/// resolver may call it, post-process its answer or ignore it entirely.
pub type Resolver = Arc<
    dyn Fn(&str, &dyn HolidayDate, &dyn Fn() -> Option<HolidayId>) -> Option<HolidayId> + Send + Sync
>;

/// Wraps a closure as a [`Resolver`].
pub fn resolver<F>(f: F) -> Resolver
    where F: Fn(&str, &dyn HolidayDate, &dyn Fn() -> Option<HolidayId>) -> Option<HolidayId> + Send + Sync + 'static {
    Arc::new(f)
}

/// Identity of an owner: the address of its `Arc` allocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OwnerKey(usize);

impl OwnerKey {
    pub fn of<O: ?Sized>(owner: &Arc<O>) -> OwnerKey {
        OwnerKey(Arc::as_ptr(owner) as *const () as usize)
    }
}

/// Weak reference to an owner together with its key.
#[derive(Clone)]
pub struct OwnerHandle {
    key: OwnerKey,
    owner: Weak<dyn Any + Send + Sync>
}

impl OwnerHandle {
    pub fn of<O>(owner: &Arc<O>) -> OwnerHandle
        where O: Any + Send + Sync {
        let weak: Weak<O> = Arc::downgrade(owner);
        OwnerHandle { key: OwnerKey::of(owner), owner: weak }
    }

    pub fn key(&self) -> OwnerKey {
        self.key
    }
}

struct ScopedResolver {
    // Weak keeps the allocation (and so the key) reserved without keeping
    // the owner alive.
    owner: Weak<dyn Any + Send + Sync>,
    resolver: Resolver
}

impl ScopedResolver {
    fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

/// Resolver strategies of one engine: its own default plus at most one
/// resolver per owning object.
///
/// Owners are compared by identity, never by value, and are held weakly:
/// registering a resolver never extends an owner's lifetime. Entries of
/// dropped owners stop matching at once and are swept on the next write.
pub struct StrategyRegistry {
    default: RwLock<Option<Resolver>>,
    scoped: RwLock<HashMap<OwnerKey, ScopedResolver>>
}

impl StrategyRegistry {
    pub fn new() -> StrategyRegistry {
        StrategyRegistry {
            default: RwLock::new(None),
            scoped: RwLock::new(HashMap::new())
        }
    }

    pub fn set_default_resolver(&self, resolver: Option<Resolver>) {
        debug!(set = resolver.is_some(), "default holiday resolver updated");
        *self.default.write().unwrap_or_else(PoisonError::into_inner) = resolver;
    }

    pub fn default_resolver(&self) -> Option<Resolver> {
        self.default.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Associates `resolver` with `owner`, replacing any previous one.
    /// `None` removes the association.
    pub fn set_resolver<O>(&self, owner: &Arc<O>, resolver: Option<Resolver>)
        where O: Any + Send + Sync {
        self.set_handle_resolver(&OwnerHandle::of(owner), resolver);
    }

    pub fn set_handle_resolver(&self, owner: &OwnerHandle, resolver: Option<Resolver>) {
        let key = owner.key;
        let mut scoped = self.scoped.write().unwrap_or_else(PoisonError::into_inner);
        scoped.retain(|_, entry| entry.is_alive());
        match resolver {
            Some(resolver) => {
                scoped.insert(key, ScopedResolver { owner: owner.owner.clone(), resolver });
            },
            None => {
                scoped.remove(&key);
            }
        }
        debug!(owner = ?key, owners = scoped.len(), "scoped holiday resolver updated");
    }

    /// The resolver registered for exactly this owner, if any.
    pub fn get_resolver<O>(&self, owner: &Arc<O>) -> Option<Resolver>
        where O: Any + Send + Sync {
        self.get_resolver_by_key(OwnerKey::of(owner))
    }

    pub fn get_resolver_by_key(&self, key: OwnerKey) -> Option<Resolver> {
        let scoped = self.scoped.read().unwrap_or_else(PoisonError::into_inner);
        scoped.get(&key)
            .filter(|entry| entry.is_alive())
            .map(|entry| Arc::clone(&entry.resolver))
    }

    /// The owner's resolver, falling back to the default one.
    pub fn effective_resolver(&self, owner: Option<OwnerKey>) -> Option<Resolver> {
        owner
            .and_then(|key| self.get_resolver_by_key(key))
            .or_else(|| self.default_resolver())
    }

    /// Number of live owners with a resolver.
    pub fn len(&self) -> usize {
        self.scoped.read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|entry| entry.is_alive())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops entries whose owner is gone and returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut scoped = self.scoped.write().unwrap_or_else(PoisonError::into_inner);
        let before = scoped.len();
        scoped.retain(|_, entry| entry.is_alive());
        before - scoped.len()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        StrategyRegistry::new()
    }
}
