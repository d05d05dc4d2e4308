//! Build-once memoization of expensive resources.
//!
//! A [`ResourceCache`] maps a constructor identity, the [`Factory`] type plus
//! its arguments, to a shared instance. The first request builds the value;
//! every later request with equal arguments returns the same `Arc`.
//!
//! There is no eviction, no size bound and no expiry. Entries live until
//! [`ResourceCache::clear`] is called or the cache is dropped; hosts own their
//! caches explicitly (see [`ThemeResources`](crate::ThemeResources)).
//!
//! ```rust
//! use std::sync::Arc;
//! use lacquer::{Factory, ResourceCache};
//!
//! struct Greeting;
//!
//! impl Factory for Greeting {
//!     type Args = String;
//!     type Output = String;
//!
//!     fn build(&self, name: &String) -> String {
//!         format!("hello, {}", name)
//!     }
//! }
//!
//! let cache = ResourceCache::new();
//! let a = cache.get_or_create(&Greeting, "ada".to_string());
//! let b = cache.get_or_create(&Greeting, "ada".to_string());
//! assert!(Arc::ptr_eq(&a, &b));
//! ```
//!
//! # Concurrency
//!
//! The table is behind one mutex. The factory runs with the lock released, so a
//! factory may itself use the cache (an icon factory requesting pixmaps).
//! If two threads race to build the same key, both build but only the first
//! value stored is ever returned.

use std::any::{Any, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Builds a resource from constructor arguments.
///
/// Identity in a [`ResourceCache`] is the implementing type plus `Args`, so
/// two instances of the same factory type share entries.
pub trait Factory: 'static {
    type Args: Eq + Hash + Clone + Send + Sync + 'static;
    type Output: Send + Sync + 'static;

    fn build(&self, args: &Self::Args) -> Self::Output;
}

type Shared = Arc<dyn Any + Send + Sync>;

struct Entry {
    args: Box<dyn Any + Send + Sync>,
    value: Shared,
}

type Bucket = Vec<Entry>;

/// Memoizing store keyed by factory type and arguments.
#[derive(Default)]
pub struct ResourceCache {
    entries: Mutex<HashMap<(TypeId, u64), Bucket>>,
}

fn hash_args<A: Hash>(args: &A) -> u64 {
    let mut hasher = DefaultHasher::new();
    args.hash(&mut hasher);
    hasher.finish()
}

fn find<F: Factory>(bucket: &Bucket, args: &F::Args) -> Option<Arc<F::Output>> {
    bucket
        .iter()
        .find(|entry| entry.args.downcast_ref::<F::Args>() == Some(args))
        .and_then(|entry| Arc::clone(&entry.value).downcast::<F::Output>().ok())
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(TypeId, u64), Bucket>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached instance for `args`, building it with `factory` on first use.
    pub fn get_or_create<F: Factory>(&self, factory: &F, args: F::Args) -> Arc<F::Output> {
        let key = (TypeId::of::<F>(), hash_args(&args));

        if let Some(existing) = self.lock().get(&key).and_then(|b| find::<F>(b, &args)) {
            return existing;
        }

        let built = Arc::new(factory.build(&args));

        let mut entries = self.lock();
        let bucket = entries.entry(key).or_default();
        if let Some(existing) = find::<F>(bucket, &args) {
            return existing;
        }
        bucket.push(Entry {
            args: Box::new(args),
            value: Arc::clone(&built) as Shared,
        });
        built
    }

    /// Returns the cached instance for `args` without building.
    pub fn get<F: Factory>(&self, args: &F::Args) -> Option<Arc<F::Output>> {
        let key = (TypeId::of::<F>(), hash_args(args));
        self.lock().get(&key).and_then(|b| find::<F>(b, args))
    }

    pub fn contains<F: Factory>(&self, args: &F::Args) -> bool {
        self.get::<F>(args).is_some()
    }

    /// Number of cached instances across all factories.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Instances still held elsewhere stay alive.
    pub fn clear(&self) {
        let mut entries = self.lock();
        let dropped: usize = entries.values().map(Vec::len).sum();
        entries.clear();
        tracing::debug!(dropped, "resource cache cleared");
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("len", &self.len())
            .finish()
    }
}
