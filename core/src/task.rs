//! Cooperative, thread-local task pool.
//!
//! Deferred guards are spawned here and make progress only when the host event
//! loop drains the pool between turns, mirroring how a UI thread runs its local
//! futures. Nothing in this module is `Send`; every thread gets its own pool.

use core::{cell::RefCell, future::Future};

use futures::{
    executor::{LocalPool, LocalSpawner},
    task::{LocalSpawnExt, SpawnError},
};

struct Local {
    pool: RefCell<Option<LocalPool>>,
    spawner: LocalSpawner,
}

impl Local {
    fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(Some(pool)),
            spawner,
        }
    }
}

thread_local! {
    static LOCAL: Local = Local::new();
}

/// Spawns a future on the current thread's pool.
///
/// # Errors
///
/// Returns a [`SpawnError`] once [`shutdown`] has been called on this thread.
pub fn spawn_local(future: impl Future<Output = ()> + 'static) -> Result<(), SpawnError> {
    LOCAL.with(|local| local.spawner.spawn_local(future))
}

/// Runs every spawned task until none of them can make progress.
///
/// Must not be called from inside a task running on the same pool.
pub fn run_until_stalled() {
    LOCAL.with(|local| {
        if let Some(pool) = local.pool.borrow_mut().as_mut() {
            pool.run_until_stalled();
        }
    });
}

/// Runs the pool until every spawned task has completed.
///
/// Blocks the thread if a task waits on something that never arrives.
pub fn run() {
    LOCAL.with(|local| {
        if let Some(pool) = local.pool.borrow_mut().as_mut() {
            pool.run();
        }
    });
}

/// Drops every unfinished task on this thread's pool and refuses new ones.
///
/// Meant for the host event loop on exit. Later spawns fail and the run
/// functions return at once.
pub fn shutdown() {
    let pool = LOCAL.with(|local| local.pool.borrow_mut().take());
    // Tasks are dropped outside the borrow; their destructors may touch the pool.
    drop(pool);
}
