//! Archive sessions: the scope over which shared-object identity is
//! tracked.
//!
//! Every top-level entry point opens a session if none is active; nesting
//! is depth-counted so only the outermost scope owns the maps. Wrapping
//! several entry calls in [`with_save_session`](super::with_save_session) /
//! [`with_load_session`](super::with_load_session) widens the aliasing
//! scope to all of them. Sessions are thread-local; the protocol is a
//! synchronous, call-and-return affair and never migrates mid-call.

use core::any::Any;
use std::cell::RefCell;
use std::sync::Arc;

use crate::hash::HashMap;

pub(crate) struct SaveSession {
    next_id: u32,
    ids: HashMap<usize, u32>,
}

impl SaveSession {
    fn new() -> Self {
        Self {
            next_id: 0,
            ids: HashMap::default(),
        }
    }

    /// Returns the session id for the instance at `addr` and whether this
    /// is its first occurrence in the session.
    pub fn intern(&mut self, addr: usize) -> (u32, bool) {
        if let Some(&id) = self.ids.get(&addr) {
            return (id, false);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(addr, id);
        (id, true)
    }
}

pub(crate) struct LoadSession {
    objects: HashMap<u32, Box<dyn Any>>,
}

impl LoadSession {
    fn new() -> Self {
        Self {
            objects: HashMap::default(),
        }
    }

    pub fn insert<T: 'static>(&mut self, id: u32, object: Arc<T>) {
        self.objects.insert(id, Box::new(object));
    }

    pub fn resolve<T: 'static>(&self, id: u32) -> Option<Arc<T>> {
        self.objects.get(&id)?.downcast_ref::<Arc<T>>().cloned()
    }
}

struct Stack<S> {
    depth: u32,
    session: Option<S>,
}

impl<S> Stack<S> {
    const fn new() -> Self {
        Self {
            depth: 0,
            session: None,
        }
    }
}

thread_local! {
    static SAVE_STACK: RefCell<Stack<SaveSession>> = const { RefCell::new(Stack::new()) };
    static LOAD_STACK: RefCell<Stack<LoadSession>> = const { RefCell::new(Stack::new()) };
}

/// RAII guard for a save session; the outermost guard owns the maps.
pub(crate) struct SaveScope(());

pub(crate) fn save_scope() -> SaveScope {
    SAVE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.depth += 1;
        if stack.depth == 1 {
            stack.session = Some(SaveSession::new());
        }
    });
    SaveScope(())
}

impl Drop for SaveScope {
    fn drop(&mut self) {
        SAVE_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.depth -= 1;
            if stack.depth == 0 {
                stack.session = None;
            }
        });
    }
}

/// RAII guard for a load session; the outermost guard owns the maps.
pub(crate) struct LoadScope(());

pub(crate) fn load_scope() -> LoadScope {
    LOAD_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.depth += 1;
        if stack.depth == 1 {
            stack.session = Some(LoadSession::new());
        }
    });
    LoadScope(())
}

impl Drop for LoadScope {
    fn drop(&mut self) {
        LOAD_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.depth -= 1;
            if stack.depth == 0 {
                stack.session = None;
            }
        });
    }
}

pub(crate) fn with_save<R>(f: impl FnOnce(&mut SaveSession) -> R) -> R {
    SAVE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let session = stack
            .session
            .as_mut()
            .expect("shared objects can only be serialized inside an archive session");
        f(session)
    })
}

pub(crate) fn with_load<R>(f: impl FnOnce(&mut LoadSession) -> R) -> R {
    LOAD_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let session = stack
            .session
            .as_mut()
            .expect("shared objects can only be deserialized inside an archive session");
        f(session)
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{load_scope, save_scope, with_load, with_save};
    use std::sync::Arc;

    #[test]
    fn save_session_interns_by_address() {
        let _outer = save_scope();
        let (first, fresh) = with_save(|s| s.intern(0x10));
        assert!(fresh);
        {
            let _inner = save_scope();
            let (again, fresh) = with_save(|s| s.intern(0x10));
            assert_eq!(again, first);
            assert!(!fresh);
        }
        let (second, fresh) = with_save(|s| s.intern(0x20));
        assert!(fresh);
        assert_ne!(second, first);
    }

    #[test]
    fn sessions_reset_when_outermost_scope_ends() {
        {
            let _scope = save_scope();
            with_save(|s| s.intern(0x10));
        }
        let _scope = save_scope();
        let (id, fresh) = with_save(|s| s.intern(0x10));
        assert_eq!(id, 0);
        assert!(fresh);
    }

    #[test]
    fn load_session_resolves_by_id() {
        let _scope = load_scope();
        let shared = Arc::new(42u32);
        with_load(|s| s.insert(3, shared.clone()));
        let resolved = with_load(|s| s.resolve::<u32>(3)).unwrap();
        assert!(Arc::ptr_eq(&resolved, &shared));
        assert!(with_load(|s| s.resolve::<u32>(4)).is_none());
    }
}
