use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

/// A stack of values a parent widget shares with the role components it is
/// currently rendering. The channel is explicit and instance-bound: a value is
/// only visible between `enter` and the guard's drop, so two widget instances
/// can never observe each other's state.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: RwLock<Vec<Arc<dyn Any + Send + Sync>>>,
}

impl ScopeStack {
    /// Push a scope value for the duration of the returned guard.
    #[must_use = "the scope is popped when the guard drops"]
    pub fn enter<T: Send + Sync + 'static>(&self, value: T) -> ScopeGuard<'_> {
        self.frames.write().push(Arc::new(value));
        ScopeGuard { stack: self }
    }

    /// The innermost scope value of type `T`, if any parent provides one.
    pub fn current<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let frames = self.frames.read();
        frames
            .iter()
            .rev()
            .find_map(|frame| frame.clone().downcast::<T>().ok())
    }

    /// Like [`current`](Self::current), but a missing scope is a precondition
    /// violation: the named role component was rendered outside its parent.
    pub fn expect<T: Send + Sync + 'static>(&self, role: &str) -> Arc<T> {
        self.current()
            .unwrap_or_else(|| panic!("{role} was used outside of its parent widget"))
    }

    pub fn depth(&self) -> usize {
        self.frames.read().len()
    }
}

pub struct ScopeGuard<'a> {
    stack: &'a ScopeStack,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.stack.frames.write().pop();
    }
}
