/// One-shot teardown handle returned by every registration in this crate.
///
/// A `Disposer` runs its teardown exactly once: either when [`Disposer::dispose`]
/// consumes it or when it is dropped. Because both paths consume the handle,
/// a registration cannot be released twice.
#[must_use = "dropping a Disposer immediately unregisters whatever it guards"]
pub struct Disposer {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Disposer {
    /// Wrap a teardown closure
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A disposer with nothing to tear down
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    /// Combine several disposers into one that disposes them in order.
    pub fn merge(disposers: impl IntoIterator<Item = Disposer>) -> Self {
        let disposers: Vec<Disposer> = disposers.into_iter().collect();
        Self::new(move || {
            for disposer in disposers {
                disposer.dispose();
            }
        })
    }

    /// Run the teardown now.
    pub fn dispose(mut self) {
        self.run();
    }

    /// Give up the teardown without running it.
    ///
    /// Whatever this disposer guarded stays registered for the rest of the
    /// process. For the shared pointer listeners this means they are never
    /// detached.
    pub fn leak(mut self) {
        if let Some(teardown) = self.teardown.take() {
            std::mem::forget(teardown);
        }
    }

    fn run(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("pending", &self.teardown.is_some())
            .finish()
    }
}
