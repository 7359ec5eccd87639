use super::engine::Slideshow;

/// Exclusive owner of at most one mounted slideshow engine.
///
/// The engine is torn down before a replacement is installed, on `release`,
/// and when the handle itself is dropped. Each engine is destroyed exactly
/// once; teardown errors are logged and swallowed.
#[derive(Debug)]
pub struct EngineHandle<E: Slideshow> {
    engine: Option<E>,
}

impl<E: Slideshow> Default for EngineHandle<E> {
    fn default() -> Self {
        Self { engine: None }
    }
}

impl<E: Slideshow> EngineHandle<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn get(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Tear down the current engine (if any), then take ownership of `engine`
    pub fn replace(&mut self, engine: E) {
        self.teardown();
        self.engine = Some(engine);
    }

    /// Tear down the current engine and go back to unmounted
    pub fn release(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            if let Err(e) = engine.destroy() {
                tracing::warn!("Error while destroying carousel engine: {}", e);
            }
        }
    }
}

impl<E: Slideshow> Drop for EngineHandle<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
