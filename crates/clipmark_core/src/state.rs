use crate::view_model::ContextViewModel;

/// Per-context state: the in-memory document plus the two reentrancy flags
/// and the debounce bookkeeping.
///
/// The flags are deliberately split: a save in flight must not suppress an
/// unrelated load request, only the reload triggered by its own store echo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextState {
    document: String,
    notification: Option<String>,
    load_in_flight: bool,
    save_in_flight: bool,
    debounce_generation: u64,
    pending_edit: Option<String>,
    dirty: bool,
}

impl ContextState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ContextViewModel {
        ContextViewModel {
            document: self.document.clone(),
            notification: self.notification.clone(),
            busy: self.load_in_flight || self.save_in_flight,
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag, for render coalescing.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub(crate) fn set_document(&mut self, value: impl Into<String>) {
        self.document = value.into();
        self.dirty = true;
    }

    pub(crate) fn set_notification(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.dirty = true;
    }

    pub(crate) fn clear_notification(&mut self) {
        if self.notification.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn load_in_flight(&self) -> bool {
        self.load_in_flight
    }

    pub(crate) fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    pub(crate) fn begin_load(&mut self) {
        self.load_in_flight = true;
    }

    pub(crate) fn finish_load(&mut self) {
        self.load_in_flight = false;
    }

    pub(crate) fn begin_save(&mut self) {
        self.save_in_flight = true;
    }

    pub(crate) fn finish_save(&mut self) {
        self.save_in_flight = false;
    }

    /// Records a local edit and returns the debounce generation to arm.
    /// Re-arming bumps the generation, which invalidates earlier timers.
    pub(crate) fn record_edit(&mut self, value: String) -> u64 {
        self.document = value.clone();
        self.pending_edit = Some(value);
        self.debounce_generation += 1;
        self.dirty = true;
        self.debounce_generation
    }

    /// Takes the pending edit if `generation` is still current.
    pub(crate) fn take_pending_edit(&mut self, generation: u64) -> Option<String> {
        if generation != self.debounce_generation {
            return None;
        }
        self.pending_edit.take()
    }

    pub(crate) fn drop_pending_edit(&mut self) {
        self.pending_edit = None;
    }
}
