//! Saved/draft bookkeeping for edit forms.

/// A record being edited: the last value the backend accepted and the
/// working draft.
///
/// Updates never mutate the draft in place; each one produces a new value
/// that replaces it. A rejected save rolls the draft back to the saved value.
#[derive(Debug, Clone)]
pub struct EditSession<T> {
    saved: T,
    draft: T,
}

impl<T: Clone> EditSession<T> {
    pub fn new(record: T) -> Self {
        Self {
            draft: record.clone(),
            saved: record,
        }
    }

    pub fn saved(&self) -> &T {
        &self.saved
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    /// Replaces the draft with `f(draft)`.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let next = f(self.draft.clone());
        self.draft = next;
    }

    /// Like [`update`](Self::update) for fallible edits; on error the draft
    /// is left untouched.
    pub fn try_update<F, E>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let next = f(&self.draft)?;
        self.draft = next;
        Ok(())
    }

    pub fn commit(&mut self) {
        self.saved = self.draft.clone();
    }

    /// Commits `record` as returned by the backend, which may differ from
    /// the draft that was sent.
    pub fn accept(&mut self, record: T) {
        self.draft = record.clone();
        self.saved = record;
    }

    pub fn rollback(&mut self) {
        self.draft = self.saved.clone();
    }

    pub fn into_draft(self) -> T {
        self.draft
    }
}

impl<T: Clone + PartialEq> EditSession<T> {
    pub fn is_dirty(&self) -> bool {
        self.saved != self.draft
    }
}
