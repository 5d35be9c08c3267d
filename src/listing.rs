// Listing form component: owns the draft, applies field edits and posts
// the draft on submit. Failures are logged and swallowed; the caller only
// learns about success through the completion callback (or the returned
// outcome).

use crate::api::{ListingApi, ListingPayload};
use crate::draft::{DraftError, FieldChange, FileSelection, ListingDraft};

/// A form submission. Tracks whether the default action was suppressed.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend answered with JSON and the callback (if any) ran.
    Completed,
    /// The request or JSON parsing failed; the error was logged.
    Failed,
}

pub struct ListingForm<A> {
    api: A,
    values: ListingDraft,
    on_listing_completed: Option<Box<dyn FnMut()>>,
}

impl<A: ListingApi> ListingForm<A> {
    /// New form with an empty draft.
    pub fn new(api: A) -> Self {
        ListingForm {
            api,
            values: ListingDraft::default(),
            on_listing_completed: None,
        }
    }

    /// Called with no arguments after each submission the backend answers
    /// with JSON.
    pub fn on_listing_completed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_listing_completed = Some(Box::new(callback));
        self
    }

    pub fn values(&self) -> &ListingDraft {
        &self.values
    }

    pub fn set_values(&mut self, values: ListingDraft) {
        self.values = values;
    }

    pub fn on_change(&mut self, change: FieldChange) {
        tracing::debug!(field = change.field.as_str(), "listing field changed");
        let next = self.values.with_text(change.field, change.value);
        self.set_values(next);
    }

    /// Keeps the first selected file. An empty selection leaves the draft
    /// as it was.
    pub fn on_image_change(&mut self, selection: &FileSelection) -> Result<(), DraftError> {
        let image = selection.first()?;
        tracing::debug!(file = %image.file_name, "listing image selected");
        let next = self.values.with_image(image);
        self.set_values(next);
        Ok(())
    }

    /// Post the current draft. The draft is not reset afterwards.
    pub fn on_submit(&mut self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();
        let payload = ListingPayload::from(&self.values);

        match self.api.create_item(&payload) {
            Ok(data) => {
                tracing::info!(response = %data, "POST success");
                if let Some(callback) = self.on_listing_completed.as_mut() {
                    callback();
                }
                SubmitOutcome::Completed
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "POST error");
                SubmitOutcome::Failed
            }
        }
    }
}
