//! Registration flow: one wizard, its form data and its error markers.
//!
//! A [`RegistrationForm`] is what sits behind one registration surface.
//! Field edits go into the form data, navigation goes through the wizard,
//! and submission validates the visible step, converts the form into a
//! record and saves it through the repository. With a [`DraftStore`]
//! attached, entered values can be kept across sessions until a save
//! succeeds.

mod draft;

pub use draft::DraftStore;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::present::{fill_from_click, Notice};
use crate::record::{
    deceased_fields, living_fields, DeceasedDonorRecord, DonorRecord, FormData,
    LivingDonorRecord, RecordId, RecordKind,
};
use crate::repository::DonorRepository;
use crate::validation::ErrorMarkers;
use crate::wizard::{Advance, Wizard, WizardView};

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was saved; the form has been reset.
    Saved {
        /// Identity assigned by the store.
        id: RecordId,
        /// Success notice for the user.
        notice: Notice,
    },
    /// The final step is not visible yet; nothing was done.
    NotReady {
        /// Step currently visible.
        step: usize,
    },
    /// A field on the visible step failed validation; see the markers.
    Invalid {
        /// Step holding the failing fields.
        step: usize,
    },
    /// The form could not be turned into a record.
    Rejected {
        /// Explanation for the user.
        notice: Notice,
    },
    /// A save is already outstanding; nothing was done.
    Busy,
    /// The store refused the record; the form is intact for a retry.
    Failed {
        /// Retry-eligible notice for the user.
        notice: Notice,
    },
}

impl SubmitOutcome {
    /// Check whether the record was saved.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// State behind one registration surface.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    wizard: Wizard,
    form: FormData,
    markers: ErrorMarkers,
    drafts: Option<DraftStore>,
}

impl RegistrationForm {
    /// An empty form for the given kind of donor.
    #[must_use]
    pub fn new(kind: RecordKind) -> Self {
        Self {
            wizard: Wizard::for_kind(kind),
            form: FormData::new(),
            markers: ErrorMarkers::new(),
            drafts: None,
        }
    }

    /// A form pre-filled with `form`, positioned at step 1.
    #[must_use]
    pub fn with_data(kind: RecordKind, form: FormData) -> Self {
        Self {
            form,
            ..Self::new(kind)
        }
    }

    /// Keep drafts of this form in `drafts`.
    #[must_use]
    pub fn with_drafts(mut self, drafts: DraftStore) -> Self {
        self.drafts = Some(drafts);
        self
    }

    /// Kind of record this form registers.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.wizard.schema().kind
    }

    /// The wizard.
    #[must_use]
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// What the form surface should show.
    #[must_use]
    pub fn view(&self) -> WizardView {
        self.wizard.view()
    }

    /// Current form values.
    #[must_use]
    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Mutable form values, for field edits.
    pub fn form_mut(&mut self) -> &mut FormData {
        &mut self.form
    }

    /// Inline error markers currently shown.
    #[must_use]
    pub fn markers(&self) -> &ErrorMarkers {
        &self.markers
    }

    /// Go to the next step if the visible one validates.
    pub fn advance(&mut self) -> Advance {
        self.wizard.advance(&self.form, &mut self.markers)
    }

    /// Go back one step.
    pub fn previous(&mut self) {
        self.wizard.retreat();
    }

    /// Write a map click into this form's coordinates field.
    pub fn click_map(&mut self, lat: f64, lng: f64) -> bool {
        let field = match self.kind() {
            RecordKind::Living => living_fields::COORDINATES,
            RecordKind::Deceased => deceased_fields::COORDINATES,
        };
        fill_from_click(&mut self.form, field, lat, lng)
    }

    /// Store the current values as this kind's draft.
    ///
    /// Returns `false` without writing when no draft store is attached or
    /// the form is empty, so an empty session never erases a saved draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft cannot be written.
    pub async fn save_draft(&self) -> Result<bool> {
        let Some(drafts) = &self.drafts else {
            return Ok(false);
        };
        if self.form.is_empty() {
            return Ok(false);
        }
        drafts.save(self.kind(), &self.form).await?;
        Ok(true)
    }

    /// Replace the form values with this kind's saved draft.
    ///
    /// Returns `false`, leaving the form alone, when there is no draft store
    /// or no draft.
    ///
    /// # Errors
    ///
    /// Returns an error if a draft exists but cannot be read.
    pub async fn load_draft(&mut self) -> Result<bool> {
        let Some(drafts) = &self.drafts else {
            return Ok(false);
        };
        let Some(form) = drafts.load(self.kind()).await? else {
            return Ok(false);
        };
        self.form = form;
        info!(kind = %self.kind(), "Resumed saved draft");
        Ok(true)
    }

    /// Delete this kind's saved draft, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing draft cannot be removed.
    pub async fn clear_draft(&self) -> Result<()> {
        match &self.drafts {
            Some(drafts) => drafts.clear(self.kind()).await,
            None => Ok(()),
        }
    }

    /// Advance through every step, then submit.
    ///
    /// Stops at the first step that fails validation.
    pub async fn complete(&mut self, repo: &mut DonorRepository) -> SubmitOutcome {
        loop {
            match self.advance() {
                Advance::Moved => {}
                Advance::AtEnd => break,
                Advance::Blocked => {
                    return SubmitOutcome::Invalid {
                        step: self.wizard.current_step(),
                    }
                }
            }
        }
        self.submit(repo).await
    }

    /// Submit the form from its final step.
    ///
    /// The submit control is held busy while the visible step is checked,
    /// the record is built and the store is asked to save it.
    pub async fn submit(&mut self, repo: &mut DonorRepository) -> SubmitOutcome {
        let kind = self.kind();

        if !self.wizard.is_final_step() {
            return SubmitOutcome::NotReady {
                step: self.wizard.current_step(),
            };
        }
        if !self.wizard.begin_submit() {
            return SubmitOutcome::Busy;
        }

        if !self.wizard.validate_current(&self.form, &mut self.markers) {
            self.wizard.finish_submit(false);
            return SubmitOutcome::Invalid {
                step: self.wizard.current_step(),
            };
        }

        let record = match self.build_record() {
            Ok(record) => record,
            Err(e) => {
                self.wizard.finish_submit(false);
                warn!(%kind, "Form rejected: {e}");
                return SubmitOutcome::Rejected {
                    notice: Notice::from_error(&e),
                };
            }
        };

        match repo.save(record).await {
            Ok(id) => {
                self.wizard.finish_submit(true);
                self.form.clear();
                self.markers.clear_all();
                if let Err(e) = self.clear_draft().await {
                    warn!(%kind, "Saved draft not removed: {e}");
                }
                info!(%kind, %id, "Registration complete");
                SubmitOutcome::Saved {
                    id,
                    notice: Notice::saved(kind),
                }
            }
            Err(e) => {
                self.wizard.finish_submit(false);
                warn!(%kind, "Registration not saved: {e}");
                SubmitOutcome::Failed {
                    notice: Notice::save_failed(kind),
                }
            }
        }
    }

    fn build_record(&self) -> Result<DonorRecord> {
        let now = Utc::now();
        Ok(match self.kind() {
            RecordKind::Living => LivingDonorRecord::from_form(&self.form, now)?.into(),
            RecordKind::Deceased => DeceasedDonorRecord::from_form(&self.form, now)?.into(),
        })
    }
}
