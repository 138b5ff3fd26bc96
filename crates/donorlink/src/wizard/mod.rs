//! Multi-step registration wizard.
//!
//! One [`Wizard`] type drives both registration forms; the step layout comes
//! from a [`FormSchema`]. The wizard only tracks which step is visible and
//! whether a submission is in flight. Form values live in
//! [`FormData`](crate::record::FormData) and are handed in on each transition.

mod schema;

pub use schema::{FormSchema, StepSchema, DECEASED, LIVING};

use tracing::debug;

use crate::record::{FormData, RecordKind};
use crate::validation::{validate_fields, FieldAnnotator};

/// Label of the submit control while a save is outstanding.
pub const SUBMIT_BUSY_LABEL: &str = "Saving...";

/// Result of asking the wizard to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next step is now visible.
    Moved,
    /// A required field on the current step failed validation.
    Blocked,
    /// Already on the final step; nothing changed.
    AtEnd,
}

/// State of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    /// Ready to submit.
    #[default]
    Idle,
    /// A save is outstanding; further submits are refused.
    Busy,
}

/// The control that moves the form forward from the visible step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardControl {
    /// "Next": any step before the last.
    Next,
    /// "Submit": the final step.
    Submit,
}

/// Progress indicator state of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Before the visible step.
    Completed,
    /// The visible step.
    Active,
    /// After the visible step.
    Pending,
}

/// What the form surface should show for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardView {
    /// The single visible step, 1-based.
    pub visible_step: usize,
    /// Total number of steps.
    pub total_steps: usize,
    /// Whether the "previous" control is shown.
    pub show_previous: bool,
    /// Which forward control is shown.
    pub forward: ForwardControl,
    /// Whether the submit control accepts a click.
    pub submit_enabled: bool,
    /// Text on the submit control.
    pub submit_label: &'static str,
}

impl WizardView {
    /// Whether the "next" control is shown.
    #[must_use]
    pub fn shows_next(&self) -> bool {
        self.forward == ForwardControl::Next
    }

    /// Whether the "submit" control is shown.
    #[must_use]
    pub fn shows_submit(&self) -> bool {
        self.forward == ForwardControl::Submit
    }

    /// Indicator state of a 1-based step.
    #[must_use]
    pub fn step_status(&self, step: usize) -> StepStatus {
        match step.cmp(&self.visible_step) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    /// Indicator state of every step, in step order.
    #[must_use]
    pub fn step_states(&self) -> Vec<StepStatus> {
        (1..=self.total_steps).map(|n| self.step_status(n)).collect()
    }
}

/// A registration wizard over one form schema.
#[derive(Debug, Clone)]
pub struct Wizard {
    schema: &'static FormSchema,
    current_step: usize,
    submit: SubmitState,
}

impl Wizard {
    /// Create a wizard positioned at step 1.
    #[must_use]
    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            current_step: 1,
            submit: SubmitState::Idle,
        }
    }

    /// Create the wizard for the given record kind.
    #[must_use]
    pub fn for_kind(kind: RecordKind) -> Self {
        Self::new(FormSchema::for_kind(kind))
    }

    /// The schema driving this wizard.
    #[must_use]
    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    /// Current 1-based step.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Total number of steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.schema.total_steps()
    }

    /// Check whether the final step is visible.
    #[must_use]
    pub fn is_final_step(&self) -> bool {
        self.current_step >= self.total_steps()
    }

    /// Current state of the submit control.
    #[must_use]
    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    /// Validate the required fields of the visible step.
    pub fn validate_current<A>(&self, form: &FormData, annotator: &mut A) -> bool
    where
        A: FieldAnnotator + ?Sized,
    {
        match self.schema.step(self.current_step) {
            Some(step) => validate_fields(step.fields, form, annotator),
            None => true,
        }
    }

    /// Move to the next step if the visible step validates.
    pub fn advance<A>(&mut self, form: &FormData, annotator: &mut A) -> Advance
    where
        A: FieldAnnotator + ?Sized,
    {
        if !self.validate_current(form, annotator) {
            debug!(kind = %self.schema.kind, step = self.current_step, "Step blocked by validation");
            return Advance::Blocked;
        }
        if self.is_final_step() {
            return Advance::AtEnd;
        }
        self.current_step += 1;
        debug!(kind = %self.schema.kind, step = self.current_step, "Advanced");
        Advance::Moved
    }

    /// Move to the previous step; no validation, clamped to step 1.
    pub fn retreat(&mut self) {
        if self.current_step > 1 {
            self.current_step -= 1;
            debug!(kind = %self.schema.kind, step = self.current_step, "Retreated");
        }
    }

    /// Return to step 1 with an idle submit control.
    pub fn reset(&mut self) {
        self.current_step = 1;
        self.submit = SubmitState::Idle;
    }

    /// Mark the submit control busy.
    ///
    /// Returns `false` without changing anything if a save is already
    /// outstanding or the final step is not visible.
    pub fn begin_submit(&mut self) -> bool {
        if self.submit == SubmitState::Busy || !self.is_final_step() {
            return false;
        }
        self.submit = SubmitState::Busy;
        true
    }

    /// Restore the submit control after a save attempt.
    ///
    /// A successful save also resets the wizard to step 1.
    pub fn finish_submit(&mut self, saved: bool) {
        self.submit = SubmitState::Idle;
        if saved {
            self.reset();
        }
    }

    /// What the form surface should show.
    #[must_use]
    pub fn view(&self) -> WizardView {
        let is_final = self.is_final_step();
        let busy = self.submit == SubmitState::Busy;
        WizardView {
            visible_step: self.current_step,
            total_steps: self.total_steps(),
            show_previous: self.current_step > 1,
            forward: if is_final {
                ForwardControl::Submit
            } else {
                ForwardControl::Next
            },
            submit_enabled: !busy,
            submit_label: if busy {
                SUBMIT_BUSY_LABEL
            } else {
                self.schema.submit_label
            },
        }
    }
}
