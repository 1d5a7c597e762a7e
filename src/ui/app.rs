use anyhow::Result;

use crate::models::{PlanInput, RecordRef};
use crate::projection::{project, summarize, Projection, ProjectionSummary};
use crate::ui::form::{self, PlanRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Plan,
    Events,
    Monthly,
    Yearly,
    Charts,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Plan,
            Self::Events,
            Self::Monthly,
            Self::Yearly,
            Self::Charts,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plan => write!(f, "Plan"),
            Self::Events => write!(f, "Events"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
            Self::Charts => write!(f, "Charts"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    Delete { record: RecordRef, label: String },
    ClearEvents,
    Reset,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Session state: the plan being edited and its last accepted projection
    pub(crate) plan: PlanInput,
    pub(crate) projection: Projection,
    pub(crate) summary: ProjectionSummary,
    initial_plan: PlanInput,

    // Plan
    pub(crate) plan_index: usize,
    pub(crate) plan_scroll: usize,
    pub(crate) editing_row: Option<PlanRow>,

    // Events
    pub(crate) event_index: usize,
    pub(crate) event_scroll: usize,

    // Monthly
    pub(crate) ledger_index: usize,
    pub(crate) ledger_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    /// Fails when the starting plan itself does not project.
    pub(crate) fn new(plan: PlanInput) -> Result<Self> {
        let projection = project(&plan)?;
        let summary = summarize(&projection)?;

        Ok(Self {
            running: true,
            screen: Screen::Plan,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            initial_plan: plan.clone(),
            plan,
            projection,
            summary,

            plan_index: 0,
            plan_scroll: 0,
            editing_row: None,

            event_index: 0,
            event_scroll: 0,

            ledger_index: 0,
            ledger_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        })
    }

    /// Applies an edit to a copy of the plan and keeps it only if the copy validates and projects.
    ///
    /// On rejection the previous plan and projection stay in place and the error goes to the
    /// status bar. Returns whether the edit was accepted.
    pub(crate) fn apply<F>(&mut self, what: &str, edit: F) -> bool
    where
        F: FnOnce(&mut PlanInput) -> std::result::Result<(), crate::error::ValidationError>,
    {
        let mut candidate = self.plan.clone();
        let outcome = edit(&mut candidate)
            .map_err(crate::error::PlanError::from)
            .and_then(|()| project(&candidate))
            .and_then(|projection| Ok((summarize(&projection)?, projection)));

        match outcome {
            Ok((summary, projection)) => {
                self.plan = candidate;
                self.projection = projection;
                self.summary = summary;
                self.clamp_cursors();
                tracing::debug!(
                    edit = what,
                    projected_savings = %self.summary.projected_savings,
                    "plan updated"
                );
                true
            }
            Err(e) => {
                tracing::warn!(edit = what, error = %e, "edit rejected");
                self.set_status(e.to_string());
                false
            }
        }
    }

    /// Back to the plan the session started with.
    pub(crate) fn reset(&mut self) -> bool {
        let initial = self.initial_plan.clone();
        self.apply("reset", move |plan| {
            *plan = initial;
            Ok(())
        })
    }

    pub(crate) fn plan_rows(&self) -> Vec<PlanRow> {
        form::rows(&self.plan)
    }

    pub(crate) fn selected_row(&self) -> Option<PlanRow> {
        self.plan_rows().get(self.plan_index).copied()
    }

    /// Record under the cursor on whichever screen lists records.
    pub(crate) fn selected_record(&self) -> Option<RecordRef> {
        match self.screen {
            Screen::Plan => match self.selected_row()? {
                PlanRow::Record(record) => Some(record),
                _ => None,
            },
            Screen::Events if self.event_index < self.plan.child_events.len() => {
                Some(RecordRef::ChildEvent(self.event_index))
            }
            _ => None,
        }
    }

    pub(crate) fn record_label(&self, record: RecordRef) -> String {
        PlanRow::Record(record).label(&self.plan)
    }

    /// Opens the inline editor on the selected Plan row.
    pub(crate) fn begin_edit(&mut self) {
        if let Some(row) = self.selected_row() {
            self.command_input = row.edit_text(&self.plan);
            self.editing_row = Some(row);
            self.input_mode = InputMode::Editing;
        }
    }

    pub(crate) fn commit_edit(&mut self) {
        let text = std::mem::take(&mut self.command_input);
        self.input_mode = InputMode::Normal;
        if let Some(row) = self.editing_row.take() {
            let label = row.label(&self.plan);
            if self.apply("edit", |plan| row.apply_text(plan, &text)) {
                self.set_status(format!("Updated {label}"));
            }
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.command_input.clear();
        self.editing_row = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    /// `+`/`-` on the selected Plan row.
    pub(crate) fn adjust_selected(&mut self, steps: i32) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let mut adjustable = true;
        let accepted = self.apply("adjust", |plan| {
            adjustable = row.adjust(plan, steps)?;
            Ok(())
        });
        if !adjustable {
            self.set_status("Press Enter to edit this field");
        } else if accepted {
            let value = row.value(&self.plan);
            self.set_status(format!("{}: {value}", row.label(&self.plan)));
        }
    }

    pub(crate) fn request_delete(&mut self, record: RecordRef) {
        let label = self.record_label(record);
        self.confirm_message = format!("Delete '{label}'?");
        self.pending_action = Some(PendingAction::Delete { record, label });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn request_confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.confirm_message = message.into();
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm(&mut self) {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::Delete { record, label } => {
                    if self.apply("delete", |plan| {
                        plan.remove(record);
                        Ok(())
                    }) {
                        self.set_status(format!("Deleted: {label}"));
                    }
                }
                PendingAction::ClearEvents => {
                    let count = self.plan.child_events.len();
                    if self.apply("clear-events", |plan| {
                        plan.child_events.clear();
                        Ok(())
                    }) {
                        self.set_status(format!("Cleared {count} one-time events"));
                    }
                }
                PendingAction::Reset => {
                    if self.reset() {
                        self.set_status("Plan reset");
                    }
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
    }

    pub(crate) fn cancel_confirm(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    /// Rows that fit in a bordered table with a header row.
    pub(crate) fn page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    fn clamp_cursors(&mut self) {
        let rows = self.plan_rows().len();
        self.plan_index = self.plan_index.min(rows.saturating_sub(1));
        self.plan_scroll = self.plan_scroll.min(self.plan_index);
        let events = self.plan.child_events.len();
        self.event_index = self.event_index.min(events.saturating_sub(1));
        self.event_scroll = self.event_scroll.min(self.event_index);
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
