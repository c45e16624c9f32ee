//! View model for the task client.
//!
//! The view is either in create mode or in edit mode, selected solely by
//! whether an edit target is set. All state changes go through [`reduce`],
//! a pure function of `(state, action)`. Which network request an action
//! triggers is decided by [`request_for`], also pure; the controller only
//! executes requests and feeds their outcomes back in as actions.

use crate::domain::{Task, TaskDraft, TaskId};

/// Label of the submit control in create mode.
pub const CREATE_LABEL: &str = "Add task";
/// Label of the submit control in edit mode.
pub const EDIT_LABEL: &str = "Save changes";

// =============================================================================
// State
// =============================================================================

/// Form mode derived from the edit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(TaskId),
}

/// Complete client view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Last fetched task collection, in server order.
    pub tasks: Vec<Task>,
    /// In-progress title text.
    pub title: String,
    /// In-progress description text.
    pub description: String,
    /// Task being edited; `None` in create mode.
    pub editing: Option<TaskId>,
    /// Whether the task list is shown.
    pub list_visible: bool,
    /// Whether a list fetch is outstanding.
    pub loading: bool,
}

impl ViewState {
    /// Creates an empty state with the list initially shown or hidden.
    #[must_use]
    pub fn new(list_visible: bool) -> Self {
        Self {
            list_visible,
            ..Self::default()
        }
    }

    /// Returns the current form mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self.editing {
            Some(id) => Mode::Edit(id),
            None => Mode::Create,
        }
    }

    /// Returns the submit label for the current mode.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.mode() {
            Mode::Create => CREATE_LABEL,
            Mode::Edit(_) => EDIT_LABEL,
        }
    }

    /// Returns `true` if the form satisfies the required-title rule.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Returns the form contents as a draft.
    #[must_use]
    pub fn draft(&self) -> TaskDraft {
        TaskDraft::new(self.title.clone(), Some(self.description.clone()))
    }

    /// Finds a displayed task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}

// =============================================================================
// Actions and Requests
// =============================================================================

/// Everything that can happen to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // User intents
    TitleChanged(String),
    DescriptionChanged(String),
    StartEdit(Task),
    CancelEdit,
    Submit,
    Delete(TaskId),
    ShowList,
    HideList,
    Refresh,

    // Request outcomes
    TasksLoaded(Vec<Task>),
    LoadFailed,
    Saved,
    SaveFailed,
    Deleted(TaskId),
    DeleteFailed,
}

/// A network request the controller must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(TaskDraft),
    Update(TaskId, TaskDraft),
    Delete(TaskId),
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies an action to the state.
///
/// Failure outcomes leave displayed data untouched; only the loading flag
/// is cleared.
#[must_use]
pub fn reduce(state: ViewState, action: Action) -> ViewState {
    match action {
        Action::TitleChanged(title) => ViewState { title, ..state },
        Action::DescriptionChanged(description) => ViewState {
            description,
            ..state
        },
        Action::StartEdit(task) => ViewState {
            title: task.title,
            description: task.description.unwrap_or_default(),
            editing: Some(task.id),
            ..state
        },
        Action::CancelEdit | Action::Saved => ViewState {
            title: String::new(),
            description: String::new(),
            editing: None,
            ..state
        },
        Action::ShowList => ViewState {
            loading: state.loading || !state.list_visible,
            list_visible: true,
            ..state
        },
        Action::HideList => ViewState {
            list_visible: false,
            ..state
        },
        Action::Refresh => ViewState {
            loading: true,
            ..state
        },
        Action::TasksLoaded(tasks) => ViewState {
            tasks,
            loading: false,
            ..state
        },
        Action::LoadFailed => ViewState {
            loading: false,
            ..state
        },
        Action::Deleted(id) => {
            let mut tasks = state.tasks;
            tasks.retain(|task| task.id != id);
            if state.editing == Some(id) {
                ViewState {
                    tasks,
                    title: String::new(),
                    description: String::new(),
                    editing: None,
                    ..state
                }
            } else {
                ViewState { tasks, ..state }
            }
        }
        Action::Submit | Action::Delete(_) | Action::SaveFailed | Action::DeleteFailed => state,
    }
}

/// Returns the request an action triggers, judged against the state
/// *before* the action is applied.
#[must_use]
pub fn request_for(state: &ViewState, action: &Action) -> Option<Request> {
    match action {
        Action::Submit if state.can_submit() => Some(match state.editing {
            Some(id) => Request::Update(id, state.draft()),
            None => Request::Create(state.draft()),
        }),
        Action::ShowList if !state.list_visible => Some(Request::List),
        Action::Refresh => Some(Request::List),
        Action::Saved | Action::Deleted(_) if state.list_visible => Some(Request::List),
        Action::Delete(id) => Some(Request::Delete(*id)),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn task(id: i64, title: &str, description: Option<&str>) -> Task {
        Task::new(TaskId::new(id), title, description.map(str::to_string))
    }

    fn filled(title: &str, description: &str) -> ViewState {
        let state = reduce(ViewState::new(true), Action::TitleChanged(title.to_string()));
        reduce(state, Action::DescriptionChanged(description.to_string()))
    }

    #[rstest]
    fn test_new_state_is_create_mode() {
        let state = ViewState::new(true);

        assert_eq!(state.mode(), Mode::Create);
        assert_eq!(state.submit_label(), CREATE_LABEL);
        assert!(state.tasks.is_empty());
    }

    #[rstest]
    fn test_start_edit_copies_fields_and_switches_mode() {
        let state = reduce(
            ViewState::new(true),
            Action::StartEdit(task(4, "Buy milk", Some("2%"))),
        );

        assert_eq!(state.title, "Buy milk");
        assert_eq!(state.description, "2%");
        assert_eq!(state.mode(), Mode::Edit(TaskId::new(4)));
        assert_eq!(state.submit_label(), EDIT_LABEL);
    }

    #[rstest]
    fn test_start_edit_without_description_clears_field() {
        let state = filled("x", "stale");
        let state = reduce(state, Action::StartEdit(task(1, "A", None)));
        assert_eq!(state.description, "");
    }

    #[rstest]
    fn test_cancel_edit_returns_to_create_mode_without_request() {
        let state = reduce(ViewState::new(true), Action::StartEdit(task(4, "A", None)));

        assert_eq!(request_for(&state, &Action::CancelEdit), None);
        let state = reduce(state, Action::CancelEdit);

        assert_eq!(state.mode(), Mode::Create);
        assert_eq!(state.title, "");
    }

    #[rstest]
    fn test_submit_in_create_mode_requests_create() {
        let state = filled("Buy milk", "2%");

        let request = request_for(&state, &Action::Submit);

        assert_eq!(
            request,
            Some(Request::Create(TaskDraft::new(
                "Buy milk",
                Some("2%".to_string())
            )))
        );
    }

    #[rstest]
    fn test_submit_in_edit_mode_requests_update() {
        let state = reduce(ViewState::new(true), Action::StartEdit(task(9, "Old", None)));
        let state = reduce(state, Action::TitleChanged("New".to_string()));

        let request = request_for(&state, &Action::Submit);

        assert_eq!(
            request,
            Some(Request::Update(
                TaskId::new(9),
                TaskDraft::new("New", Some(String::new()))
            ))
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_submit_with_blank_title_issues_nothing(#[case] title: &str) {
        let state = filled(title, "description");
        assert_eq!(request_for(&state, &Action::Submit), None);
    }

    #[rstest]
    fn test_submit_does_not_clear_form_until_saved() {
        let state = filled("A", "B");
        let after_submit = reduce(state.clone(), Action::Submit);
        assert_eq!(after_submit, state);

        let after_save = reduce(after_submit, Action::Saved);
        assert_eq!(after_save.title, "");
        assert_eq!(after_save.description, "");
        assert!(after_save.editing.is_none());
    }

    #[rstest]
    #[case(true, Some(Request::List))]
    #[case(false, None)]
    fn test_saved_refreshes_only_visible_list(
        #[case] visible: bool,
        #[case] expected: Option<Request>,
    ) {
        let state = ViewState::new(visible);
        assert_eq!(request_for(&state, &Action::Saved), expected);
        assert_eq!(
            request_for(&state, &Action::Deleted(TaskId::new(1))),
            expected
        );
    }

    #[rstest]
    fn test_show_list_fetches_only_on_transition() {
        let hidden = ViewState::new(false);
        assert_eq!(request_for(&hidden, &Action::ShowList), Some(Request::List));

        let shown = reduce(hidden, Action::ShowList);
        assert!(shown.list_visible);
        assert!(shown.loading);
        assert_eq!(request_for(&shown, &Action::ShowList), None);
    }

    #[rstest]
    fn test_tasks_loaded_replaces_collection_wholesale() {
        let state = reduce(
            ViewState::new(true),
            Action::TasksLoaded(vec![task(2, "B", None), task(1, "A", None)]),
        );
        let state = reduce(state, Action::Refresh);
        assert!(state.loading);

        let state = reduce(state, Action::TasksLoaded(vec![task(3, "C", None)]));

        assert!(!state.loading);
        assert_eq!(state.tasks, vec![task(3, "C", None)]);
    }

    #[rstest]
    fn test_failures_keep_displayed_state() {
        let loaded = reduce(
            ViewState::new(true),
            Action::TasksLoaded(vec![task(1, "A", None)]),
        );
        let loaded = reduce(loaded, Action::TitleChanged("draft".to_string()));
        let loading = reduce(loaded.clone(), Action::Refresh);

        let after_load_failure = reduce(loading, Action::LoadFailed);
        assert_eq!(after_load_failure, loaded);
        assert_eq!(reduce(loaded.clone(), Action::SaveFailed), loaded);
        assert_eq!(reduce(loaded.clone(), Action::DeleteFailed), loaded);
    }

    #[rstest]
    fn test_deleting_edited_task_returns_to_create_mode() {
        let target = task(1, "A", Some("a"));
        let state = reduce(
            ViewState::new(true),
            Action::TasksLoaded(vec![task(2, "B", None), target.clone()]),
        );
        let state = reduce(state, Action::StartEdit(target.clone()));

        let state = reduce(state, Action::Deleted(target.id));

        assert_eq!(state.mode(), Mode::Create);
        assert_eq!(state.title, "");
        assert_eq!(state.description, "");
        assert_eq!(state.tasks, vec![task(2, "B", None)]);

        let state = reduce(state, Action::TitleChanged("B2".to_string()));
        assert_eq!(
            request_for(&state, &Action::Submit),
            Some(Request::Create(TaskDraft::new("B2", Some(String::new()))))
        );
    }

    #[rstest]
    fn test_deleting_other_task_keeps_edit_target() {
        let edited = task(2, "B", None);
        let state = reduce(
            ViewState::new(true),
            Action::TasksLoaded(vec![edited.clone(), task(1, "A", None)]),
        );
        let state = reduce(state, Action::StartEdit(edited.clone()));

        let state = reduce(state, Action::Deleted(TaskId::new(1)));

        assert_eq!(state.mode(), Mode::Edit(edited.id));
        assert_eq!(state.title, "B");
        assert_eq!(state.tasks, vec![edited]);
    }

    #[rstest]
    fn test_delete_requests_delete_without_state_change() {
        let state = ViewState::new(true);
        assert_eq!(
            request_for(&state, &Action::Delete(TaskId::new(5))),
            Some(Request::Delete(TaskId::new(5)))
        );
        assert_eq!(reduce(state.clone(), Action::Delete(TaskId::new(5))), state);
    }

    proptest! {
        #[test]
        fn prop_mode_tracks_edit_target(id in 1_i64..1000, title in "[a-z]{1,8}") {
            let state = reduce(
                ViewState::new(true),
                Action::StartEdit(Task::new(TaskId::new(id), title, None)),
            );
            prop_assert_eq!(state.mode(), Mode::Edit(TaskId::new(id)));

            let state = reduce(state, Action::Saved);
            prop_assert_eq!(state.mode(), Mode::Create);
        }

        #[test]
        fn prop_text_edits_never_issue_requests(text in ".{0,16}") {
            let state = ViewState::new(true);
            prop_assert_eq!(request_for(&state, &Action::TitleChanged(text.clone())), None);
            prop_assert_eq!(request_for(&state, &Action::DescriptionChanged(text)), None);
        }
    }
}
