//! Editor session driving the create and edit task flows.
//!
//! A [`TaskEditor`] owns one modal's worth of state: the form, the
//! selection store, the loaded catalog, and the load-time snapshot.
//! It talks to the outside world only through the port trait objects
//! in its [`ServiceContext`], so the same session logic runs against
//! live, recording, or replaying adapters.

use tracing::debug;

use crate::catalog::Catalog;
use crate::changes::has_changes;
use crate::context::ServiceContext;
use crate::error::EditorError;
use crate::form::{FormSnapshot, TaskForm};
use crate::payload::build_payload;
use crate::ports::{NoticeLevel, SavedTask};
use crate::selection::{SelectionEntry, SelectionStore};
use crate::validate::{validate, Field, FieldError, ValidationPolicy, ValidationResult};

/// One category/option pair already attached to a task being edited.
///
/// Links are hydrated into the selection store once the catalog
/// arrives; pairs that no longer exist in the catalog are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLink {
    /// The linked category.
    pub category_id: String,
    /// The linked option, or `None` when the link was saved cleared.
    pub option_id: Option<String>,
}

/// What a submit attempt resolved to when no port failed.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was written.
    Invalid(ValidationResult),
    /// Edit flow with no changes since load; nothing was written.
    Unchanged,
    /// The task and its selections were saved.
    Saved(SavedTask),
}

/// Catalog lifecycle within one editor session.
enum CatalogState {
    /// No load has completed yet.
    Pending,
    /// A load succeeded; selections are checked against this catalog.
    Ready(Catalog),
    /// The last load failed; submits report a category error.
    Failed,
}

/// A create or edit session over one task.
pub struct TaskEditor {
    context: ServiceContext,
    policy: ValidationPolicy,
    project_id: String,
    task_id: Option<String>,
    form: TaskForm,
    store: SelectionStore,
    catalog: CatalogState,
    snapshot: Option<FormSnapshot>,
    original_selections: Vec<SelectionEntry>,
    existing_links: Vec<TaskLink>,
    generation: u64,
    open: bool,
}

impl TaskEditor {
    /// Starts a create session with an empty form.
    #[must_use]
    pub fn create(
        context: ServiceContext,
        policy: ValidationPolicy,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            context,
            policy,
            project_id: project_id.into(),
            task_id: None,
            form: TaskForm::default(),
            store: SelectionStore::new(),
            catalog: CatalogState::Pending,
            snapshot: None,
            original_selections: Vec::new(),
            existing_links: Vec::new(),
            generation: 0,
            open: true,
        }
    }

    /// Starts an edit session over an existing task.
    ///
    /// The snapshot for change detection is taken from `form` here, at
    /// load time. `links` are the task's saved category links; they
    /// hydrate the selection store once the catalog arrives.
    #[must_use]
    pub fn edit(
        context: ServiceContext,
        policy: ValidationPolicy,
        project_id: impl Into<String>,
        task_id: impl Into<String>,
        form: TaskForm,
        links: Vec<TaskLink>,
    ) -> Self {
        let snapshot = Some(form.snapshot());
        Self {
            context,
            policy,
            project_id: project_id.into(),
            task_id: Some(task_id.into()),
            form,
            store: SelectionStore::new(),
            catalog: CatalogState::Pending,
            snapshot,
            original_selections: Vec::new(),
            existing_links: links,
            generation: 0,
            open: true,
        }
    }

    /// Loads the catalog and applies it in one step.
    ///
    /// Equivalent to minting a token, awaiting the category directory,
    /// and calling [`TaskEditor::apply_catalog`]. Hosts that race loads
    /// against user navigation drive the two-phase form directly.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CatalogLoad`] when the directory call
    /// fails; the editor stays open with a failed catalog.
    pub async fn open(&mut self) -> Result<(), EditorError> {
        let token = self.load_token();
        let result = self.context.categories.project_options(&self.project_id).await;
        self.apply_catalog(token, result)
    }

    /// Mints the token for a catalog load.
    ///
    /// A later mint or a [`TaskEditor::close`] invalidates every token
    /// issued before it, so only the newest in-flight load can land.
    pub fn load_token(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Applies a settled catalog load, unless its token went stale.
    ///
    /// A stale token (the editor was closed, or a newer load was
    /// started) discards the result without touching any state.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CatalogLoad`] for a current-token failed
    /// load, after installing the failed state and notifying the user.
    pub fn apply_catalog(
        &mut self,
        token: u64,
        result: Result<Catalog, Box<dyn std::error::Error + Send + Sync>>,
    ) -> Result<(), EditorError> {
        if !self.open || token != self.generation {
            debug!(token, generation = self.generation, "discarding stale catalog load");
            return Ok(());
        }
        match result {
            Ok(catalog) => {
                self.store.retain_catalog(&catalog);
                self.hydrate_links(&catalog);
                if self.task_id.is_some() {
                    self.original_selections = self.store.to_selections();
                }
                debug!(categories = catalog.len(), "catalog loaded");
                self.catalog = CatalogState::Ready(catalog);
                Ok(())
            }
            Err(e) => {
                self.catalog = CatalogState::Failed;
                self.context
                    .notifier
                    .notify(NoticeLevel::Error, "Failed to load category options");
                Err(EditorError::CatalogLoad(e.to_string()))
            }
        }
    }

    fn hydrate_links(&mut self, catalog: &Catalog) {
        for link in &self.existing_links {
            match link.option_id.as_deref() {
                Some(option_id) if catalog.contains_option(&link.category_id, option_id) => {
                    self.store.set_option(link.category_id.clone(), option_id);
                }
                None if catalog.category(&link.category_id).is_some() => {
                    self.store.set_option(link.category_id.clone(), "");
                }
                _ => {
                    debug!(category_id = %link.category_id, "dropping stale category link");
                }
            }
        }
    }

    /// Validates, change-detects, and writes the task and selections.
    ///
    /// Validation failures and the unchanged edit case come back as
    /// [`SubmitOutcome`] variants with nothing written. Port failures
    /// notify the user and return [`EditorError::Submission`] with the
    /// form, store, and snapshot untouched so the submit can be
    /// retried.
    ///
    /// # Errors
    ///
    /// [`EditorError::Closed`] when the editor was closed;
    /// [`EditorError::Submission`] when a task write fails.
    pub async fn submit(&mut self, user_email: &str) -> Result<SubmitOutcome, EditorError> {
        if !self.open {
            return Err(EditorError::Closed);
        }

        let now = self.context.clock.now();
        let empty = Catalog::empty();
        let catalog = match &self.catalog {
            CatalogState::Ready(c) => c,
            _ => &empty,
        };
        let mut result = validate(
            &self.form,
            &self.store,
            catalog,
            self.policy,
            self.snapshot.as_ref(),
            now,
        );
        if !matches!(self.catalog, CatalogState::Ready(_))
            && result.message_for(Field::Category).is_none()
        {
            // An absent catalog must not read as trivially complete.
            let message = if self.policy.require_all {
                "All categories are mandatory and must be selected"
            } else {
                "At least one category option is required"
            };
            result
                .errors
                .push(FieldError { field: Field::Category, message: message.to_string() });
        }
        if !result.is_valid() {
            return Ok(SubmitOutcome::Invalid(result));
        }

        let selections = self.store.to_selections();
        if let Some(snapshot) = &self.snapshot {
            if !has_changes(snapshot, &self.form, &self.original_selections, &selections) {
                debug!("submit skipped, nothing changed");
                return Ok(SubmitOutcome::Unchanged);
            }
        }

        let payload = build_payload(&self.form, &self.store);
        let written = match &self.task_id {
            Some(task_id) => self.context.tasks.update_task(task_id, &payload).await,
            None => self.context.tasks.create_task(&payload).await,
        };
        let saved = match written {
            Ok(saved) => saved,
            Err(e) => {
                self.context.notifier.notify(NoticeLevel::Error, "Failed to save task");
                return Err(EditorError::Submission(e.to_string()));
            }
        };

        if let Err(e) =
            self.context.tasks.save_selections(&saved.id, &selections, user_email).await
        {
            self.context
                .notifier
                .notify(NoticeLevel::Error, "Failed to save task categories");
            return Err(EditorError::Submission(e.to_string()));
        }

        let message = if self.task_id.is_some() {
            "Task updated successfully"
        } else {
            "Task created successfully"
        };
        self.context.notifier.notify(NoticeLevel::Success, message);
        debug!(task_id = %saved.id, "task saved");

        self.snapshot = Some(self.form.snapshot());
        self.original_selections = selections;
        Ok(SubmitOutcome::Saved(saved))
    }

    /// Closes the session: in-flight loads are discarded on arrival
    /// and further operations fail with [`EditorError::Closed`].
    pub fn close(&mut self) {
        self.open = false;
        self.generation += 1;
        self.store.reset();
    }

    /// Upserts the chosen option for a category.
    pub fn select_option(&mut self, category_id: impl Into<String>, option_id: &str) {
        self.store.set_option(category_id, option_id);
    }

    /// The editable form fields.
    #[must_use]
    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Mutable access to the editable form fields.
    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    /// The current category selections.
    #[must_use]
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// The loaded catalog, if the last load succeeded.
    #[must_use]
    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogState::Ready(c) => Some(c),
            _ => None,
        }
    }

    /// Returns `true` until [`TaskEditor::close`] is called.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use crate::catalog::{Category, CategoryOption};
    use crate::payload::TaskPayload;
    use crate::ports::{
        CatalogFuture, CategoryDirectory, Clock, GatewayFuture, Notifier, TaskGateway,
    };

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
        }
    }

    struct StubDirectory {
        catalog: Result<Catalog, String>,
    }

    impl CategoryDirectory for StubDirectory {
        fn project_options(&self, _project_id: &str) -> CatalogFuture<'_> {
            let result = self.catalog.clone();
            Box::pin(async move { result.map_err(Into::into) })
        }
    }

    struct StubGateway {
        calls: Arc<Mutex<Vec<String>>>,
        fail: Arc<AtomicBool>,
    }

    impl TaskGateway for StubGateway {
        fn create_task(&self, _payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
            self.calls.lock().unwrap().push("create_task".to_string());
            let fail = self.fail.load(Ordering::SeqCst);
            Box::pin(async move {
                if fail {
                    Err("boom".into())
                } else {
                    Ok(SavedTask { id: "task-1".to_string() })
                }
            })
        }

        fn update_task(
            &self,
            task_id: &str,
            _payload: &TaskPayload,
        ) -> GatewayFuture<'_, SavedTask> {
            self.calls.lock().unwrap().push(format!("update_task {task_id}"));
            let fail = self.fail.load(Ordering::SeqCst);
            let id = task_id.to_string();
            Box::pin(async move { if fail { Err("boom".into()) } else { Ok(SavedTask { id }) } })
        }

        fn save_selections(
            &self,
            task_id: &str,
            selections: &[SelectionEntry],
            user_email: &str,
        ) -> GatewayFuture<'_, ()> {
            self.calls.lock().unwrap().push(format!(
                "save_selections {task_id} {} {user_email}",
                selections.len()
            ));
            let fail = self.fail.load(Ordering::SeqCst);
            Box::pin(async move { if fail { Err("boom".into()) } else { Ok(()) } })
        }
    }

    struct CollectingNotifier {
        notes: Arc<Mutex<Vec<(NoticeLevel, String)>>>,
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.notes.lock().unwrap().push((level, message.to_string()));
        }
    }

    struct Harness {
        calls: Arc<Mutex<Vec<String>>>,
        fail: Arc<AtomicBool>,
        notes: Arc<Mutex<Vec<(NoticeLevel, String)>>>,
    }

    fn context(catalog: Result<Catalog, String>) -> (ServiceContext, Harness) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fail = Arc::new(AtomicBool::new(false));
        let notes = Arc::new(Mutex::new(Vec::new()));
        let ctx = ServiceContext {
            clock: Box::new(FixedClock),
            categories: Box::new(StubDirectory { catalog }),
            tasks: Box::new(StubGateway {
                calls: Arc::clone(&calls),
                fail: Arc::clone(&fail),
            }),
            notifier: Box::new(CollectingNotifier { notes: Arc::clone(&notes) }),
        };
        (ctx, Harness { calls, fail, notes })
    }

    fn catalog_with(ids: &[&str]) -> Catalog {
        Catalog {
            categories: ids
                .iter()
                .enumerate()
                .map(|(i, id)| Category {
                    id: (*id).to_string(),
                    name: format!("Category {id}"),
                    description: None,
                    sort_order: i as i64,
                    options: vec![
                        CategoryOption {
                            id: format!("{id}-o1"),
                            category_id: (*id).to_string(),
                            name: "One".to_string(),
                            value: None,
                            sort_order: 0,
                        },
                        CategoryOption {
                            id: format!("{id}-o2"),
                            category_id: (*id).to_string(),
                            name: "Two".to_string(),
                            value: None,
                            sort_order: 1,
                        },
                    ],
                })
                .collect(),
        }
    }

    fn link(category_id: &str, option_id: Option<&str>) -> TaskLink {
        TaskLink {
            category_id: category_id.to_string(),
            option_id: option_id.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn create_flow_saves_task_and_selections() {
        let (ctx, harness) = context(Ok(catalog_with(&["c1"])));
        let mut editor = TaskEditor::create(ctx, ValidationPolicy::default(), "p1");
        editor.open().await.unwrap();
        editor.form_mut().title = "Ship it".to_string();
        editor.form_mut().column_id = "todo".to_string();
        editor.select_option("c1", "c1-o1");

        let outcome = editor.submit("dev@example.com").await.unwrap();
        match outcome {
            SubmitOutcome::Saved(saved) => assert_eq!(saved.id, "task-1"),
            other => panic!("expected Saved, got {other:?}"),
        }
        assert_eq!(
            *harness.calls.lock().unwrap(),
            vec!["create_task", "save_selections task-1 1 dev@example.com"]
        );
        assert_eq!(
            *harness.notes.lock().unwrap(),
            vec![(NoticeLevel::Success, "Task created successfully".to_string())]
        );
    }

    #[tokio::test]
    async fn validation_failure_makes_no_network_calls() {
        let (ctx, harness) = context(Ok(catalog_with(&["c1"])));
        let mut editor = TaskEditor::create(ctx, ValidationPolicy::default(), "p1");
        editor.open().await.unwrap();

        let outcome = editor.submit("dev@example.com").await.unwrap();
        match outcome {
            SubmitOutcome::Invalid(result) => {
                assert!(result.message_for(Field::Title).is_some());
                assert!(result.message_for(Field::Category).is_some());
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(harness.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_without_changes_is_a_noop() {
        let (ctx, harness) = context(Ok(catalog_with(&["c1"])));
        let form = TaskForm {
            title: "Keep".to_string(),
            column_id: "doing".to_string(),
            ..TaskForm::default()
        };
        let links = vec![link("c1", Some("c1-o1"))];
        let mut editor =
            TaskEditor::edit(ctx, ValidationPolicy::default(), "p1", "t42", form, links);
        editor.open().await.unwrap();

        let outcome = editor.submit("dev@example.com").await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Unchanged));
        assert!(harness.calls.lock().unwrap().is_empty());
        assert!(harness.notes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_with_changed_title_updates() {
        let (ctx, harness) = context(Ok(catalog_with(&["c1"])));
        let form = TaskForm {
            title: "Before".to_string(),
            column_id: "doing".to_string(),
            ..TaskForm::default()
        };
        let links = vec![link("c1", Some("c1-o1"))];
        let mut editor =
            TaskEditor::edit(ctx, ValidationPolicy::default(), "p1", "t42", form, links);
        editor.open().await.unwrap();
        editor.form_mut().title = "After".to_string();

        let outcome = editor.submit("dev@example.com").await.unwrap();
        match outcome {
            SubmitOutcome::Saved(saved) => assert_eq!(saved.id, "t42"),
            other => panic!("expected Saved, got {other:?}"),
        }
        assert_eq!(
            *harness.calls.lock().unwrap(),
            vec!["update_task t42", "save_selections t42 1 dev@example.com"]
        );
        assert_eq!(
            *harness.notes.lock().unwrap(),
            vec![(NoticeLevel::Success, "Task updated successfully".to_string())]
        );
    }

    #[tokio::test]
    async fn stale_catalog_result_after_close_is_discarded() {
        let (ctx, _harness) = context(Ok(catalog_with(&["c1"])));
        let mut editor = TaskEditor::create(ctx, ValidationPolicy::default(), "p1");
        let token = editor.load_token();
        editor.close();

        editor.apply_catalog(token, Ok(catalog_with(&["c1"]))).unwrap();
        assert!(editor.catalog().is_none());
        assert!(editor.store().is_empty());
        assert!(matches!(editor.submit("dev@example.com").await, Err(EditorError::Closed)));
    }

    #[tokio::test]
    async fn superseded_load_is_discarded() {
        let (ctx, _harness) = context(Ok(catalog_with(&["c1"])));
        let mut editor = TaskEditor::create(ctx, ValidationPolicy::default(), "p1");
        let first = editor.load_token();
        let second = editor.load_token();

        editor.apply_catalog(first, Ok(catalog_with(&["old"]))).unwrap();
        assert!(editor.catalog().is_none());

        editor.apply_catalog(second, Ok(catalog_with(&["new"]))).unwrap();
        assert_eq!(editor.catalog().unwrap().categories[0].id, "new");
    }

    #[tokio::test]
    async fn failed_load_notifies_and_fails_validation() {
        let (ctx, harness) = context(Err("502 Bad Gateway".to_string()));
        let mut editor = TaskEditor::create(ctx, ValidationPolicy::default(), "p1");

        let err = editor.open().await.unwrap_err();
        assert!(matches!(err, EditorError::CatalogLoad(_)));
        assert_eq!(
            *harness.notes.lock().unwrap(),
            vec![(NoticeLevel::Error, "Failed to load category options".to_string())]
        );

        editor.form_mut().title = "T".to_string();
        editor.form_mut().column_id = "todo".to_string();
        let outcome = editor.submit("dev@example.com").await.unwrap();
        match outcome {
            SubmitOutcome::Invalid(result) => assert_eq!(
                result.message_for(Field::Category),
                Some("All categories are mandatory and must be selected")
            ),
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(harness.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn hydration_drops_links_missing_from_catalog() {
        let (ctx, _harness) = context(Ok(catalog_with(&["c1", "c2"])));
        let form = TaskForm {
            title: "T".to_string(),
            column_id: "todo".to_string(),
            ..TaskForm::default()
        };
        let links = vec![
            link("c1", Some("c1-o1")),
            link("c2", None),
            link("ghost", Some("ghost-o1")),
            link("c1", Some("c9")),
        ];
        let mut editor =
            TaskEditor::edit(ctx, ValidationPolicy::default(), "p1", "t42", form, links);
        editor.open().await.unwrap();

        let store = editor.store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.choice("c1"), Some("c1-o1"));
        assert!(store.is_touched("c2"));
        assert!(store.choice("c2").is_none());
        assert!(!store.is_touched("ghost"));
    }

    #[tokio::test]
    async fn gateway_failure_leaves_editor_retryable() {
        let (ctx, harness) = context(Ok(catalog_with(&["c1"])));
        harness.fail.store(true, Ordering::SeqCst);
        let form = TaskForm {
            title: "Before".to_string(),
            column_id: "doing".to_string(),
            ..TaskForm::default()
        };
        let links = vec![link("c1", Some("c1-o1"))];
        let mut editor =
            TaskEditor::edit(ctx, ValidationPolicy::default(), "p1", "t42", form, links);
        editor.open().await.unwrap();
        editor.form_mut().title = "After".to_string();

        let err = editor.submit("dev@example.com").await.unwrap_err();
        assert!(matches!(err, EditorError::Submission(_)));
        assert_eq!(
            *harness.notes.lock().unwrap(),
            vec![(NoticeLevel::Error, "Failed to save task".to_string())]
        );

        // The snapshot was not refreshed, so the retry still writes.
        harness.fail.store(false, Ordering::SeqCst);
        let outcome = editor.submit("dev@example.com").await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    }
}
