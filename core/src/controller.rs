//! The todo list view model and its synchronisation with the server.
//!
//! # Design
//! `TodoController` owns a `ViewState` and mutates it only after a request
//! completes or in response to a local edit event. Create and delete wait for
//! server confirmation before touching the list, so nothing is ever rolled
//! back. Every operation takes `&mut self`, which keeps at most one request
//! in flight per controller.
//!
//! Failures are non-fatal. They are logged with their cause and collapsed
//! into one message per operation in the shared error slot (last one wins).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::client::TodoClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoPatch};

/// How local state is brought back in line after a successful update or
/// delete. Create always refetches, since only the server knows the new id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reconcile {
    /// Merge the patch into (or remove) the matching item by id.
    #[default]
    Merge,
    /// Reload the whole collection.
    Refetch,
}

#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    /// `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub reconcile: Reconcile,
}

/// Transient edit state for one item. Never sent until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: i64,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Server order as of the last sync.
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
    /// The "new todo" input field.
    pub input: String,
    pub edit: Option<EditSession>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            error: None,
            input: String::new(),
            edit: None,
        }
    }
}

/// Aborts whichever request the controller has in flight.
///
/// Cloneable and `Send`, so it can be handed to another task (a Ctrl-C
/// handler, a UI thread) while the controller is busy awaiting.
#[derive(Debug, Clone)]
pub struct Canceller {
    tx: Arc<watch::Sender<u64>>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }
}

pub struct TodoController<T> {
    client: TodoClient,
    transport: T,
    config: ControllerConfig,
    state: ViewState,
    cancel_tx: Arc<watch::Sender<u64>>,
}

impl<T: Transport> TodoController<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self::with_config(client, transport, ControllerConfig::default())
    }

    pub fn with_config(client: TodoClient, transport: T, config: ControllerConfig) -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            client,
            transport,
            config,
            state: ViewState::default(),
            cancel_tx: Arc::new(tx),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn todos(&self) -> &[Todo] {
        &self.state.todos
    }

    pub fn todo(&self, id: i64) -> Option<&Todo> {
        self.state.todos.iter().find(|todo| todo.id == id)
    }

    pub fn canceller(&self) -> Canceller {
        Canceller {
            tx: Arc::clone(&self.cancel_tx),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// Replace the local list with the server's collection.
    ///
    /// On failure the previous list is kept. The loading indicator stops
    /// either way.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let result = self.fetch_todos().await;
        self.state.loading = false;
        match result {
            Ok(todos) => {
                log::debug!("loaded {} todos", todos.len());
                self.state.todos = todos;
                self.state.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Load, err)),
        }
    }

    /// Create a todo from `title`, then reload to pick up the server-assigned
    /// id. A blank title is ignored without a request.
    pub async fn create(&mut self, title: &str) -> Result<(), ApiError> {
        let title = title.trim();
        if title.is_empty() {
            log::debug!("ignoring blank todo title");
            return Ok(());
        }
        let input = NewTodo {
            title: title.to_string(),
            completed: false,
        };
        match self.post_todo(&input).await {
            Ok(created) => {
                if let Some(todo) = created {
                    log::debug!("created todo {}", todo.id);
                }
                self.state.input.clear();
                self.load().await
            }
            Err(err) => Err(self.fail(Operation::Add, err)),
        }
    }

    /// Create a todo from the input field.
    pub async fn submit(&mut self) -> Result<(), ApiError> {
        let title = self.state.input.clone();
        self.create(&title).await
    }

    /// Send a patch carrying only the given fields. On success the patch is
    /// reconciled into the local item and an edit session on `id` ends.
    pub async fn update(
        &mut self,
        id: i64,
        completed: Option<bool>,
        title: Option<String>,
    ) -> Result<(), ApiError> {
        let patch = TodoPatch { id, completed, title };
        if let Err(err) = self.put_patch(&patch).await {
            return Err(self.fail(Operation::Update, err));
        }
        if self.state.edit.as_ref().is_some_and(|session| session.id == id) {
            self.state.edit = None;
        }
        match self.config.reconcile {
            Reconcile::Merge => {
                if let Some(todo) = self.state.todos.iter_mut().find(|todo| todo.id == id) {
                    patch.apply_to(todo);
                    log::debug!("merged update into todo {id}");
                }
                Ok(())
            }
            Reconcile::Refetch => self.load().await,
        }
    }

    /// Flip `completed` on a todo the controller holds.
    pub async fn toggle(&mut self, id: i64) -> Result<(), ApiError> {
        let Some(completed) = self.todo(id).map(|todo| todo.completed) else {
            log::warn!("toggle on unknown todo {id}");
            return Err(ApiError::UnknownTodo(id));
        };
        self.update(id, Some(!completed), None).await
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        if let Err(err) = self.delete_todo(id).await {
            return Err(self.fail(Operation::Delete, err));
        }
        match self.config.reconcile {
            Reconcile::Merge => {
                self.state.todos.retain(|todo| todo.id != id);
                log::debug!("removed todo {id}");
                Ok(())
            }
            Reconcile::Refetch => self.load().await,
        }
    }

    /// Enter edit mode with the item's current title as the draft. Returns
    /// `false` if no such item is held.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        let Some(draft) = self.todo(id).map(|todo| todo.title.clone()) else {
            return false;
        };
        self.state.edit = Some(EditSession { id, draft });
        true
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(session) = &mut self.state.edit {
            session.draft = text.into();
        }
    }

    /// Leave edit mode and drop the draft. No request is made.
    pub fn cancel_edit(&mut self) {
        if let Some(session) = self.state.edit.take() {
            log::debug!("discarded draft for todo {}", session.id);
        }
    }

    /// Save the draft as the item's title. A blank draft is ignored and edit
    /// mode stays active; a failed save also stays in edit mode.
    pub async fn save_edit(&mut self) -> Result<(), ApiError> {
        let Some(session) = &self.state.edit else {
            return Ok(());
        };
        let id = session.id;
        let title = session.draft.trim().to_string();
        if title.is_empty() {
            log::debug!("ignoring blank draft for todo {id}");
            return Ok(());
        }
        self.update(id, None, Some(title)).await
    }

    async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn post_todo(&self, input: &NewTodo) -> Result<Option<Todo>, ApiError> {
        let response = self.send(self.client.build_create_todo(input)?).await?;
        self.client.parse_create_todo(response)
    }

    async fn put_patch(&self, patch: &TodoPatch) -> Result<(), ApiError> {
        let response = self.send(self.client.build_update_todo(patch)?).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_todo(id)?).await?;
        self.client.parse_delete_todo(response)
    }

    /// Execute one request under the configured timeout, racing the
    /// cancellation signal.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method, request.path);
        let mut cancelled = self.cancel_tx.subscribe();
        let call = self.transport.execute(request);
        let call = async {
            match self.config.request_timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .map_err(|_| ApiError::Timeout(limit))?,
                None => call.await,
            }
        };
        tokio::select! {
            response = call => response,
            _ = cancelled.changed() => Err(ApiError::Cancelled),
        }
    }

    /// Record a failed operation. Cancellation is user-initiated and leaves
    /// the error slot alone.
    fn fail(&mut self, operation: Operation, err: ApiError) -> ApiError {
        if matches!(err, ApiError::Cancelled) {
            log::info!("{} cancelled", operation.as_str());
        } else {
            log::error!("failed to {} todos: {err}", operation.as_str());
            self.state.error = Some(operation.failure_message().to_string());
        }
        err
    }
}
