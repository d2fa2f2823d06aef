//! Ambient storage for the current request's diagnostic context.
//!
//! Two slots exist:
//!
//! - a **thread** slot (`thread_local!`), filled by [`begin_request_context`] and
//!   emptied by [`end_request_context`], for thread-per-request servers;
//! - a **task** slot (`tokio::task_local!`), filled for the lifetime of a future
//!   by [`scope`] / [`scope_with`], for async handlers.
//!
//! Reads consult the task slot first. Neither slot follows work that is handed to
//! another thread or spawned as another task; copy it across with [`snapshot`]
//! and [`DiagnosticContext::install`] or [`scope_with`].

use super::diagnostic::DiagnosticContext;
use super::keys;
use super::request::{RequestId, RequestInfo};
use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use tracing::span::EnteredSpan;
use tracing::{debug, Instrument};

/// A context installed on a thread, together with its entered `request` span.
struct ActiveContext {
    diagnostic: DiagnosticContext,
    _span: EnteredSpan,
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Option<ActiveContext>> = const { RefCell::new(None) };
}

tokio::task_local! {
    static TASK_CONTEXT: DiagnosticContext;
}

/// Starts a request context on the current thread and returns its identifier.
///
/// Stores a fresh request id plus the fields of `request` (when given). Any
/// context already on this thread is replaced. Pair every call with
/// [`end_request_context`] on the same thread, or use
/// [`enter_request_context`] to have that done on drop.
pub fn begin_request_context(request: Option<&RequestInfo>) -> RequestId {
    let (request_id, diagnostic) = DiagnosticContext::for_request(request);
    install_on_thread(diagnostic);
    debug!(request_id = %request_id, "Request context started");
    request_id
}

/// Removes every entry from the current thread's context.
pub fn end_request_context() {
    // The span must exit outside the borrow in case the subscriber reads the context.
    let previous = THREAD_CONTEXT
        .try_with(|slot| slot.borrow_mut().take())
        .ok()
        .flatten();
    drop(previous);
}

/// Like [`begin_request_context`], but ends the context when the guard drops,
/// including during unwinding.
pub fn enter_request_context(request: Option<&RequestInfo>) -> RequestContextGuard {
    begin_request_context(request);
    RequestContextGuard::new()
}

pub(super) fn install(diagnostic: DiagnosticContext) -> RequestContextGuard {
    install_on_thread(diagnostic);
    RequestContextGuard::new()
}

fn install_on_thread(diagnostic: DiagnosticContext) {
    // Exit the previous span first so the new one is not created as its child.
    end_request_context();
    let span = diagnostic.span().entered();
    let active = ActiveContext {
        diagnostic,
        _span: span,
    };
    // Errs only during thread teardown.
    let _ = THREAD_CONTEXT.try_with(|slot| *slot.borrow_mut() = Some(active));
}

/// Runs `future` with a task-scoped context for a new request.
///
/// The context travels with the future across `.await` points and worker
/// threads, and is gone once the future completes. Tasks spawned from inside
/// do not inherit it.
pub fn scope<F: Future>(
    request: Option<&RequestInfo>,
    future: F,
) -> impl Future<Output = F::Output> {
    let (_, diagnostic) = DiagnosticContext::for_request(request);
    scope_with(diagnostic, future)
}

/// Runs `future` with `diagnostic` as its task-scoped context.
pub fn scope_with<F: Future>(
    diagnostic: DiagnosticContext,
    future: F,
) -> impl Future<Output = F::Output> {
    let span = diagnostic.span();
    TASK_CONTEXT.scope(diagnostic, future.instrument(span))
}

/// Reads one entry of the current context.
pub fn get(key: &str) -> Option<String> {
    if let Ok(value) = TASK_CONTEXT.try_with(|context| context.get(key).map(str::to_owned)) {
        return value;
    }
    THREAD_CONTEXT
        .try_with(|slot| {
            slot.borrow()
                .as_ref()
                .and_then(|active| active.diagnostic.get(key).map(str::to_owned))
        })
        .ok()
        .flatten()
}

/// The current request id, if a request context is active.
pub fn request_id() -> Option<String> {
    get(keys::REQUEST_ID)
}

/// A copy of the current context, for carrying it to another thread or task.
pub fn snapshot() -> Option<DiagnosticContext> {
    if let Ok(context) = TASK_CONTEXT.try_with(DiagnosticContext::clone) {
        return Some(context);
    }
    THREAD_CONTEXT
        .try_with(|slot| {
            slot.borrow()
                .as_ref()
                .map(|active| active.diagnostic.clone())
        })
        .ok()
        .flatten()
}

/// Ends the current thread's request context when dropped.
///
/// Not `Send`: the context it clears belongs to the thread that created it.
#[must_use = "the request context ends as soon as the guard is dropped"]
pub struct RequestContextGuard {
    _not_send: PhantomData<*const ()>,
}

impl RequestContextGuard {
    fn new() -> Self {
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for RequestContextGuard {
    fn drop(&mut self) {
        end_request_context();
    }
}

impl std::fmt::Debug for RequestContextGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContextGuard").finish_non_exhaustive()
    }
}
