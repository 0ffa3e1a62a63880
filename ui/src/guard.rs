//! Interception of "about to discard the page" events (tab close, reload,
//! leaving the site) for forms with unsaved changes.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use dioxus::prelude::{use_context, use_context_provider};

const INSTALL_JS: &str = r#"
if (!window.__koperasiUnload) {
    window.__koperasiBlockUnload = false;
    window.__koperasiUnload = (e) => {
        if (window.__koperasiBlockUnload) {
            e.preventDefault();
            e.returnValue = '';
            return '';
        }
    };
    window.addEventListener('beforeunload', window.__koperasiUnload);
}
"#;

const UNINSTALL_JS: &str = r#"
if (window.__koperasiUnload) {
    window.removeEventListener('beforeunload', window.__koperasiUnload);
    delete window.__koperasiUnload;
}
window.__koperasiBlockUnload = false;
"#;

/// The event handed to discard listeners. Listeners run synchronously, before
/// the platform completes the discard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscardEvent {
    default_prevented: bool,
    return_value: Option<String>,
}

impl DiscardEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the platform to show its generic "leave page?" confirmation.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn set_return_value(&mut self, value: impl Into<String>) {
        self.return_value = Some(value.into());
    }

    pub fn return_value(&self) -> Option<&str> {
        self.return_value.as_deref()
    }
}

pub type DiscardHandler = Rc<dyn Fn(&mut DiscardEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A platform's discard-interception registration API.
pub trait DiscardInterceptor {
    fn add_listener(&self, handler: DiscardHandler) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);
}

/// In-process event target. Hosts without a browser call [`dispatch`](Self::dispatch)
/// themselves.
#[derive(Default)]
pub struct LocalInterceptor {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, DiscardHandler)>>,
}

impl LocalInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every listener against a fresh event and return it.
    pub fn dispatch(&self) -> DiscardEvent {
        // Listeners may register or remove others while running.
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        let mut event = DiscardEvent::new();
        for handler in handlers {
            handler(&mut event);
        }
        event
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl DiscardInterceptor for LocalInterceptor {
    fn add_listener(&self, handler: DiscardHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, handler));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(other, _)| *other != id);
    }
}

/// Runs a script in the page.
pub trait PageScript {
    fn run(&self, js: &str);
}

/// [`PageScript`] over `document::eval`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Eval;

impl PageScript for Eval {
    fn run(&self, js: &str) {
        let _ = dioxus::document::eval(js);
    }
}

/// Browser `beforeunload` interception.
///
/// The browser calls its listener synchronously and cannot wait on Rust, so a
/// single JS listener consults a flag that [`publish`](Self::publish) keeps in
/// sync with the Rust listeners' decision. The JS side is page-global: share
/// one interceptor across the app (see [`use_discard_interceptor_provider`]).
pub struct BrowserInterceptor<S = Eval> {
    local: LocalInterceptor,
    script: S,
}

impl BrowserInterceptor {
    pub fn new() -> Self {
        Self::with_script(Eval)
    }
}

impl Default for BrowserInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PageScript> BrowserInterceptor<S> {
    pub fn with_script(script: S) -> Self {
        Self {
            local: LocalInterceptor::new(),
            script,
        }
    }

    /// Mirror the current decision of all listeners into the page.
    pub fn publish(&self) {
        let block = self.local.dispatch().default_prevented();
        self.script.run(&format!("window.__koperasiBlockUnload = {block};"));
    }

    pub fn listener_count(&self) -> usize {
        self.local.listener_count()
    }
}

impl<S: PageScript> DiscardInterceptor for BrowserInterceptor<S> {
    fn add_listener(&self, handler: DiscardHandler) -> ListenerId {
        if self.local.listener_count() == 0 {
            self.script.run(INSTALL_JS);
        }
        self.local.add_listener(handler)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.local.remove_listener(id);
        if self.local.listener_count() == 0 {
            self.script.run(UNINSTALL_JS);
        } else {
            self.publish();
        }
    }
}

/// Provide the app-wide [`BrowserInterceptor`]. Call once, near the root layout.
pub fn use_discard_interceptor_provider() -> Rc<BrowserInterceptor> {
    use_context_provider(|| Rc::new(BrowserInterceptor::new()))
}

pub fn use_discard_interceptor() -> Rc<BrowserInterceptor> {
    use_context::<Rc<BrowserInterceptor>>()
}

/// Keeps a discard listener registered for as long as it is alive.
pub struct NavigationGuard {
    interceptor: Rc<dyn DiscardInterceptor>,
    id: ListenerId,
}

impl NavigationGuard {
    /// Block discards whenever `dirty` is set.
    pub fn install(interceptor: Rc<dyn DiscardInterceptor>, dirty: Rc<Cell<bool>>) -> Self {
        let id = interceptor.add_listener(Rc::new(move |event: &mut DiscardEvent| {
            if dirty.get() {
                event.prevent_default();
                event.set_return_value("");
            }
        }));

        Self { interceptor, id }
    }
}

impl Drop for NavigationGuard {
    fn drop(&mut self) {
        self.interceptor.remove_listener(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_blocks_only_while_dirty() {
        let interceptor = Rc::new(LocalInterceptor::new());
        let dirty = Rc::new(Cell::new(false));
        let _guard = NavigationGuard::install(interceptor.clone(), dirty.clone());

        let event = interceptor.dispatch();
        assert!(!event.default_prevented());
        assert_eq!(event.return_value(), None);

        dirty.set(true);
        let event = interceptor.dispatch();
        assert!(event.default_prevented());
        assert_eq!(event.return_value(), Some(""));
    }

    #[test]
    fn dropping_guard_removes_listener() {
        let interceptor = Rc::new(LocalInterceptor::new());
        let dirty = Rc::new(Cell::new(true));

        let guard = NavigationGuard::install(interceptor.clone(), dirty);
        assert_eq!(interceptor.listener_count(), 1);

        drop(guard);
        assert_eq!(interceptor.listener_count(), 0);
        assert!(!interceptor.dispatch().default_prevented());
    }

    #[test]
    fn any_dirty_guard_blocks() {
        let interceptor = Rc::new(LocalInterceptor::new());
        let clean = Rc::new(Cell::new(false));
        let dirty = Rc::new(Cell::new(true));

        let _a = NavigationGuard::install(interceptor.clone(), clean);
        let b = NavigationGuard::install(interceptor.clone(), dirty);
        assert!(interceptor.dispatch().default_prevented());

        drop(b);
        assert!(!interceptor.dispatch().default_prevented());
    }

    #[derive(Default)]
    struct RecordingScript(RefCell<Vec<String>>);

    impl PageScript for Rc<RecordingScript> {
        fn run(&self, js: &str) {
            self.0.borrow_mut().push(js.to_string());
        }
    }

    impl RecordingScript {
        fn installs(&self) -> usize {
            self.0.borrow().iter().filter(|js| js.as_str() == INSTALL_JS).count()
        }

        fn uninstalls(&self) -> usize {
            self.0.borrow().iter().filter(|js| js.as_str() == UNINSTALL_JS).count()
        }

        fn last(&self) -> Option<String> {
            self.0.borrow().last().cloned()
        }
    }

    #[test]
    fn shared_browser_interceptor_keeps_listener_until_last_guard() {
        let script = Rc::new(RecordingScript::default());
        let interceptor = Rc::new(BrowserInterceptor::with_script(script.clone()));
        let clean = Rc::new(Cell::new(false));
        let dirty = Rc::new(Cell::new(true));

        let a = NavigationGuard::install(interceptor.clone(), dirty);
        let b = NavigationGuard::install(interceptor.clone(), clean);
        assert_eq!(script.installs(), 1);

        // A clean form publishing must not clear the other form's block.
        interceptor.publish();
        assert_eq!(
            script.last().as_deref(),
            Some("window.__koperasiBlockUnload = true;")
        );

        drop(b);
        assert_eq!(script.uninstalls(), 0);
        assert_eq!(
            script.last().as_deref(),
            Some("window.__koperasiBlockUnload = true;")
        );

        drop(a);
        assert_eq!(script.uninstalls(), 1);
        assert_eq!(interceptor.listener_count(), 0);
    }
}
