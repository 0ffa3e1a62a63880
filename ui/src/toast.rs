use dioxus::prelude::*;
use types::Toast;

use crate::member_form::Notifier;

/// Toasts currently on screen - use `use_toasts()` to access
#[derive(Clone, Copy)]
pub struct ToastState(Signal<Vec<Toast>>);

impl ToastState {
    pub fn show(&mut self, toast: Toast) {
        self.0.write().push(toast);
    }

    /// Report a failed server call under `title`.
    pub fn server_error(&mut self, title: &str, err: &ServerFnError) {
        tracing::warn!(error = %err, "server call failed");
        self.show(Toast::destructive(title, err.to_string()));
    }

    pub fn dismiss(&mut self, index: usize) {
        let mut toasts = self.0.write();
        if index < toasts.len() {
            toasts.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.0.write().clear();
    }
}

impl Notifier for ToastState {
    fn notify(&self, toast: Toast) {
        let mut state = *self;
        state.show(toast);
    }
}

/// Provide toast state to the subtree. Call once, near the root layout.
pub fn use_toast_provider() -> ToastState {
    use_context_provider(|| ToastState(Signal::new(Vec::new())))
}

pub fn use_toasts() -> ToastState {
    use_context::<ToastState>()
}

#[component]
pub fn ToastStack() -> Element {
    let mut state = use_toasts();
    let toasts = state.0.read().clone();

    rsx! {
        div { class: "toast-stack",
            for (i, toast) in toasts.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: if toast.is_destructive() { "toast toast-destructive" } else { "toast" },
                    div { class: "toast-content",
                        div { class: "toast-title", "{toast.title}" }
                        div { class: "toast-description", "{toast.description}" }
                    }
                    button {
                        class: "toast-close",
                        onclick: move |_| state.dismiss(i),
                        "×"
                    }
                }
            }
        }
    }
}
