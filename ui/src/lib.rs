pub mod guard;
pub mod member_form;
mod toast;

pub use guard::use_discard_interceptor_provider;
pub use toast::{ToastStack, ToastState, use_toast_provider, use_toasts};
