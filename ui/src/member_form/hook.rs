use dioxus::prelude::*;
use types::member::MemberId;

use super::{
    session::{FormSession, LoadStatus},
    source::ApiMemberSource,
};
use crate::{guard::use_discard_interceptor, toast::use_toasts};

/// Handle to the member form session of the calling component.
#[derive(Clone, Copy, PartialEq)]
pub struct MemberForm {
    pub session: Signal<FormSession>,
}

/// Run a [`FormSession`] for the member `id` (or a new member) for as long as
/// the calling component is mounted.
///
/// The record is loaded on mount and again whenever `id` changes; a change
/// replaces the session, so a load still running for the old id is dropped.
/// Needs [`use_discard_interceptor_provider`](crate::guard::use_discard_interceptor_provider)
/// higher up the tree.
pub fn use_member_form(id: ReadSignal<Option<MemberId>>) -> MemberForm {
    let toasts = use_toasts();
    let interceptor = use_discard_interceptor();

    let mut session = use_signal({
        let interceptor = interceptor.clone();
        move || FormSession::new(id.peek().clone(), interceptor)
    });

    use_effect({
        let interceptor = interceptor.clone();
        move || {
            let id = id();
            if session.peek().id() != id.as_ref() {
                session.set(FormSession::new(id, interceptor.clone()));
            }

            let Some(request) = session.write().begin_load() else {
                return;
            };
            spawn(async move {
                let completion = request.run(&ApiMemberSource).await;
                let status = session.write().finish_load(completion, &toasts);
                if status == LoadStatus::Loaded {
                    tracing::debug!("member form ready");
                }
            });
        }
    });

    // Keep the page's unload check in step with the session.
    use_effect(move || {
        let _ = session.read().is_dirty();
        interceptor.publish();
    });

    use_drop(move || {
        if let Ok(mut session) = session.try_write() {
            session.end();
        }
    });

    MemberForm { session }
}
