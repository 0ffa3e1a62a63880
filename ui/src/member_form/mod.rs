//! The member create/edit form session: loading, dirty tracking and the
//! unsaved-changes guard.

mod hook;
mod session;
mod source;

pub use hook::{MemberForm, use_member_form};
pub use session::{
    BaselineCounts, FormSession, LOAD_FAILED_MESSAGE, LOAD_FAILED_TITLE, LoadCompletion,
    LoadRequest, LoadStatus, SessionMode,
};
pub use source::{ApiMemberSource, LoadFailure, MemberSource, Notifier};
