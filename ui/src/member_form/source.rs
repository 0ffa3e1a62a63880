use std::future::Future;

use types::{
    Toast,
    member::{Member, MemberId},
};

/// Where member records are loaded from.
pub trait MemberSource {
    /// `Ok(None)` when the record does not exist.
    fn fetch_member(&self, id: &MemberId) -> impl Future<Output = types::Result<Option<Member>>>;
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadFailure {
    #[error("member {0} not found")]
    NotFound(MemberId),
    #[error("failed to load member: {0}")]
    Service(#[source] types::Error),
}

/// Loads members through the app's server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiMemberSource;

impl MemberSource for ApiMemberSource {
    async fn fetch_member(&self, id: &MemberId) -> types::Result<Option<Member>> {
        api::get_member(id.clone())
            .await
            .map_err(|e| types::Error::from(e.to_string()))
    }
}
