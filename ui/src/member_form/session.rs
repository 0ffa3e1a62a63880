use std::{cell::Cell, rc::Rc};

use tokio_util::sync::CancellationToken;
use types::{
    Toast,
    member::{FamilyMember, Member, MemberDocument, MemberDraft, MemberId},
};

use super::source::{LoadFailure, MemberSource, Notifier};
use crate::guard::{DiscardInterceptor, NavigationGuard};

pub const LOAD_FAILED_TITLE: &str = "Error";
pub const LOAD_FAILED_MESSAGE: &str = "Terjadi kesalahan saat memuat data anggota";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Edit,
}

/// Sizes of the attached collections as of the last successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaselineCounts {
    pub documents: usize,
    pub family: usize,
}

#[derive(Debug, PartialEq)]
pub enum LoadStatus {
    /// Create mode; there is nothing to load.
    Skipped,
    Loaded,
    Failed(LoadFailure),
    /// The session ended or a newer load was issued; the result was dropped.
    Discarded,
}

/// An issued load that has not run yet. Holds no borrow of the session, so
/// the session can stay shared while the fetch is pending.
#[must_use = "a load request does nothing until it is run"]
pub struct LoadRequest {
    id: MemberId,
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Debug)]
enum LoadOutcome {
    Loaded(Member),
    Failed(LoadFailure),
    Cancelled,
}

/// The result of a [`LoadRequest`], to be handed back to [`FormSession::finish_load`].
#[derive(Debug)]
pub struct LoadCompletion {
    generation: u64,
    cancel: CancellationToken,
    outcome: LoadOutcome,
}

impl LoadCompletion {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Cancelled) || self.cancel.is_cancelled()
    }
}

impl LoadRequest {
    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub async fn run<S: MemberSource>(self, source: &S) -> LoadCompletion {
        let outcome = match self
            .cancel
            .run_until_cancelled(source.fetch_member(&self.id))
            .await
        {
            None => LoadOutcome::Cancelled,
            Some(Ok(Some(member))) => LoadOutcome::Loaded(member),
            Some(Ok(None)) => LoadOutcome::Failed(LoadFailure::NotFound(self.id)),
            Some(Err(error)) => LoadOutcome::Failed(LoadFailure::Service(error)),
        };

        LoadCompletion {
            generation: self.generation,
            cancel: self.cancel,
            outcome,
        }
    }
}

/// State of one member create/edit form, from mount until submit or
/// navigation away.
///
/// In edit mode the session is dirty while either attached collection differs
/// in size from its baseline, or after an explicit [`set_dirty`](Self::set_dirty).
/// Edits to the draft's scalar fields do not mark it dirty.
pub struct FormSession {
    id: Option<MemberId>,
    submitting: bool,
    photo_preview: Option<String>,
    draft: MemberDraft,
    documents: Vec<MemberDocument>,
    family: Vec<FamilyMember>,
    baseline: BaselineCounts,
    marked_dirty: bool,
    dirty: Rc<Cell<bool>>,
    loading: bool,
    generation: u64,
    cancel: CancellationToken,
    in_flight: Option<CancellationToken>,
    _guard: NavigationGuard,
}

impl FormSession {
    /// Start a session. With an `id` the session is in edit mode and expects
    /// a load to be issued right away.
    pub fn new(id: Option<MemberId>, interceptor: Rc<dyn DiscardInterceptor>) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let guard = NavigationGuard::install(interceptor, dirty.clone());

        Self {
            loading: id.is_some(),
            id,
            submitting: false,
            photo_preview: None,
            draft: MemberDraft::default(),
            documents: Vec::new(),
            family: Vec::new(),
            baseline: BaselineCounts::default(),
            marked_dirty: false,
            dirty,
            generation: 0,
            cancel: CancellationToken::new(),
            in_flight: None,
            _guard: guard,
        }
    }

    pub fn id(&self) -> Option<&MemberId> {
        self.id.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        if self.id.is_some() {
            SessionMode::Edit
        } else {
            SessionMode::Create
        }
    }

    pub fn is_edit(&self) -> bool {
        self.mode() == SessionMode::Edit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn photo_preview(&self) -> Option<&str> {
        self.photo_preview.as_deref()
    }

    pub fn set_photo_preview(&mut self, preview: Option<String>) {
        self.photo_preview = preview;
    }

    pub fn draft(&self) -> &MemberDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MemberDraft {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: MemberDraft) {
        self.draft = draft;
    }

    pub fn documents(&self) -> &[MemberDocument] {
        &self.documents
    }

    pub fn set_documents(&mut self, documents: Vec<MemberDocument>) {
        self.documents = documents;
        self.refresh_dirty();
    }

    pub fn update_documents(&mut self, f: impl FnOnce(&mut Vec<MemberDocument>)) {
        f(&mut self.documents);
        self.refresh_dirty();
    }

    /// Remove the document with `id`. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: &str) {
        self.update_documents(|docs| docs.retain(|d| d.id != id));
    }

    pub fn family(&self) -> &[FamilyMember] {
        &self.family
    }

    pub fn set_family(&mut self, family: Vec<FamilyMember>) {
        self.family = family;
        self.refresh_dirty();
    }

    pub fn update_family(&mut self, f: impl FnOnce(&mut Vec<FamilyMember>)) {
        f(&mut self.family);
        self.refresh_dirty();
    }

    /// Remove the family member with `id`. Unknown ids are ignored.
    pub fn remove_relative(&mut self, id: &str) {
        self.update_family(|family| family.retain(|r| r.id != id));
    }

    pub fn baseline(&self) -> BaselineCounts {
        self.baseline
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Force the dirty flag, e.g. after a scalar edit the caller wants guarded.
    /// Collection divergence still keeps the session dirty when cleared.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.marked_dirty = dirty;
        self.refresh_dirty();
    }

    fn refresh_dirty(&mut self) {
        let diverged = self.is_edit()
            && (self.documents.len() != self.baseline.documents
                || self.family.len() != self.baseline.family);
        self.dirty.set(self.marked_dirty || diverged);
    }

    /// Issue a load for the session's id. Any load still in flight is cancelled.
    ///
    /// Returns `None` in create mode.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        let id = self.id.clone()?;

        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.generation += 1;
        self.loading = true;
        let cancel = self.cancel.child_token();
        self.in_flight = Some(cancel.clone());
        tracing::debug!(%id, generation = self.generation, "loading member");

        Some(LoadRequest {
            id,
            generation: self.generation,
            cancel,
        })
    }

    /// Apply a finished load. Results of cancelled or superseded loads are
    /// dropped without touching the session; otherwise the loading flag is
    /// cleared whatever the outcome.
    pub fn finish_load(
        &mut self,
        completion: LoadCompletion,
        notifier: &impl Notifier,
    ) -> LoadStatus {
        if completion.is_cancelled() || completion.generation != self.generation {
            tracing::debug!(
                generation = completion.generation,
                current = self.generation,
                "discarding stale member load"
            );
            return LoadStatus::Discarded;
        }

        self.in_flight = None;
        self.loading = false;

        match completion.outcome {
            LoadOutcome::Loaded(member) => {
                self.apply(member);
                LoadStatus::Loaded
            }
            LoadOutcome::Failed(failure) => {
                tracing::warn!(error = %failure, "member load failed");
                notifier.notify(Toast::destructive(LOAD_FAILED_TITLE, LOAD_FAILED_MESSAGE));
                LoadStatus::Failed(failure)
            }
            LoadOutcome::Cancelled => LoadStatus::Discarded,
        }
    }

    /// Issue, run and apply a load in one go. Only usable while nothing else
    /// needs the session during the fetch.
    pub async fn load<S: MemberSource, N: Notifier>(
        &mut self,
        source: &S,
        notifier: &N,
    ) -> LoadStatus {
        let Some(request) = self.begin_load() else {
            return LoadStatus::Skipped;
        };
        let completion = request.run(source).await;
        self.finish_load(completion, notifier)
    }

    fn apply(&mut self, member: Member) {
        self.draft = MemberDraft::from(&member);

        if let Some(photo) = member.photo.filter(|p| !p.is_empty()) {
            self.photo_preview = Some(photo);
        }

        self.documents = member.documents.unwrap_or_default();
        self.family = member.family.unwrap_or_default();
        self.baseline = BaselineCounts {
            documents: self.documents.len(),
            family: self.family.len(),
        };

        self.marked_dirty = false;
        self.refresh_dirty();
    }

    /// Stop any pending load. The guard is released when the session drops.
    pub fn end(&mut self) {
        self.cancel.cancel();
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use pretty_assertions::assert_eq;
    use types::member::Gender;

    use super::*;
    use crate::guard::LocalInterceptor;

    #[derive(Default)]
    struct FakeSource {
        members: HashMap<MemberId, Member>,
        failing: bool,
        calls: Cell<usize>,
    }

    impl FakeSource {
        fn with(member: Member) -> Self {
            let mut members = HashMap::new();
            members.insert(member.id.clone(), member);
            Self {
                members,
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }
    }

    impl MemberSource for FakeSource {
        async fn fetch_member(&self, id: &MemberId) -> types::Result<Option<Member>> {
            self.calls.set(self.calls.get() + 1);
            if self.failing {
                return Err("backend unavailable".into());
            }
            Ok(self.members.get(id).cloned())
        }
    }

    /// Never resolves.
    struct PendingSource;

    impl MemberSource for PendingSource {
        async fn fetch_member(&self, _id: &MemberId) -> types::Result<Option<Member>> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(RefCell<Vec<Toast>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            self.0.borrow_mut().push(toast);
        }
    }

    fn document(id: &str) -> MemberDocument {
        MemberDocument {
            id: id.into(),
            kind: "KTP".into(),
            file: format!("{id}.png"),
            file_name: None,
            uploaded_at: None,
        }
    }

    fn relative(id: &str) -> FamilyMember {
        FamilyMember {
            id: id.into(),
            name: "Ahmad".into(),
            relation: "Suami".into(),
            address: None,
            phone: None,
        }
    }

    fn member_42() -> Member {
        Member {
            id: MemberId::new("42"),
            name: "Siti Rahayu".into(),
            external_id: Some("198701012010".into()),
            address: "Jl. Merdeka 1".into(),
            phone: "081234567890".into(),
            gender: Gender::P,
            religion: "Islam".into(),
            photo: Some("https://cdn.example/siti.jpg".into()),
            email: None,
            work_unit: None,
            documents: Some(vec![document("d1"), document("d2")]),
            family: Some(vec![relative("k1")]),
        }
    }

    fn session(id: Option<&str>) -> (FormSession, Rc<LocalInterceptor>) {
        let interceptor = Rc::new(LocalInterceptor::new());
        let session = FormSession::new(id.map(MemberId::from), interceptor.clone());
        (session, interceptor)
    }

    async fn loaded_42() -> (FormSession, Rc<LocalInterceptor>) {
        let (mut session, interceptor) = session(Some("42"));
        let status = session
            .load(&FakeSource::with(member_42()), &RecordingNotifier::default())
            .await;
        assert_eq!(status, LoadStatus::Loaded);
        (session, interceptor)
    }

    #[tokio::test]
    async fn create_mode_starts_blank_without_fetching() {
        let (mut session, _) = session(None);
        let source = FakeSource::with(member_42());

        assert_eq!(session.mode(), SessionMode::Create);
        assert!(!session.is_loading());
        assert_eq!(session.draft(), &MemberDraft::default());

        let status = session.load(&source, &RecordingNotifier::default()).await;
        assert_eq!(status, LoadStatus::Skipped);
        assert_eq!(source.calls.get(), 0);
        assert!(!session.is_dirty());
    }

    #[test]
    fn create_mode_ignores_collection_changes() {
        let (mut session, _) = session(None);

        session.set_documents(vec![document("d1")]);
        session.update_family(|family| family.push(relative("k1")));

        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn edit_load_seeds_draft_and_baseline() {
        let (session, _) = loaded_42().await;

        assert_eq!(session.mode(), SessionMode::Edit);
        assert!(!session.is_loading());
        assert!(!session.is_dirty());
        assert_eq!(
            session.baseline(),
            BaselineCounts {
                documents: 2,
                family: 1
            }
        );
        assert_eq!(session.draft(), &MemberDraft::from(&member_42()));
        assert_eq!(session.draft().email, "");
        assert_eq!(session.draft().external_id, "198701012010");
        assert_eq!(session.photo_preview(), Some("https://cdn.example/siti.jpg"));
    }

    #[tokio::test]
    async fn collection_size_drives_dirty_flag() {
        let (mut session, _) = loaded_42().await;

        session.update_documents(|docs| docs.push(document("d3")));
        assert!(session.is_dirty());

        session.update_documents(|docs| {
            docs.pop();
        });
        assert!(!session.is_dirty());

        session.set_family(Vec::new());
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn scalar_edits_do_not_mark_dirty() {
        let (mut session, _) = loaded_42().await;

        session.draft_mut().name = "Siti R.".into();
        session.draft_mut().gender = Gender::L;

        assert!(!session.is_dirty());
        assert_eq!(session.draft().name, "Siti R.");
    }

    #[tokio::test]
    async fn explicit_dirty_mark_survives_until_reload() {
        let (mut session, _) = loaded_42().await;

        session.set_dirty(true);
        assert!(session.is_dirty());

        let status = session
            .load(&FakeSource::with(member_42()), &RecordingNotifier::default())
            .await;
        assert_eq!(status, LoadStatus::Loaded);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn failed_load_notifies_once_and_keeps_defaults() {
        let (mut session, _) = session(Some("99"));
        let notifier = RecordingNotifier::default();
        assert!(session.is_loading());

        let status = session.load(&FakeSource::failing(), &notifier).await;

        assert!(matches!(status, LoadStatus::Failed(LoadFailure::Service(_))));
        assert!(!session.is_loading());
        assert!(!session.is_dirty());
        assert_eq!(session.draft(), &MemberDraft::default());

        let toasts = notifier.0.borrow();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, LOAD_FAILED_TITLE);
        assert_eq!(toasts[0].description, LOAD_FAILED_MESSAGE);
        assert!(toasts[0].is_destructive());
    }

    #[tokio::test]
    async fn missing_record_is_a_load_failure() {
        let (mut session, _) = session(Some("7"));
        let notifier = RecordingNotifier::default();

        let status = session.load(&FakeSource::with(member_42()), &notifier).await;

        assert_eq!(
            status,
            LoadStatus::Failed(LoadFailure::NotFound(MemberId::new("7")))
        );
        assert_eq!(notifier.0.borrow().len(), 1);
    }

    #[tokio::test]
    async fn reloading_same_record_is_idempotent() {
        let (mut session, _) = loaded_42().await;
        let first = (session.draft().clone(), session.baseline());

        session
            .load(&FakeSource::with(member_42()), &RecordingNotifier::default())
            .await;

        assert_eq!((session.draft().clone(), session.baseline()), first);
    }

    #[tokio::test]
    async fn superseded_load_is_discarded() {
        let (mut session, _) = session(Some("42"));
        let notifier = RecordingNotifier::default();

        let stale = session.begin_load().unwrap();
        let fresh = session.begin_load().unwrap();

        let completion = fresh.run(&FakeSource::with(member_42())).await;
        assert_eq!(session.finish_load(completion, &notifier), LoadStatus::Loaded);

        let mut other = member_42();
        other.name = "Someone Else".into();
        other.documents = None;
        let completion = stale.run(&FakeSource::with(other)).await;

        assert_eq!(session.finish_load(completion, &notifier), LoadStatus::Discarded);
        assert_eq!(session.draft().name, "Siti Rahayu");
        assert_eq!(session.baseline().documents, 2);
    }

    #[tokio::test]
    async fn ending_session_cancels_pending_load() {
        let (mut session, _) = session(Some("42"));
        let request = session.begin_load().unwrap();

        session.end();
        let completion = request.run(&PendingSource).await;

        assert!(completion.is_cancelled());
        assert_eq!(
            session.finish_load(completion, &RecordingNotifier::default()),
            LoadStatus::Discarded
        );
    }

    #[tokio::test]
    async fn dropped_session_cancels_request_and_releases_guard() {
        let (mut session, interceptor) = session(Some("42"));
        let request = session.begin_load().unwrap();
        assert_eq!(interceptor.listener_count(), 1);

        drop(session);

        assert_eq!(interceptor.listener_count(), 0);
        let completion = request.run(&FakeSource::with(member_42())).await;
        assert!(completion.is_cancelled());
    }

    #[tokio::test]
    async fn failed_reload_keeps_edits_and_dirty_flag() {
        let (mut session, _) = loaded_42().await;
        session.update_documents(|docs| docs.push(document("d3")));
        session.draft_mut().name = "Siti Edited".into();
        assert!(session.is_dirty());

        let notifier = RecordingNotifier::default();
        let status = session.load(&FakeSource::failing(), &notifier).await;

        assert!(matches!(status, LoadStatus::Failed(LoadFailure::Service(_))));
        assert!(session.is_dirty());
        assert!(!session.is_loading());
        assert_eq!(session.draft().name, "Siti Edited");
        assert_eq!(session.documents().len(), 3);
        assert_eq!(session.family(), &[relative("k1")]);
        assert_eq!(
            session.baseline(),
            BaselineCounts {
                documents: 2,
                family: 1
            }
        );
        assert_eq!(notifier.0.borrow().len(), 1);
    }

    #[tokio::test]
    async fn removing_by_id_tolerates_repeats() {
        let (mut session, _) = loaded_42().await;

        session.remove_document("d2");
        session.remove_document("d2");
        session.remove_relative("k1");
        session.remove_relative("k1");
        session.remove_relative("missing");

        let ids: Vec<_> = session.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d1"]);
        assert!(session.family().is_empty());
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn guard_follows_dirty_flag() {
        let (mut session, interceptor) = loaded_42().await;
        assert!(!interceptor.dispatch().default_prevented());

        session.update_documents(|docs| docs.push(document("d3")));
        assert!(interceptor.dispatch().default_prevented());

        session.update_documents(|docs| {
            docs.pop();
        });
        assert!(!interceptor.dispatch().default_prevented());
    }
}
