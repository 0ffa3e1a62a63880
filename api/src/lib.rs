use dioxus::prelude::*;
use types::{
    FinancialSummary,
    keuangan::{CashFlowKind, CashTransaction},
    member::{Member, MemberId, MemberUpsert},
    submission::NewSubmission,
};

#[post("/api/anggota")]
pub async fn list_members() -> ServerFnResult<Vec<Member>> {
    Ok(server::backend()?.list_members().await?)
}

/// `None` when no member has this id.
#[post("/api/anggota/get")]
pub async fn get_member(id: MemberId) -> ServerFnResult<Option<Member>> {
    Ok(server::backend()?.get_member(&id).await?)
}

/// Create or update a member, returning its id.
#[post("/api/anggota/save")]
pub async fn save_member(id: Option<MemberId>, member: MemberUpsert) -> ServerFnResult<MemberId> {
    let saved = server::backend()?.save_member(id.as_ref(), &member).await?;
    tracing::info!(id = %saved.id, "member saved");
    Ok(saved.id)
}

#[post("/api/anggota/ringkasan")]
pub async fn member_summary(id: MemberId) -> ServerFnResult<FinancialSummary> {
    Ok(server::backend()?.member_summary(&id).await?)
}

#[post("/api/pengajuan/create")]
pub async fn create_submission(submission: NewSubmission) -> ServerFnResult<()> {
    tracing::info!(
        member = %submission.member_id,
        kind = submission.kind.label(),
        amount = submission.amount,
        "creating submission"
    );
    server::backend()?.create_submission(&submission).await?;
    Ok(())
}

#[post("/api/keuangan/transaksi")]
pub async fn list_transactions(kind: CashFlowKind) -> ServerFnResult<Vec<CashTransaction>> {
    Ok(server::backend()?.list_transactions(kind).await?)
}

#[post("/api/keuangan/transaksi/delete")]
pub async fn delete_transaction(id: String) -> ServerFnResult<()> {
    server::backend()?.delete_transaction(&id).await?;
    Ok(())
}
