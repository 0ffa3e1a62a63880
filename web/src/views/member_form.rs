use crate::Route;
use dioxus::prelude::*;
use types::{
    Toast,
    member::{MemberId, MemberUpsert},
};
use ui::{member_form::use_member_form, use_toasts};

use super::components::{DocumentList, FamilyList, FinancialSummaryCards, MemberFields};

#[component]
pub fn MemberFormPage(id: ReadSignal<Option<MemberId>>) -> Element {
    let form = use_member_form(id);
    let mut session = form.session;
    let mut toasts = use_toasts();

    let summary_resource = use_resource(move || {
        let id = id();
        async move {
            match id {
                Some(id) => api::member_summary(id).await.ok(),
                None => None,
            }
        }
    });

    let (is_edit, loading, submitting, dirty, preview, can_submit) = {
        let s = session.read();
        let draft = s.draft();
        (
            s.is_edit(),
            s.is_loading(),
            s.is_submitting(),
            s.is_dirty(),
            s.photo_preview().map(str::to_string),
            !draft.name.trim().is_empty()
                && !draft.address.trim().is_empty()
                && !draft.phone.trim().is_empty(),
        )
    };

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title",
                        if is_edit { "Edit Anggota" } else { "Tambah Anggota" }
                    }
                    if dirty {
                        p { class: "page-subtitle text-warning", "Ada perubahan yang belum disimpan." }
                    }
                }
            }

            if loading {
                div { class: "loading", "Memuat data anggota..." }
            } else {
                if let Some(Some(summary)) = summary_resource() {
                    FinancialSummaryCards { summary }
                }
                div { class: "grid grid-cols-2",
                    div { class: "card",
                        div { class: "card-header",
                            h2 { class: "card-title", "Data Diri" }
                        }
                        div { class: "card-body",
                            if let Some(url) = preview {
                                img { class: "member-photo", src: "{url}", alt: "Foto anggota" }
                            }
                            MemberFields { form }
                        }
                    }
                    div { class: "card",
                        div { class: "card-body",
                            DocumentList { form }
                            div { class: "divider" }
                            FamilyList { form }
                        }
                    }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: submitting,
                        onclick: move |_| {
                            navigator().push(Route::Dashboard {});
                        },
                        "Batal"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: !can_submit || submitting,
                        onclick: move |_| {
                            let (id, upsert) = {
                                let s = session.read();
                                (
                                    s.id().cloned(),
                                    MemberUpsert {
                                        draft: s.draft().clone(),
                                        documents: s.documents().to_vec(),
                                        family: s.family().to_vec(),
                                    },
                                )
                            };
                            spawn(async move {
                                session.write().set_submitting(true);
                                let result = api::save_member(id, upsert).await;
                                session.write().set_submitting(false);

                                match result {
                                    Ok(_) => {
                                        toasts.show(Toast::success("Berhasil", "Data anggota berhasil disimpan"));
                                        navigator().push(Route::Dashboard {});
                                    }
                                    Err(e) => toasts.server_error("Gagal menyimpan data anggota", &e),
                                }
                            });
                        },
                        if submitting { "Menyimpan..." } else { "Simpan" }
                    }
                }
            }
        }
    }
}
