use crate::Route;
use dioxus::prelude::*;
use jiff::{Zoned, civil::Date};
use types::{
    Toast,
    member::{Member, MemberId},
    submission::{SavingsCategory, SubmissionDraft, SubmissionKind},
};
use ui::use_toasts;

#[component]
pub fn PengajuanSimpanan() -> Element {
    let mut toasts = use_toasts();
    let mut draft = use_signal(|| SubmissionDraft::savings(Zoned::now().date()));
    let mut amount_text = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let members = use_resource(move || async move {
        match api::list_members().await {
            Ok(mut members) => {
                members.sort_unstable_by(|a, b| a.name.cmp(&b.name));
                members
            }
            Err(e) => {
                toasts.server_error("Gagal memuat data anggota", &e);
                Vec::new()
            }
        }
    });
    let roster: Vec<Member> = members().unwrap_or_default();
    let loading_members = members.read().is_none();

    let current = draft();
    let selected_member = current
        .member_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let selected_category = match &current.kind {
        SubmissionKind::Savings { category } => category.label(),
        _ => SavingsCategory::default().label(),
    };

    let on_submit = move |_: MouseEvent| {
        let submission = match draft.read().prepare(&members().unwrap_or_default()) {
            Ok(submission) => submission,
            Err(e) => {
                toasts.show(Toast::destructive("Gagal", e.to_string()));
                return;
            }
        };
        spawn(async move {
            submitting.set(true);
            let result = api::create_submission(submission).await;
            submitting.set(false);

            match result {
                Ok(()) => {
                    toasts.show(Toast::success("Berhasil", "Pengajuan simpanan berhasil dibuat"));
                    navigator().push(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!(error = %e, "submission failed");
                    toasts.show(Toast::destructive(
                        "Gagal",
                        "Terjadi kesalahan saat membuat pengajuan simpanan",
                    ));
                }
            }
        });
    };

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Pengajuan Simpanan" }
                    p { class: "page-subtitle", "Catat pengajuan simpanan anggota." }
                }
            }

            div { class: "card",
                div { class: "card-body",
                    div { class: "form-group",
                        label { class: "form-label", r#for: "tanggal", "Tanggal" }
                        input {
                            id: "tanggal",
                            class: "form-input",
                            r#type: "date",
                            value: "{current.date}",
                            disabled: submitting(),
                            onchange: move |e| {
                                if let Ok(date) = e.value().parse::<Date>() {
                                    draft.write().date = date;
                                }
                            },
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "anggota", "Anggota" }
                        select {
                            id: "anggota",
                            class: "form-input",
                            value: "{selected_member}",
                            disabled: submitting() || loading_members,
                            onchange: move |e| {
                                let value = e.value();
                                draft.write().member_id = (!value.is_empty()).then(|| MemberId::from(value.as_str()));
                            },
                            option { value: "",
                                if loading_members { "Memuat anggota..." } else { "Pilih anggota" }
                            }
                            for member in roster {
                                option { key: "{member.id}", value: "{member.id}", "{member.name}" }
                            }
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "kategori", "Kategori" }
                        select {
                            id: "kategori",
                            class: "form-input",
                            value: selected_category,
                            disabled: submitting(),
                            onchange: move |e| {
                                if let Some(category) = SavingsCategory::from_label(&e.value()) {
                                    draft.write().kind = SubmissionKind::Savings { category };
                                }
                            },
                            for category in SavingsCategory::ALL {
                                option { value: category.label(), "{category.label()}" }
                            }
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "jumlah", "Jumlah (Rp)" }
                        input {
                            id: "jumlah",
                            class: "form-input",
                            r#type: "number",
                            min: "0",
                            value: "{amount_text}",
                            disabled: submitting(),
                            oninput: move |e| {
                                let value = e.value();
                                draft.write().amount = value.trim().parse().unwrap_or(0);
                                amount_text.set(value);
                            },
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "keterangan", "Keterangan" }
                        textarea {
                            id: "keterangan",
                            class: "form-input",
                            value: "{current.note}",
                            disabled: submitting(),
                            oninput: move |e| draft.write().note = e.value(),
                        }
                    }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: submitting(),
                        onclick: move |_| {
                            navigator().push(Route::Dashboard {});
                        },
                        "Batal"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: submitting(),
                        onclick: on_submit,
                        if submitting() { "Menyimpan..." } else { "Ajukan" }
                    }
                }
            }
        }
    }
}
