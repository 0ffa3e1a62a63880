use dioxus::prelude::*;
use types::{
    FinancialSummary,
    format::format_rupiah,
    member::{FamilyMember, Gender, MemberDocument},
};
use ui::member_form::MemberForm;

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: String,
    #[props(default = "text")] input_type: &'static str,
    #[props(default)] placeholder: &'static str,
    #[props(default)] disabled: bool,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: id, "{label}" }
            input {
                id,
                class: "form-input",
                r#type: input_type,
                placeholder,
                disabled,
                value: "{value}",
                oninput: move |e| oninput.call(e.value()),
            }
        }
    }
}

/// Identity fields of the member draft.
#[component]
pub fn MemberFields(form: MemberForm) -> Element {
    let mut session = form.session;
    let (draft, disabled) = {
        let s = session.read();
        (s.draft().clone(), s.is_submitting() || s.is_loading())
    };

    rsx! {
        TextField {
            id: "nama",
            label: "Nama *",
            value: draft.name,
            placeholder: "e.g. Siti Rahayu",
            disabled,
            oninput: move |v| session.write().draft_mut().name = v,
        }
        TextField {
            id: "nip",
            label: "NIP",
            value: draft.external_id,
            disabled,
            oninput: move |v| session.write().draft_mut().external_id = v,
        }
        TextField {
            id: "alamat",
            label: "Alamat *",
            value: draft.address,
            disabled,
            oninput: move |v| session.write().draft_mut().address = v,
        }
        TextField {
            id: "no_hp",
            label: "No. HP *",
            value: draft.phone,
            input_type: "tel",
            placeholder: "e.g. 081234567890",
            disabled,
            oninput: move |v| session.write().draft_mut().phone = v,
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "jenis_kelamin", "Jenis Kelamin" }
            select {
                id: "jenis_kelamin",
                class: "form-input",
                disabled,
                value: "{draft.gender.code()}",
                onchange: move |e| {
                    if let Some(gender) = Gender::from_code(&e.value()) {
                        session.write().draft_mut().gender = gender;
                    }
                },
                for gender in [Gender::L, Gender::P] {
                    option { value: gender.code(), "{gender.label()}" }
                }
            }
        }
        TextField {
            id: "agama",
            label: "Agama",
            value: draft.religion,
            disabled,
            oninput: move |v| session.write().draft_mut().religion = v,
        }
        TextField {
            id: "email",
            label: "Email",
            value: draft.email,
            input_type: "email",
            placeholder: "e.g. siti@example.com",
            disabled,
            oninput: move |v| session.write().draft_mut().email = v,
        }
        TextField {
            id: "unit_kerja",
            label: "Unit Kerja",
            value: draft.work_unit,
            disabled,
            oninput: move |v| session.write().draft_mut().work_unit = v,
        }
        TextField {
            id: "foto",
            label: "URL Foto",
            value: draft.photo,
            input_type: "url",
            disabled,
            oninput: move |v: String| {
                let mut s = session.write();
                s.set_photo_preview((!v.is_empty()).then(|| v.clone()));
                s.draft_mut().photo = v;
            },
        }
    }
}

#[component]
pub fn DocumentList(form: MemberForm) -> Element {
    let mut session = form.session;
    let mut kind = use_signal(String::new);
    let mut file = use_signal(String::new);
    let mut added = use_signal(|| 0u32);

    let documents: Vec<MemberDocument> = session.read().documents().to_vec();
    let no_documents = documents.is_empty();
    let can_add = !kind.read().trim().is_empty() && !file.read().trim().is_empty();

    rsx! {
        h3 { class: "section-header", "Dokumen" }
        if no_documents {
            p { class: "text-muted", "Belum ada dokumen" }
        }
        ul { class: "attached-list",
            for doc in documents {
                {
                    let id = doc.id.clone();
                    rsx! {
                        li { key: "{doc.id}", class: "attached-item",
                            span { class: "attached-title", "{doc.kind}" }
                            span { class: "text-muted", {doc.file_name.clone().unwrap_or_else(|| doc.file.clone())} }
                            button {
                                class: "btn btn-link",
                                onclick: move |_| session.write().remove_document(&id),
                                "Hapus"
                            }
                        }
                    }
                }
            }
        }
        div { class: "attached-add",
            input {
                class: "form-input",
                placeholder: "Jenis (KTP, KK, ...)",
                value: "{kind}",
                oninput: move |e| kind.set(e.value()),
            }
            input {
                class: "form-input",
                r#type: "url",
                placeholder: "URL berkas",
                value: "{file}",
                oninput: move |e| file.set(e.value()),
            }
            button {
                class: "btn btn-secondary",
                disabled: !can_add,
                onclick: move |_| {
                    added += 1;
                    let document = MemberDocument {
                        id: format!("baru-{}", added()),
                        kind: kind.read().trim().to_string(),
                        file: file.read().trim().to_string(),
                        file_name: None,
                        uploaded_at: None,
                    };
                    session.write().update_documents(|docs| docs.push(document));
                    kind.set(String::new());
                    file.set(String::new());
                },
                "Tambah Dokumen"
            }
        }
    }
}

#[component]
pub fn FamilyList(form: MemberForm) -> Element {
    let mut session = form.session;
    let mut name = use_signal(String::new);
    let mut relation = use_signal(String::new);
    let mut added = use_signal(|| 0u32);

    let family: Vec<FamilyMember> = session.read().family().to_vec();
    let no_family = family.is_empty();
    let can_add = !name.read().trim().is_empty() && !relation.read().trim().is_empty();

    rsx! {
        h3 { class: "section-header", "Keluarga" }
        if no_family {
            p { class: "text-muted", "Belum ada data keluarga" }
        }
        ul { class: "attached-list",
            for relative in family {
                {
                    let id = relative.id.clone();
                    rsx! {
                        li { key: "{relative.id}", class: "attached-item",
                            span { class: "attached-title", "{relative.name}" }
                            span { class: "text-muted", "{relative.relation}" }
                            button {
                                class: "btn btn-link",
                                onclick: move |_| session.write().remove_relative(&id),
                                "Hapus"
                            }
                        }
                    }
                }
            }
        }
        div { class: "attached-add",
            input {
                class: "form-input",
                placeholder: "Nama",
                value: "{name}",
                oninput: move |e| name.set(e.value()),
            }
            select {
                class: "form-input",
                value: "{relation}",
                onchange: move |e| relation.set(e.value()),
                option { value: "", "Hubungan..." }
                for r in ["Suami", "Istri", "Anak", "Orang Tua", "Saudara"] {
                    option { value: r, "{r}" }
                }
            }
            button {
                class: "btn btn-secondary",
                disabled: !can_add,
                onclick: move |_| {
                    added += 1;
                    let relative = FamilyMember {
                        id: format!("baru-{}", added()),
                        name: name.read().trim().to_string(),
                        relation: relation.read().clone(),
                        address: None,
                        phone: None,
                    };
                    session.write().update_family(|family| family.push(relative));
                    name.set(String::new());
                    relation.set(String::new());
                },
                "Tambah Keluarga"
            }
        }
    }
}

#[component]
pub fn FinancialSummaryCards(summary: FinancialSummary) -> Element {
    let cards = [
        ("Total Simpanan", summary.savings),
        ("Total Pinjaman", summary.total_loan()),
        ("Sisa Pinjaman", summary.outstanding_loan),
        ("Total Angsuran", summary.installments_paid),
        ("Total Tunggakan", summary.arrears),
        ("SHU", summary.shu),
    ];

    rsx! {
        div { class: "summary-grid",
            for (label, amount) in cards {
                div { class: "card summary-card",
                    p { class: "summary-label", "{label}" }
                    p { class: "summary-value", {format_rupiah(amount)} }
                }
            }
        }
    }
}
