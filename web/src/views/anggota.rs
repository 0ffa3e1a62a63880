use crate::Route;
use dioxus::prelude::*;
use types::member::Member;
use ui::use_toasts;

#[component]
pub fn DaftarAnggota() -> Element {
    let mut members = use_signal(Vec::<Member>::new);
    let mut loading = use_signal(|| true);
    let mut query = use_signal(String::new);
    let mut toasts = use_toasts();

    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match api::list_members().await {
                Ok(mut m) => {
                    m.sort_unstable_by(|a, b| a.name.cmp(&b.name));
                    members.set(m);
                }
                Err(e) => toasts.server_error("Gagal memuat data anggota", &e),
            }
            loading.set(false);
        });
    });

    let visible: Vec<Member> = members
        .read()
        .iter()
        .filter(|m| m.matches(&query.read()))
        .cloned()
        .collect();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Daftar Anggota" }
                    p { class: "page-subtitle", "Pilih anggota untuk mengubah datanya." }
                }
                div { class: "page-header-actions",
                    Link { to: Route::MemberCreate {}, class: "btn btn-primary", "Tambah Anggota" }
                }
            }

            div { class: "filter-bar",
                input {
                    class: "form-input",
                    placeholder: "Cari nama, NIP, no. HP, atau unit kerja...",
                    value: "{query}",
                    oninput: move |e| query.set(e.value()),
                }
            }

            if loading() {
                div { class: "loading", "Memuat data anggota..." }
            } else if visible.is_empty() {
                p { class: "text-muted", "Tidak ada anggota" }
            } else {
                div { class: "card",
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "Nama" }
                                    th { "NIP" }
                                    th { "No. HP" }
                                    th { "Unit Kerja" }
                                }
                            }
                            tbody {
                                for member in visible {
                                    {
                                        let id = member.id.clone();
                                        rsx! {
                                            tr {
                                                key: "{member.id}",
                                                class: "clickable",
                                                onclick: move |_| {
                                                    navigator().push(Route::member_edit(id.clone()));
                                                },
                                                td { "{member.name}" }
                                                td { {member.external_id.clone().unwrap_or_default()} }
                                                td { "{member.phone}" }
                                                td { {member.work_unit.clone().unwrap_or_default()} }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
