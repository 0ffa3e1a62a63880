use crate::Route;
use dioxus::prelude::*;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Dashboard" }
                p { class: "page-subtitle", "Selamat datang di konsol administrasi koperasi." }
            }
            div { class: "dashboard-grid",
                Link {
                    to: Route::MemberCreate {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Tambah Anggota" }
                    p { class: "dashboard-card-desc",
                        "Daftarkan anggota baru beserta dokumen dan data keluarganya."
                    }
                }
                Link {
                    to: Route::PengajuanSimpanan {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Pengajuan Simpanan" }
                    p { class: "dashboard-card-desc",
                        "Catat pengajuan simpanan wajib, pokok, atau sukarela."
                    }
                }
                Link {
                    to: Route::ArusKas {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Arus Kas" }
                    p { class: "dashboard-card-desc",
                        "Pantau pemasukan dan pengeluaran per periode."
                    }
                }
            }
        }
    }
}
