use dioxus::prelude::*;

mod views;

use types::member::MemberId;
use ui::{ToastStack, use_discard_interceptor_provider, use_toast_provider};
use views::{ArusKas, DaftarAnggota, Dashboard, MemberFormPage, PengajuanSimpanan};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/anggota")]
        DaftarAnggota {},
        #[route("/anggota/tambah")]
        MemberCreate {},
        #[route("/anggota/:id/edit")]
        MemberEdit { id: MemberId },
        #[route("/keuangan/arus-kas")]
        ArusKas {},
        #[route("/transaksi/pengajuan/simpanan")]
        PengajuanSimpanan {},
}

impl Route {
    pub fn member_edit(id: MemberId) -> Self {
        Route::MemberEdit { id }
    }
}

#[component]
fn MemberCreate() -> Element {
    rsx! { MemberFormPage { id: None } }
}

#[component]
fn MemberEdit(id: MemberId) -> Element {
    rsx! { MemberFormPage { id: Some(id) } }
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init().await?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Koperasi" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

struct MenuSection {
    title: &'static str,
    items: &'static [(&'static str, fn() -> Route)],
}

const MENU: &[MenuSection] = &[
    MenuSection {
        title: "Menu Utama",
        items: &[("Dashboard", || Route::Dashboard {})],
    },
    MenuSection {
        title: "Koperasi",
        items: &[
            ("Daftar Anggota", || Route::DaftarAnggota {}),
            ("Tambah Anggota", || Route::MemberCreate {}),
            ("Pengajuan Simpanan", || Route::PengajuanSimpanan {}),
        ],
    },
    MenuSection {
        title: "Keuangan",
        items: &[("Arus Kas", || Route::ArusKas {})],
    },
];

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = matches!(
        (&current_route, &to),
        (Route::Dashboard {}, Route::Dashboard {})
            | (Route::DaftarAnggota {}, Route::DaftarAnggota {})
            | (Route::MemberEdit { .. }, Route::DaftarAnggota {})
            | (Route::MemberCreate {}, Route::MemberCreate {})
            | (Route::ArusKas {}, Route::ArusKas {})
            | (Route::PengajuanSimpanan {}, Route::PengajuanSimpanan {})
    );

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

#[component]
fn AppLayout() -> Element {
    use_toast_provider();
    use_discard_interceptor_provider();

    rsx! {
        div { class: "app-layout",
            aside { class: "sidebar",
                div { class: "sidebar-header",
                    span { class: "sidebar-logo", "Koperasi" }
                }
                nav { class: "sidebar-nav",
                    for section in MENU {
                        div { class: "sidebar-section",
                            div { class: "sidebar-section-title", "{section.title}" }
                            for (title, route) in section.items {
                                NavLink { to: route(), "{title}" }
                            }
                        }
                    }
                }
            }
            main { class: "main-content",
                ToastStack {}
                Outlet::<Route> {}
            }
        }
    }
}
