use dioxus::prelude::*;
use jiff::{Zoned, civil::Date};
use types::{
    Toast,
    format::{format_date, format_period, format_rupiah},
    keuangan::{CashFlowKind, CashTransaction, DateRange, TransactionFilter, paginate, total},
};
use ui::use_toasts;

const PER_PAGE: usize = 10;

#[component]
pub fn ArusKas() -> Element {
    let mut kind = use_signal(CashFlowKind::default);
    let mut transactions = use_signal(Vec::<CashTransaction>::new);
    let mut loading = use_signal(|| true);
    let mut query = use_signal(String::new);
    let mut range = use_signal(|| Some(DateRange::last_days(Zoned::now().date(), 30)));
    let mut page = use_signal(|| 1usize);
    let mut pending_delete = use_signal(|| None::<CashTransaction>);
    let mut deleting = use_signal(|| false);
    let mut toasts = use_toasts();

    // Reload whenever the selected kind changes
    use_effect(move || {
        let kind = kind();
        spawn(async move {
            loading.set(true);
            match api::list_transactions(kind).await {
                Ok(t) => transactions.set(t),
                Err(e) => toasts.server_error("Gagal memuat transaksi", &e),
            }
            loading.set(false);
        });
    });

    let refresh = move || {
        spawn(async move {
            match api::list_transactions(kind()).await {
                Ok(t) => transactions.set(t),
                Err(e) => toasts.server_error("Gagal memuat transaksi", &e),
            }
        });
    };

    let filter = TransactionFilter {
        kind: kind(),
        query: query(),
        range: range(),
    };
    let all = transactions.read();
    let matching: Vec<CashTransaction> = filter.apply(&all).into_iter().cloned().collect();
    drop(all);
    let sum = total(&matching);
    let current = paginate(&matching, page(), PER_PAGE);
    let (current_page, total_pages) = (current.page, current.total_pages);
    let kind_label = kind().label();
    let period = format_period(range.read().as_ref());
    let (from_value, to_value) = match range() {
        Some(r) => (r.from.to_string(), r.to.to_string()),
        None => (String::new(), String::new()),
    };

    let mut set_bound = move |value: String, is_from: bool| {
        let today = Zoned::now().date();
        let parsed = value.parse::<Date>().ok();
        let mut r = range().unwrap_or_else(|| DateRange::new(today, today));
        match (parsed, is_from) {
            (Some(d), true) => r.from = d,
            (Some(d), false) => r.to = d,
            (None, _) => {
                range.set(None);
                page.set(1);
                return;
            }
        }
        range.set(Some(r));
        page.set(1);
    };

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Arus Kas" }
                    p { class: "page-subtitle", "Periode: {period}" }
                }
            }

            div { class: "tabs",
                for k in [CashFlowKind::Pemasukan, CashFlowKind::Pengeluaran] {
                    button {
                        class: if k == kind() { "tab active" } else { "tab" },
                        onclick: move |_| {
                            kind.set(k);
                            page.set(1);
                        },
                        "{k.label()}"
                    }
                }
            }

            div { class: "filter-bar",
                input {
                    class: "form-input",
                    placeholder: "Cari kategori atau keterangan...",
                    value: "{query}",
                    oninput: move |e| {
                        query.set(e.value());
                        page.set(1);
                    },
                }
                input {
                    class: "form-input",
                    r#type: "date",
                    value: "{from_value}",
                    onchange: move |e| set_bound(e.value(), true),
                }
                input {
                    class: "form-input",
                    r#type: "date",
                    value: "{to_value}",
                    onchange: move |e| set_bound(e.value(), false),
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        range.set(None);
                        page.set(1);
                    },
                    "Semua waktu"
                }
            }

            div { class: "card summary-card",
                p { class: "summary-label", "Total {kind_label}" }
                p { class: "summary-value", {format_rupiah(sum)} }
            }

            if let Some(transaction) = pending_delete() {
                DeleteConfirmModal {
                    transaction,
                    deleting: deleting(),
                    on_close: move |_| pending_delete.set(None),
                    on_confirm: move |id: String| {
                        spawn(async move {
                            deleting.set(true);
                            match api::delete_transaction(id).await {
                                Ok(()) => {
                                    toasts.show(Toast::success("Berhasil", "Transaksi berhasil dihapus"));
                                    refresh();
                                }
                                Err(e) => toasts.server_error("Gagal menghapus transaksi", &e),
                            }
                            deleting.set(false);
                            pending_delete.set(None);
                        });
                    },
                }
            }

            if loading() {
                div { class: "loading", "Memuat transaksi..." }
            } else if current.items.is_empty() {
                p { class: "text-muted", "Tidak ada transaksi" }
            } else {
                div { class: "card",
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "Tanggal" }
                                    th { "Kategori" }
                                    th { "Keterangan" }
                                    th { "Jumlah" }
                                    th {}
                                }
                            }
                            tbody {
                                for t in current.items.iter() {
                                    {
                                        let target = t.clone();
                                        rsx! {
                                            tr { key: "{t.id}",
                                                td { {format_date(t.date)} }
                                                td { "{t.category}" }
                                                td { "{t.note}" }
                                                td { {format_rupiah(t.amount)} }
                                                td {
                                                    button {
                                                        class: "btn btn-link",
                                                        onclick: move |_| pending_delete.set(Some(target.clone())),
                                                        "Hapus"
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
                div { class: "pagination",
                    button {
                        class: "btn btn-secondary",
                        disabled: current_page <= 1,
                        onclick: move |_| page.set(current_page - 1),
                        "Sebelumnya"
                    }
                    span { class: "text-muted",
                        "Halaman {current_page} dari {total_pages} ({current.total_items} transaksi)"
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: current_page >= total_pages,
                        onclick: move |_| page.set(current_page + 1),
                        "Berikutnya"
                    }
                }
            }
        }
    }
}

#[component]
fn DeleteConfirmModal(
    transaction: CashTransaction,
    deleting: bool,
    on_close: EventHandler<()>,
    on_confirm: EventHandler<String>,
) -> Element {
    let id = transaction.id.clone();

    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| if !deleting { on_close.call(()) },
            div { class: "modal modal-sm",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "Hapus Transaksi" }
                    if !deleting {
                        button {
                            class: "modal-close",
                            onclick: move |_| on_close.call(()),
                            "×"
                        }
                    }
                }
                div { class: "modal-body",
                    p {
                        "Hapus transaksi "
                        strong { "{transaction.category}" }
                        " sebesar "
                        strong { {format_rupiah(transaction.amount)} }
                        "?"
                    }
                    p { class: "text-muted", "Tindakan ini tidak dapat dibatalkan." }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-secondary",
                        disabled: deleting,
                        onclick: move |_| on_close.call(()),
                        "Batal"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: deleting,
                        onclick: move |_| on_confirm.call(id.clone()),
                        if deleting { "Menghapus..." } else { "Hapus" }
                    }
                }
            }
        }
    }
}
