use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowKind {
    #[default]
    Pemasukan,
    Pengeluaran,
}

impl CashFlowKind {
    pub fn label(&self) -> &'static str {
        match self {
            CashFlowKind::Pemasukan => "Pemasukan",
            CashFlowKind::Pengeluaran => "Pengeluaran",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTransaction {
    pub id: String,
    #[serde(rename = "jenis")]
    pub kind: CashFlowKind,
    #[serde(rename = "tanggal")]
    pub date: Date,
    #[serde(rename = "kategori")]
    pub category: String,
    #[serde(rename = "jumlah")]
    pub amount: i64,
    #[serde(default, rename = "keterangan")]
    pub note: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Inclusive range of civil dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Self {
        Self { from, to }
    }

    /// The `days` days leading up to and including `today`.
    pub fn last_days(today: Date, days: i32) -> Self {
        Self {
            from: today.saturating_sub(days.days()),
            to: today,
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: CashFlowKind,
    pub query: String,
    pub range: Option<DateRange>,
}

impl TransactionFilter {
    pub fn new(kind: CashFlowKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn matches(&self, transaction: &CashTransaction) -> bool {
        if transaction.kind != self.kind {
            return false;
        }

        if let Some(range) = &self.range
            && !range.contains(transaction.date)
        {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || transaction.category.to_lowercase().contains(&query)
            || transaction.note.to_lowercase().contains(&query)
            || transaction.id.to_lowercase().contains(&query)
    }

    pub fn apply<'a>(&self, transactions: &'a [CashTransaction]) -> Vec<&'a CashTransaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

pub fn total<'a>(transactions: impl IntoIterator<Item = &'a CashTransaction>) -> i64 {
    transactions.into_iter().map(|t| t.amount).sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `items` into the requested 1-based page, clamping out-of-range pages.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());

    Page {
        items: items[start.min(end)..end].to_vec(),
        page,
        total_pages,
        total_items: items.len(),
    }
}
