//! Display formatting in the `id-ID` locale.

use jiff::civil::Date;

use crate::keuangan::DateRange;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format a whole-rupiah amount, e.g. `Rp 1.250.000`.
pub fn format_rupiah(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}Rp {}", group_thousands(amount.unsigned_abs()))
}

/// Group digits with `.` as the thousands separator.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `dd MMM yyyy` with Indonesian month abbreviations.
pub fn format_date(date: Date) -> String {
    let month = MONTHS[usize::from(date.month().unsigned_abs()) - 1];
    format!("{:02} {} {}", date.day(), month, date.year())
}

pub fn format_period(range: Option<&DateRange>) -> String {
    match range {
        Some(range) => format!("{} - {}", format_date(range.from), format_date(range.to)),
        None => "Semua waktu".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn rupiah_grouping() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(950), "Rp 950");
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
        assert_eq!(format_rupiah(-75_500), "-Rp 75.500");
    }

    #[test]
    fn dates_use_indonesian_months() {
        assert_eq!(format_date(date(2024, 8, 5)), "05 Agu 2024");
        assert_eq!(format_date(date(2023, 12, 31)), "31 Des 2023");
    }

    #[test]
    fn period_without_range() {
        assert_eq!(format_period(None), "Semua waktu");

        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(format_period(Some(&range)), "01 Jan 2024 - 31 Jan 2024");
    }
}
