use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::member::{Member, MemberId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Anggota belum dipilih")]
    MemberMissing,
    #[error("Anggota tidak ditemukan")]
    MemberNotFound(MemberId),
    #[error("Jumlah harus lebih dari 0")]
    NonPositiveAmount,
    #[error("Tenor harus antara 1 dan {max} bulan", max = LoanDetails::MAX_TENOR_MONTHS)]
    TenorOutOfRange(u16),
    #[error("Pinjaman yang diangsur belum dipilih")]
    LoanMissing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    Menunggu,
    Disetujui,
    Ditolak,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsCategory {
    #[default]
    Wajib,
    Pokok,
    Sukarela,
}

impl SavingsCategory {
    pub const ALL: [SavingsCategory; 3] = [Self::Wajib, Self::Pokok, Self::Sukarela];

    pub fn label(&self) -> &'static str {
        match self {
            SavingsCategory::Wajib => "Wajib",
            SavingsCategory::Pokok => "Pokok",
            SavingsCategory::Sukarela => "Sukarela",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanCategory {
    #[default]
    Reguler,
    Darurat,
    Sertifikasi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    #[serde(rename = "kategori")]
    pub category: LoanCategory,
    #[serde(rename = "tenor")]
    pub tenor_months: u16,
}

impl LoanDetails {
    pub const MAX_TENOR_MONTHS: u16 = 60;
}

/// What is being applied for. Each category carries only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jenis")]
pub enum SubmissionKind {
    #[serde(rename = "Simpan")]
    Savings {
        #[serde(rename = "kategori")]
        category: SavingsCategory,
    },
    #[serde(rename = "Pinjam")]
    Loan(LoanDetails),
    #[serde(rename = "Angsuran")]
    Installment {
        #[serde(rename = "pinjamanId")]
        loan_id: String,
    },
}

impl SubmissionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionKind::Savings { .. } => "Simpanan",
            SubmissionKind::Loan(_) => "Pinjaman",
            SubmissionKind::Installment { .. } => "Angsuran",
        }
    }

    fn validate(&self) -> Result<(), SubmissionError> {
        match self {
            SubmissionKind::Savings { .. } => Ok(()),
            SubmissionKind::Loan(details) => {
                if (1..=LoanDetails::MAX_TENOR_MONTHS).contains(&details.tenor_months) {
                    Ok(())
                } else {
                    Err(SubmissionError::TenorOutOfRange(details.tenor_months))
                }
            }
            SubmissionKind::Installment { loan_id } if loan_id.trim().is_empty() => {
                Err(SubmissionError::LoanMissing)
            }
            SubmissionKind::Installment { .. } => Ok(()),
        }
    }
}

/// A submission as entered in the form, before it is checked against the
/// member roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub date: Date,
    pub member_id: Option<MemberId>,
    pub amount: i64,
    pub note: String,
    pub kind: SubmissionKind,
}

impl SubmissionDraft {
    pub fn savings(date: Date) -> Self {
        Self {
            date,
            member_id: None,
            amount: 0,
            note: String::new(),
            kind: SubmissionKind::Savings {
                category: SavingsCategory::default(),
            },
        }
    }

    /// Validate the draft and attach the member's name from `members`.
    pub fn prepare(&self, members: &[Member]) -> Result<NewSubmission, SubmissionError> {
        let member_id = self
            .member_id
            .as_ref()
            .ok_or(SubmissionError::MemberMissing)?;
        if self.amount <= 0 {
            return Err(SubmissionError::NonPositiveAmount);
        }
        self.kind.validate()?;

        let member = members
            .iter()
            .find(|m| &m.id == member_id)
            .ok_or_else(|| SubmissionError::MemberNotFound(member_id.clone()))?;

        Ok(NewSubmission {
            date: self.date,
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            amount: self.amount,
            note: self.note.trim().to_string(),
            status: SubmissionStatus::default(),
            kind: self.kind.clone(),
        })
    }
}

/// Validated payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    #[serde(rename = "tanggal")]
    pub date: Date,
    #[serde(rename = "anggotaId")]
    pub member_id: MemberId,
    #[serde(rename = "anggotaNama")]
    pub member_name: String,
    #[serde(rename = "jumlah")]
    pub amount: i64,
    #[serde(rename = "keterangan")]
    pub note: String,
    pub status: SubmissionStatus,
    #[serde(flatten)]
    pub kind: SubmissionKind,
}
