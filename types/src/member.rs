use serde::{Deserialize, Serialize};

/// Backend identifier of a member. Opaque, usually numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MemberId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Laki-laki
    #[default]
    L,
    /// Perempuan
    P,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::L => "Laki-laki",
            Gender::P => "Perempuan",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Gender::L => "L",
            Gender::P => "P",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Gender::L),
            "P" => Some(Gender::P),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDocument {
    pub id: String,
    #[serde(rename = "jenis")]
    pub kind: String,
    pub file: String,
    #[serde(default, rename = "namaFile")]
    pub file_name: Option<String>,
    #[serde(default, rename = "tanggalUpload")]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "hubungan")]
    pub relation: String,
    #[serde(default, rename = "alamat")]
    pub address: Option<String>,
    #[serde(default, rename = "noHp")]
    pub phone: Option<String>,
}

/// Member record as served by the koperasi backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(default, rename = "nip")]
    pub external_id: Option<String>,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "noHp")]
    pub phone: String,
    #[serde(rename = "jenisKelamin")]
    pub gender: Gender,
    #[serde(rename = "agama")]
    pub religion: String,
    #[serde(default, rename = "foto")]
    pub photo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "unitKerja")]
    pub work_unit: Option<String>,
    #[serde(default, rename = "dokumen")]
    pub documents: Option<Vec<MemberDocument>>,
    #[serde(default, rename = "keluarga")]
    pub family: Option<Vec<FamilyMember>>,
}

/// The editable copy of a member record.
///
/// Optional service fields are held as empty strings so form inputs can bind
/// to them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nip")]
    pub external_id: String,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "noHp")]
    pub phone: String,
    #[serde(rename = "jenisKelamin")]
    pub gender: Gender,
    #[serde(rename = "agama")]
    pub religion: String,
    #[serde(rename = "foto")]
    pub photo: String,
    pub email: String,
    #[serde(rename = "unitKerja")]
    pub work_unit: String,
}

/// Body of a create or update request: the draft plus its attached collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberUpsert {
    #[serde(flatten)]
    pub draft: MemberDraft,
    #[serde(rename = "dokumen")]
    pub documents: Vec<MemberDocument>,
    #[serde(rename = "keluarga")]
    pub family: Vec<FamilyMember>,
}

impl Member {
    /// Case-insensitive match of `query` against name, NIP, phone and work unit.
    /// A blank query matches every member.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [
            Some(self.name.as_str()),
            self.external_id.as_deref(),
            Some(self.phone.as_str()),
            self.work_unit.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            external_id: member.external_id.clone().unwrap_or_default(),
            address: member.address.clone(),
            phone: member.phone.clone(),
            gender: member.gender,
            religion: member.religion.clone(),
            photo: member.photo.clone().unwrap_or_default(),
            email: member.email.clone().unwrap_or_default(),
            work_unit: member.work_unit.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_json() -> &'static str {
        r#"{
            "id": "42",
            "nama": "Siti Rahayu",
            "alamat": "Jl. Merdeka 1",
            "noHp": "081234567890",
            "jenisKelamin": "P",
            "agama": "Islam",
            "dokumen": [
                { "id": "d1", "jenis": "KTP", "file": "ktp.png" }
            ]
        }"#
    }

    #[test]
    fn search_matches_name_nip_and_work_unit() {
        let mut member: Member = serde_json::from_str(sample_json()).unwrap();
        member.external_id = Some("198701012010".into());
        member.work_unit = Some("Bagian Keuangan".into());

        assert!(member.matches(""));
        assert!(member.matches("  siti "));
        assert!(member.matches("19870101"));
        assert!(member.matches("keuangan"));
        assert!(member.matches("0812"));
        assert!(!member.matches("budi"));
    }

    #[test]
    fn decodes_backend_member() {
        let member: Member = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(member.id, MemberId::new("42"));
        assert_eq!(member.gender, Gender::P);
        assert_eq!(member.external_id, None);
        assert_eq!(member.documents.as_ref().map(Vec::len), Some(1));
        assert_eq!(member.family, None);
    }

    #[test]
    fn draft_maps_absent_optionals_to_empty_strings() {
        let member: Member = serde_json::from_str(sample_json()).unwrap();
        let draft = MemberDraft::from(&member);

        assert_eq!(
            draft,
            MemberDraft {
                name: "Siti Rahayu".into(),
                external_id: String::new(),
                address: "Jl. Merdeka 1".into(),
                phone: "081234567890".into(),
                gender: Gender::P,
                religion: "Islam".into(),
                photo: String::new(),
                email: String::new(),
                work_unit: String::new(),
            }
        );
    }

    #[test]
    fn default_draft_is_blank_male() {
        let draft = MemberDraft::default();
        assert_eq!(draft.gender, Gender::L);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn upsert_uses_backend_field_names() {
        let upsert = MemberUpsert {
            draft: MemberDraft {
                name: "Budi".into(),
                ..Default::default()
            },
            documents: Vec::new(),
            family: Vec::new(),
        };
        let json = serde_json::to_value(&upsert).unwrap();

        assert_eq!(json["nama"], "Budi");
        assert_eq!(json["jenisKelamin"], "L");
        assert_eq!(json["nip"], "");
        assert!(json["dokumen"].as_array().unwrap().is_empty());
    }

    #[test]
    fn gender_codes() {
        assert_eq!(Gender::from_code("P"), Some(Gender::P));
        assert_eq!(Gender::from_code("X"), None);
        assert_eq!(Gender::L.label(), "Laki-laki");
    }
}
