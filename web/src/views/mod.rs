mod components;

mod dashboard;
pub use dashboard::Dashboard;

mod anggota;
pub use anggota::DaftarAnggota;

mod member_form;
pub use member_form::MemberFormPage;

mod arus_kas;
pub use arus_kas::ArusKas;

mod pengajuan;
pub use pengajuan::PengajuanSimpanan;
