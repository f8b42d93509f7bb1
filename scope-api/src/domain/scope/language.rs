//! Heuristic language detection for search queries.
//!
//! Two word lists drive the decision: a small set of Indonesian
//! function/connective words matched as whole words, and a larger set of
//! Indonesian domain nouns matched by plain substring containment. Any hit
//! from either list selects Indonesian; everything else is English.

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Language {
    #[strum(serialize = "Indonesian")]
    Indonesian,
    #[strum(serialize = "English")]
    English,
}

/// Indonesian function/connective words, matched as whole words only so
/// that e.g. "di" does not fire inside "audit".
const CONNECTIVE_WORDS: &[&str] = &[
    "yang",
    "dan",
    "atau",
    "adalah",
    "untuk",
    "dari",
    "di",
    "ke",
    "pada",
    "dengan",
    "ini",
    "itu",
    "saya",
    "perusahaan",
    "produksi",
    "jasa",
    "kegiatan",
    "layanan",
    "bergerak",
    "bidang",
];

/// Indonesian domain nouns, matched by substring containment.
const DOMAIN_WORDS: &[&str] = &[
    "pertanian",
    "kehutanan",
    "perikanan",
    "konstruksi",
    "manufaktur",
    "perdagangan",
    "pendidikan",
    "kesehatan",
    "keuangan",
    "transportasi",
    "telekomunikasi",
    "perkebunan",
    "peternakan",
    "pengolahan",
    "pabrik",
    "restoran",
    "teknologi",
    "informasi",
    "kendaraan",
    "otomotif",
    "tekstil",
    "pakaian",
    "makanan",
    "minuman",
    "logam",
    "plastik",
    "kimia",
    "elektronik",
    "mesin",
    "peralatan",
    "furniture",
    "kayu",
    "kertas",
    "percetakan",
    "penerbitan",
    "bangunan",
    "properti",
    "semen",
    "beton",
    "baja",
    "aluminium",
    "pertambangan",
    "minyak",
    "gas",
    "listrik",
    "air",
    "limbah",
    "daur",
    "ulang",
    "hotel",
    "pariwisata",
    "komunikasi",
    "perbankan",
    "asuransi",
    "konsultan",
    "hukum",
    "akuntansi",
    "arsitektur",
    "desain",
    "penelitian",
    "pengembangan",
    "pemasaran",
    "periklanan",
    "rumah",
    "sakit",
    "klinik",
    "apotek",
    "laboratorium",
    "farmasi",
    "sekolah",
    "universitas",
    "pelatihan",
    "perpustakaan",
    "museum",
    "bioskop",
    "olahraga",
    "hiburan",
    "seni",
    "budaya",
    "kerajinan",
    "mainan",
    "sarana",
    "prasarana",
    "infrastruktur",
    "fasilitas",
    "pelayanan",
    "angkutan",
    "pengangkutan",
    "distribusi",
    "penyimpanan",
    "gudang",
    "pergudangan",
    "pengelolaan",
    "pemeliharaan",
    "perbaikan",
    "pembuatan",
    "perakitan",
    "penjualan",
    "pembelian",
    "ekspor",
    "impor",
    "industri",
    "usaha",
    "bisnis",
    "dagang",
    "niaga",
    "toko",
    "warung",
    "bengkel",
    "perbengkelan",
    "servis",
    "reparasi",
];

/// Detect whether the query is Indonesian. Empty queries produce no hits
/// and therefore default to English.
pub fn detect_language(query: &str) -> Language {
    let lowered = query.to_lowercase();

    let has_connective = CONNECTIVE_WORDS.iter().any(|word| {
        lowered.contains(&format!(" {} ", word))
            || lowered.starts_with(&format!("{} ", word))
            || lowered.ends_with(&format!(" {}", word))
            || lowered == *word
    });

    let has_domain_word = DOMAIN_WORDS.iter().any(|word| lowered.contains(word));

    if has_connective || has_domain_word {
        Language::Indonesian
    } else {
        Language::English
    }
}
