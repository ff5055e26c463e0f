//! Header keyword classifiers.
//!
//! Each locale contributes keyword fragments per slot. Fragments from all locales are merged
//! into one case-insensitive, word-bounded pattern per slot, and the patterns are evaluated in
//! [`CLASSIFIER_ORDER`]. Adding a language means adding a `Keywords` entry to [`LOCALES`].

use crate::model::{Slot, CURRENCY_GLYPHS};
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// The order in which header classifiers are tried against a single header.
pub(crate) const CLASSIFIER_ORDER: [Slot; 4] =
    [Slot::Date, Slot::Amount, Slot::Category, Slot::Description];

/// Keyword fragments (regex syntax, lowercase) for one language.
pub(crate) struct Keywords {
    pub(crate) locale: &'static str,
    pub(crate) date: &'static [&'static str],
    pub(crate) amount: &'static [&'static str],
    pub(crate) category: &'static [&'static str],
    pub(crate) description: &'static [&'static str],
    /// Headers that only ever hold outgoing money when a sheet splits the amount in two.
    pub(crate) debit: &'static [&'static str],
    /// Headers that only ever hold incoming money when a sheet splits the amount in two.
    pub(crate) credit: &'static [&'static str],
    /// Amount-like headers that never carry a transaction's own value.
    pub(crate) running_total: &'static [&'static str],
}

const ENGLISH: Keywords = Keywords {
    locale: "en",
    date: &[
        "date",
        "dated",
        "post(ed|ing)?",
        "time(stamp)?",
        "day",
        "when",
        "booked",
    ],
    amount: &[
        "amount",
        "amt",
        "sum",
        "total",
        "value",
        "price",
        "cost",
        "debits?",
        "credits?",
        "balance",
        "withdrawals?",
        "deposits?",
        "spent",
        "paid",
        "inflow",
        "outflow",
        "money (in|out)",
    ],
    category: &[
        "categor(y|ies)",
        "cat",
        "type",
        "group",
        "class(ification)?",
        "labels?",
        "tags?",
        "bucket",
        "envelope",
    ],
    description: &[
        "desc(ription)?",
        "memo",
        "merchant",
        "payee",
        "details?",
        "narrat(ion|ive)",
        "particulars",
        "notes?",
        "name",
        "reference",
        "vendor",
        "item",
        "what",
    ],
    debit: &["debits?", "withdrawals?", "outflow", "money out"],
    credit: &["credits?", "deposits?", "inflow", "money in"],
    running_total: &["balance", "running total"],
};

const INDONESIAN: Keywords = Keywords {
    locale: "id",
    date: &["tanggal", "tgl", "waktu", "hari"],
    amount: &["jumlah", "nominal", "harga", "biaya", "saldo", "debet", "kredit"],
    category: &["kategori", "jenis", "golongan", "kelompok"],
    description: &["keterangan", "deskripsi", "uraian", "catatan", "nama", "rincian"],
    debit: &["debet", "pengeluaran"],
    credit: &["kredit", "pemasukan"],
    running_total: &["saldo"],
};

/// Every keyword set that header classification draws on.
pub(crate) const LOCALES: &[Keywords] = &[ENGLISH, INDONESIAN];

/// A named header predicate.
pub(crate) struct HeaderClassifier {
    slot: Slot,
    pattern: Regex,
}

impl HeaderClassifier {
    pub(crate) fn slot(&self) -> Slot {
        self.slot
    }

    /// `header` must already be passed through [`normalize_header`].
    pub(crate) fn matches(&self, header: &str) -> bool {
        self.pattern.is_match(header)
    }
}

/// The header classifiers, in evaluation order.
pub(crate) fn classifiers() -> &'static [HeaderClassifier] {
    static CLASSIFIERS: OnceLock<Vec<HeaderClassifier>> = OnceLock::new();
    CLASSIFIERS.get_or_init(|| {
        let locales: Vec<&str> = LOCALES.iter().map(|k| k.locale).collect();
        trace!("Building header classifiers for locales {}", locales.join(", "));
        CLASSIFIER_ORDER
            .into_iter()
            .map(|slot| {
                let glyphs: &[char] = if slot == Slot::Amount {
                    CURRENCY_GLYPHS
                } else {
                    &[]
                };
                HeaderClassifier {
                    slot,
                    pattern: keyword_pattern(|k| fragments(k, slot), glyphs),
                }
            })
            .collect()
    })
}

/// Matches headers that hold only outgoing money, e.g. `Debit`.
pub(crate) fn debit_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| keyword_pattern(|k| k.debit, &[]))
}

/// Matches headers that hold only incoming money, e.g. `Credit`.
pub(crate) fn credit_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| keyword_pattern(|k| k.credit, &[]))
}

/// Matches running-balance headers.
pub(crate) fn running_total_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| keyword_pattern(|k| k.running_total, &[]))
}

/// Lowercases and trims `header`, turning `_`, `-` and `.` separators and camel-case humps into
/// spaces so that `Transaction_Date` and `SubCategory` read as `transaction date` and
/// `sub category`.
pub(crate) fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len() + 4);
    let mut prev: Option<char> = None;
    for c in header.trim().chars() {
        let hump = c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_numeric());
        match c {
            '_' | '-' | '.' => out.push(' '),
            _ if hump => {
                out.push(' ');
                out.extend(c.to_lowercase());
            }
            _ => out.extend(c.to_lowercase()),
        }
        prev = Some(c);
    }
    out.trim().to_string()
}

fn fragments(keywords: &Keywords, slot: Slot) -> &'static [&'static str] {
    match slot {
        Slot::Date => keywords.date,
        Slot::Description => keywords.description,
        Slot::Amount => keywords.amount,
        Slot::Category => keywords.category,
    }
}

/// Joins the fragments chosen by `select` from every locale into `\b(?:a|b|c)\b`, optionally
/// followed by an alternation of literal glyphs.
fn keyword_pattern(
    select: impl Fn(&Keywords) -> &'static [&'static str],
    glyphs: &[char],
) -> Regex {
    let words = LOCALES
        .iter()
        .flat_map(|k| select(k).iter().copied())
        .collect::<Vec<&str>>()
        .join("|");
    let mut pattern = format!(r"\b(?:{words})\b");
    if !glyphs.is_empty() {
        let glyphs: String = glyphs
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        pattern.push_str(&format!("|[{glyphs}]"));
    }
    Regex::new(&pattern).expect("header keyword fragments form a valid pattern")
}
