//! Category label matching
//!
//! Forum parents expose a set of category labels. Guild operators name them
//! freely ("Em Análise", "Procedente", ...), so matching strips diacritics
//! and case before comparing, and accepts substring hits.

use crate::case::Verdict;
use crate::id::LabelId;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A category label offered by a forum parent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
}

/// Synonyms that identify the "under review" label on a forum parent.
pub const UNDER_REVIEW_SYNONYMS: &[&str] = &["em analise", "analise", "under review"];

impl Verdict {
    /// Synonyms that identify this verdict's category label.
    pub fn label_synonyms(&self) -> &'static [&'static str] {
        match self {
            Verdict::Upheld => &["procedente", "verde", "upheld", "green"],
            Verdict::Rejected => &["improcedente", "azul", "rejected", "blue"],
            Verdict::Dismissed => &["indeferido", "branco", "dismissed", "white"],
        }
    }
}

/// Lowercase a label name and strip combining marks, so "Análise" and
/// "analise" compare equal.
pub fn normalize_label(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Find the first label matching any of the synonyms. Labels are tried in
/// enumeration order, each against the whole synonym list, so the parent's
/// own ordering sets priority. A normalized label name matches when it
/// contains a normalized synonym. `None` when nothing matches, which
/// callers treat as "no label to apply".
pub fn find_label<'a>(labels: &'a [Label], synonyms: &[&str]) -> Option<&'a LabelId> {
    let wanted: Vec<String> = synonyms.iter().map(|s| normalize_label(s)).collect();
    for label in labels {
        let name = normalize_label(&label.name);
        if wanted.iter().any(|w| name.contains(w)) {
            return Some(&label.id);
        }
    }
    None
}
