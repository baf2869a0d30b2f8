use serde::Serialize;
use std::fmt;

/// Readable grouping of Penn Treebank style POS tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PosCategory {
    Adjective,
    Adverb,
    PrepositionOrConjunction,
    Determiner,
    Interjection,
    Modal,
    Particle,
    CoordinatingConjunction,
    NounSingular,
    NounPlural,
    Verb,
    VerbPast,
    VerbGerund,
    VerbPastParticiple,
    VerbPresent,
    WhWord,
    Unknown,
}

impl PosCategory {
    /// Classifies the first whitespace-separated token of `pos`.
    ///
    /// Rule order matters: the `JJ`/`RB` substring checks run before the
    /// exact matches, so `JJR` and `RBS` land on adjective and adverb.
    pub fn from_tag(pos: &str) -> Self {
        let token = pos.split_whitespace().next().unwrap_or("");
        if token.contains("JJ") {
            return PosCategory::Adjective;
        }
        if token.contains("RB") {
            return PosCategory::Adverb;
        }
        match token {
            "IN" => PosCategory::PrepositionOrConjunction,
            "DT" => PosCategory::Determiner,
            "UH" => PosCategory::Interjection,
            "MD" => PosCategory::Modal,
            "RP" => PosCategory::Particle,
            "CC" => PosCategory::CoordinatingConjunction,
            "NN" | "NNP" => PosCategory::NounSingular,
            "NNS" | "NNPS" => PosCategory::NounPlural,
            "VB" => PosCategory::Verb,
            "VBD" => PosCategory::VerbPast,
            "VBG" => PosCategory::VerbGerund,
            "VBN" => PosCategory::VerbPastParticiple,
            "VBP" | "VBZ" => PosCategory::VerbPresent,
            "WDT" | "WP" | "WP$" | "WRB" => PosCategory::WhWord,
            _ => PosCategory::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PosCategory::Adjective => "Adjective",
            PosCategory::Adverb => "Adverb",
            PosCategory::PrepositionOrConjunction => "Preposition / Conjunction",
            PosCategory::Determiner => "Determiner",
            PosCategory::Interjection => "Interjection",
            PosCategory::Modal => "Modal",
            PosCategory::Particle => "Particle",
            PosCategory::CoordinatingConjunction => "Co-ordinating conjunction",
            PosCategory::NounSingular => "Noun (singular)",
            PosCategory::NounPlural => "Noun (plural)",
            PosCategory::Verb => "Verb",
            PosCategory::VerbPast => "Verb (past)",
            PosCategory::VerbGerund => "Verb (gerund)",
            PosCategory::VerbPastParticiple => "Verb (past part.)",
            PosCategory::VerbPresent => "Verb (present)",
            PosCategory::WhWord => "Wh- word",
            PosCategory::Unknown => "Unknown type",
        }
    }

    pub fn is_known(self) -> bool {
        self != PosCategory::Unknown
    }
}

impl fmt::Display for PosCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Human-readable name for a POS tag; unrecognised tags map to `"Unknown type"`.
pub fn pos_tag_to_readable(pos: &str) -> &'static str {
    PosCategory::from_tag(pos).label()
}
