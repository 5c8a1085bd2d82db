//! Command code classification
//!
//! Audio commands always land in [`AUDIO_CATEGORY`]. General commands are
//! matched against [`RULES`] in order and the first match wins. Exact-code
//! rules come before the prefix rules, and longer prefixes before the
//! single-letter ones they overlap with (`Fd` before `F`).

/// Category every audio command is assigned to
pub const AUDIO_CATEGORY: usize = 12;

/// Category for general commands no rule matches
pub const OTHER_CATEGORY: usize = 16;

/// How a rule tests a command code
#[derive(Debug, Clone, Copy)]
pub enum CodeMatch {
    /// Code equals one of the listed codes
    Exact(&'static [&'static str]),
    /// Code starts with the prefix
    Prefix(&'static str),
    /// Code equals one of the listed codes or starts with the prefix
    ExactOrPrefix(&'static [&'static str], &'static str),
}

impl CodeMatch {
    pub fn matches(&self, code: &str) -> bool {
        match *self {
            CodeMatch::Exact(codes) => codes.contains(&code),
            CodeMatch::Prefix(prefix) => code.starts_with(prefix),
            CodeMatch::ExactOrPrefix(codes, prefix) => {
                codes.contains(&code) || code.starts_with(prefix)
            }
        }
    }
}

/// One classification rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub matcher: CodeMatch,
    pub category: usize,
}

const fn rule(matcher: CodeMatch, category: usize) -> Rule {
    Rule { matcher, category }
}

/// Classification rules for general commands, in priority order
pub const RULES: &[Rule] = &[
    rule(CodeMatch::ExactOrPrefix(&["FbEn", "Flbk"], "Im"), 6),
    rule(CodeMatch::Exact(&["Msg_", "MsgR", "Cht_"]), 8),
    rule(CodeMatch::Exact(&["LBX_", "Date"]), 10),
    rule(CodeMatch::ExactOrPrefix(&["AlEf"], "G"), 11),
    rule(CodeMatch::Exact(&["Scr_"]), 13),
    rule(CodeMatch::Exact(&["Chap", "FrJ_"]), 14),
    rule(CodeMatch::Exact(&["PRum", "TrMc"]), 15),
    rule(CodeMatch::Prefix("En"), 1),
    rule(CodeMatch::Prefix("Cw"), 5),
    rule(CodeMatch::Prefix("Mv"), 7),
    rule(CodeMatch::Prefix("Fd"), 10),
    rule(CodeMatch::Prefix("F"), 0),
    rule(CodeMatch::Prefix("C"), 2),
    rule(CodeMatch::Prefix("M"), 3),
    rule(CodeMatch::Prefix("E"), 4),
    rule(CodeMatch::Prefix("T"), 9),
    rule(CodeMatch::Prefix("P"), 11),
];

/// Category index for a general command code
pub fn classify(code: &str) -> usize {
    RULES
        .iter()
        .find(|r| r.matcher.matches(code))
        .map_or(OTHER_CATEGORY, |r| r.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rules() {
        assert_eq!(classify("FbEn"), 6);
        assert_eq!(classify("Flbk"), 6);
        assert_eq!(classify("Im01"), 6);
        assert_eq!(classify("MsgR"), 8);
        assert_eq!(classify("Cht_"), 8);
        assert_eq!(classify("LBX_"), 10);
        assert_eq!(classify("Date"), 10);
        assert_eq!(classify("AlEf"), 11);
        assert_eq!(classify("GFlg"), 11);
        assert_eq!(classify("Scr_"), 13);
        assert_eq!(classify("Chap"), 14);
        assert_eq!(classify("FrJ_"), 14);
        assert_eq!(classify("PRum"), 15);
        assert_eq!(classify("TrMc"), 15);
    }

    #[test]
    fn test_prefix_rules() {
        assert_eq!(classify("EnBc"), 1);
        assert_eq!(classify("CwSp"), 5);
        assert_eq!(classify("Mv01"), 7);
        assert_eq!(classify("Fd01"), 10);
        assert_eq!(classify("FS__"), 0);
        assert_eq!(classify("CSA_"), 2);
        assert_eq!(classify("MAB_"), 3);
        assert_eq!(classify("EAlp"), 4);
        assert_eq!(classify("TMX_"), 9);
        assert_eq!(classify("PDF_"), 11);
        assert_eq!(classify("Xxxx"), OTHER_CATEGORY);
        assert_eq!(classify(""), OTHER_CATEGORY);
    }

    #[test]
    fn test_exact_codes_beat_overlapping_prefixes() {
        // each of these would otherwise fall to a single-letter prefix rule
        assert_eq!(classify("FbEn"), 6);
        assert_eq!(classify("Msg_"), 8);
        assert_eq!(classify("Chap"), 14);
        assert_eq!(classify("PRum"), 15);
        assert_eq!(classify("TrMc"), 15);
        // "Fd" prefix ahead of plain "F"
        assert_eq!(classify("FdIn"), 10);
        // prefixes are case sensitive
        assert_eq!(classify("fd01"), OTHER_CATEGORY);
    }

    #[test]
    fn test_classification_is_order_independent() {
        let codes = ["Xxxx", "Scr_", "FbEn"];
        let forward: Vec<usize> = codes.iter().map(|c| classify(c)).collect();
        let backward: Vec<usize> = codes.iter().rev().map(|c| classify(c)).collect();
        assert_eq!(forward, vec![OTHER_CATEGORY, 13, 6]);
        assert_eq!(backward, vec![6, 13, OTHER_CATEGORY]);
    }
}
