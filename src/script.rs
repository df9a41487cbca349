//! Script detection
//!
//! Decides whether extracted text contains a given script and whether it
//! carries glyphs that almost never appear in real text for that script.
//! Those glyphs are what a broken font mapping or a bad recognizer tends to
//! emit, so their presence marks the text as corrupted.

use std::ops::RangeInclusive;

use serde::Serialize;

/// A Unicode script and the glyphs that flag corrupted text in it.
#[derive(Debug, Clone)]
pub struct ScriptProfile {
    pub name: &'static str,
    /// Unicode block the script lives in
    pub block: RangeInclusive<char>,
    /// Rarely used code points that indicate misrecognition
    pub suspect_glyphs: &'static [char],
}

/// Tamil (U+0B80..U+0BFF)
pub const TAMIL: ScriptProfile = ScriptProfile {
    name: "tamil",
    block: '\u{0B80}'..='\u{0BFF}',
    suspect_glyphs: &[
        '\u{0BA5}', '\u{0BA7}', '\u{0BAD}', '\u{0BA6}', '\u{0BAB}', '\u{0BAC}', '\u{0BB6}',
        '\u{0BB7}',
    ],
};

/// Result of scanning a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextAssessment {
    pub has_script: bool,
    pub has_suspect_glyphs: bool,
}

impl TextAssessment {
    /// Script text is present and nothing suggests it is corrupted
    pub fn is_clean_script(&self) -> bool {
        self.has_script && !self.has_suspect_glyphs
    }

    /// Script text is present but looks corrupted
    pub fn is_suspect_script(&self) -> bool {
        self.has_script && self.has_suspect_glyphs
    }
}

impl ScriptProfile {
    /// True if any character of `text` falls inside the script's block
    pub fn contains_script(&self, text: &str) -> bool {
        text.chars().any(|c| self.block.contains(&c))
    }

    /// True if `text` contains any of the suspect glyphs
    pub fn has_suspect_glyphs(&self, text: &str) -> bool {
        text.chars().any(|c| self.suspect_glyphs.contains(&c))
    }

    pub fn assess(&self, text: &str) -> TextAssessment {
        TextAssessment {
            has_script: self.contains_script(text),
            has_suspect_glyphs: self.has_suspect_glyphs(text),
        }
    }
}
