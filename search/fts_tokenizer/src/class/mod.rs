//! Character classification.
//!
//! Every decoded character falls in exactly one of three buckets. The
//! thresholds are exact code point values; which punctuation and accented
//! letters land where depends on them bit for bit.

/// Classification of one decoded character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuneClass {
    /// Ends a run and never becomes token content: code points below `!`
    /// (controls and space), DEL, and undecodable bytes.
    Breaker,
    /// Non-breaker code points below `U+07FF` (1- and 2-byte UTF-8).
    Latin,
    /// Everything else: 3- and 4-byte UTF-8, plus `U+07FF` itself.
    Cjk,
}

/// First code point that is not a breaker control.
const FIRST_VISIBLE: u32 = 0x21;

/// ASCII DEL.
const DEL: u32 = 0x7F;

/// Exclusive upper bound of the Latin class.
const LATIN_LIMIT: u32 = 0x7FF;

impl RuneClass {
    /// Classify a decoded character.
    ///
    /// `None` stands for a decode failure and is a breaker. So is a literal
    /// `U+FFFD`, which is indistinguishable from one.
    #[inline]
    pub fn of(decoded: Option<char>) -> Self {
        match decoded {
            None | Some(char::REPLACEMENT_CHARACTER) => RuneClass::Breaker,
            Some(c) => {
                let cp = u32::from(c);
                if cp < FIRST_VISIBLE || cp == DEL {
                    RuneClass::Breaker
                } else if cp < LATIN_LIMIT {
                    RuneClass::Latin
                } else {
                    RuneClass::Cjk
                }
            }
        }
    }

    /// Returns `true` for [`RuneClass::Breaker`].
    #[inline]
    pub fn is_breaker(self) -> bool {
        self == RuneClass::Breaker
    }
}
