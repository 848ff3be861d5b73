//! Code and label vocabulary shared by input parsing and report output.
//!
//! Every categorical value in the tool has exactly one machine code (what
//! appears in CVSS vectors and config files) and one human-readable label
//! (what appears in reports). Both directions go through the same table, so
//! `label -> value -> code -> value` is lossless.

/// A closed set of values with a bidirectional code/label table.
pub trait Vocabulary: Copy + Eq + 'static {
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Position in `ALL`. Used to index the decision tables.
    fn ordinal(self) -> usize;

    /// Case-insensitive lookup by machine code. Surrounding whitespace is ignored.
    fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.code().eq_ignore_ascii_case(raw))
    }

    /// Case-insensitive lookup by label.
    fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(raw))
    }

    /// Accept either a code or a label.
    fn parse(raw: &str) -> Option<Self> {
        Self::from_code(raw).or_else(|| Self::from_label(raw))
    }
}

/// Declares a fieldless enum together with its `Vocabulary` table.
///
/// Serde uses the machine code, `Display` uses the label.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant ),+
        }

        impl $crate::models::vocabulary::Vocabulary for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn code(self) -> &'static str {
                match self { $( Self::$variant => $code ),+ }
            }

            fn label(self) -> &'static str {
                match self { $( Self::$variant => $label ),+ }
            }

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::models::vocabulary::Vocabulary::label(*self))
            }
        }
    };
}

pub(crate) use vocabulary;
