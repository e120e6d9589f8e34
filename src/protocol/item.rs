//! Gopher item types.
//!
//! The first character of every directory line names the kind of resource
//! it points to. RFC 1436 defines `0`-`9`, `+`, `T`, `g` and `I`; the rest
//! are widely deployed extensions.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// ItemType
// ============================================================================

/// Gopher item type character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum ItemType {
    /// `0` - Text file.
    File,
    /// `1` - Directory (menu).
    #[default]
    Directory,
    /// `2` - CSO phone-book server.
    CsoPhoneBook,
    /// `3` - Error.
    Error,
    /// `4` - BinHexed Macintosh file.
    BinHex,
    /// `5` - DOS binary archive.
    DosBinary,
    /// `6` - UNIX uuencoded file.
    UuEncoded,
    /// `7` - Index-search server.
    Search,
    /// `8` - Telnet session.
    Telnet,
    /// `9` - Binary file.
    Binary,
    /// `+` - Redundant (mirror) server.
    Mirror,
    /// `T` - TN3270 session.
    Tn3270,
    /// `g` - GIF image.
    Gif,
    /// `I` - Other image.
    Image,
    /// `i` - Informational line.
    Info,
    /// `h` - HTML document.
    Html,
    /// `s` - Sound file.
    Sound,
    /// `d` - Document (PDF and friends).
    Document,
    /// `p` - PNG image.
    Png,
    /// `:` - Bitmap image.
    Bitmap,
    /// `;` - Movie.
    Movie,
    /// `<` - Sound (alternate).
    SoundAlt,
    /// Any other character.
    Other(char),
}

// ============================================================================
// ItemType - Implementation
// ============================================================================

impl ItemType {
    /// Returns the wire character for this type.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::File => '0',
            Self::Directory => '1',
            Self::CsoPhoneBook => '2',
            Self::Error => '3',
            Self::BinHex => '4',
            Self::DosBinary => '5',
            Self::UuEncoded => '6',
            Self::Search => '7',
            Self::Telnet => '8',
            Self::Binary => '9',
            Self::Mirror => '+',
            Self::Tn3270 => 'T',
            Self::Gif => 'g',
            Self::Image => 'I',
            Self::Info => 'i',
            Self::Html => 'h',
            Self::Sound => 's',
            Self::Document => 'd',
            Self::Png => 'p',
            Self::Bitmap => ':',
            Self::Movie => ';',
            Self::SoundAlt => '<',
            Self::Other(c) => c,
        }
    }

    /// Returns `true` for lines rendered as plain info text.
    ///
    /// Error items (`3`) are shown like info lines.
    #[inline]
    #[must_use]
    pub const fn is_info(self) -> bool {
        matches!(self, Self::Info | Self::Error)
    }

    /// Returns `true` if the response body is a menu.
    #[inline]
    #[must_use]
    pub const fn is_menu(self) -> bool {
        matches!(self, Self::Directory | Self::Search)
    }

    /// Returns `true` if the response body is human-readable text.
    #[inline]
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::File | Self::Html | Self::Error | Self::Info)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<char> for ItemType {
    fn from(c: char) -> Self {
        match c {
            '0' => Self::File,
            '1' => Self::Directory,
            '2' => Self::CsoPhoneBook,
            '3' => Self::Error,
            '4' => Self::BinHex,
            '5' => Self::DosBinary,
            '6' => Self::UuEncoded,
            '7' => Self::Search,
            '8' => Self::Telnet,
            '9' => Self::Binary,
            '+' => Self::Mirror,
            'T' => Self::Tn3270,
            'g' => Self::Gif,
            'I' => Self::Image,
            'i' => Self::Info,
            'h' => Self::Html,
            's' => Self::Sound,
            'd' => Self::Document,
            'p' => Self::Png,
            ':' => Self::Bitmap,
            ';' => Self::Movie,
            '<' => Self::SoundAlt,
            other => Self::Other(other),
        }
    }
}

impl From<ItemType> for char {
    fn from(item: ItemType) -> Self {
        item.as_char()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ============================================================================
// Tests
// ============================================================================
