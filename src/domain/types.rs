//! Shared domain enumerations for listing controls and locale handling.

use serde::{Deserialize, Serialize};

/// Ordering applied to the visible set.
///
/// `Unordered` is the defensive fallback for unrecognized control values:
/// its comparator reports every pair equal, so a stable sort leaves the
/// current order untouched. It is produced only by [`SortOrder::parse`] and
/// is not offered to UI code as a selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Newest,
    Oldest,
    Popular,
    Liked,
    Unordered,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Popular => "popular",
            SortOrder::Liked => "liked",
            SortOrder::Unordered => "unordered",
        }
    }

    /// Map a raw control value to an order, falling back to `Unordered`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "newest" => SortOrder::Newest,
            "oldest" => SortOrder::Oldest,
            "popular" => SortOrder::Popular,
            "liked" => SortOrder::Liked,
            _ => SortOrder::Unordered,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Newest
    }
}

/// Category restriction applied to the working set.
///
/// The value `all` is reserved: it means "no restriction" and can never
/// name a real category. Any other value must equal a record's category
/// exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(raw.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(value) => value == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL,
            CategoryFilter::Category(value) => value,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

/// Site languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Fa,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fa => "fa",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fa => "فارسی",
        }
    }

    /// Exact tag match, used for stored preferences.
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw {
            "en" => Some(Language::En),
            "fa" => Some(Language::Fa),
            _ => None,
        }
    }

    /// Loose match for free-form control labels ("Persian", "فارسی", a
    /// `data-lang` attribute). Anything not recognizably Persian is English.
    pub fn normalize(raw: &str) -> Self {
        let value = raw.trim().to_lowercase();
        if value.contains("fa")
            || value.contains("فار")
            || value.contains("persian")
            || value.contains("farsi")
        {
            Language::Fa
        } else {
            Language::En
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::Fa => TextDirection::Rtl,
        }
    }
}

/// Document text direction implied by a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}
