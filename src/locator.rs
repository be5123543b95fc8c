//! Lesson locator: global lesson id -> language, local lesson number, tier.
//!
//! The catalog is an ordered table of contiguous language ranges. Each range
//! carries its own tier thresholds, evaluated in order with inclusive upper
//! bounds; the last tier has no bound and catches everything above.
//!
//! Both the content store and the UI-facing endpoints resolve ids through
//! the same [`Catalog`], so lesson files and lesson labels cannot drift
//! apart.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Content type reported for every lesson.
pub const CONTENT_TYPE_MIXED: &str = "mixed";

/// One tier rule: lessons with `local <= max_local` get `label`.
///
/// The terminal rule of a range has `max_local = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRule {
    pub label: String,
    #[serde(default)]
    pub max_local: Option<u32>,
}

/// A contiguous block of global ids owned by one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRange {
    pub code: String,
    pub start_id: u32,
    pub end_id: u32,
    pub tiers: Vec<TierRule>,
}

impl LanguageRange {
    /// Number of lessons in this range.
    pub fn width(&self) -> u32 {
        self.end_id - self.start_id + 1
    }

    pub fn contains(&self, id: i64) -> bool {
        i64::from(self.start_id) <= id && id <= i64::from(self.end_id)
    }

    /// First tier whose bound covers `local`, falling through to the terminal tier.
    pub fn tier_for(&self, local: u32) -> Option<&str> {
        self.tiers
            .iter()
            .find(|rule| rule.max_local.is_none_or(|max| local <= max))
            .map(|rule| rule.label.as_str())
    }
}

/// Result of resolving a global lesson id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonLocation {
    pub global_id: u32,
    pub language_code: String,
    pub local_lesson_number: u32,
    pub tier: String,
    pub content_type: &'static str,
}

/// Lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// Caller supplied an id outside `1..=max`.
    OutOfRange { id: i64, max: u32 },
    /// Language code not present in the catalog.
    UnknownLanguage(String),
    /// The range table itself is inconsistent.
    Configuration(String),
}

impl std::fmt::Display for LocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocateError::OutOfRange { id, max } => {
                write!(f, "Lesson id {} is outside 1..={}", id, max)
            }
            LocateError::UnknownLanguage(code) => write!(f, "Unknown language: {}", code),
            LocateError::Configuration(msg) => write!(f, "Invalid lesson range table: {}", msg),
        }
    }
}

impl std::error::Error for LocateError {}

// ==================== Builtin table ====================

type TierSpec = &'static [(&'static str, Option<u32>)];

const JLPT_TIERS: TierSpec = &[
    ("kana", Some(30)),
    ("jlpt-n5", Some(70)),
    ("jlpt-n4", Some(105)),
    ("jlpt-n3", Some(140)),
    ("jlpt-n2", Some(170)),
    ("jlpt-n1", None),
];

const WIDE_TIERS: TierSpec = &[
    ("beginner", Some(50)),
    ("intermediate", Some(100)),
    ("advanced", Some(150)),
    ("expert", None),
];

const NARROW_TIERS: TierSpec = &[
    ("beginner", Some(25)),
    ("intermediate", Some(50)),
    ("advanced", Some(75)),
    ("expert", None),
];

/// (code, start_id, end_id, tiers), ascending by start_id.
const BUILTIN_RANGES: &[(&str, u32, u32, TierSpec)] = &[
    ("ja", 1, 200, JLPT_TIERS),
    ("zh", 201, 400, WIDE_TIERS),
    ("ko", 401, 600, WIDE_TIERS),
    ("ru", 601, 700, NARROW_TIERS),
    ("de", 701, 800, NARROW_TIERS),
    ("es", 801, 1000, WIDE_TIERS),
    ("hr", 1001, 1100, NARROW_TIERS),
];

fn builtin_ranges() -> Vec<LanguageRange> {
    BUILTIN_RANGES
        .iter()
        .map(|&(code, start_id, end_id, tiers)| LanguageRange {
            code: code.to_string(),
            start_id,
            end_id,
            tiers: tiers
                .iter()
                .map(|&(label, max_local)| TierRule {
                    label: label.to_string(),
                    max_local,
                })
                .collect(),
        })
        .collect()
}

static BUILTIN_CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// The process-wide builtin catalog.
pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN_CATALOG
}

/// Resolve `id` against the builtin catalog.
pub fn locate(id: i64) -> Result<LessonLocation, LocateError> {
    BUILTIN_CATALOG.locate(id)
}

// ==================== Catalog ====================

/// Validated, immutable range table.
#[derive(Debug, Clone)]
pub struct Catalog {
    ranges: Vec<LanguageRange>,
}

impl Catalog {
    /// Build a catalog, checking that the ranges partition `1..=max`
    /// and every tier table is well formed.
    pub fn new(ranges: Vec<LanguageRange>) -> Result<Self, LocateError> {
        validate_ranges(&ranges)?;
        Ok(Self { ranges })
    }

    /// The builtin table.
    ///
    /// # Panics
    /// If the compiled-in table fails validation, which is a build defect.
    pub fn builtin() -> Self {
        match Self::new(builtin_ranges()) {
            Ok(catalog) => catalog,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn languages(&self) -> &[LanguageRange] {
        &self.ranges
    }

    /// Highest valid global id.
    pub fn max_id(&self) -> u32 {
        self.ranges.last().map(|r| r.end_id).unwrap_or(0)
    }

    pub fn range_for(&self, code: &str) -> Option<&LanguageRange> {
        self.ranges.iter().find(|r| r.code == code)
    }

    /// Inverse of [`Catalog::locate`]: language + local number -> global id.
    pub fn global_id(&self, code: &str, local: u32) -> Result<u32, LocateError> {
        let range = self
            .range_for(code)
            .ok_or_else(|| LocateError::UnknownLanguage(code.to_string()))?;
        if local == 0 || local > range.width() {
            return Err(LocateError::OutOfRange {
                id: i64::from(local),
                max: range.width(),
            });
        }
        Ok(range.start_id + local - 1)
    }

    /// Resolve a global lesson id.
    pub fn locate(&self, id: i64) -> Result<LessonLocation, LocateError> {
        let max = self.max_id();
        if id < 1 || id > i64::from(max) {
            return Err(LocateError::OutOfRange { id, max });
        }

        let range = self
            .ranges
            .iter()
            .find(|r| r.contains(id))
            .ok_or_else(|| LocateError::Configuration(format!("no range covers lesson {}", id)))?;

        // contains() bounds id to [start_id, end_id], both u32
        let global_id = id as u32;
        let local = global_id - range.start_id + 1;
        let tier = range.tier_for(local).ok_or_else(|| {
            LocateError::Configuration(format!("language '{}' has no terminal tier", range.code))
        })?;

        Ok(LessonLocation {
            global_id,
            language_code: range.code.clone(),
            local_lesson_number: local,
            tier: tier.to_string(),
            content_type: CONTENT_TYPE_MIXED,
        })
    }
}

fn validate_ranges(ranges: &[LanguageRange]) -> Result<(), LocateError> {
    let bad = |msg: String| Err(LocateError::Configuration(msg));

    let Some(first) = ranges.first() else {
        return bad("table is empty".to_string());
    };
    if first.start_id != 1 {
        return bad(format!("first range '{}' starts at {}, not 1", first.code, first.start_id));
    }

    let mut codes = HashSet::new();
    for (i, range) in ranges.iter().enumerate() {
        if range.code.is_empty() {
            return bad(format!("range {} has an empty language code", i));
        }
        if !codes.insert(range.code.as_str()) {
            return bad(format!("language '{}' appears twice", range.code));
        }
        if range.start_id > range.end_id {
            return bad(format!(
                "'{}' starts at {} after it ends at {}",
                range.code, range.start_id, range.end_id
            ));
        }
        if let Some(prev) = i.checked_sub(1).map(|j| &ranges[j]) {
            if prev.end_id.checked_add(1) != Some(range.start_id) {
                return bad(format!(
                    "'{}' starts at {} but '{}' ends at {}",
                    range.code, range.start_id, prev.code, prev.end_id
                ));
            }
        }
        validate_tiers(range)?;
    }

    Ok(())
}

fn validate_tiers(range: &LanguageRange) -> Result<(), LocateError> {
    let bad = |msg: String| Err(LocateError::Configuration(format!("'{}': {}", range.code, msg)));

    let Some((terminal, bounded)) = range.tiers.split_last() else {
        return bad("no tiers".to_string());
    };
    if terminal.max_local.is_some() {
        return bad(format!("terminal tier '{}' must not have a bound", terminal.label));
    }

    let mut prev = 0;
    for rule in bounded {
        let Some(max) = rule.max_local else {
            return bad(format!("only the last tier may be unbounded, found '{}'", rule.label));
        };
        if max <= prev {
            return bad(format!("tier '{}' bound {} is not above {}", rule.label, max, prev));
        }
        if max >= range.width() {
            return bad(format!(
                "tier '{}' bound {} leaves no lessons for '{}'",
                rule.label, max, terminal.label
            ));
        }
        prev = max;
    }

    if range.tiers.iter().any(|rule| rule.label.is_empty()) {
        return bad("empty tier label".to_string());
    }

    Ok(())
}
