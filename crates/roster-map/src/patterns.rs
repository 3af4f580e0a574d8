//! Bilingual (English/Russian) header keyword patterns per roster field.

use std::sync::LazyLock;

use regex::Regex;
use roster_model::RosterField;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("static header pattern is valid")
}

static PARENT_UNIT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)parent|upper|вышестоящ|родител|головн"));

static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\bunit\b|department|\bdept\b|division|подразделени|отдел|служб|департамент")
});

static TEAM: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)team|squad|crew|group|команд|групп|бригад|расч[её]т|звено"));

static FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)full\s*name|^\s*name\s*$|employee|person|staff|фио|ф\.\s*и\.\s*о|сотрудник|^\s*имя|фамили",
    )
});

static ROLE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)role|position|\bjob\b|должност|роль|позици"));

static RANK: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)rank|grade|звани|разряд"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)phone|mobile|\btel\b|телефон|\bтел\b|моб"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)e-?mail|\bmail\b|почт|эл\.?\s*адрес"));

/// Returns the keyword pattern for `field`.
pub fn field_pattern(field: RosterField) -> &'static Regex {
    match field {
        RosterField::ParentUnit => &PARENT_UNIT,
        RosterField::Unit => &UNIT,
        RosterField::Team => &TEAM,
        RosterField::FullName => &FULL_NAME,
        RosterField::Role => &ROLE,
        RosterField::Rank => &RANK,
        RosterField::Phone => &PHONE,
        RosterField::Email => &EMAIL,
    }
}

/// Whether `column` looks like a header for `field`.
///
/// Unit headers that also read as parent-unit headers are rejected so the
/// two columns of a two-level hierarchy are not confused.
pub fn matches_field(field: RosterField, column: &str) -> bool {
    if !field_pattern(field).is_match(column) {
        return false;
    }
    match field {
        RosterField::Unit => !PARENT_UNIT.is_match(column),
        _ => true,
    }
}
