// ABOUTME: Ingredient name normalization for pantry and pairing comparisons
// ABOUTME: Canonical keys, base-ingredient extraction, and loose similarity checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! # Ingredient Normalizer
//!
//! Pantry entries are typed by hand ("Citrons verts.", "menthe (fraîche)") while
//! recipe ingredients come from the catalogue. Both sides go through
//! [`normalize_ingredient`] before any comparison so that casing, spacing,
//! trailing punctuation, parenthetical notes and common plurals do not defeat
//! matching.
//!
//! The normalization is idempotent: `normalize(normalize(x)) == normalize(x)`.
//! Singular forms in [`PLURAL_FORMS`] therefore never appear as plural keys.

use regex::Regex;
use std::sync::OnceLock;

/// Plural to singular lookup, applied token by token
pub const PLURAL_FORMS: &[(&str, &str)] = &[
    // French
    ("citrons", "citron"),
    ("limes", "lime"),
    ("oranges", "orange"),
    ("pamplemousses", "pamplemousse"),
    ("fraises", "fraise"),
    ("framboises", "framboise"),
    ("myrtilles", "myrtille"),
    ("cerises", "cerise"),
    ("pêches", "pêche"),
    ("pommes", "pomme"),
    ("poires", "poire"),
    ("tomates", "tomate"),
    ("oignons", "oignon"),
    ("échalotes", "échalote"),
    ("gousses", "gousse"),
    ("carottes", "carotte"),
    ("champignons", "champignon"),
    ("poivrons", "poivron"),
    ("olives", "olive"),
    ("câpres", "câpre"),
    ("feuilles", "feuille"),
    ("brins", "brin"),
    ("glaçons", "glaçon"),
    ("cubes", "cube"),
    ("œufs", "œuf"),
    ("oeufs", "oeuf"),
    ("jaunes", "jaune"),
    ("blancs", "blanc"),
    ("tranches", "tranche"),
    ("rondelles", "rondelle"),
    ("quartiers", "quartier"),
    ("zestes", "zeste"),
    ("herbes", "herbe"),
    ("épices", "épice"),
    ("croûtons", "croûton"),
    ("verts", "vert"),
    ("vertes", "verte"),
    ("rouges", "rouge"),
    ("noirs", "noir"),
    // English
    ("lemons", "lemon"),
    ("eggs", "egg"),
    ("tomatoes", "tomato"),
    ("onions", "onion"),
    ("leaves", "leaf"),
    ("berries", "berry"),
    ("strawberries", "strawberry"),
    ("raspberries", "raspberry"),
    ("cherries", "cherry"),
    ("wedges", "wedge"),
    ("slices", "slice"),
];

/// Qualifier patterns stripped by [`base_ingredient`], tried in order
///
/// Each pattern runs against the normalized name and must expose the base
/// ingredient as its first capture group.
const BASE_INGREDIENT_PATTERNS: &[&str] = &[
    r"^(?:jus|sirop|purée|nectar|coulis) (?:de la |de l'|des |du |de |d')(.+)$",
    r"^(?:zeste|feuille|brin|quartier|tranche|rondelle|trait|pincée|gousse) (?:de la |de l'|des |du |de |d')(.+)$",
    r"^(.+?) (?:frais|fraîche|fraîches|pressé|pressée|râpé|râpée|haché|hachée|émincé|émincée)$",
    r"^(.+?) (?:en poudre|en morceaux|en grains|en branche)$",
    r"^(?:fresh|freshly squeezed|chopped|crushed) (.+)$",
    r"^(.+?) (?:juice|zest|syrup|leaf|wedge|slice|twist)$",
];

fn parenthetical_regex() -> Option<&'static Regex> {
    static PARENTHETICAL: OnceLock<Option<Regex>> = OnceLock::new();
    PARENTHETICAL
        .get_or_init(|| Regex::new(r"\([^)]*\)").ok())
        .as_ref()
}

fn base_ingredient_regexes() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        BASE_INGREDIENT_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

fn is_trailing_noise(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(c, '…' | '–' | '—' | '«' | '»' | '·')
}

fn singularize(token: &str) -> &str {
    PLURAL_FORMS
        .iter()
        .find(|(plural, _)| *plural == token)
        .map_or(token, |(_, singular)| *singular)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Produce the canonical comparison key for an ingredient name
///
/// Lowercases, drops parenthetical notes, collapses whitespace, strips
/// trailing punctuation and maps known plurals to their singular. Returns an
/// empty string for empty input.
#[must_use]
pub fn normalize_ingredient(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    let without_notes = match parenthetical_regex() {
        Some(re) => re.replace_all(&lowered, " ").into_owned(),
        None => lowered,
    };
    let collapsed = collapse_whitespace(&without_notes);
    let stripped = collapsed.trim_end_matches(is_trailing_noise);

    stripped
        .split_whitespace()
        .map(singularize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`normalize_ingredient`] for values that may be absent
#[must_use]
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize_ingredient).unwrap_or_default()
}

/// Normalize an equipment name (no plural mapping)
#[must_use]
pub fn normalize_equipment(raw: &str) -> String {
    collapse_whitespace(&raw.to_lowercase())
}

/// Extract the base ingredient from a qualified name
///
/// "Jus de citron" gives "citron", "menthe fraîche" gives "menthe". Names no
/// pattern recognizes come back normalized but otherwise unchanged.
#[must_use]
pub fn base_ingredient(raw: &str) -> String {
    let normalized = normalize_ingredient(raw);

    base_ingredient_regexes()
        .iter()
        .find_map(|re| {
            re.captures(&normalized)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_owned())
        })
        .filter(|base| !base.is_empty())
        .unwrap_or(normalized)
}

/// Loose similarity: equal normalized forms, or one contained in the other
///
/// An empty name is only similar to another empty name.
#[must_use]
pub fn is_similar(a: &str, b: &str) -> bool {
    let a = normalize_ingredient(a);
    let b = normalize_ingredient(b);

    if a.is_empty() || b.is_empty() {
        return a == b;
    }

    a == b || a.contains(&b) || b.contains(&a)
}
