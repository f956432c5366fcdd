//! Criteria extraction from free-text queries.
//!
//! `extract` never fails: text the rules do not recognize simply leaves the
//! corresponding criteria unconstrained, so an unparsable query filters too
//! little rather than being rejected. Keyword matching is driven by
//! declarative tables evaluated in a fixed order; each table documents its
//! tie-break.

use crate::catalog::FlightCatalog;
use crate::types::{Alliance, DepartureWindow, SearchCriteria};
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Alliance names and member-airline aliases, matched case-insensitively
/// as substrings. Evaluated top to bottom; a later match overrides an
/// earlier one. Member-airline entries also constrain the airline itself.
const ALLIANCE_ALIASES: &[(&str, Alliance, Option<&str>)] = &[
    ("star alliance", Alliance::StarAlliance, None),
    ("oneworld", Alliance::Oneworld, None),
    ("skyteam", Alliance::SkyTeam, None),
    ("lufthansa", Alliance::StarAlliance, Some("Lufthansa")),
    ("swiss", Alliance::StarAlliance, Some("Swiss")),
    ("turkish airlines", Alliance::StarAlliance, Some("Turkish Airlines")),
    ("singapore airlines", Alliance::StarAlliance, Some("Singapore Airlines")),
    ("united airlines", Alliance::StarAlliance, Some("United Airlines")),
    ("all nippon airways", Alliance::StarAlliance, Some("All Nippon Airways")),
    ("qatar airways", Alliance::Oneworld, Some("Qatar Airways")),
    ("british airways", Alliance::Oneworld, Some("British Airways")),
    ("cathay pacific", Alliance::Oneworld, Some("Cathay Pacific")),
    ("japan airlines", Alliance::Oneworld, Some("Japan Airlines")),
    ("finnair", Alliance::Oneworld, Some("Finnair")),
    ("air france", Alliance::SkyTeam, Some("Air France")),
    ("klm", Alliance::SkyTeam, Some("KLM")),
    ("korean air", Alliance::SkyTeam, Some("Korean Air")),
    ("delta", Alliance::SkyTeam, Some("Delta")),
];

/// Month names and their three-letter abbreviations, matched as whole
/// tokens so that e.g. "japan" never reads as January.
const MONTHS: &[(&str, &str, u32)] = &[
    ("january", "jan", 1),
    ("february", "feb", 2),
    ("march", "mar", 3),
    ("april", "apr", 4),
    ("may", "may", 5),
    ("june", "jun", 6),
    ("july", "jul", 7),
    ("august", "aug", 8),
    ("september", "sep", 9),
    ("october", "oct", 10),
    ("november", "nov", 11),
    ("december", "dec", 12),
];

/// Negation cues recognized before "overnight" and "refundable".
const NEGATION_CUES: &[&str] = &["avoid", "no", "without", "skip"];

/// How many tokens before "overnight" a negation cue may appear.
const NEGATION_WINDOW: usize = 3;

/// Tokens implying zero layovers.
const NONSTOP_CUES: &[&str] = &["nonstop", "non-stop", "direct"];

/// Parses free text into a structured criteria set.
///
/// Built once per catalog: the catalog's origin/destination names form the
/// location gazetteer.
pub struct CriteriaExtractor {
    /// (lowercase name, display name), longest names first so multi-word
    /// locations win over any prefix they contain
    locations: Vec<(String, String)>,
    threshold_re: Regex,
    currency_re: Regex,
    layover_re: Regex,
    year_re: Regex,
}

impl CriteriaExtractor {
    /// Build an extractor over the given catalog's locations.
    pub fn new(catalog: &FlightCatalog) -> Self {
        let mut locations: Vec<(String, String)> = catalog
            .locations()
            .into_iter()
            .map(|name| (name.to_lowercase(), name))
            .collect();
        locations.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Self {
            locations,
            threshold_re: Regex::new(r"(?:under|below|less than|cheaper than)\s*\$?\s*(\d+(?:\.\d+)?)")
                .expect("valid threshold pattern"),
            currency_re: Regex::new(r"\$\s*(\d+(?:\.\d+)?)|(\d+(?:\.\d+)?)\s*(?:usd|dollars)\b")
                .expect("valid currency pattern"),
            layover_re: Regex::new(r"\b(\d+|one|two|three)\s*(?:layovers?|stops?)\b")
                .expect("valid layover pattern"),
            year_re: Regex::new(r"\b(20\d{2})\b").expect("valid year pattern"),
        }
    }

    /// Extract search criteria from free text.
    ///
    /// `today` is the reference date: a month name without an explicit year
    /// resolves to its next future occurrence (the current month maps to
    /// the current year, an earlier month to next year).
    pub fn extract(&self, text: &str, today: NaiveDate) -> SearchCriteria {
        let lower = text.to_lowercase();
        let tokens = tokenize(&lower);

        let mut criteria = SearchCriteria::default();
        self.extract_route(&lower, &mut criteria);
        extract_alliance(&lower, &mut criteria);
        extract_overnight(&tokens, &mut criteria);
        self.extract_departure(&lower, &tokens, today, &mut criteria);
        self.extract_price(&lower, &mut criteria);
        extract_refundable(&tokens, &mut criteria);
        self.extract_layovers(&lower, &tokens, &mut criteria);

        tracing::debug!("Extracted criteria from query: {:?}", criteria);
        criteria
    }

    /// Origin/destination from the location gazetteer.
    ///
    /// "from <loc>" or "<loc> to" claims the origin; "to <loc>" or a bare
    /// mention claims the destination. First assignment of each wins, in
    /// gazetteer order (longest names first).
    fn extract_route(&self, lower: &str, criteria: &mut SearchCriteria) {
        for (key, display) in &self.locations {
            let is_origin =
                lower.contains(&format!("from {}", key)) || lower.contains(&format!("{} to", key));
            if is_origin {
                if criteria.origin.is_none() {
                    criteria.origin = Some(display.clone());
                }
                continue;
            }

            if criteria.destination.is_none()
                && (lower.contains(&format!("to {}", key)) || lower.contains(key.as_str()))
            {
                criteria.destination = Some(display.clone());
            }
        }
    }

    /// Month/year window from month names and an optional 4-digit year.
    fn extract_departure(
        &self,
        lower: &str,
        tokens: &[String],
        today: NaiveDate,
        criteria: &mut SearchCriteria,
    ) {
        let month = tokens.iter().find_map(|token| {
            MONTHS
                .iter()
                .find(|(full, abbr, _)| token == full || token == abbr)
                .map(|(_, _, number)| *number)
        });

        let Some(month) = month else {
            return;
        };

        let year = self
            .year_re
            .captures(lower)
            .and_then(|captures| captures[1].parse::<i32>().ok())
            .unwrap_or_else(|| {
                // Next future occurrence of the month, never a past year
                if month >= today.month() {
                    today.year()
                } else {
                    today.year() + 1
                }
            });

        criteria.departure = Some(DepartureWindow { month, year });
    }

    /// Price ceiling from "under/below/less than N" or a currency-marked
    /// number. The first match in scan order wins.
    fn extract_price(&self, lower: &str, criteria: &mut SearchCriteria) {
        let value = self
            .threshold_re
            .captures(lower)
            .and_then(|captures| captures.get(1))
            .or_else(|| {
                self.currency_re
                    .captures(lower)
                    .and_then(|captures| captures.get(1).or_else(|| captures.get(2)))
            })
            .and_then(|group| group.as_str().parse::<f64>().ok());

        if let Some(value) = value {
            criteria.max_price = Some(value);
        }
    }

    /// Layover ceiling from a numeral next to "layover(s)/stop(s)", or
    /// zero from a nonstop cue.
    fn extract_layovers(&self, lower: &str, tokens: &[String], criteria: &mut SearchCriteria) {
        if let Some(captures) = self.layover_re.captures(lower) {
            let count = match &captures[1] {
                "one" => Some(1),
                "two" => Some(2),
                "three" => Some(3),
                digits => digits.parse::<u32>().ok(),
            };
            if count.is_some() {
                criteria.max_layovers = count;
                return;
            }
        }

        if tokens.iter().any(|t| NONSTOP_CUES.contains(&t.as_str())) {
            criteria.max_layovers = Some(0);
        }
    }
}

/// Alliance (and member airline) from the alias table.
fn extract_alliance(lower: &str, criteria: &mut SearchCriteria) {
    for (pattern, alliance, airline) in ALLIANCE_ALIASES {
        if lower.contains(pattern) {
            criteria.alliance = Some(*alliance);
            if let Some(airline) = airline {
                criteria.airline = Some((*airline).to_string());
            }
        }
    }
}

/// "Avoid overnight layovers" is explicit opt-in: the flag is set only when
/// a negation cue appears within `NEGATION_WINDOW` tokens before an
/// "overnight" token. A bare mention of overnight layovers does nothing.
fn extract_overnight(tokens: &[String], criteria: &mut SearchCriteria) {
    for (position, token) in tokens.iter().enumerate() {
        if !token.starts_with("overnight") {
            continue;
        }

        let window_start = position.saturating_sub(NEGATION_WINDOW);
        let negated = tokens[window_start..position].iter().any(|t| {
            NEGATION_CUES.iter().any(|cue| {
                // Inflections like "avoiding"/"skipping" count; short cues
                // ("no") must match exactly so "november" does not negate.
                t.as_str() == *cue || (cue.len() > 2 && t.starts_with(cue))
            })
        });

        if negated {
            criteria.avoid_overnight_layover = true;
        }
    }
}

/// Refundable-only from "refundable" without an adjacent negation. On
/// conflicting cues the last match in token order wins.
fn extract_refundable(tokens: &[String], criteria: &mut SearchCriteria) {
    let mut verdict: Option<bool> = None;

    for (position, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "non-refundable" | "nonrefundable" => verdict = Some(false),
            "refundable" => {
                let negated = position > 0
                    && matches!(tokens[position - 1].as_str(), "not" | "no" | "non");
                verdict = Some(!negated);
            }
            _ => {}
        }
    }

    criteria.refundable_only = verdict == Some(true);
}

/// Lowercased tokens with surrounding punctuation stripped; internal
/// hyphens survive so "non-refundable" stays one token.
fn tokenize(lower: &str) -> Vec<String> {
    lower
        .split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| c.is_ascii_punctuation() && c != '-')
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}
