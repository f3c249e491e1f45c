use crate::models::Hit;
use crate::store::{Matcher, Organization, PatternStore, SignalRule};
use crate::utils::{EngineError, Result};

/// Lower-cased, whitespace-collapsed view of the input with a byte map back
/// to the original text, so evidence spans keep their original casing.
pub(crate) struct NormalizedText {
    pub text: String,
    /// Original byte offset of the char each normalized byte came from.
    map: Vec<usize>,
    original_len: usize,
}

impl NormalizedText {
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut map = Vec::with_capacity(original.len());
        let mut pending_gap = false;

        for (offset, ch) in original.char_indices() {
            if ch.is_whitespace() {
                if !text.is_empty() {
                    pending_gap = true;
                }
                continue;
            }
            if pending_gap {
                text.push(' ');
                map.push(offset);
                pending_gap = false;
            }
            for lowered in ch.to_lowercase() {
                let before = text.len();
                text.push(lowered);
                for _ in before..text.len() {
                    map.push(offset);
                }
            }
        }

        Self {
            text,
            map,
            original_len: original.len(),
        }
    }

    /// Original substring covered by a normalized byte range. The end of a
    /// range maps to the start of the following char, which can drag in the
    /// whitespace gap before it, so the result is trimmed on the right.
    pub fn span<'a>(&self, original: &'a str, start: usize, end: usize) -> &'a str {
        let from = self.map.get(start).copied().unwrap_or(self.original_len);
        let to = self.map.get(end).copied().unwrap_or(self.original_len);
        if from >= to {
            return "";
        }
        original[from..to].trim_end()
    }
}

/// Run every rule in the store against the text. Rules contribute zero, one,
/// or many hits each; a failing rule contributes nothing and is logged,
/// never aborting the run.
pub fn extract(store: &PatternStore, original: &str) -> Vec<Hit> {
    let norm = NormalizedText::new(original);
    let mut hits = Vec::new();

    for rule in store.rules() {
        match evaluate(rule, &norm, original) {
            Ok(found) => hits.extend(found),
            Err(e) => {
                tracing::warn!(rule = %rule.id, error = %e, "rule evaluation failed, skipping rule")
            }
        }
    }

    hits.sort_by(|a, b| a.offset.cmp(&b.offset).then_with(|| a.rule_id.cmp(&b.rule_id)));
    hits
}

fn evaluate(rule: &SignalRule, norm: &NormalizedText, original: &str) -> Result<Vec<Hit>> {
    let text = norm.text.as_str();
    let mut out = Vec::new();

    match &rule.matcher {
        Matcher::Pattern(re) => {
            for m in re.find_iter(text) {
                out.push(make_hit(rule, norm, original, m.start(), m.end()));
            }
        }
        Matcher::Proximity {
            first,
            second,
            window,
        } => {
            for a in first.find_iter(text) {
                let lo = floor_char_boundary(text, a.start().saturating_sub(*window));
                let hi_raw = a.end().checked_add(*window).ok_or_else(|| {
                    EngineError::RuleEvaluation(format!(
                        "proximity window overflow in rule '{}'",
                        rule.id
                    ))
                })?;
                let hi = ceil_char_boundary(text, hi_raw.min(text.len()));
                let neighbor = second
                    .find_iter(&text[lo..hi])
                    .map(|b| (lo + b.start(), lo + b.end()))
                    .find(|&(s, e)| (s, e) != (a.start(), a.end()));
                if let Some((b_start, b_end)) = neighbor {
                    let start = a.start().min(b_start);
                    let end = a.end().max(b_end);
                    out.push(make_hit(rule, norm, original, start, end));
                }
            }
        }
        Matcher::DomainMismatch { organizations, url } => {
            let claimed: Vec<&Organization> = organizations
                .iter()
                .filter(|org| org.mention.is_match(text))
                .collect();
            if claimed.is_empty() {
                return Ok(out);
            }
            for m in url.find_iter(text) {
                let host = url_host(m.as_str());
                if claimed.iter().any(|org| host_has_label(host, &org.token)) {
                    continue;
                }
                out.push(make_hit(rule, norm, original, m.start(), m.end()));
            }
        }
    }

    Ok(out)
}

fn make_hit(
    rule: &SignalRule,
    norm: &NormalizedText,
    original: &str,
    start: usize,
    end: usize,
) -> Hit {
    let evidence = norm.span(original, start, end);
    let explanation = rule.render(evidence);
    Hit::new(
        rule.id.clone(),
        rule.category,
        rule.weight,
        start,
        evidence,
        explanation,
    )
}

fn url_host(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or(rest);
    host.strip_prefix("www.").unwrap_or(host)
}

/// A host belongs to an organization only when the condensed org token is a
/// whole dot-separated label. Substring containment would let lookalike
/// hosts like `secure-paypal.xyz` pass as legitimate.
fn host_has_label(host: &str, token: &str) -> bool {
    host.split('.').any(|label| label == token)
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
