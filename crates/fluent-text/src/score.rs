//! Fuzzy string scoring.
//!
//! Scores are in `[0, 1]`. A query character found right after the previous
//! match is worth more than one found further along, matches that start a
//! word earn an acronym bonus, and exact-case matches earn a small bonus.
//! Characters are extended grapheme clusters.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

const CONSECUTIVE_SCORE: f64 = 0.7;
const SKIP_SCORE: f64 = 0.1;
const ACRONYM_BONUS: f64 = 0.8;
const SAME_CASE_BONUS: f64 = 0.1;
const FIRST_CHAR_BONUS: f64 = 0.15;
const FIRST_CHAR_BONUS_CEILING: f64 = 0.85;

/// Score how well `query` matches `source`.
///
/// Without `fuzziness`, any query character missing from the rest of
/// `source` yields 0. With it, each miss divides the final score by a
/// growing penalty of `1 - fuzziness` per miss. `fuzziness` is clamped to
/// `[0, 1]`; NaN counts as no fuzziness.
pub fn fuzzy_score(source: &str, query: &str, fuzziness: Option<f64>) -> f64 {
    if source == query {
        return 1.0;
    }
    if source.is_empty() || query.is_empty() {
        return 0.0;
    }

    let fuzziness = fuzziness.filter(|f| !f.is_nan()).map(|f| f.clamp(0.0, 1.0));
    let fuzzy_factor = fuzziness.map_or(0.0, |f| 1.0 - f);

    let src: Vec<&str> = source.graphemes(true).collect();
    let src_lower: Vec<String> = src.iter().map(|g| g.to_lowercase()).collect();
    let qry: Vec<&str> = query.graphemes(true).collect();
    let qry_lower: Vec<String> = qry.iter().map(|g| g.to_lowercase()).collect();

    let mut running = 0.0;
    let mut fuzzies = 1.0;
    let mut start_at = 0usize;

    for (i, needle) in qry_lower.iter().enumerate() {
        let found = src_lower[start_at..]
            .iter()
            .position(|g| g == needle)
            .map(|offset| start_at + offset);
        let Some(idx) = found else {
            if fuzziness.is_none() {
                return 0.0;
            }
            fuzzies += fuzzy_factor;
            continue;
        };

        let mut char_score = if idx == start_at {
            CONSECUTIVE_SCORE
        } else {
            let mut s = SKIP_SCORE;
            if src[idx - 1] == " " {
                s += ACRONYM_BONUS;
            }
            s
        };
        if src[idx] == qry[i] {
            char_score += SAME_CASE_BONUS;
        }
        running += char_score;
        start_at = idx + 1;
    }

    let mut score =
        0.5 * (running / src.len() as f64 + running / qry.len() as f64) / fuzzies;
    if qry_lower[0] == src_lower[0] && score < FIRST_CHAR_BONUS_CEILING {
        score += FIRST_CHAR_BONUS;
    }
    trace!(source, query, score, "fuzzy score");
    score
}

/// Method-call form of [`fuzzy_score`].
pub trait StringScore {
    fn score(&self, query: &str, fuzziness: Option<f64>) -> f64;
}

impl StringScore for str {
    fn score(&self, query: &str, fuzziness: Option<f64>) -> f64 {
        fuzzy_score(self, query, fuzziness)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ranked<'a> {
    /// Position of the candidate in the input sequence.
    pub index: usize,
    pub candidate: &'a str,
    pub score: f64,
}

/// Score every candidate against `query` and return the non-zero ones,
/// best first. Ties keep their input order.
pub fn rank<'a, I>(candidates: I, query: &str, fuzziness: Option<f64>) -> Vec<Ranked<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<Ranked<'a>> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| Ranked {
            index,
            candidate,
            score: fuzzy_score(candidate, query, fuzziness),
        })
        .filter(|r| r.score > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
