use fluent_text::graphemes::grapheme_clusters;
use fluent_text::{AttributedText, StrExt, TextAttributes, UnderlineStyle, decode_html, rank};

pub const SAMPLE_WORDS: &[&str] = &[
    "Hello World",
    "Back Button",
    "Facebook",
    "Feedback",
    "Firebase",
    "Fuzzy Finder",
    "Open Recent",
    "Bob Barker",
    "Cr&egrave;me Br&ucirc;l&eacute;e",
    "Fluent &amp; Swift",
];

/// Underline the graphemes of `candidate` that `query` matched, scanning
/// left to right the way the scorer does.
pub fn highlight(candidate: &str, query: &str) -> AttributedText {
    let mut text = AttributedText::new(candidate);
    let marked = TextAttributes::new().underline_style(UnderlineStyle::Single);
    let mut wanted = lower_graphemes(query).into_iter().peekable();
    for cluster in grapheme_clusters(candidate) {
        let Some(next) = wanted.peek() else {
            break;
        };
        if candidate[cluster.range.clone()].to_lowercase() == *next {
            wanted.next();
            if let Err(err) = text.add_attributes(cluster.range, &marked) {
                log::warn!("cannot highlight {candidate:?}: {err}");
            }
        }
    }
    text
}

/// Render underlined runs in brackets for the terminal.
pub fn bracketed(text: &AttributedText) -> String {
    text.runs()
        .map(|(range, attrs)| {
            let part = &text.as_str()[range];
            match attrs.underline_style {
                Some(UnderlineStyle::Single) => format!("[{part}]"),
                _ => part.to_string(),
            }
        })
        .collect()
}

pub fn print_ranking(query: &str, fuzziness: Option<f64>) {
    let words: Vec<String> = SAMPLE_WORDS.iter().map(|w| decode_html(w)).collect();
    let ranked = rank(words.iter().map(String::as_str), query, fuzziness);

    println!("query {query:?}, fuzziness {fuzziness:?}");
    if ranked.is_empty() {
        println!("  no matches");
        return;
    }
    for (place, hit) in ranked.iter().enumerate() {
        println!(
            "  {:>2}. {:.3}  {:<24} {}",
            place + 1,
            hit.score,
            bracketed(&highlight(hit.candidate, query)),
            hit.candidate.latinize().slugify('-'),
        );
    }
}

fn lower_graphemes(text: &str) -> Vec<String> {
    grapheme_clusters(text)
        .into_iter()
        .map(|c| text[c.range].to_lowercase())
        .collect()
}
