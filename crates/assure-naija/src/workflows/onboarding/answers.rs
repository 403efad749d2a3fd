//! Fuzzy yes/no parsing for the ownership questions.

const YES_PHRASES: [&str; 6] = ["yes", "yeah", "yep", "yup", "sure", "i do"];
const NO_PHRASES: [&str; 6] = ["no", "nope", "nah", "not really", "i don't", "i do not"];
const NEGATIONS: [&str; 3] = ["not", "never", "don't"];

/// Interpret a free-text yes/no answer.
///
/// Phrases match on whole words, so "I don't" is not read as "I do". A yes
/// phrase right next to a negation ("I do not", "not sure") does not count.
/// Text that matches both lists, or neither, is unrecognised.
pub fn parse_boolean(text: &str) -> Option<bool> {
    let words = words(text);
    let yes = YES_PHRASES
        .iter()
        .any(|phrase| find_phrase(&words, phrase).any(|at| !negated(&words, at, phrase)));
    let no = NO_PHRASES
        .iter()
        .any(|phrase| find_phrase(&words, phrase).next().is_some());

    match (yes, no) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Start indices of every whole-word occurrence of `phrase`.
fn find_phrase<'a>(words: &'a [String], phrase: &'a str) -> impl Iterator<Item = usize> + 'a {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    words
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| {
            window
                .iter()
                .zip(&needle)
                .all(|(word, part)| word.as_str() == *part)
        })
        .map(|(start, _)| start)
}

fn negated(words: &[String], start: usize, phrase: &str) -> bool {
    let len = phrase.split_whitespace().count();
    let before = start.checked_sub(1).and_then(|index| words.get(index));
    let after = words.get(start + len);
    [before, after]
        .into_iter()
        .flatten()
        .any(|word| NEGATIONS.contains(&word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::parse_boolean;

    #[test]
    fn recognises_affirmative_variants() {
        for text in ["Yes", "yeah!", "Yep", "yup, two of them", "Sure", "I do"] {
            assert_eq!(parse_boolean(text), Some(true), "{text}");
        }
    }

    #[test]
    fn recognises_negative_variants() {
        for text in ["No", "nope", "Nah.", "Not really", "I don't", "I don\u{2019}t"] {
            assert_eq!(parse_boolean(text), Some(false), "{text}");
        }
    }

    #[test]
    fn unrecognised_or_ambiguous_text_is_none() {
        assert_eq!(parse_boolean("maybe"), None);
        assert_eq!(parse_boolean(""), None);
        assert_eq!(parse_boolean("yes and no"), None);
        assert_eq!(parse_boolean("nobody knows"), None);
        assert_eq!(parse_boolean("not sure"), None);
    }

    #[test]
    fn negated_affirmatives_are_not_read_as_yes() {
        assert_eq!(parse_boolean("I do not"), Some(false));
        assert_eq!(parse_boolean("I do NOT own one"), Some(false));
        assert_eq!(parse_boolean("yes, I do"), Some(true));
        assert_eq!(parse_boolean("I do, two cars"), Some(true));
    }
}
