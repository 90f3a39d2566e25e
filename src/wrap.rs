use std::iter::Peekable;
use std::vec::IntoIter;

const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

/// Lines of wrapped text, produced on demand.
///
/// When the text holds more than one sentence, whole sentences are packed
/// into lines, each ending in a period; otherwise the text is packed word by
/// word.  A sentence or word
/// that is longer than the line limit on its own is emitted as an overlong
/// line rather than being split.
#[derive(Clone, Debug)]
pub(crate) struct Wrap {
    units: Peekable<IntoIter<String>>,
    max_line_length: usize,
}

pub(crate) fn wrap(text: &str, max_line_length: usize) -> Wrap {
    let sentences = split_sentences(text);
    let units: Vec<String> = if sentences.len() > 1 {
        sentences.into_iter().map(terminate).collect()
    } else {
        text.split_whitespace().map(String::from).collect()
    };
    Wrap {
        units: units.into_iter().peekable(),
        max_line_length,
    }
}

impl Iterator for Wrap {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let max = self.max_line_length;
        let mut line = self.units.next()?;
        let mut width = line.chars().count();
        while let Some(unit) = self
            .units
            .next_if(|u| width + 1 + u.chars().count() <= max)
        {
            width += 1 + unit.chars().count();
            line.push(' ');
            line.push_str(&unit);
        }
        Some(line)
    }
}

// Sentence bodies with their terminating punctuation stripped
fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_ENDINGS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn terminate(sentence: &str) -> String {
    format!("{sentence}.")
}
