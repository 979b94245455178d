//! Turns a transcript into an [`Intent`].
//!
//! Exactly one grammar is understood: `play <song> [by <artist>]`, matched
//! case-insensitively. Only the first standalone `by` splits song from
//! artist; any later `by` belongs to the artist name.

use crate::types::Intent;

const PLAY: &str = "play";
const BY: &str = "by";

pub const NOT_RECOGNIZED: &str = "Command not recognized";

pub fn parse(text: &str) -> Intent {
    let lowered = text.trim().to_lowercase();

    let Some(rest) = strip_leading_word(&lowered, PLAY) else {
        return Intent::Unknown {
            error: NOT_RECOGNIZED.to_string(),
        };
    };

    let (song_name, artist_name) = match split_on_word(rest, BY) {
        Some((song, artist)) => (song.trim(), Some(artist.trim().to_string())),
        None => (rest.trim(), None),
    };

    Intent::Play {
        song_name: song_name.to_string(),
        artist_name,
    }
}

fn strip_leading_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}

/// Splits `text` around the first occurrence of `word` that stands alone,
/// i.e. is bounded by whitespace or the ends of the string.
fn split_on_word<'a>(text: &'a str, word: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find(word) {
        let start = offset + pos;
        let end = start + word.len();

        let starts_word = text[..start]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let ends_word = text[end..].chars().next().is_none_or(char::is_whitespace);

        if starts_word && ends_word {
            return Some((&text[..start], &text[end..]));
        }
        offset = end;
    }

    None
}
