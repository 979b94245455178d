use voxplay::command::{NOT_RECOGNIZED, parse};
use voxplay::types::{Action, Intent};

fn play(song: &str, artist: Option<&str>) -> Intent {
    Intent::Play {
        song_name: song.to_string(),
        artist_name: artist.map(str::to_string),
    }
}

fn unknown() -> Intent {
    Intent::Unknown {
        error: NOT_RECOGNIZED.to_string(),
    }
}

#[test]
fn test_parse_song_and_artist() {
    assert_eq!(
        parse("Play Shape of You by Ed Sheeran"),
        play("shape of you", Some("ed sheeran"))
    );
}

#[test]
fn test_parse_song_without_artist() {
    assert_eq!(parse("play Mr. Brightside"), play("mr. brightside", None));
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(
        parse("PLAY Yesterday BY The Beatles"),
        play("yesterday", Some("the beatles"))
    );
}

#[test]
fn test_parse_trims_surrounding_whitespace() {
    assert_eq!(
        parse("   play   Hey Jude   by   The Beatles   "),
        play("hey jude", Some("the beatles"))
    );
}

#[test]
fn test_parse_bare_play_gives_empty_song() {
    assert_eq!(parse("play  "), play("", None));
    assert_eq!(parse("play"), play("", None));
}

#[test]
fn test_parse_only_first_by_splits() {
    // Everything after the first standalone "by" is the artist.
    assert_eq!(
        parse("play Stand by Me by Ben E. King"),
        play("stand", Some("me by ben e. king"))
    );
}

#[test]
fn test_parse_by_inside_words_is_kept() {
    assert_eq!(
        parse("play Baby Shark by Pinkfong"),
        play("baby shark", Some("pinkfong"))
    );
    assert_eq!(parse("play Goodbye Yellow Brick Road"), play("goodbye yellow brick road", None));
}

#[test]
fn test_parse_trailing_by_gives_empty_artist() {
    assert_eq!(parse("play Hello by"), play("hello", Some("")));
}

#[test]
fn test_parse_rejects_other_commands() {
    assert_eq!(parse("pause the music"), unknown());
    assert_eq!(parse(""), unknown());
    assert_eq!(parse("please play Yesterday"), unknown());
}

#[test]
fn test_parse_requires_play_as_a_word() {
    assert_eq!(parse("playlist workout"), unknown());
    assert_eq!(parse("player one"), unknown());
}

#[test]
fn test_parse_sentinel_text_is_not_a_command() {
    let intent = parse("Speech recognition could not understand the audio");
    assert_eq!(intent.action(), Action::Unknown);
}

#[test]
fn test_intent_serializes_with_action_tag() {
    let json = serde_json::to_value(play("yesterday", Some("the beatles"))).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "action": "play",
            "song_name": "yesterday",
            "artist_name": "the beatles"
        })
    );

    let json = serde_json::to_value(unknown()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "action": "unknown", "error": "Command not recognized" })
    );
}
