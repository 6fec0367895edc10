//! Integration tests for the line classifier.
//!
//! These tests verify classification with realistic pasted inputs.

use tunefetch_core::parser::{AudioMode, InputKind, classify, classify_with_mode, extract_video_id};

/// A pasted block mixing links, phrases and blank lines keeps its order.
#[test]
fn test_classify_realistic_paste() {
    let input = r"
https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123&index=2
   Daft Punk - One More Time

youtu.be/xyz789abcde
https://music.youtube.com/watch?v=abc123defgh
Queen - Don't Stop Me Now (Live)
https://vimeo.com/123456
";

    let items = classify(input);

    let kinds: Vec<InputKind> = items.iter().map(|item| item.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InputKind::DirectReference,
            InputKind::SearchPhrase,
            InputKind::DirectReference,
            InputKind::DirectReference,
            InputKind::SearchPhrase,
            InputKind::SearchPhrase,
        ]
    );
    assert_eq!(items[1].original_input, "Daft Punk - One More Time");
    assert_eq!(items[0].resolved_id().unwrap().as_str(), "dQw4w9WgXcQ");
    assert_eq!(items[2].resolved_id().unwrap().as_str(), "xyz789abcde");
    assert!(items[5].needs_resolution(), "non-video links go through search");
}

/// Classifying the same text twice yields identical queues.
#[test]
fn test_classify_is_pure() {
    let input = "a\nhttps://youtu.be/dQw4w9WgXcQ\n\n b ";
    assert_eq!(classify(input), classify(input));
    assert_eq!(
        classify_with_mode(input, AudioMode::Raw),
        classify_with_mode(input, AudioMode::Raw)
    );
}

/// Blank and whitespace-only lines are dropped.
#[test]
fn test_classify_drops_blank_lines() {
    let items = classify("a\n\n  \nb");
    let inputs: Vec<&str> = items.iter().map(|i| i.original_input.as_str()).collect();
    assert_eq!(inputs, vec!["a", "b"]);
}

/// Counts and summary reflect the mix of kinds.
#[test]
fn test_classify_with_mode_counts_and_display() {
    let result = classify_with_mode(
        "https://youtu.be/dQw4w9WgXcQ\nSong One\nSong Two",
        AudioMode::Official,
    );

    let counts = result.counts();
    assert_eq!((counts.total, counts.links, counts.searches), (3, 1, 2));
    assert_eq!(result.to_string(), "Classified 3 items (1 links, 2 searches)");
}

/// Identifier extraction rejects ids of the wrong length.
#[test]
fn test_extract_video_id_rejects_bad_ids() {
    assert!(extract_video_id("https://youtu.be/tooshort").is_none());
    assert!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQQ").is_none());
    assert!(extract_video_id("not a link at all").is_none());
}
