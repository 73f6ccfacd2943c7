#![allow(missing_docs)]
#![cfg(feature = "std")]

use std::sync::Arc;

use piecemeal::{
    EncoderOptions,
    PieceDecoder,
    PieceEncoder,
    PieceKind,
    PieceVocab,
    PiecemealError,
    TokenEncoder,
    encoders::{UnknownPolicy, segmenters::SegmenterSelector},
    hex_token_probe,
    vocab::{byte_pieces::format_byte_piece, io::read_text_vocab},
};

type T = u32;

/// A Gemma-shaped vocabulary, as a text vocab file.
fn vocab_text(byte_fallback: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    for piece in ["<pad>", "<eos>", "<bos>"] {
        lines.push(format!("{piece}\t0\tCONTROL"));
    }
    lines.push("<unk>\t0\tUNKNOWN".to_string());
    for tag in [
        "<mask>",
        "<start_of_turn>",
        "<end_of_turn>",
        "<td>",
        "</td>",
        "<tr>",
        "</tr>",
    ] {
        lines.push(format!("{tag}\t0\tUSER_DEFINED"));
    }
    for n in 2..=31 {
        lines.push(format!("{}\t0\tUSER_DEFINED", "▁".repeat(n)));
    }
    if byte_fallback {
        for b in 0..=255_u8 {
            lines.push(format!("{}\t0\tBYTE", format_byte_piece(b)));
        }
    }
    for (piece, score) in [
        ("▁", -10.0),
        ("t", -10.0),
        ("h", -10.0),
        ("e", -10.0),
        ("c", -10.0),
        ("a", -10.0),
        ("s", -10.0),
        ("n", -10.0),
        ("th", -1.0),
        ("the", -2.0),
        ("▁the", -2.5),
        ("ca", -3.0),
        ("cat", -4.0),
        ("▁cat", -4.5),
        ("at", -5.0),
        ("sat", -6.0),
        ("▁sat", -6.5),
    ] {
        lines.push(format!("{piece}\t{score}\tNORMAL"));
    }

    lines.join("\n")
}

fn load_vocab(byte_fallback: bool) -> Arc<PieceVocab<T>> {
    let text = vocab_text(byte_fallback);
    let entries = read_text_vocab::<T, _>(text.as_bytes()).unwrap();
    PieceVocab::try_from_entries(entries).unwrap().into()
}

fn pieces(
    encoder: &dyn TokenEncoder<T>,
    text: &str,
) -> Vec<String> {
    encoder
        .try_encode(text)
        .unwrap()
        .into_iter()
        .map(|t| t.text)
        .collect()
}

#[test]
fn test_whitespace_runs() {
    let vocab = load_vocab(true);
    for selector in [SegmenterSelector::MergeHeap, SegmenterSelector::Viterbi] {
        let encoder = EncoderOptions::default()
            .with_segmenter(selector)
            .build(vocab.clone())
            .unwrap();

        let two = encoder.try_encode("  ").unwrap();
        let three = encoder.try_encode("   ").unwrap();
        assert_eq!(two.len(), 1);
        assert_eq!(three.len(), 1);
        assert_eq!(two[0].text, "▁▁");
        assert_eq!(three[0].text, "▁▁▁");
        assert_ne!(two[0].id, three[0].id);

        // one space has no run piece; it is the ordinary "▁" piece.
        assert_eq!(pieces(encoder.as_ref(), " "), vec!["▁"]);

        // 40 spaces: the longest run, then the rest.
        let run = " ".repeat(40);
        assert_eq!(
            pieces(encoder.as_ref(), &run),
            vec!["▁".repeat(31), "▁".repeat(9)]
        );
    }
}

#[test]
fn test_markup_tags() {
    let vocab = load_vocab(true);
    let encoder = EncoderOptions::default().build(vocab).unwrap();

    assert_eq!(
        pieces(encoder.as_ref(), "<tr><td></td></tr>"),
        vec!["<tr>", "<td>", "</td>", "</tr>"]
    );
    assert_eq!(
        pieces(encoder.as_ref(), "<start_of_turn>the cat sat<end_of_turn>"),
        vec!["<start_of_turn>", "the", "▁cat", "▁sat", "<end_of_turn>"]
    );
}

#[test]
fn test_control_tags_are_plain_text() {
    let vocab = load_vocab(true);
    let encoder = EncoderOptions::default().build(vocab).unwrap();

    let tokens = pieces(encoder.as_ref(), "<pad>");
    assert!(tokens.len() > 1, "{tokens:?}");
    assert!(tokens.iter().all(|p| p != "<pad>"));
}

#[test]
fn test_byte_fallback_lengths() {
    let vocab = load_vocab(true);
    let encoder = EncoderOptions::default().build(vocab.clone()).unwrap();

    for text in ["🤨", "ƻ", "ห", "\u{10FFFF}"] {
        let tokens = encoder.try_encode(text).unwrap();
        assert_eq!(tokens.len(), text.len(), "{text:?}");
        for (token, &b) in tokens.iter().zip(text.as_bytes()) {
            assert_eq!(hex_token_probe(&token.text), Some(b));
            assert_eq!(vocab.by_id(token.id).unwrap().kind, PieceKind::Byte);
        }
    }
}

#[test]
fn test_special_symbol_probe() {
    let vocab = load_vocab(true);
    let encoder = PieceEncoder::new(vocab, EncoderOptions::default()).unwrap();

    assert_eq!(encoder.special_symbol_probe("<start_of_turn!"), (1, false));
    assert_eq!(encoder.special_symbol_probe("<start_of_turn>"), (15, true));
    assert_eq!(encoder.special_symbol_probe("▁▁▁"), (9, true));
    assert_eq!(encoder.special_symbol_probe("🤨"), (4, false));
}

#[test]
fn test_unencodable_without_byte_fallback() {
    let vocab = load_vocab(false);
    assert!(!vocab.has_byte_fallback());

    let encoder = EncoderOptions::default().build(vocab.clone()).unwrap();
    assert_eq!(pieces(encoder.as_ref(), "the cat"), vec!["the", "▁cat"]);
    assert!(matches!(
        encoder.try_encode("the dog"),
        Err(PiecemealError::Unencodable { offset: 6, len: 3 })
    ));
    assert!(matches!(
        vocab.byte_token(0x41),
        Err(PiecemealError::ModelMissingByteFallback)
    ));

    let encoder = EncoderOptions::default()
        .with_unknown_policy(UnknownPolicy::EmitUnknown)
        .build(vocab)
        .unwrap();
    assert_eq!(
        pieces(encoder.as_ref(), "the dog"),
        vec!["the", "▁", "<unk>"]
    );
}

#[test]
fn test_encode_decode_roundtrip() {
    let vocab = load_vocab(true);
    let encoder = EncoderOptions::default().build(vocab.clone()).unwrap();
    let decoder = PieceDecoder::new(vocab);

    for text in [
        "the cat sat",
        "  the   cat  ",
        "<start_of_turn>the cat<end_of_turn>",
        "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
        "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
        "line1\nline2\r\nline3",
    ] {
        let ids = encoder.try_encode_ids(text).unwrap();
        assert_eq!(decoder.try_decode_to_string(&ids).unwrap(), text);
    }
}
