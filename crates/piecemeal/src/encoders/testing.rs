//! # Encoder Test Utilities

use crate::{
    decoders::PieceDecoder,
    encoders::TokenEncoder,
    types::{Token, TokenType},
    vocab::{PieceKind, PieceVocab, byte_pieces::format_byte_piece},
};

/// Static check that a value is `Send + Sync`.
pub fn static_is_send_sync_check<T: Send + Sync>(_: &T) {}

/// Build a small Gemma-shaped test vocabulary.
///
/// Layout, by id:
/// * ``0..=2`` - `<pad>`, `<eos>`, `<bos>` control pieces;
/// * ``3`` - `<unk>`;
/// * ``4..=14`` - user-defined `<mask>`, `<s>`, `</s>`, turn markers,
///   and table markup tags;
/// * ``15..=21`` - user-defined runs of 2 to 8 `▁` markers;
/// * ``22..=277`` - the 256 `<0xHH>` byte pieces (`22 + byte`);
/// * ``278..`` - normal pieces; then one unused piece.
pub fn gemma_like_test_vocab<T: TokenType>() -> PieceVocab<T> {
    let mut pieces: Vec<(String, f32, PieceKind)> = Vec::new();
    let mut push = |piece: &str, score: f32, kind: PieceKind| {
        pieces.push((piece.to_string(), score, kind));
    };

    push("<pad>", 0.0, PieceKind::Control);
    push("<eos>", 0.0, PieceKind::Control);
    push("<bos>", 0.0, PieceKind::Control);
    push("<unk>", 0.0, PieceKind::Unknown);

    for tag in [
        "<mask>",
        "<s>",
        "</s>",
        "<start_of_turn>",
        "<end_of_turn>",
        "<td>",
        "</td>",
        "<th>",
        "</th>",
        "<table>",
        "</table>",
    ] {
        push(tag, 0.0, PieceKind::UserDefined);
    }

    for n in 2..=8 {
        push(&"▁".repeat(n), 0.0, PieceKind::UserDefined);
    }

    for b in 0..=255_u8 {
        push(&format_byte_piece(b), 0.0, PieceKind::Byte);
    }

    for single in [
        "▁", "h", "e", "l", "o", "w", "r", "d", "i", "b", "y", "a", "p", "<", ">", ",",
    ] {
        push(single, -10.0, PieceKind::Normal);
    }

    for (piece, score) in [
        ("he", -1.0),
        ("ll", -2.0),
        ("hell", -3.0),
        ("hello", -4.0),
        ("or", -5.0),
        ("ld", -6.0),
        ("wor", -7.0),
        ("world", -8.0),
        ("▁world", -8.5),
        ("▁w", -9.0),
        ("hi", -1.5),
        ("by", -2.5),
        ("bye", -3.5),
        ("▁bye", -4.5),
        ("ad", -12.0),
        ("pad", -13.0),
    ] {
        push(piece, score, PieceKind::Normal);
    }

    push("<unused0>", 0.0, PieceKind::Unused);

    match PieceVocab::from_pieces(pieces) {
        Ok(vocab) => vocab,
        Err(err) => panic!("invalid test vocab: {err}"),
    }
}

/// The token for `piece` in `vocab`.
///
/// ## Panics
/// If the piece is missing.
pub fn piece_token<T: TokenType>(
    vocab: &PieceVocab<T>,
    piece: &str,
) -> Token<T> {
    match vocab.lookup(piece) {
        Some(entry) => Token::new(entry.id, entry.piece.clone()),
        None => panic!("missing test piece: {piece:?}"),
    }
}

/// Expected pieces for [`gemma_like_test_vocab`] encodings.
pub const GEMMA_LIKE_CASES: &[(&str, &[&str])] = &[
    ("hello world", &["hello", "▁world"]),
    ("hi <td> bye", &["hi", "▁", "<td>", "▁bye"]),
    ("  ", &["▁▁"]),
    ("   ", &["▁▁▁"]),
    ("          ", &["▁▁▁▁▁▁▁▁", "▁▁"]),
    ("<td></td>", &["<td>", "</td>"]),
    (
        "<table><th></th></table>",
        &["<table>", "<th>", "</th>", "</table>"],
    ),
    (" <mask>  <pad>", &["▁", "<mask>", "▁▁", "<", "pad", ">"]),
    (
        "<start_of_turn>hi<end_of_turn>",
        &["<start_of_turn>", "hi", "<end_of_turn>"],
    ),
    ("hiƻ", &["hi", "<0xC6>", "<0xBB>"]),
    ("🤨", &["<0xF0>", "<0x9F>", "<0xA4>", "<0xA8>"]),
    ("", &[]),
];

/// Common [`TokenEncoder`] tests, over [`gemma_like_test_vocab`].
pub fn common_encoder_tests<T: TokenType, E: TokenEncoder<T>>(encoder: &E) {
    static_is_send_sync_check(encoder);

    let vocab = encoder.vocab().clone();
    let decoder = PieceDecoder::new(vocab.clone());

    for &(text, expected) in GEMMA_LIKE_CASES {
        let expected: Vec<Token<T>> = expected
            .iter()
            .map(|piece| piece_token(&vocab, piece))
            .collect();

        let tokens = encoder.try_encode(text).unwrap();
        assert_eq!(tokens, expected, "encode({text:?})");

        let ids = encoder.try_encode_ids(text).unwrap();
        assert_eq!(
            ids,
            expected.iter().map(|t| t.id).collect::<Vec<_>>(),
            "encode_ids({text:?})"
        );

        assert_eq!(
            decoder.try_decode_tokens(&tokens).unwrap(),
            text,
            "decode(encode({text:?}))"
        );
    }

    let batch: Vec<&str> = GEMMA_LIKE_CASES.iter().map(|(text, _)| *text).collect();
    let results = encoder.try_encode_batch(&batch).unwrap();
    assert_eq!(results.len(), batch.len());
    for (text, tokens) in batch.iter().zip(results) {
        assert_eq!(tokens, encoder.try_encode(text).unwrap());
    }
}
