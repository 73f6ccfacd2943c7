//! # Text Vocabulary IO
//!
//! One piece per line, in id order:
//!
//! ```text
//! piece<TAB>score[<TAB>KIND]
//! ```
//!
//! `KIND` is a [`PieceKind`] name (`NORMAL`, `USER_DEFINED`, ...).
//! When absent (as in `spm_export_vocab` output), the kind is inferred
//! from the piece text; see [`infer_piece_kind`].
//!
//! Pieces may not contain tabs or newlines.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use crate::{
    errors::{PMResult, PiecemealError},
    types::TokenType,
    vocab::{PieceKind, VocabEntry, byte_pieces::parse_byte_piece},
};

/// Infer the kind of a piece from its text.
///
/// * `<unk>` is `Unknown`,
/// * `<s>`, `</s>`, `<pad>`, `<bos>`, `<eos>` are `Control`,
/// * `<0xHH>` pieces are `Byte`,
/// * everything else is `Normal`.
pub fn infer_piece_kind(piece: &str) -> PieceKind {
    match piece {
        "<unk>" => PieceKind::Unknown,
        "<s>" | "</s>" | "<pad>" | "<bos>" | "<eos>" => PieceKind::Control,
        _ if parse_byte_piece(piece).is_some() => PieceKind::Byte,
        _ => PieceKind::Normal,
    }
}

/// Load vocab entries from a text vocab file.
///
/// ## Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_text_vocab_path<T, P>(path: P) -> PMResult<Vec<VocabEntry<T>>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let entries = read_text_vocab(BufReader::new(file))?;

    log::info!("loaded {} pieces from {}", entries.len(), path.display());

    Ok(entries)
}

/// Read vocab entries from a text vocab [`BufRead`] stream.
///
/// Empty lines are skipped; ids are assigned in line order.
///
/// ## Arguments
/// * `reader` - the line reader.
pub fn read_text_vocab<T, R>(reader: R) -> PMResult<Vec<VocabEntry<T>>>
where
    T: TokenType,
    R: BufRead,
{
    let mut entries = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_idx + 1;
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let piece = fields.next().unwrap_or_default();

        let score = fields
            .next()
            .ok_or_else(|| PiecemealError::Parse(format!("line {line_no}: missing score")))?;
        let score = f32::from_str(score.trim()).map_err(|e| {
            PiecemealError::Parse(format!("line {line_no}: bad score {score:?}: {e}"))
        })?;

        let kind = match fields.next() {
            Some(kind) => PieceKind::from_str(kind.trim()).map_err(|_| {
                PiecemealError::Parse(format!("line {line_no}: unknown piece kind {kind:?}"))
            })?,
            None => infer_piece_kind(piece),
        };

        if fields.next().is_some() {
            return Err(PiecemealError::Parse(format!(
                "line {line_no}: too many fields"
            )));
        }

        let id = T::from_usize(entries.len()).ok_or_else(|| {
            PiecemealError::Parse(format!("line {line_no}: id exceeds token type capacity"))
        })?;

        entries.push(VocabEntry::new(id, piece, score, kind));
    }

    Ok(entries)
}

/// Save vocab entries to a text vocab file.
///
/// ## Arguments
/// * `entries` - the entries to save, in id order.
/// * `path` - the path to save the vocabulary to.
pub fn save_text_vocab_path<T: TokenType, P: AsRef<Path>>(
    entries: &[VocabEntry<T>],
    path: P,
) -> PMResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_text_vocab(entries, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write vocab entries to a [`Write`] writer.
///
/// Always writes the kind column.
pub fn write_text_vocab<T, W>(
    entries: &[VocabEntry<T>],
    writer: &mut W,
) -> PMResult<()>
where
    T: TokenType,
    W: Write,
{
    for entry in entries {
        if entry.piece.contains(['\t', '\n', '\r']) {
            return Err(PiecemealError::Parse(format!(
                "piece {:?} at id {} cannot be written to a text vocab",
                entry.piece, entry.id
            )));
        }
        writeln!(writer, "{}\t{}\t{}", entry.piece, entry.score, entry.kind)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{PieceVocab, encoders::testing::gemma_like_test_vocab};

    #[test]
    fn test_infer_piece_kind() {
        assert_eq!(infer_piece_kind("<unk>"), PieceKind::Unknown);
        assert_eq!(infer_piece_kind("</s>"), PieceKind::Control);
        assert_eq!(infer_piece_kind("<0x0A>"), PieceKind::Byte);
        assert_eq!(infer_piece_kind("<td>"), PieceKind::Normal);
        assert_eq!(infer_piece_kind("▁the"), PieceKind::Normal);
    }

    #[test]
    fn test_read_text_vocab() {
        type T = u32;
        let text = "<unk>\t0\n<s>\t0\n<mask>\t0\tUSER_DEFINED\n\n▁the\t-3.25\nab\t-4\tNORMAL\n";

        let entries: Vec<VocabEntry<T>> = read_text_vocab(Cursor::new(text)).unwrap();
        assert_eq!(
            entries,
            vec![
                VocabEntry::new(0, "<unk>", 0.0, PieceKind::Unknown),
                VocabEntry::new(1, "<s>", 0.0, PieceKind::Control),
                VocabEntry::new(2, "<mask>", 0.0, PieceKind::UserDefined),
                VocabEntry::new(3, "▁the", -3.25, PieceKind::Normal),
                VocabEntry::new(4, "ab", -4.0, PieceKind::Normal),
            ]
        );
    }

    #[test]
    fn test_read_text_vocab_errors() {
        type T = u32;

        let err = read_text_vocab::<T, _>(Cursor::new("a\t0\nb\n")).unwrap_err();
        assert!(err.to_string().contains("line 2: missing score"), "{err}");

        let err = read_text_vocab::<T, _>(Cursor::new("a\tnan-ish\n")).unwrap_err();
        assert!(err.to_string().contains("line 1: bad score"), "{err}");

        let err = read_text_vocab::<T, _>(Cursor::new("a\t0\tWEIRD\n")).unwrap_err();
        assert!(err.to_string().contains("unknown piece kind"), "{err}");

        let err = read_text_vocab::<T, _>(Cursor::new("a\t0\tNORMAL\textra\n")).unwrap_err();
        assert!(err.to_string().contains("too many fields"), "{err}");
    }

    #[test]
    fn test_write_rejects_tabs() {
        type T = u32;
        let entries = vec![VocabEntry::new(0_u32, "a\tb", 0.0, PieceKind::Normal)];
        let mut buf = Vec::new();
        assert!(write_text_vocab::<T, _>(&entries, &mut buf).is_err());
    }

    #[test]
    fn test_save_load_text_vocab() {
        type T = u32;
        let vocab: PieceVocab<T> = gemma_like_test_vocab();

        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("test.vocab");

                save_text_vocab_path(vocab.entries(), &path).expect("Failed to save vocab");

                let loaded: Vec<VocabEntry<T>> =
                    load_text_vocab_path(&path).expect("Failed to load vocab");

                assert_eq!(loaded.as_slice(), vocab.entries());

                let rebuilt = PieceVocab::try_from_entries(loaded).unwrap();
                assert_eq!(rebuilt.model_info(), vocab.model_info());

                Ok(())
            })
            .unwrap();
    }
}
