//! # Piece Vocabulary Table

use crate::{
    errors::{PMResult, PiecemealError},
    normalize::NormalizerSpec,
    types::{PMHashMap, PMHashSet, TokenType, hash_map_with_capacity},
    vocab::{
        ModelInfo, ModelKind, PieceKind, VocabEntry,
        byte_pieces::{ByteFallbackTable, parse_byte_piece},
        model_info::{BOS_PIECES, EOS_PIECES, PAD_PIECES},
    },
};

/// Score penalty, below the minimum piece score, for uncovered text.
pub const UNKNOWN_PENALTY: f32 = 10.0;

/// Immutable table of [`VocabEntry`]s, in id order.
///
/// Built once at load time; read-only afterwards, and safe to share
/// between threads (usually behind an `Arc`).
#[derive(Debug, Clone)]
pub struct PieceVocab<T: TokenType> {
    entries: Vec<VocabEntry<T>>,

    /// Exact text lookup over all pieces.
    piece_ids: PMHashMap<String, T>,

    /// `{ Vec<u8> -> T }` over pieces segmentation may produce.
    mergeable: PMHashMap<Vec<u8>, T>,

    user_defined: Vec<T>,
    control: Vec<T>,
    unknown_id: Option<T>,
    byte_table: Option<ByteFallbackTable<T>>,

    max_piece_len: usize,
    min_score: f32,

    model_kind: ModelKind,
    normalizer_spec: NormalizerSpec,
}

impl<T: TokenType> PieceVocab<T> {
    /// Build a vocabulary from `(piece, score, kind)` triples;
    /// ids are assigned by position.
    ///
    /// ## Errors
    /// See [`Self::try_from_entries`].
    pub fn from_pieces<I, S>(pieces: I) -> PMResult<Self>
    where
        I: IntoIterator<Item = (S, f32, PieceKind)>,
        S: Into<String>,
    {
        let entries = pieces
            .into_iter()
            .enumerate()
            .map(|(idx, (piece, score, kind))| {
                let id = T::from_usize(idx).ok_or_else(|| {
                    PiecemealError::InvalidModel(format!(
                        "piece id {idx} exceeds token type capacity"
                    ))
                })?;
                Ok(VocabEntry::new(id, piece, score, kind))
            })
            .collect::<PMResult<Vec<_>>>()?;

        Self::try_from_entries(entries)
    }

    /// Build a vocabulary from entries in id order.
    ///
    /// ## Errors
    /// [`PiecemealError::InvalidModel`] when:
    /// * ids are not ``0..N`` in order,
    /// * two `Normal`/`UserDefined`/`Control` pieces share text,
    /// * there is more than one `Unknown` piece,
    /// * a `Byte` piece is not spelled `<0xHH>`, or is repeated,
    /// * only some of the 256 byte pieces are present.
    pub fn try_from_entries(entries: Vec<VocabEntry<T>>) -> PMResult<Self> {
        let mut piece_ids: PMHashMap<String, T> = hash_map_with_capacity(entries.len());
        let mut exclusive: PMHashSet<&str> = PMHashSet::default();
        let mut mergeable: PMHashMap<Vec<u8>, T> = hash_map_with_capacity(entries.len());
        let mut user_defined = Vec::new();
        let mut control = Vec::new();
        let mut unknown_id: Option<T> = None;
        let mut byte_tokens: [Option<T>; 256] = [None; 256];
        let mut byte_count = 0;
        let mut max_piece_len = 0;
        let mut min_score = f32::INFINITY;

        for (idx, entry) in entries.iter().enumerate() {
            if entry.id.to_usize() != Some(idx) {
                return Err(PiecemealError::InvalidModel(format!(
                    "entry {idx} ({:?}) has id {}; ids must be contiguous from 0",
                    entry.piece, entry.id
                )));
            }

            if entry.kind.is_exclusive() && !exclusive.insert(entry.piece.as_str()) {
                return Err(PiecemealError::InvalidModel(format!(
                    "duplicate piece {:?} at id {}",
                    entry.piece, entry.id
                )));
            }

            match entry.kind {
                PieceKind::Unknown => {
                    if let Some(prev) = unknown_id {
                        return Err(PiecemealError::InvalidModel(format!(
                            "unknown piece redefined at id {} (first at {prev})",
                            entry.id
                        )));
                    }
                    unknown_id = Some(entry.id);
                }
                PieceKind::Byte => {
                    let Some(b) = parse_byte_piece(&entry.piece) else {
                        return Err(PiecemealError::InvalidModel(format!(
                            "byte piece {:?} at id {} is not a <0xHH> piece",
                            entry.piece, entry.id
                        )));
                    };
                    if byte_tokens[b as usize].replace(entry.id).is_some() {
                        return Err(PiecemealError::InvalidModel(format!(
                            "byte piece {:?} at id {} is repeated",
                            entry.piece, entry.id
                        )));
                    }
                    byte_count += 1;
                }
                PieceKind::UserDefined => user_defined.push(entry.id),
                PieceKind::Control => control.push(entry.id),
                PieceKind::Normal | PieceKind::Unused => (),
            }

            if entry.kind.is_exclusive() {
                piece_ids.insert(entry.piece.clone(), entry.id);
            } else {
                piece_ids.entry(entry.piece.clone()).or_insert(entry.id);
            }

            if entry.kind.is_mergeable() {
                mergeable.insert(entry.piece.as_bytes().to_vec(), entry.id);
                max_piece_len = max_piece_len.max(entry.piece.len());
            }

            if entry.kind == PieceKind::Normal {
                min_score = min_score.min(entry.score);
            }
        }

        let byte_table = match byte_count {
            0 => None,
            256 => {
                let mut table = [T::zero(); 256];
                for (slot, token) in table.iter_mut().zip(byte_tokens) {
                    // every slot was filled; 256 distinct bytes were counted.
                    *slot = token.unwrap_or_default();
                }
                Some(ByteFallbackTable::new(table))
            }
            n => {
                let missing = byte_tokens
                    .iter()
                    .position(Option::is_none)
                    .unwrap_or_default();
                return Err(PiecemealError::InvalidModel(format!(
                    "incomplete byte fallback: {n} of 256 byte pieces; byte value 0x{missing:02X} not found"
                )));
            }
        };

        drop(exclusive);

        if min_score == f32::INFINITY {
            min_score = 0.0;
        }

        log::debug!(
            "built piece vocab: {} pieces, {} user-defined, {} control, byte_fallback={}",
            entries.len(),
            user_defined.len(),
            control.len(),
            byte_table.is_some(),
        );
        if unknown_id.is_none() {
            log::warn!("piece vocab has no unknown piece");
        }

        piece_ids.shrink_to_fit();
        mergeable.shrink_to_fit();

        Ok(Self {
            entries,
            piece_ids,
            mergeable,
            user_defined,
            control,
            unknown_id,
            byte_table,
            max_piece_len,
            min_score,
            model_kind: ModelKind::default(),
            normalizer_spec: NormalizerSpec::default(),
        })
    }

    /// Set the model kind and return the vocab.
    pub fn with_model_kind(
        mut self,
        model_kind: ModelKind,
    ) -> Self {
        self.model_kind = model_kind;
        self
    }

    /// Set the normalizer spec and return the vocab.
    pub fn with_normalizer_spec(
        mut self,
        normalizer_spec: NormalizerSpec,
    ) -> Self {
        self.normalizer_spec = normalizer_spec;
        self
    }

    /// The number of pieces.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All entries, in id order.
    pub fn entries(&self) -> &[VocabEntry<T>] {
        &self.entries
    }

    /// The segmentation model kind.
    pub fn model_kind(&self) -> ModelKind {
        self.model_kind
    }

    /// The normalization rules.
    pub fn normalizer_spec(&self) -> &NormalizerSpec {
        &self.normalizer_spec
    }

    /// Exact-text lookup.
    ///
    /// When text is shared across kinds, `Normal`/`UserDefined`/`Control`
    /// pieces win; otherwise the lowest id wins.
    pub fn lookup(
        &self,
        piece: &str,
    ) -> Option<&VocabEntry<T>> {
        self.lookup_id(piece).map(|id| self.entry(id))
    }

    /// Exact-text lookup of a piece id.
    pub fn lookup_id(
        &self,
        piece: &str,
    ) -> Option<T> {
        self.piece_ids.get(piece).copied()
    }

    /// Reverse lookup by id.
    ///
    /// ## Errors
    /// [`PiecemealError::OutOfRange`] if `id` is not in ``0..len()``.
    pub fn by_id(
        &self,
        id: T,
    ) -> PMResult<&VocabEntry<T>> {
        id.to_usize()
            .and_then(|idx| self.entries.get(idx))
            .ok_or_else(|| PiecemealError::OutOfRange {
                id: id.to_usize().unwrap_or(usize::MAX),
                size: self.entries.len(),
            })
    }

    /// Lookup for ids known to come from this table.
    #[inline(always)]
    pub(crate) fn entry(
        &self,
        id: T,
    ) -> &VocabEntry<T> {
        // ids held by this table are in range by construction.
        &self.entries[id.to_usize().unwrap_or_default()]
    }

    /// Lookup a piece segmentation may produce, with its score.
    #[inline]
    pub fn lookup_mergeable(
        &self,
        span: &[u8],
    ) -> Option<(T, f32)> {
        self.mergeable
            .get(span)
            .map(|&id| (id, self.entry(id).score))
    }

    /// Ids of the `UserDefined` pieces.
    pub fn user_defined(&self) -> &[T] {
        &self.user_defined
    }

    /// Ids of the `Control` pieces.
    pub fn control(&self) -> &[T] {
        &self.control
    }

    /// The `Unknown` piece id, if any.
    pub fn unknown_id(&self) -> Option<T> {
        self.unknown_id
    }

    /// Does the vocabulary carry `<0xHH>` byte pieces?
    pub fn has_byte_fallback(&self) -> bool {
        self.byte_table.is_some()
    }

    /// The byte fallback table, if any.
    pub fn byte_table(&self) -> Option<&ByteFallbackTable<T>> {
        self.byte_table.as_ref()
    }

    /// The `<0xHH>` byte piece for `byte`.
    ///
    /// ## Errors
    /// [`PiecemealError::ModelMissingByteFallback`] if the vocabulary has no byte pieces.
    pub fn byte_token(
        &self,
        byte: u8,
    ) -> PMResult<&VocabEntry<T>> {
        self.byte_table
            .as_ref()
            .map(|table| self.entry(table.get_token(byte)))
            .ok_or(PiecemealError::ModelMissingByteFallback)
    }

    /// Byte length of the longest mergeable piece.
    pub fn max_piece_len(&self) -> usize {
        self.max_piece_len
    }

    /// The lowest `Normal` piece score; `0.0` when there are none.
    pub fn min_score(&self) -> f32 {
        self.min_score
    }

    /// Score assigned to uncovered text by score-based segmenters.
    pub fn unknown_score(&self) -> f32 {
        self.min_score - UNKNOWN_PENALTY
    }

    /// Size and well-known special ids.
    pub fn model_info(&self) -> ModelInfo<T> {
        let find_control = |names: &[&str]| {
            names.iter().find_map(|name| {
                self.lookup(name)
                    .filter(|e| e.kind == PieceKind::Control)
                    .map(|e| e.id)
            })
        };

        ModelInfo {
            vocab_size: self.entries.len(),
            unk_id: self.unknown_id,
            bos_id: find_control(BOS_PIECES),
            eos_id: find_control(EOS_PIECES),
            pad_id: find_control(PAD_PIECES),
        }
    }
}
