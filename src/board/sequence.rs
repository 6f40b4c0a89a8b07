//! Ordered-sequence primitives shared by every board mutation.
//!
//! Moving an element is always "remove, then insert into the shortened
//! sequence". All index arithmetic for that lives here so call sites never
//! re-derive the off-by-one rules.

/// Insert `item` at `index`, clamping the index to `[0, len]`. Returns the
/// index actually used.
///
pub fn insert_clamped<T>(seq: &mut Vec<T>, index: usize, item: T) -> usize {
    let at = index.min(seq.len());
    seq.insert(at, item);
    at
}

/// Remove `expected` from `seq`, preferring the element at `index`. When the
/// element at `index` is something else (the index went stale) the first
/// element equal to `expected` is removed instead. Returns the position the
/// element was removed from, or `None` if it is not in the sequence at all.
///
pub fn remove_at_or_find<T: PartialEq>(seq: &mut Vec<T>, index: usize, expected: &T) -> Option<usize> {
    let at = match seq.get(index) {
        Some(found) if found == expected => index,
        _ => seq.iter().position(|item| item == expected)?,
    };
    seq.remove(at);
    Some(at)
}

/// Move the element at `from` so that it ends up at `to` in the sequence
/// obtained after removing it (`to` is clamped to that sequence's length).
/// Returns false, leaving the sequence untouched, when `from` is out of
/// bounds.
///
pub fn splice_move<T>(seq: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= seq.len() {
        return false;
    }
    let item = seq.remove(from);
    insert_clamped(seq, to, item);
    true
}
