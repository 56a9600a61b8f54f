//! Exact suffix/prefix overlap scoring and overlap-driven merging.

/// Length of the longest suffix of `suffix_read` that is also a prefix of `prefix_read`.
///
/// Spans are scanned from the longest possible window down to one, so the
/// first hit is the maximal overlap. Returns 0 when no window matches.
/// Worst case is quadratic in the shorter read's length.
pub fn suffix_prefix_overlap(suffix_read: &str, prefix_read: &str) -> usize {
    let suffix_bytes = suffix_read.as_bytes();
    let prefix_bytes = prefix_read.as_bytes();
    let max_span = suffix_bytes.len().min(prefix_bytes.len());

    for span in (1..=max_span).rev() {
        if suffix_bytes[suffix_bytes.len() - span..] == prefix_bytes[..span] {
            return span;
        }
    }
    0
}

/// Append the part of `prefix_read` that lies past `overlap_len` onto `contig`.
///
/// `overlap_len` must have been computed with [`suffix_prefix_overlap`] on the
/// current contents of both reads; it is not re-checked here.
pub fn merge_into(contig: &mut String, prefix_read: &str, overlap_len: usize) {
    if overlap_len < prefix_read.len() {
        contig.push_str(&prefix_read[overlap_len..]);
    }
}

/// Owned variant of [`merge_into`].
pub fn merged(suffix_read: &str, prefix_read: &str, overlap_len: usize) -> String {
    let mut contig = String::with_capacity(
        suffix_read.len() + prefix_read.len().saturating_sub(overlap_len),
    );
    contig.push_str(suffix_read);
    merge_into(&mut contig, prefix_read, overlap_len);
    contig
}
