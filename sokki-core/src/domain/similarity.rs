//! Normalized edit-distance similarity between two words.

/// Similarity of two words in `[0.0, 1.0]`.
///
/// Computed as `(max_len - levenshtein) / max_len` over code points, so a
/// single edit in a five-char word scores exactly `0.8`. Two empty strings
/// are identical by definition.
///
/// ```
/// use sokki_core::domain::similarity::similarity;
///
/// assert_eq!(similarity("tmrow", "tmrw"), 0.8);
/// assert_eq!(similarity("same", "same"), 1.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a_chars, &b_chars);
    (max_len - distance) as f64 / max_len as f64
}

/// Classic single-character insert/delete/substitute edit distance.
///
/// Uses a rolling one-row table: `O(|a| * |b|)` time, `O(min(|a|, |b|))`
/// space. The inputs are already char slices so the inner loop never
/// re-decodes UTF-8.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        // `prev` tracks the diagonal cell from the previous row.
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitute = prev + usize::from(lc != sc);
            let insert = row[j] + 1;
            let delete = row[j + 1] + 1;
            prev = row[j + 1];
            row[j + 1] = substitute.min(insert).min(delete);
        }
    }
    row[short.len()]
}
