//! Text similarity: strict equality or the Ratcliff/Obershelp ratio.
//!
//! The fuzzy ratio finds the longest contiguous common block, then repeats on
//! the pieces left and right of it. With `M` the total length of all blocks
//! found, the ratio is `2M / (len(a) + len(b))`. Thresholds elsewhere are
//! tuned to this exact ratio; edit distance or token overlap give different
//! numbers.
//!
//! Lengths are counted in Unicode scalar values. When several blocks share
//! the maximum length, the one starting earliest in `a` wins, then earliest
//! in `b`.
//!
//! There is no autojunk pass: characters frequent in strings of 200+ chars
//! still take part in matching, unlike Python's default `SequenceMatcher`.

/// Compare two strings, exactly (`strict`) or with the fuzzy ratio.
pub fn text_similarity(a: &str, b: &str, strict: bool) -> f64 {
    if strict {
        if a == b { 1.0 } else { 0.0 }
    } else {
        ratio(a, b)
    }
}

/// Ratcliff/Obershelp similarity ratio in `[0, 1]`.
///
/// Two empty strings are identical (1.0); empty against non-empty is 0.0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matched_len(&a, &b) as f64 / total as f64
}

/// Sum of the lengths of all matching blocks between `a` and `b`.
pub fn matched_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut rows = MatchRows::new(b.len());

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = rows.longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Reusable dynamic-programming rows for the longest-block search.
struct MatchRows {
    prev: Vec<usize>,
    cur: Vec<usize>,
}

impl MatchRows {
    fn new(width: usize) -> Self {
        Self {
            prev: vec![0; width],
            cur: vec![0; width],
        }
    }

    /// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns `(i, j, k)` with `a[i..i + k] == b[j..j + k]`; `k == 0` when
    /// the ranges share nothing.
    fn longest_match<T: PartialEq>(
        &mut self,
        a: &[T],
        b: &[T],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
        let width = bhi - blo;
        self.prev[..width].fill(0);

        for i in alo..ahi {
            for jj in 0..width {
                let run = if a[i] == b[blo + jj] {
                    let diagonal = if jj > 0 { self.prev[jj - 1] } else { 0 };
                    diagonal + 1
                } else {
                    0
                };
                self.cur[jj] = run;
                // Strictly greater keeps the earliest block on ties
                if run > best_k {
                    best_k = run;
                    best_i = i + 1 - run;
                    best_j = blo + jj + 1 - run;
                }
            }
            std::mem::swap(&mut self.prev, &mut self.cur);
        }

        (best_i, best_j, best_k)
    }
}
