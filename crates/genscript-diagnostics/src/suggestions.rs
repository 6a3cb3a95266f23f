// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Did-you-mean suggestions for misspelled names.

/// Compute edit distance (Levenshtein) between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, a_ch) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == *b_ch { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Closest candidate to `name`, if any is close enough to be a typo.
/// Ties go to the first candidate.
pub fn closest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let max_distance = match name.chars().count() {
        0 => return None,
        1..=2 => 1,
        3..=5 => 2,
        _ => 3,
    };

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if candidate == name {
            continue;
        }
        let len_diff = name.len().abs_diff(candidate.len());
        if len_diff > max_distance {
            continue;
        }
        let dist = edit_distance(name, candidate);
        if dist <= max_distance && best.map_or(true, |(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }

    best.map(|(closest, _)| closest)
}

/// Returns `Some("did you mean `closest`?")` if a close match is found.
pub fn did_you_mean<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    closest(name, candidates).map(|closest| format!("did you mean `{}`?", closest))
}
