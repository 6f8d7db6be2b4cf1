// Version-aware filename ordering
//
// Same ordering as `ls -v` (GNU filevercmp): the file suffix is set aside,
// digit runs compare as numbers and everything else compares with the
// Debian version weights.

use std::cmp::Ordering;

/// Compare two file names the way `ls -v` sorts them.
pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    if a.is_empty() {
        return Ordering::Less;
    }
    if b.is_empty() {
        return Ordering::Greater;
    }

    let (a, b) = (a.as_bytes(), b.as_bytes());
    let a_prefix = &a[..suffix_start(a)];
    let b_prefix = &b[..suffix_start(b)];

    let ordering = if a_prefix == b_prefix {
        Ordering::Equal
    } else {
        verrevcmp(a_prefix, b_prefix)
    };

    ordering
        .then_with(|| verrevcmp(a, b))
        .then_with(|| a.cmp(b))
}

/// Start of the trailing `(\.[A-Za-z~][A-Za-z0-9~]*)*` suffix, or `s.len()`.
fn suffix_start(s: &[u8]) -> usize {
    let mut start = None;
    let mut read_alpha = false;

    for (i, &c) in s.iter().enumerate() {
        if read_alpha {
            read_alpha = false;
            if !c.is_ascii_alphabetic() && c != b'~' {
                start = None;
            }
        } else if c == b'.' {
            read_alpha = true;
            if start.is_none() {
                start = Some(i);
            }
        } else if !c.is_ascii_alphanumeric() && c != b'~' {
            start = None;
        }
    }

    start.unwrap_or(s.len())
}

// Weight of a non-digit character. End of input and digits weigh 0,
// `~` sorts before everything, letters before other punctuation.
fn weight(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(b'~') => -1,
        Some(c) => c as i32 + 256,
    }
}

fn is_digit(c: Option<u8>) -> bool {
    matches!(c, Some(c) if c.is_ascii_digit())
}

fn verrevcmp(a: &[u8], b: &[u8]) -> Ordering {
    let at = |i: usize| a.get(i).copied();
    let bt = |j: usize| b.get(j).copied();
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        while (i < a.len() && !is_digit(at(i))) || (j < b.len() && !is_digit(bt(j))) {
            let (wa, wb) = (weight(at(i)), weight(bt(j)));
            if wa != wb {
                return wa.cmp(&wb);
            }
            i += 1;
            j += 1;
        }

        while at(i) == Some(b'0') {
            i += 1;
        }
        while bt(j) == Some(b'0') {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while is_digit(at(i)) && is_digit(bt(j)) {
            if first_diff == Ordering::Equal {
                first_diff = at(i).cmp(&bt(j));
            }
            i += 1;
            j += 1;
        }

        // The longer digit run is the bigger number
        if is_digit(at(i)) {
            return Ordering::Greater;
        }
        if is_digit(bt(j)) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}
