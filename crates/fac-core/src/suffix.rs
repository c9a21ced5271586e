//! Two-letter part suffix enumeration.
//!
//! Split archives on the mirror are numbered `aa`, `ab`, .. `az`, `ba`, ..
//! `zz`. Download order and combination order are both this lexical order.

/// The suffix of the first part of every split set.
pub const FIRST: &str = "aa";

/// Number of possible suffixes (`aa` through `zz`).
pub const COUNT: usize = 26 * 26;

/// Returns the part suffixes in ascending order, outer letter major.
///
/// The iterator is finite (676 elements) and cheap to restart by calling
/// this function again.
pub fn part_suffixes() -> impl Iterator<Item = String> {
    (b'a'..=b'z').flat_map(|major| {
        (b'a'..=b'z').map(move |minor| {
            let mut s = String::with_capacity(2);
            s.push(major as char);
            s.push(minor as char);
            s
        })
    })
}
