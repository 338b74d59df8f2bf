//! Substitution-cipher core: the fixed disk alphabet and the shift
//! transform. No I/O, no state, total over all inputs.

mod state;

pub use state::{DiskState, EditSource};

/// The 32-letter Ukrainian alphabet, in disk order. Position 0 is the
/// fixed reference mark at the top of the disk.
pub const ALPHABET: [char; 32] = [
    'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Є', 'Ж', 'З', 'И', 'І', 'Ї', 'Й', 'К', 'Л', 'М', 'Н', 'О',
    'П', 'Р', 'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ь', 'Ю', 'Я',
];

pub const ALPHABET_LEN: usize = ALPHABET.len();

/// Angular width of one alphabet sector on the disk, in degrees.
pub const SECTOR_DEGREES: f64 = 360.0 / ALPHABET_LEN as f64;

/// Position of an (uppercase) character in the alphabet, if any.
pub fn position(ch: char) -> Option<usize> {
    ALPHABET.iter().position(|&a| a == ch)
}

/// Applies the shift transform to `text`.
///
/// Every character is uppercased first; characters outside the alphabet
/// pass through unchanged after that fold. Alphabet characters at
/// position `i` map to position `(i + shift) mod 32`, with true-modulo
/// semantics so negative shifts wrap correctly.
///
/// Encoding uses a negative shift, decoding the matching positive one;
/// the disk state in [`DiskState`] owns that sign convention.
pub fn transform(text: &str, shift: i32) -> String {
    let len = ALPHABET_LEN as i32;
    text.chars()
        .flat_map(char::to_uppercase)
        .map(|ch| match position(ch) {
            Some(i) => ALPHABET[(i as i32 + shift).rem_euclid(len) as usize],
            None => ch,
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
