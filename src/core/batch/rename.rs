//! Random output file names.
//!
//! Names are 12 symbols drawn uniformly and independently from a 66-symbol
//! alphabet (ASCII letters, digits and `-_@#`), followed by the original
//! extension. Uniqueness is not checked: two files in one run may draw the
//! same name, in which case the later one overwrites the earlier.

use rand::Rng;
use std::ffi::OsString;
use std::path::Path;

/// Number of random symbols in a generated name (extension excluded)
pub const RANDOM_NAME_LEN: usize = 12;

/// Symbols a generated name is drawn from
pub const RANDOM_NAME_ALPHABET: &[u8; 66] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_@#";

/// Generate a random file stem
pub fn random_stem<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_NAME_LEN)
        .map(|_| RANDOM_NAME_ALPHABET[rng.gen_range(0..RANDOM_NAME_ALPHABET.len())] as char)
        .collect()
}

/// Generate a random file name keeping the extension of `original`
pub fn random_file_name<R: Rng + ?Sized>(original: &Path, rng: &mut R) -> OsString {
    let mut name = OsString::from(random_stem(rng));
    if let Some(ext) = original.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}
