//! Share identifier generation.

use crate::constants::ID_LENGTH;
use rand::Rng;
use std::sync::Arc;

/// URL-safe symbols used in share identifiers.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of candidate identifiers used by [`crate::PasteService`].
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Generate a random [`ID_LENGTH`]-character identifier.
///
/// Uniqueness is not guaranteed; the store rejects duplicates and the service
/// retries with a fresh id.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Default generator backed by [`generate_id`].
pub fn default_generator() -> IdGenerator {
    Arc::new(generate_id)
}

/// Whether `id` could have been produced by [`generate_id`].
///
/// Lets read paths skip the store for ids that can never exist.
pub fn is_well_formed(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| ID_ALPHABET.contains(&b))
}
