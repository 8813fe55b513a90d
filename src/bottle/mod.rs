//! Bottle archives: locating one member inside a bottle and hashing it

pub mod checksum;
pub mod extractor;

pub use checksum::sha256_hex;
pub use extractor::{member_path, BottleArchive};
