//! Package resolution: formula lookup followed by per-platform bottle hashing

pub mod package_resolver;

pub use package_resolver::{validate_package_id, PackageResolver, PackageResult};
