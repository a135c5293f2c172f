/*!
Generic, domain-independent helpers shared across the library.
*/

pub mod lru;
pub use lru::LruCache;
