/// Business logic layer
///
/// - `culturas`: content post lifecycle, including image files
/// - `chat_proxy`: forwards chat completions to the configured upstream
/// - `keyed_locks`: per-post sequencing for update and delete
pub mod chat_proxy;
pub mod culturas;
pub mod keyed_locks;

pub use chat_proxy::ChatProxy;
pub use culturas::CulturaService;
pub use keyed_locks::{KeyGuard, KeyedLocks};
