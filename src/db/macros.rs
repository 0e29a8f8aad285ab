//! Backend dispatch macros for reducing code duplication.
//!
//! The sqlx pool, connection and connect-options types are distinct per
//! backend, so every operation on them is a three-armed match. These macros
//! generate those arms while keeping call sites linear.

/// Macro for generating backend dispatch match arms over one of the
/// per-backend enums in [`crate::db::pool`].
///
/// # Example
///
/// ```ignore
/// impl_db_dispatch!(DbPool, pool, {
///     MySql(p) => p.close().await,
///     Postgres(p) => p.close().await,
///     SQLite(p) => p.close().await,
/// });
/// ```
#[macro_export]
macro_rules! impl_db_dispatch {
    ($kind:ident, $value:expr, { $($variant:ident($p:ident) => $body:expr),+ $(,)? }) => {
        match $value {
            $(
                $crate::db::pool::$kind::$variant($p) => $body,
            )+
        }
    };
}

pub use impl_db_dispatch;
