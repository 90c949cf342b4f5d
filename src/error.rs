//! Error taxonomy for the FSRS core (spec §7).

/// Failure modes the core itself can surface.
///
/// `InvalidInstant` is part of the taxonomy for parity with hosts that
/// accept instants as strings or as datetimes with an arbitrary offset:
/// this crate's public API only ever accepts `chrono::DateTime<Utc>`,
/// whose type already guarantees a UTC offset, so this variant cannot be
/// constructed through the public surface. It stays in the enum because
/// removing it would silently drop a documented contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("instant is not UTC")]
    InvalidInstant,

    #[error("invalid parameters: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
