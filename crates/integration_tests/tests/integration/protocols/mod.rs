#[cfg(feature = "frost")]
mod frost_core;
#[cfg(feature = "frost-ed25519")]
mod frost_ed25519;
