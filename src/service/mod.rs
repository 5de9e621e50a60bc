pub(crate) mod avatar;
pub(crate) mod cache;
pub(crate) mod fingerprint;
