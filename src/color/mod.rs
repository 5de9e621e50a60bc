pub(crate) mod assign;
pub(crate) mod contrast;
