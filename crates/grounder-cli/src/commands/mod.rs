pub(crate) mod enumerate;
pub(crate) mod helpers;
pub(crate) mod simplify;
