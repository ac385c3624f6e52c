pub(crate) mod background;
pub(crate) mod demo;
pub(crate) mod model;
