pub(crate) mod blur;
pub(crate) mod evaluate;
pub(crate) mod lens;
pub(crate) mod sampler;
pub(crate) mod sdf;
pub(crate) mod shading;
pub(crate) mod warp;
