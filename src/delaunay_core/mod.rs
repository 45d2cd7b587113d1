mod dcel;
pub(crate) mod dcel_operations;
mod delaunay_core_impl;
mod handles;
mod hint_generator;
mod line_side_info;
mod triangulation_ext;

pub(crate) mod math;

pub use dcel::Dcel;
pub use hint_generator::LastUsedVertexHintGenerator;
pub use line_side_info::LineSideInfo;

pub use handles::iterators;
pub use handles::*;

pub use delaunay_core_impl::PositionInTriangulation;
