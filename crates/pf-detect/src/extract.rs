use pf_contour::{ChainApprox, Contour, ContourTracer};
use pf_core::ImageView;

/// External contours of an edge map, compressed with the simple chain rule.
#[derive(Debug, Default)]
pub struct ContourExtractor {
    tracer: ContourTracer,
}

impl ContourExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(&mut self, edges: &ImageView<'_, u8>) -> Vec<Contour> {
        self.tracer.trace_external(edges, ChainApprox::Simple)
    }
}
