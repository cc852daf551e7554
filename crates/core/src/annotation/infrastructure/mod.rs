mod bitmap_font;
pub mod raster_annotator;
