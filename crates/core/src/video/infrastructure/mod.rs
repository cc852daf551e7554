pub mod camera_source;
mod ffmpeg_decoder;
pub mod image_file_source;
pub mod image_file_writer;
pub mod video_file_source;
pub mod window_sink;
