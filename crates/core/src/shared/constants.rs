pub const FACE_MODEL_NAME: &str = "opencv_face_detector.onnx";
pub const AGE_MODEL_NAME: &str = "age_net.onnx";
pub const GENDER_MODEL_NAME: &str = "gender_net.onnx";

/// Directory, relative to the install root, holding the three networks.
pub const MODELS_DIR_NAME: &str = "models";

/// Detections must score strictly above this to be kept.
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Pixels of context added around each face before classification.
pub const DEFAULT_PADDING: u32 = 20;

pub const DETECTOR_INPUT_SIZE: u32 = 300;
/// Per-channel means in R, G, B order for the SSD detector.
pub const DETECTOR_MEAN: [f32; 3] = [104.0, 117.0, 123.0];

pub const CLASSIFIER_INPUT_SIZE: u32 = 227;
/// Per-channel means in B, G, R order for the age/gender networks.
pub const CLASSIFIER_MEAN: [f32; 3] = [78.426_338, 87.768_914, 114.895_85];

pub const WINDOW_TITLE: &str = "Age-Gender Detection";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
