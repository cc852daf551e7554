pub mod error;

pub mod shared {
    pub mod blob;
    pub mod bounding_box;
    pub mod constants;
    pub mod frame;
    pub mod model_paths;
    pub mod onnx_session;
}

pub mod detection {
    pub mod domain {
        pub mod detection;
        pub mod face_detector;
    }
    pub mod infrastructure;
}

pub mod classification {
    pub mod domain {
        pub mod attribute_classifier;
        pub mod vocabulary;
    }
    pub mod infrastructure;
}

pub mod annotation {
    pub mod domain {
        pub mod frame_annotator;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod frame_sink;
        pub mod frame_source;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod frame_report;
    pub mod pipeline_config;
    pub mod pipeline_driver;
    pub mod pipeline_logger;
    pub mod region_extractor;
}
