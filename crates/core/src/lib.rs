//! Passport photo cropping driven by facial landmarks.
//!
//! The crate is split into bounded contexts, each with a `domain` layer
//! (pure types and traits) and an `infrastructure` layer (ONNX models,
//! image files):
//!
//! - [`detection`] turns a frame into named landmark groups.
//! - [`cropping`] derives the crop rectangle and the rescaled DPI.
//! - [`photo`] reads and writes image files with their resolution metadata.
//! - [`pipeline`] wires the three together for a single photo.

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod image_metrics;
    pub mod model_resolver;
    pub mod point;
}

pub mod detection {
    pub mod domain {
        pub mod face_box;
        pub mod facial_feature;
        pub mod landmark_detector;
        pub mod landmark_set;
    }
    pub mod infrastructure;
}

pub mod cropping {
    pub mod domain {
        pub mod crop_rectangle;
        pub mod crop_rectangle_calculator;
        pub mod dpi_rescaler;
        pub mod geometry_error;
        pub mod landmark_geometry_resolver;
        pub mod scaling_factor;
    }
}

pub mod photo {
    pub mod domain {
        pub mod image_reader;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod crop_passport_photo_use_case;
    pub mod passport_photo_error;
}
