use crate::category::Category;
use crate::device_camera::interface::CaptureFrame;
use crate::image_classifier::interface::{
    AnnotatedImage, ClassifiedItem, ClassifyError, ImageClassifier, ScanOutcome,
};
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const MENU: [(&str, Category); 10] = [
    ("apple core", Category::Compost),
    ("banana peel", Category::Compost),
    ("napkin", Category::Trash),
    ("chip bag", Category::Trash),
    ("plastic bottle", Category::Recycle),
    ("soda can", Category::Recycle),
    ("milk carton", Category::Recycle),
    ("ceramic plate", Category::DishReturn),
    ("fork", Category::DishReturn),
    ("drinking glass", Category::DishReturn),
];

/// Stand-in classifier for running without a backend. Invents a plausible
/// tray after a short delay and echoes the frame back as the annotated
/// image, the way the real endpoint does.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger
                .with_namespace("image_classifier")
                .with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, frame: CaptureFrame) -> Result<ScanOutcome, ClassifyError> {
        if frame.is_empty() {
            return Err(ClassifyError::EmptyFrame);
        }
        let _ = self.logger.info("Classifying frame with fake classifier...");
        thread::sleep(Duration::from_millis(400));

        let mut rng = rand::rng();
        let count: usize = rng.random_range(1..=4);
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let (name, category) = MENU[rng.random_range(0..MENU.len())];
            items.push(ClassifiedItem {
                id: (index + 1).to_string(),
                name: name.to_string(),
                category,
                confidence: rng.random_range(0.55..0.99),
            });
        }

        let annotated = Some(AnnotatedImage {
            data_url: frame.to_data_url(),
            width: frame.width(),
            height: frame.height(),
        });

        Ok(ScanOutcome {
            frame,
            items,
            annotated,
            summary: None,
        })
    }
}
