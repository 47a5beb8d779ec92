//! Stand-in image classifier.
//!
//! Real recognition is out of scope.  [`ScoredImageClassifier`] asks a
//! caller-supplied function for a cat confidence score (0–100) and compares
//! it to the threshold the engine passes in.  A host wires in whatever
//! produces scores: a canned script, a UI toggle, an external model.

use core::fmt;

use log::debug;

use crate::app::ports::ImageClassifier;

pub struct ScoredImageClassifier<I> {
    score: Box<dyn FnMut(&I) -> f32>,
}

impl<I> ScoredImageClassifier<I> {
    pub fn new(score: impl FnMut(&I) -> f32 + 'static) -> Self {
        Self {
            score: Box::new(score),
        }
    }
}

impl<I> fmt::Debug for ScoredImageClassifier<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoredImageClassifier").finish_non_exhaustive()
    }
}

impl<I> ImageClassifier for ScoredImageClassifier<I> {
    type Image = I;

    /// A score strictly above the threshold counts as a cat.
    fn image_contains_cat(&mut self, image: &I, confidence_threshold: f32) -> bool {
        let score = (self.score)(image);
        debug!("Cat confidence {:.1}% vs threshold {:.1}%", score, confidence_threshold);
        score > confidence_threshold
    }
}
