//! Labeled bins along the floor
//!
//! The canvas width is split evenly among the labels, with a short vertical
//! divider standing on the floor between neighboring bins.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::body::Body;
use super::collision::CollisionResult;
use super::segment::{Boundaries, Segment};
use crate::SimError;
use crate::renderer::Renderer;

/// Height above the floor at which labels are drawn
const LABEL_OFFSET: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct Sections {
    labels: Vec<String>,
    dividers: Boundaries,
    width: f32,
    height: f32,
    divider_height: f32,
}

impl Sections {
    /// Shuffle `labels` once and place the dividers between them
    pub fn new<R: Rng + ?Sized>(
        mut labels: Vec<String>,
        width: f32,
        height: f32,
        divider_height: f32,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        if labels.is_empty() {
            return Err(SimError::NoSections);
        }
        labels.shuffle(rng);
        let dividers = build_dividers(labels.len(), width, height, divider_height)?;

        Ok(Self {
            labels,
            dividers,
            width,
            height,
            divider_height,
        })
    }

    /// Re-shuffle the labels and rebuild the dividers
    pub fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimError> {
        self.labels.shuffle(rng);
        self.dividers = build_dividers(self.labels.len(), self.width, self.height, self.divider_height)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn dividers(&self) -> &Boundaries {
        &self.dividers
    }

    #[inline]
    pub fn bin_width(&self) -> f32 {
        self.width / self.labels.len() as f32
    }

    /// Index of the bin containing `x`, `None` off the canvas
    pub fn section_at(&self, x: f32) -> Option<usize> {
        if !(0.0..=self.width).contains(&x) {
            return None;
        }
        let index = (x / self.bin_width()) as usize;
        Some(index.min(self.labels.len() - 1))
    }

    /// Where the label of bin `index` is drawn
    pub fn label_position(&self, index: usize) -> Vec2 {
        Vec2::new(
            self.bin_width() * (index as f32 + 0.5),
            self.height - LABEL_OFFSET,
        )
    }

    /// Check the body against every divider
    pub fn check_collision(&self, body: &mut Body) -> Vec<(usize, CollisionResult)> {
        self.dividers.check_collision(body)
    }

    /// Draw the dividers and labels
    pub fn refresh<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for divider in self.dividers.iter() {
            renderer.draw_polyline(&divider.polyline());
        }
        for (i, label) in self.labels.iter().enumerate() {
            renderer.draw_text(label, self.label_position(i));
        }
    }
}

fn build_dividers(
    count: usize,
    width: f32,
    height: f32,
    divider_height: f32,
) -> Result<Boundaries, SimError> {
    let bin_width = width / count as f32;
    (1..count)
        .map(|i| {
            let x = bin_width * i as f32;
            Segment::new(Vec2::new(x, height), Vec2::new(x, height - divider_height))
        })
        .collect()
}
