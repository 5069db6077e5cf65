//! Extract the dominant colors of an image.
//!
//! Colors are quantized with a modified median cut: pixels are counted in a
//! histogram with 5 bits per channel, then the RGB cube is split into boxes
//! until there are as many boxes as requested colors. The average color of
//! each box is one of the results.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use image::RgbaImage;

use crate::{
    code::ColorCode,
    error::ExtractError,
    models::{Model, Srgb},
    Component,
};

const SIGNIFICANT_BITS: u32 = 5;
const SHIFT: u32 = 8 - SIGNIFICANT_BITS;
const SIDE: usize = 1 << SIGNIFICANT_BITS;
const MAX_ITERATIONS: usize = 1000;
/// Share of the boxes that are split by population alone, the rest are split
/// by population times volume.
const POPULATION_FRACTION: f32 = 0.75;
/// Pixels sampled between checks of the cancel flag.
const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Options for extracting colors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ExtractOptions {
    /// The maximum number of colors to extract.
    pub count: usize,
    /// Only every `quality`-th pixel is sampled. 1 samples every pixel.
    pub quality: usize,
    /// Colors closer than this (Euclidean distance of 8-bit RGB) to an
    /// existing color are dropped by [`filter_distinct`].
    pub min_distance: Component,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            count: 8,
            quality: 10,
            min_distance: 30.0,
        }
    }
}

/// Where to read an image from.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// A file in any format supported by the `image` crate.
    Path(PathBuf),
    /// An encoded image in memory.
    Bytes(Vec<u8>),
    /// A decoded image.
    Image(RgbaImage),
}

impl ImageSource {
    fn load(self) -> Result<RgbaImage, ExtractError> {
        Ok(match self {
            ImageSource::Path(path) => image::open(path)?.to_rgba8(),
            ImageSource::Bytes(bytes) => image::load_from_memory(&bytes)?.to_rgba8(),
            ImageSource::Image(image) => image,
        })
    }
}

/// Return the dominant colors of an image, most common first.
pub fn dominant_colors(
    image: &RgbaImage,
    options: &ExtractOptions,
) -> Result<Vec<[u8; 3]>, ExtractError> {
    extract(image, options, &AtomicBool::new(false))
}

/// Convert candidates to hex codes, dropping those that are within
/// `min_distance` of any of the `existing` colors.
pub fn filter_distinct(
    candidates: &[[u8; 3]],
    existing: &[ColorCode],
    min_distance: Component,
) -> Vec<ColorCode> {
    let existing = existing
        .iter()
        .map(|code| Srgb::from_color(&code.color().to_srgb_in_gamut()).to_rgb8())
        .collect::<Vec<_>>();

    candidates
        .iter()
        .filter(|candidate| {
            existing
                .iter()
                .all(|other| distance(candidate, other) >= min_distance)
        })
        .map(|&rgb| ColorCode::from_srgb(Srgb::from_rgb8(rgb).to_color(Some(1.0))))
        .collect()
}

fn distance(a: &[u8; 3], b: &[u8; 3]) -> Component {
    a.iter()
        .zip(b)
        .map(|(&a, &b)| {
            let d = a as Component - b as Component;
            d * d
        })
        .sum::<Component>()
        .sqrt()
}

/// Runs one extraction at a time on a background thread.
#[derive(Debug, Default)]
pub struct Extractor {
    options: ExtractOptions,
    extracting: Arc<AtomicBool>,
}

impl Extractor {
    /// Create an extractor.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            extracting: Arc::default(),
        }
    }

    /// True while a started task has not finished.
    pub fn is_extracting(&self) -> bool {
        self.extracting.load(Ordering::Acquire)
    }

    /// Start extracting colors from `source`. Fails with
    /// [`ExtractError::Busy`] if a task is still running.
    pub fn start(&self, source: ImageSource) -> Result<ExtractionTask, ExtractError> {
        if self
            .extracting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExtractError::Busy);
        }

        let guard = ExtractingGuard(Arc::clone(&self.extracting));
        let cancel = Arc::new(AtomicBool::new(false));
        let options = self.options;

        let handle = {
            let cancel = Arc::clone(&cancel);
            thread::spawn(move || {
                let _guard = guard;
                tracing::debug!("extracting colors");
                let image = source.load()?;
                extract(&image, &options, &cancel)
            })
        };

        Ok(ExtractionTask { cancel, handle })
    }
}

/// Resets the extracting flag when the task is done, even if it panicked.
struct ExtractingGuard(Arc<AtomicBool>);

impl Drop for ExtractingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A running extraction.
#[derive(Debug)]
pub struct ExtractionTask {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<Result<Vec<[u8; 3]>, ExtractError>>,
}

impl ExtractionTask {
    /// Ask the task to stop. [`ExtractionTask::wait`] will return
    /// [`ExtractError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// True if the task has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the task finishes and return its result.
    pub fn wait(self) -> Result<Vec<[u8; 3]>, ExtractError> {
        let result = self
            .handle
            .join()
            .unwrap_or(Err(ExtractError::ExtractionFailure));

        if self.cancel.load(Ordering::Acquire) {
            return Err(ExtractError::Cancelled);
        }
        result
    }
}

fn extract(
    image: &RgbaImage,
    options: &ExtractOptions,
    cancel: &AtomicBool,
) -> Result<Vec<[u8; 3]>, ExtractError> {
    let histogram = Histogram::sample(image, options.quality.max(1), cancel)?;
    if histogram.total == 0 {
        return Err(ExtractError::ExtractionFailure);
    }

    let boxes = quantize(&histogram, options.count.max(1), cancel)?;
    let colors = boxes
        .iter()
        .map(|vbox| vbox.average(&histogram))
        .collect::<Vec<_>>();

    tracing::debug!(count = colors.len(), "extracted colors");
    Ok(colors)
}

fn index(r: usize, g: usize, b: usize) -> usize {
    (r << (2 * SIGNIFICANT_BITS)) | (g << SIGNIFICANT_BITS) | b
}

struct Histogram {
    counts: Vec<u32>,
    total: u64,
}

impl Histogram {
    fn sample(
        image: &RgbaImage,
        quality: usize,
        cancel: &AtomicBool,
    ) -> Result<Self, ExtractError> {
        let mut counts = vec![0; SIDE * SIDE * SIDE];
        let mut total = 0;

        for (i, pixel) in image.pixels().step_by(quality).enumerate() {
            if i % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                return Err(ExtractError::Cancelled);
            }

            let [r, g, b, a] = pixel.0;
            // Skip mostly transparent and almost white pixels.
            if a < 125 || (r > 250 && g > 250 && b > 250) {
                continue;
            }

            let i = index(
                (r >> SHIFT) as usize,
                (g >> SHIFT) as usize,
                (b >> SHIFT) as usize,
            );
            counts[i] += 1;
            total += 1;
        }

        Ok(Self { counts, total })
    }
}

/// An axis aligned box in the quantized RGB cube, bounds inclusive.
#[derive(Clone, Debug)]
struct VBox {
    min: [usize; 3],
    max: [usize; 3],
    count: u64,
}

impl VBox {
    /// The smallest box containing all populated cells within the bounds.
    fn fit(histogram: &Histogram, min: [usize; 3], max: [usize; 3]) -> Option<Self> {
        let mut fitted = VBox {
            min: max,
            max: min,
            count: 0,
        };

        for r in min[0]..=max[0] {
            for g in min[1]..=max[1] {
                for b in min[2]..=max[2] {
                    let n = histogram.counts[index(r, g, b)];
                    if n == 0 {
                        continue;
                    }
                    for (axis, value) in [r, g, b].into_iter().enumerate() {
                        fitted.min[axis] = fitted.min[axis].min(value);
                        fitted.max[axis] = fitted.max[axis].max(value);
                    }
                    fitted.count += n as u64;
                }
            }
        }

        (fitted.count > 0).then_some(fitted)
    }

    fn volume(&self) -> u64 {
        (0..3)
            .map(|axis| (self.max[axis] - self.min[axis] + 1) as u64)
            .product()
    }

    fn cells(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (self.min[0]..=self.max[0]).flat_map(move |r| {
            (self.min[1]..=self.max[1])
                .flat_map(move |g| (self.min[2]..=self.max[2]).map(move |b| [r, g, b]))
        })
    }

    /// Split the box across its longest axis at the median. Returns `None`
    /// for boxes that contain a single cell.
    fn split(&self, histogram: &Histogram) -> Option<(VBox, VBox)> {
        if self.volume() == 1 {
            return None;
        }

        let axis = (0..3)
            .max_by_key(|&axis| (self.max[axis] - self.min[axis], std::cmp::Reverse(axis)))?;

        let mut plane_counts = vec![0u64; self.max[axis] - self.min[axis] + 1];
        for cell in self.cells() {
            plane_counts[cell[axis] - self.min[axis]] +=
                histogram.counts[index(cell[0], cell[1], cell[2])] as u64;
        }

        let mut partial = 0;
        let mut median = self.max[axis];
        for (offset, n) in plane_counts.iter().enumerate() {
            partial += n;
            if partial * 2 > self.count {
                median = self.min[axis] + offset;
                break;
            }
        }
        // Both halves must keep at least one plane.
        let split_at = median.min(self.max[axis] - 1);

        let mut left_max = self.max;
        left_max[axis] = split_at;
        let mut right_min = self.min;
        right_min[axis] = split_at + 1;

        Some((
            VBox::fit(histogram, self.min, left_max)?,
            VBox::fit(histogram, right_min, self.max)?,
        ))
    }

    fn average(&self, histogram: &Histogram) -> [u8; 3] {
        let mut sums = [0.0f64; 3];
        let mut total = 0.0;
        for cell in self.cells() {
            let n = histogram.counts[index(cell[0], cell[1], cell[2])] as f64;
            total += n;
            for axis in 0..3 {
                sums[axis] += n * (cell[axis] as f64 + 0.5) * (1 << SHIFT) as f64;
            }
        }
        sums.map(|sum| (sum / total).round().clamp(0.0, 255.0) as u8)
    }
}

fn quantize(
    histogram: &Histogram,
    count: usize,
    cancel: &AtomicBool,
) -> Result<Vec<VBox>, ExtractError> {
    let full = [SIDE - 1; 3];
    let mut boxes = VBox::fit(histogram, [0; 3], full).into_iter().collect::<Vec<_>>();

    let by_population = ((count as f32 * POPULATION_FRACTION).ceil() as usize).max(1);
    split_boxes(histogram, &mut boxes, by_population, |b| b.count, cancel)?;
    split_boxes(histogram, &mut boxes, count, |b| b.count * b.volume(), cancel)?;

    boxes.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(boxes)
}

/// Split the box with the highest priority until there are `target` boxes or
/// nothing left to split.
fn split_boxes(
    histogram: &Histogram,
    boxes: &mut Vec<VBox>,
    target: usize,
    priority: impl Fn(&VBox) -> u64,
    cancel: &AtomicBool,
) -> Result<(), ExtractError> {
    for _ in 0..MAX_ITERATIONS {
        if boxes.len() >= target {
            break;
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(ExtractError::Cancelled);
        }

        let Some(index) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.volume() > 1)
            .max_by_key(|(_, b)| priority(b))
            .map(|(index, _)| index)
        else {
            break;
        };

        let vbox = boxes.swap_remove(index);
        match vbox.split(histogram) {
            Some((left, right)) => {
                boxes.push(left);
                boxes.push(right);
            }
            None => {
                boxes.push(vbox);
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn close(a: [u8; 3], b: [u8; 3]) -> bool {
        distance(&a, &b) < 12.0
    }

    fn two_tone() -> RgbaImage {
        RgbaImage::from_fn(40, 40, |x, _| {
            if x < 30 {
                Rgba([200, 30, 30, 255])
            } else {
                Rgba([20, 40, 180, 255])
            }
        })
    }

    #[test]
    fn distinct_colors_are_kept() {
        let existing = [ColorCode::new("rgb(10, 10, 10)").unwrap()];
        let kept = filter_distinct(&[[12, 11, 9], [200, 10, 10]], &existing, 30.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].as_str(), "#c80a0a");
    }

    #[test]
    fn dominant_colors_of_two_tones() {
        let options = ExtractOptions {
            quality: 1,
            ..ExtractOptions::default()
        };
        let colors = dominant_colors(&two_tone(), &options).unwrap();
        assert_eq!(colors.len(), 2);
        // Most common first.
        assert!(close(colors[0], [200, 30, 30]), "{colors:?}");
        assert!(close(colors[1], [20, 40, 180]), "{colors:?}");
    }

    #[test]
    fn many_colors_are_reduced_to_count() {
        let image = RgbaImage::from_fn(64, 64, |x, y| {
            Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255])
        });
        let options = ExtractOptions {
            count: 5,
            quality: 1,
            ..ExtractOptions::default()
        };
        let colors = dominant_colors(&image, &options).unwrap();
        assert_eq!(colors.len(), 5);
    }

    #[test]
    fn white_and_transparent_pixels_are_ignored() {
        let image = RgbaImage::from_fn(10, 10, |x, _| {
            if x % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        assert!(matches!(
            dominant_colors(&image, &ExtractOptions::default()),
            Err(ExtractError::ExtractionFailure)
        ));
    }

    #[test]
    fn extractor_runs_one_task_at_a_time() {
        let extractor = Extractor::new(ExtractOptions {
            quality: 1,
            ..ExtractOptions::default()
        });

        extractor.extracting.store(true, Ordering::Release);
        assert!(matches!(
            extractor.start(ImageSource::Image(two_tone())),
            Err(ExtractError::Busy)
        ));
        extractor.extracting.store(false, Ordering::Release);

        let task = extractor.start(ImageSource::Image(two_tone())).unwrap();
        let colors = task.wait().unwrap();
        assert_eq!(colors.len(), 2);
        assert!(!extractor.is_extracting());
    }

    #[test]
    fn cancelled_tasks_resolve_as_cancelled() {
        let extractor = Extractor::default();
        let task = extractor.start(ImageSource::Image(two_tone())).unwrap();
        task.cancel();
        assert!(matches!(task.wait(), Err(ExtractError::Cancelled)));
        assert!(!extractor.is_extracting());
    }

    #[test]
    fn undecodable_images_fail_to_load() {
        let extractor = Extractor::default();
        let task = extractor
            .start(ImageSource::Bytes(b"not an image".to_vec()))
            .unwrap();
        assert!(matches!(task.wait(), Err(ExtractError::ImageLoadFailure(_))));
    }
}
