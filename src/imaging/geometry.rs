//! Pure dimension math for rendition planning.
//!
//! Everything here is pure and testable without I/O or pixel data. The
//! resize decision works off two ratios only: the source image's and the
//! target frame's.

/// Probed source image geometry, in pixels. Both values are positive for any
/// image that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// How the source is fitted into the target frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Scale so the entire source fits inside the frame. No cropping, no
    /// padding: only the scale axis is decided here.
    Contain,
    /// Scale so the source fills the frame on the priority axis. Best-fit
    /// cover: the off-axis dimension may exceed the frame when ratios
    /// differ — no crop step is applied.
    Cover,
}

/// Outcome of planning: either the frame already contains the source on the
/// priority axis (raw copy) or the source must be resampled to an exact box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    /// The source is small enough; copy its bytes verbatim. Upscaling is
    /// never planned.
    Copy,
    /// Decode, resample to exactly `width` x `height`, re-encode.
    Resample { width: u32, height: u32 },
}

/// Plan how to fit `source` into a `[width, height]` frame under `mode`.
///
/// One axis gets priority and is pinned to the frame; the other is derived
/// from the source aspect ratio with integer truncation. Contain gives the
/// width priority when the source is relatively wider than the frame; Cover
/// inverts that test. Equal ratios fall to height priority in both modes.
///
/// When the source does not exceed the frame on the priority axis the plan
/// is [`ResizePlan::Copy`]: small sources pass through untouched.
pub fn plan_resize(source: Dimensions, frame: [u32; 2], mode: FitMode) -> ResizePlan {
    let [frame_width, frame_height] = frame;
    let source_ratio = source.width as f64 / source.height as f64;
    let frame_ratio = frame_width as f64 / frame_height as f64;

    let width_priority = match mode {
        FitMode::Contain => source_ratio > frame_ratio,
        FitMode::Cover => source_ratio < frame_ratio,
    };

    if width_priority {
        let width = frame_width;
        let height = (width as f64 / source_ratio) as u32;
        if source.width <= width {
            ResizePlan::Copy
        } else {
            ResizePlan::Resample { width, height }
        }
    } else {
        let height = frame_height;
        let width = (height as f64 * source_ratio) as u32;
        if source.height <= height {
            ResizePlan::Copy
        } else {
            ResizePlan::Resample { width, height }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new(w, h)
    }

    // =========================================================================
    // Contain mode
    // =========================================================================

    #[test]
    fn contain_wide_source_pins_width() {
        // 2000x1000 (ratio 2.0) into 800x800 (ratio 1.0): width priority
        assert_eq!(
            plan_resize(dims(2000, 1000), [800, 800], FitMode::Contain),
            ResizePlan::Resample {
                width: 800,
                height: 400
            }
        );
    }

    #[test]
    fn contain_tall_source_pins_height() {
        // 1000x2000 (ratio 0.5) into 800x800: height priority
        assert_eq!(
            plan_resize(dims(1000, 2000), [800, 800], FitMode::Contain),
            ResizePlan::Resample {
                width: 400,
                height: 800
            }
        );
    }

    #[test]
    fn contain_derived_dimension_truncates() {
        // 1000x667 (ratio ~1.4993) into 800x800: height = 800 / ratio = 533.6 → 533
        assert_eq!(
            plan_resize(dims(1000, 667), [800, 800], FitMode::Contain),
            ResizePlan::Resample {
                width: 800,
                height: 533
            }
        );
    }

    // =========================================================================
    // Cover mode
    // =========================================================================

    #[test]
    fn cover_inverts_the_axis_choice() {
        // Same ratios as contain_wide_source_pins_width: cover pins height
        // instead, overflowing the frame width.
        assert_eq!(
            plan_resize(dims(2000, 1000), [800, 800], FitMode::Cover),
            ResizePlan::Resample {
                width: 1600,
                height: 800
            }
        );
    }

    #[test]
    fn cover_narrow_source_pins_width() {
        // 1000x2000 (ratio 0.5) into 800x800: source narrower than frame,
        // cover pins width and overflows the height.
        assert_eq!(
            plan_resize(dims(1000, 2000), [800, 800], FitMode::Cover),
            ResizePlan::Resample {
                width: 800,
                height: 1600
            }
        );
    }

    #[test]
    fn equal_ratios_fall_to_height_priority_in_both_modes() {
        // ratio 1.0 == 1.0: neither strict inequality holds, so both modes
        // pin the height and derive the same box.
        let contain = plan_resize(dims(1000, 1000), [500, 500], FitMode::Contain);
        let cover = plan_resize(dims(1000, 1000), [500, 500], FitMode::Cover);
        assert_eq!(
            contain,
            ResizePlan::Resample {
                width: 500,
                height: 500
            }
        );
        assert_eq!(contain, cover);
    }

    // =========================================================================
    // Copy path (upscale avoidance)
    // =========================================================================

    #[test]
    fn small_source_is_copied_in_contain_mode() {
        assert_eq!(
            plan_resize(dims(300, 300), [1200, 1200], FitMode::Contain),
            ResizePlan::Copy
        );
    }

    #[test]
    fn small_source_is_copied_in_cover_mode() {
        assert_eq!(
            plan_resize(dims(300, 300), [1200, 1200], FitMode::Cover),
            ResizePlan::Copy
        );
    }

    #[test]
    fn priority_dimension_equal_to_frame_is_copied() {
        // 800 <= 800 on the priority axis: no resize
        assert_eq!(
            plan_resize(dims(800, 400), [800, 800], FitMode::Contain),
            ResizePlan::Copy
        );
    }

    #[test]
    fn priority_dimension_one_over_frame_resamples() {
        assert_eq!(
            plan_resize(dims(801, 400), [800, 800], FitMode::Contain),
            ResizePlan::Resample {
                width: 800,
                height: 399
            }
        );
    }

    #[test]
    fn cover_copy_test_is_on_its_own_axis() {
        // 900x300 (ratio 3.0) into 800x800: cover pins height, and the
        // source height (300) is under the frame height (800) → copy, even
        // though the source width exceeds the frame.
        assert_eq!(
            plan_resize(dims(900, 300), [800, 800], FitMode::Cover),
            ResizePlan::Copy
        );
    }

    // =========================================================================
    // Degenerate boxes
    // =========================================================================

    #[test]
    fn extreme_ratio_can_truncate_to_zero() {
        // 10000x10 (ratio 1000) into 50x50: derived height truncates to 0.
        // The pipeline refuses to allocate such a target.
        assert_eq!(
            plan_resize(dims(10000, 10), [50, 50], FitMode::Contain),
            ResizePlan::Resample {
                width: 50,
                height: 0
            }
        );
    }
}
