//! Aspect-ratio preserving placement of the video inside the window.

/// Position and size of the video surface inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit a `source` frame into `container`, both given as `(width, height)`.
///
/// The result fills the full container width when the scaled height fits and
/// is vertically centered (letterbox); otherwise it fills the full height and
/// is horizontally centered (pillarbox).
///
/// All dimensions must be strictly positive.
pub fn fit_rect(source: (f32, f32), container: (f32, f32)) -> RenderRect {
    let (frame_width, frame_height) = source;
    let (container_width, container_height) = container;
    debug_assert!(frame_width > 0.0 && frame_height > 0.0);
    debug_assert!(container_width > 0.0 && container_height > 0.0);

    let height = frame_height * container_width / frame_width;
    if height <= container_height {
        RenderRect {
            x: 0.0,
            y: (container_height - height) / 2.0,
            width: container_width,
            height,
        }
    } else {
        let width = frame_width * container_height / frame_height;
        RenderRect {
            x: (container_width - width) / 2.0,
            y: 0.0,
            width,
            height: container_height,
        }
    }
}

/// The two sizes the render rectangle depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameGeometry {
    pub source: (f32, f32),
    pub container: (f32, f32),
}

impl FrameGeometry {
    /// Start from the natural size the media already reported, if any.
    pub fn with_source(natural_size: Option<(u32, u32)>) -> Self {
        let mut geometry = Self::default();
        if let Some((width, height)) = natural_size {
            geometry.set_source(width as f32, height as f32);
        }
        geometry
    }

    /// Record a new natural frame size. Returns whether it changed.
    pub fn set_source(&mut self, width: f32, height: f32) -> bool {
        let changed = self.source != (width, height);
        self.source = (width, height);
        changed
    }

    /// Record a new container size. Returns whether it changed.
    pub fn set_container(&mut self, width: f32, height: f32) -> bool {
        let changed = self.container != (width, height);
        self.container = (width, height);
        changed
    }

    /// Compute the render rectangle, or `None` while either size is empty.
    pub fn fit(&self) -> Option<RenderRect> {
        let positive = |(w, h): (f32, f32)| w > 0.0 && h > 0.0;
        (positive(self.source) && positive(self.container))
            .then(|| fit_rect(self.source, self.container))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn assert_contained(rect: RenderRect, container: (f32, f32)) {
        assert!(rect.x >= 0.0 && rect.y >= 0.0, "{rect:?}");
        assert!(rect.x + rect.width <= container.0 + EPSILON, "{rect:?}");
        assert!(rect.y + rect.height <= container.1 + EPSILON, "{rect:?}");
    }

    #[test]
    fn hd_frame_is_letterboxed_in_pal_window() {
        let rect = fit_rect((1920.0, 1080.0), (768.0, 576.0));
        assert_eq!(
            rect,
            RenderRect {
                x: 0.0,
                y: 72.0,
                width: 768.0,
                height: 432.0,
            }
        );
    }

    #[test]
    fn four_by_three_frame_in_square_window() {
        let rect = fit_rect((640.0, 480.0), (300.0, 300.0));
        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.height, 225.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 37.5);
    }

    #[test]
    fn tall_frame_is_pillarboxed() {
        let rect = fit_rect((1080.0, 1920.0), (800.0, 600.0));
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.height, 600.0);
        assert!((rect.width - 337.5).abs() < EPSILON);
        assert!((rect.x - (800.0 - rect.width) / 2.0).abs() < EPSILON);
    }

    #[test]
    fn matching_aspect_fills_container() {
        let rect = fit_rect((320.0, 240.0), (1024.0, 768.0));
        assert_eq!(
            rect,
            RenderRect {
                x: 0.0,
                y: 0.0,
                width: 1024.0,
                height: 768.0,
            }
        );
    }

    #[test]
    fn fit_is_contained_centered_and_keeps_aspect() {
        let sources = [(1920.0, 1080.0), (640.0, 480.0), (720.0, 1280.0), (1.0, 1.0), (4096.0, 1716.0)];
        let containers = [(768.0, 576.0), (300.0, 300.0), (640.0, 480.0), (1920.0, 200.0), (50.0, 1000.0)];

        for source in sources {
            for container in containers {
                let rect = fit_rect(source, container);
                assert_contained(rect, container);

                let expected = source.0 / source.1;
                let actual = rect.width / rect.height;
                assert!(
                    (expected - actual).abs() / expected < EPSILON,
                    "aspect {source:?} in {container:?}: {rect:?}"
                );

                if rect.width == container.0 {
                    assert_eq!(rect.x, 0.0);
                    assert!((rect.y - (container.1 - rect.height) / 2.0).abs() < EPSILON);
                } else {
                    assert_eq!(rect.height, container.1);
                    assert_eq!(rect.y, 0.0);
                    assert!((rect.x - (container.0 - rect.width) / 2.0).abs() < EPSILON);
                }
            }
        }
    }

    #[test]
    fn geometry_without_frame_has_no_rect() {
        let mut geometry = FrameGeometry::default();
        assert!(geometry.set_container(768.0, 576.0));
        assert_eq!(geometry.fit(), None);

        assert!(geometry.set_source(1920.0, 1080.0));
        assert_eq!(geometry.fit(), Some(fit_rect((1920.0, 1080.0), (768.0, 576.0))));

        assert!(geometry.set_container(0.0, 0.0));
        assert_eq!(geometry.fit(), None);
    }

    #[test]
    fn size_known_before_window_fits_once_window_is_sized() {
        let mut geometry = FrameGeometry::with_source(Some((1920, 1080)));
        assert_eq!(geometry.fit(), None);

        // the size event was already consumed, only the container arrives
        assert!(geometry.set_container(768.0, 576.0));
        assert_eq!(
            geometry.fit(),
            Some(RenderRect { x: 0.0, y: 72.0, width: 768.0, height: 432.0 })
        );

        assert_eq!(FrameGeometry::with_source(None), FrameGeometry::default());
    }

    #[test]
    fn geometry_reports_unchanged_sizes() {
        let mut geometry = FrameGeometry::default();
        geometry.set_source(640.0, 480.0);
        assert!(!geometry.set_source(640.0, 480.0));
        geometry.set_container(300.0, 300.0);
        assert!(!geometry.set_container(300.0, 300.0));
    }
}
