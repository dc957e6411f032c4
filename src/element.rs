use crate::fit::RenderRect;
use gpui::{
    Element, ElementId, GlobalElementId, InspectorElementId, IntoElement, LayoutId, RenderImage,
    Window,
};
use std::sync::Arc;

/// The video frame, painted absolutely at a [`RenderRect`] of its parent.
pub struct VideoSurface {
    image: Option<Arc<RenderImage>>,
    rect: RenderRect,
    element_id: Option<ElementId>,
}

impl VideoSurface {
    pub fn new(image: Option<Arc<RenderImage>>, rect: RenderRect) -> Self {
        Self {
            image,
            rect,
            element_id: None,
        }
    }

    pub fn id(mut self, id: impl Into<ElementId>) -> Self {
        self.element_id = Some(id.into());
        self
    }
}

fn pixels(value: f32) -> gpui::Length {
    gpui::Length::Definite(gpui::DefiniteLength::Absolute(gpui::AbsoluteLength::Pixels(
        gpui::px(value),
    )))
}

impl Element for VideoSurface {
    type RequestLayoutState = ();
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        self.element_id.clone()
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut gpui::App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let style = gpui::Style {
            position: gpui::Position::Absolute,
            inset: gpui::Edges {
                top: pixels(self.rect.y),
                left: pixels(self.rect.x),
                right: gpui::Length::Auto,
                bottom: gpui::Length::Auto,
            },
            size: gpui::Size {
                width: pixels(self.rect.width),
                height: pixels(self.rect.height),
            },
            ..Default::default()
        };

        let layout_id = window.request_layout(style, [], cx);
        (layout_id, ())
    }

    fn prepaint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: gpui::Bounds<gpui::Pixels>,
        _request_layout_state: &mut Self::RequestLayoutState,
        _window: &mut Window,
        _cx: &mut gpui::App,
    ) -> Self::PrepaintState {
    }

    fn paint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: gpui::Bounds<gpui::Pixels>,
        _request_layout_state: &mut Self::RequestLayoutState,
        _prepaint_state: &mut Self::PrepaintState,
        window: &mut Window,
        _cx: &mut gpui::App,
    ) {
        let Some(image) = self.image.clone() else {
            return;
        };
        if let Err(err) = window.paint_image(bounds, gpui::Corners::default(), image, 0, false) {
            log::error!("failed to paint video frame: {err}");
        }
    }
}

impl IntoElement for VideoSurface {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

/// Helper function to create a video surface
pub fn video_surface(image: Option<Arc<RenderImage>>, rect: RenderRect) -> VideoSurface {
    VideoSurface::new(image, rect)
}
