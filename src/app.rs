use crate::Error;
use crate::element::video_surface;
use crate::fit::{FrameGeometry, RenderRect};
use crate::input::{InputAction, action_for_key};
use crate::options::PlayerOptions;
use crate::playback::{PlaybackController, PlaybackState};
use crate::video::{MediaEvent, Video};
use crate::{frame, visualization};
use gpui::{
    App, AppContext, Application, Bounds, Context, CursorStyle, FocusHandle, IntoElement,
    KeyDownEvent, ParentElement, Render, RenderImage, Styled, TitlebarOptions, Window, WindowBounds,
    WindowOptions, div, prelude::*, px, size,
};
use gstreamer as gst;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// The player window: owns the video, its playback state and the geometry of
/// the surface it is drawn on.
pub struct PlayerView {
    video: Video,
    controller: PlaybackController,
    geometry: FrameGeometry,
    rect: Option<RenderRect>,
    image: Option<Arc<RenderImage>>,
    focus_handle: FocusHandle,
    show_cursor: bool,
    closing: bool,
}

impl PlayerView {
    pub fn new(
        video: Video,
        controller: PlaybackController,
        show_cursor: bool,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let focus_handle = cx.focus_handle();
        window.focus(&focus_handle);

        // the first frame may have been decoded before the window existed
        let geometry = FrameGeometry::with_source(video.natural_size());

        Self {
            video,
            controller,
            geometry,
            rect: None,
            image: None,
            focus_handle,
            show_cursor,
            closing: false,
        }
    }

    /// Route pipeline notifications to the geometry and the controller.
    fn handle_media_events(&mut self) -> bool {
        let mut source_changed = false;
        for event in self.video.poll_events() {
            match event {
                MediaEvent::SizeChanged { width, height } => {
                    log::debug!("natural frame size is now {width}x{height}");
                    source_changed |= self.geometry.set_source(width as f32, height as f32);
                }
                MediaEvent::EndOfStream => {
                    self.controller.on_end_of_stream(&self.video);
                }
                MediaEvent::Error(message) => {
                    self.controller.on_error(&message);
                }
            }
        }
        source_changed
    }

    fn update_geometry(&mut self, window: &Window, source_changed: bool) {
        let viewport = window.viewport_size();
        let container_changed = self
            .geometry
            .set_container(f32::from(viewport.width), f32::from(viewport.height));

        if source_changed || container_changed {
            self.rect = self.geometry.fit();
            log::debug!("video rect {:?} in {:?}", self.rect, self.geometry.container);
        }
    }

    fn refresh_frame(&mut self, window: &mut Window) {
        let Some(sample) = self.video.take_frame() else {
            return;
        };
        match frame::render_image(&sample) {
            Ok(image) => {
                if let Some(previous) = self.image.replace(image) {
                    if let Err(err) = window.drop_image(previous) {
                        log::warn!("failed to release previous frame: {err}");
                    }
                }
            }
            Err(err) => log::error!("dropping frame: {err}"),
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        if self.closing {
            return;
        }
        let keystroke = &event.keystroke;
        match action_for_key(&keystroke.key, keystroke.modifiers.shift) {
            Some(InputAction::Quit) => {
                self.closing = true;
                cx.stop_propagation();
                window.remove_window();
            }
            None => {}
        }
    }
}

impl Render for PlayerView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let source_changed = self.handle_media_events();
        self.update_geometry(window, source_changed);
        self.refresh_frame(window);

        if self.controller.state() == PlaybackState::Playing && self.video.playing() {
            window.request_animation_frame();
        }

        div()
            .id("stage")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .size_full()
            .relative()
            .bg(gpui::black())
            .cursor(stage_cursor(self.show_cursor))
            .children(
                self.rect
                    .map(|rect| video_surface(self.image.clone(), rect).id("video")),
            )
    }
}

fn stage_cursor(show_cursor: bool) -> CursorStyle {
    if show_cursor {
        CursorStyle::Arrow
    } else {
        CursorStyle::None
    }
}

fn window_options(options: &PlayerOptions, cx: &App) -> WindowOptions {
    let (width, height) = options.window_size;
    let (min_width, min_height) = options.min_window_size;
    let bounds = Bounds::centered(None, size(px(width), px(height)), cx);

    WindowOptions {
        window_bounds: Some(if options.fullscreen {
            WindowBounds::Fullscreen(bounds)
        } else {
            WindowBounds::Windowed(bounds)
        }),
        titlebar: Some(TitlebarOptions {
            title: Some(options.title().into()),
            ..Default::default()
        }),
        window_min_size: Some(size(px(min_width), px(min_height))),
        focus: true,
        show: true,
        ..Default::default()
    }
}

fn media_uri(options: &PlayerOptions) -> Result<url::Url, Error> {
    let path = std::fs::canonicalize(&options.media).map_err(|source| Error::MediaPath {
        path: options.media.clone(),
        source,
    })?;
    url::Url::from_file_path(&path).map_err(|()| Error::Uri(path))
}

/// Build the pipeline, open the player window and run until it is closed.
pub fn run(options: PlayerOptions) -> Result<(), Error> {
    gst::init()?;
    log::info!("GStreamer {}", gst::version_string());

    let uri = media_uri(&options)?;
    let video = Video::new(&uri)?;
    visualization::enable(&video.pipeline(), &options.visualizer)?;

    let mut controller = PlaybackController::new(options.looping);
    controller.start(&video)?;
    log::info!("playing {uri} (looping: {})", controller.looping());

    let failure: Rc<RefCell<Option<Error>>> = Rc::new(RefCell::new(None));
    let failure_ref = Rc::clone(&failure);

    Application::new().run(move |cx: &mut App| {
        // closing the only window ends the application
        cx.on_window_closed(|cx| cx.quit()).detach();

        let window_options = window_options(&options, cx);
        let show_cursor = options.show_cursor;
        let opened = cx.open_window(window_options, |window, cx| {
            cx.new(|cx| PlayerView::new(video, controller, show_cursor, window, cx))
        });
        match opened {
            Ok(_) => cx.activate(true),
            Err(err) => {
                *failure_ref.borrow_mut() = Some(Error::Window(err.to_string()));
                cx.quit();
            }
        }
    });

    match failure.borrow_mut().take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_media_is_a_startup_error() {
        let dir = tempdir().unwrap();
        let options = PlayerOptions::new(dir.path().join("missing.mp4"));
        match media_uri(&options) {
            Err(Error::MediaPath { path, source }) => {
                assert_eq!(path, options.media);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn existing_media_becomes_absolute_file_uri() {
        let dir = tempdir().unwrap();
        let media = dir.path().join("clip.mp4");
        std::fs::write(&media, b"not really a video").unwrap();

        let uri = media_uri(&PlayerOptions::new(&media)).unwrap();
        assert_eq!(uri.scheme(), "file");

        let expected = std::fs::canonicalize(&media).unwrap();
        assert_eq!(uri.to_file_path().unwrap(), expected);
        assert!(expected.is_absolute());
    }

    #[test]
    fn cursor_is_hidden_unless_requested() {
        assert_eq!(stage_cursor(false), CursorStyle::None);
        assert_eq!(stage_cursor(true), CursorStyle::Arrow);
    }
}
