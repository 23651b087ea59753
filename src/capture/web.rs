// ============================================================================
// BROWSER CAPTURE - getUserMedia, frame grabbing, animation-frame loop
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    CanvasRenderingContext2d, DomException, HtmlCanvasElement, HtmlMediaElement, HtmlVideoElement, ImageData,
    MediaStream, MediaStreamConstraints, MediaStreamTrack,
};

use crate::capture::{Camera, CameraConstraints, CameraStream, Frame, QrDecoder};
use crate::dom::{create_element, get_element_by_id};
use crate::error::CameraError;
use crate::state::Activation;
use crate::utils::{qr_ffi, QR_VIDEO_ID};
use crate::viewmodels::{FrameStep, ScannerViewModel};

fn video_element() -> Option<HtmlVideoElement> {
    get_element_by_id(QR_VIDEO_ID)?.dyn_into().ok()
}

fn classify(err: JsValue) -> CameraError {
    if let Some(ex) = err.dyn_ref::<DomException>() {
        return CameraError::from_dom_exception(&ex.name(), &ex.message());
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return CameraError::from_dom_exception(&String::from(e.name()), &String::from(e.message()));
    }
    CameraError::Other(format!("{:?}", err))
}

fn video_constraints(constraints: &CameraConstraints) -> Result<JsValue, JsValue> {
    let ideal = |value: u32| -> Result<Object, JsValue> {
        let obj = Object::new();
        Reflect::set(&obj, &"ideal".into(), &JsValue::from(value))?;
        Ok(obj)
    };
    let video = Object::new();
    Reflect::set(&video, &"facingMode".into(), &constraints.facing_mode.into())?;
    Reflect::set(&video, &"width".into(), &ideal(constraints.ideal_width)?)?;
    Reflect::set(&video, &"height".into(), &ideal(constraints.ideal_height)?)?;
    Ok(video.into())
}

/// Camera behind `navigator.mediaDevices.getUserMedia`; the stream is
/// attached to the scanner's `<video>` element.
pub struct WebCamera;

#[async_trait(?Send)]
impl Camera for WebCamera {
    async fn open(&self, constraints: &CameraConstraints) -> Result<Box<dyn CameraStream>, CameraError> {
        let window = web_sys::window().ok_or(CameraError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| CameraError::Unsupported)?;
        if devices.is_undefined() || devices.is_null() {
            return Err(CameraError::Unsupported);
        }

        let request = MediaStreamConstraints::new();
        request.set_video(&video_constraints(constraints).map_err(classify)?);
        let promise = devices.get_user_media_with_constraints(&request).map_err(classify)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(classify)?
            .dyn_into()
            .map_err(|_| CameraError::Other("getUserMedia returned no stream".into()))?;

        if let Some(video) = video_element() {
            video.set_src_object(Some(&stream));
            let playing = video.clone();
            let on_ready = Closure::once_into_js(move || {
                if let Err(e) = playing.play() {
                    log::warn!("⚠️ [CAMERA] Video play failed: {:?}", e);
                }
            });
            video.set_onloadedmetadata(Some(on_ready.unchecked_ref()));
        }

        Ok(Box::new(WebCameraStream { stream }))
    }
}

pub struct WebCameraStream {
    stream: MediaStream,
}

impl CameraStream for WebCameraStream {
    fn stop_tracks(&self) {
        let tracks = self.stream.get_tracks();
        for i in 0..tracks.length() {
            if let Ok(track) = tracks.get(i).dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        if let Some(video) = video_element() {
            video.set_src_object(None);
        }
        log::debug!("🛑 [CAMERA] {} tracks stopped", tracks.length());
    }
}

pub struct JsQrDecoder;

impl QrDecoder for JsQrDecoder {
    fn decode(&self, frame: &Frame<'_>) -> Option<String> {
        qr_ffi::decode_rgba(frame.data, frame.width, frame.height)
    }
}

/// Off-screen canvas used to copy video frames into pixels
struct FrameGrabber {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl FrameGrabber {
    fn new() -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = create_element("canvas")?.dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { canvas, context })
    }

    /// `None` until the video has a complete frame
    fn grab(&self) -> Option<ImageData> {
        let video = video_element()?;
        if video.ready_state() < HtmlMediaElement::HAVE_ENOUGH_DATA {
            return None;
        }
        let (width, height) = (video.video_width(), video.video_height());
        if width == 0 || height == 0 {
            return None;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.context
            .draw_image_with_html_video_element(&video, 0.0, 0.0)
            .ok()?;
        self.context
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .ok()
    }
}

type FrameHandle = Rc<RefCell<Option<AnimationFrame>>>;

/// Runs the per-frame decode cycle for `activation` until the viewmodel
/// says stop or a payload is detected; a detected payload is submitted
/// once.
pub fn run_capture_loop(vm: ScannerViewModel, activation: Activation) {
    let grabber = match FrameGrabber::new() {
        Ok(grabber) => Rc::new(grabber),
        Err(e) => {
            log::error!("❌ [CAMERA] Frame grabber unavailable: {:?}", e);
            return;
        }
    };
    schedule_frame(vm, activation, grabber, Rc::new(RefCell::new(None)));
}

fn schedule_frame(vm: ScannerViewModel, activation: Activation, grabber: Rc<FrameGrabber>, handle: FrameHandle) {
    let next = handle.clone();
    let frame = request_animation_frame(move |_timestamp| {
        let step = match grabber.grab() {
            Some(image) => {
                let pixels = image.data();
                vm.process_frame(
                    activation,
                    Some(Frame { data: &pixels.0, width: image.width(), height: image.height() }),
                )
            }
            None => vm.process_frame(activation, None),
        };

        match step {
            FrameStep::Continue => schedule_frame(vm, activation, grabber, next),
            FrameStep::Detected(payload) => {
                next.borrow_mut().take();
                spawn_local(async move {
                    vm.submit_verification(activation, payload).await;
                });
            }
            FrameStep::Stop => {
                next.borrow_mut().take();
            }
        }
    });
    *handle.borrow_mut() = Some(frame);
}
