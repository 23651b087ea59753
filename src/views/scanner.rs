// ============================================================================
// SCANNER VIEW - Camera preview, controls and verification result
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::capture::web::run_capture_loop;
use crate::config::CONFIG;
use crate::dom::{
    append_child, clear_children, get_element_by_id, labelled_line, on_click, set_class, set_style, ElementBuilder,
};
use crate::models::VerificationReceipt;
use crate::state::{ScannerPhase, StartOutcome, VerificationOutcome};
use crate::utils::datetime::format_date_time;
use crate::utils::{QR_VIDEO_ID, SCANNER_FLASH_COLOR, SCANNER_FRAME_ID, SCANNER_STATUS_ID, VERIFICATION_RESULT_ID};
use crate::views::{loading, ViewContext};

const START_BUTTON_ID: &str = "start-scanner";
const STOP_BUTTON_ID: &str = "stop-scanner";

/// Starts (or restarts) the camera and hands the activation to the frame loop
fn start_scanning(ctx: &ViewContext, restart: bool) {
    let scanner = ctx.scanner();
    spawn_local(async move {
        let outcome = if restart { scanner.scan_another().await } else { scanner.start().await };
        if let StartOutcome::Started(activation) = outcome {
            run_capture_loop(scanner, activation);
        }
    });
}

fn control_button(id: &str, class: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .id(id)?
        .class(class)
        .attr("type", "button")?
        .text(label)
        .build())
}

pub fn render_scanner(ctx: &ViewContext) -> Result<Element, JsValue> {
    let video = ElementBuilder::new("video")?
        .id(QR_VIDEO_ID)?
        .class("qr-video")
        .attr("playsinline", "")?
        .attr("autoplay", "")?
        .attr("muted", "")?
        .build();

    let overlay = ElementBuilder::new("div")?
        .class("scanner-overlay")
        .child(ElementBuilder::new("div")?.id(SCANNER_FRAME_ID)?.class("scanner-frame hidden").build())?
        .build();

    let start = control_button(START_BUTTON_ID, "btn btn-primary", "🎥 Start Scanner")?;
    let start_ctx = ctx.clone();
    on_click(&start, move |_| start_scanning(&start_ctx, false))?;

    let stop = control_button(STOP_BUTTON_ID, "btn btn-secondary hidden", "⏹️ Stop Scanner")?;
    let stop_ctx = ctx.clone();
    on_click(&stop, move |_| stop_ctx.scanner().stop())?;

    Ok(ElementBuilder::new("div")?
        .class("card scanner-card")
        .child(ElementBuilder::new("h3")?.text("📷 QR Code Scanner").build())?
        .child(
            ElementBuilder::new("div")?
                .class("scanner-container")
                .child(video)?
                .child(overlay)?
                .build(),
        )?
        .child(ElementBuilder::new("div")?.id(SCANNER_STATUS_ID)?.class("scanner-status").build())?
        .child(
            ElementBuilder::new("div")?
                .class("scanner-controls")
                .child(start)?
                .child(stop)?
                .build(),
        )?
        .child(ElementBuilder::new("div")?.id(VERIFICATION_RESULT_ID)?.class("verification-result").build())?
        .build())
}

fn result_actions(ctx: &ViewContext, retry_label: &str) -> Result<Element, JsValue> {
    let retry = control_button("scan-again", "btn btn-primary", retry_label)?;
    let retry_ctx = ctx.clone();
    on_click(&retry, move |_| start_scanning(&retry_ctx, true))?;

    let clear = control_button("clear-result", "btn btn-secondary", "Clear Result")?;
    let clear_ctx = ctx.clone();
    on_click(&clear, move |_| clear_ctx.scanner().clear_result())?;

    Ok(ElementBuilder::new("div")?
        .class("result-actions")
        .child(retry)?
        .child(clear)?
        .build())
}

fn verified_panel(ctx: &ViewContext, receipt: &VerificationReceipt) -> Result<Element, JsValue> {
    let mut lines = vec![
        labelled_line("User:", &receipt.user_name)?,
        labelled_line("Event:", &receipt.event_title)?,
    ];
    if let Some(at) = &receipt.verified_at {
        lines.push(labelled_line("Verified at:", &format_date_time(at))?);
    }
    Ok(ElementBuilder::new("div")?
        .class("result-card result-success")
        .child(ElementBuilder::new("h4")?.text("✅ Verification Successful!").build())?
        .children(lines)?
        .child(result_actions(ctx, "🎥 Scan Another QR")?)?
        .build())
}

fn failed_panel(ctx: &ViewContext, title: &str, message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("result-card result-error")
        .child(ElementBuilder::new("h4")?.text(title).build())?
        .child(ElementBuilder::new("p")?.text(message).build())?
        .child(result_actions(ctx, "🎥 Try Again")?)?
        .build())
}

pub fn update_scanner(ctx: &ViewContext) -> Result<(), JsValue> {
    let scanner = ctx.state.scanner.borrow();
    let busy = scanner.has_stream() || scanner.is_starting();
    let framed = scanner.phase() != ScannerPhase::Inactive;

    if let Some(start) = get_element_by_id(START_BUTTON_ID) {
        set_class(&start, "hidden", busy)?;
    }
    if let Some(stop) = get_element_by_id(STOP_BUTTON_ID) {
        set_class(&stop, "hidden", !busy)?;
    }
    if let Some(frame) = get_element_by_id(SCANNER_FRAME_ID) {
        set_class(&frame, "hidden", !framed)?;
    }
    if let Some(status) = get_element_by_id(SCANNER_STATUS_ID) {
        status.set_class_name(scanner.status().css_class());
        status.set_text_content(Some(scanner.status().text()));
    }

    let Some(panel) = get_element_by_id(VERIFICATION_RESULT_ID) else {
        return Ok(());
    };
    clear_children(&panel);
    let content = match scanner.result() {
        None => return Ok(()),
        Some(VerificationOutcome::Verifying) => loading("Verifying QR code...")?,
        Some(VerificationOutcome::Verified(receipt)) => verified_panel(ctx, receipt)?,
        Some(VerificationOutcome::Rejected(detail)) => failed_panel(ctx, "❌ Verification Failed", detail)?,
        Some(VerificationOutcome::NetworkError) => failed_panel(
            ctx,
            "❌ Verification Error",
            "Network error occurred. Please check your connection.",
        )?,
    };
    append_child(&panel, &content)
}

/// Highlights the scanner frame after a successful decode
pub fn flash_frame() -> Result<(), JsValue> {
    let Some(frame) = get_element_by_id(SCANNER_FRAME_ID) else {
        return Ok(());
    };
    set_style(&frame, "border-color", SCANNER_FLASH_COLOR)?;
    set_style(&frame, "box-shadow", &format!("0 0 20px {}", SCANNER_FLASH_COLOR))?;

    Timeout::new(CONFIG.scanner_config.flash_ms, move || {
        let _ = set_style(&frame, "border-color", "");
        let _ = set_style(&frame, "box-shadow", "");
    })
    .forget();
    Ok(())
}
