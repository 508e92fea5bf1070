use anyhow::{Context, Result, anyhow};
use lumen_engine::coords::Viewport;
use lumen_engine::logging::{LoggingConfig, init_logging};
use lumen_engine::{RenderConfig, render_square};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGlRenderingContext};

/// Context names tried in order; older browsers only expose the prefixed one.
const CONTEXT_NAMES: [&str; 2] = ["webgl", "experimental-webgl"];

/// Entry point, run by wasm-bindgen when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging(LoggingConfig::default());

    run().map_err(|err| JsValue::from_str(&crate::failure_message(&err)))
}

fn run() -> Result<()> {
    let config = RenderConfig::default();
    let canvas = create_canvas(config.viewport)?;
    let gl = webgl_context(&canvas)?;
    let gl = glow::Context::from_webgl1_context(gl);

    let call = render_square(&gl, &config).context("rendering the square")?;
    log::debug!("submitted {call:?}");
    Ok(())
}

fn create_canvas(viewport: Viewport) -> Result<HtmlCanvasElement> {
    let window = web_sys::window().context("no global window")?;
    let document = window.document().context("window has no document")?;
    let body = document.body().context("document has no body")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not a canvas"))?;
    canvas.set_width(viewport.width);
    canvas.set_height(viewport.height);

    body.append_child(&canvas)
        .map_err(|e| anyhow!("append canvas: {e:?}"))?;

    log::info!("canvas {}x{} attached", viewport.width, viewport.height);
    Ok(canvas)
}

fn webgl_context(canvas: &HtmlCanvasElement) -> Result<WebGlRenderingContext> {
    for name in CONTEXT_NAMES {
        let context = canvas
            .get_context(name)
            .map_err(|e| anyhow!("getContext({name}): {e:?}"))?;
        if let Some(context) = context {
            log::debug!("using `{name}` context");
            return context
                .dyn_into::<WebGlRenderingContext>()
                .map_err(|_| anyhow!("`{name}` context is not a WebGlRenderingContext"));
        }
    }
    Err(anyhow!("WebGL is not available in this browser"))
}
