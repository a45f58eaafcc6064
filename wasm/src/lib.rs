use serde::Deserialize;
use treemap_rs_renderer::{RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreemapRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f64>,
    height: Option<f64>,
    padding: Option<f64>,
}

fn build_render_options(options: TreemapRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("tableau") {
        RenderOptions::tableau()
    } else {
        RenderOptions::pastel()
    };

    let config = &mut render_options.config;
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        config.layout.width = width;
    }
    if let Some(height) = options.height {
        config.layout.height = height;
    }
    if let Some(padding) = options.padding {
        config.layout.padding = padding;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_treemap_svg(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TreemapRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TreemapRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
