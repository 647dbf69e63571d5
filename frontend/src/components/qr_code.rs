use leptos::*;
use qrcode::{render::svg, QrCode};

/// SVG markup for `payload`, or `None` when it is empty or cannot be encoded.
pub fn qr_svg(payload: &str, size: u32) -> Option<String> {
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }
    match QrCode::new(payload.as_bytes()) {
        Ok(code) => Some(
            code.render::<svg::Color>()
                .min_dimensions(size, size)
                .dark_color(svg::Color("#000000"))
                .light_color(svg::Color("#ffffff"))
                .build(),
        ),
        Err(err) => {
            log::warn!("qr payload rejected: {}", err);
            None
        }
    }
}

#[component]
pub fn QrPreview(#[prop(into)] payload: Signal<String>, #[prop(optional)] size: Option<u32>) -> impl IntoView {
    let size = size.unwrap_or(120);
    move || match qr_svg(&payload.get(), size) {
        Some(svg) => view! { <div class="inline-block" inner_html=svg></div> }.into_view(),
        None => view! { <span class="text-xs text-fg-muted">"未上传收款码"</span> }.into_view(),
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn preview_falls_back_without_payload() {
        let html = render_to_string(|| view! { <QrPreview payload=Signal::derive(String::new) /> });
        assert!(html.contains("未上传收款码"));
    }
}
