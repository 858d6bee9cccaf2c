use mime_guess::mime;
use rust_embed::RustEmbed;
use std::borrow::Cow;

/// URL prefix of the embedded UI files. A top-level folder with this name is
/// always left out of scans, so gallery images never collide with UI routes.
pub const UI_ASSET_PREFIX: &str = "assets";

/// Gallery UI files (`src/ui`) are embedded into the binary.
#[derive(RustEmbed)]
#[folder = "src/ui"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
pub struct UiAssets;

/// Provides (Bytes, Content-Type) for a requested UI resource.
/// An empty path resolves to `index.html`; unknown paths yield `None`.
pub fn load(path: &str) -> Option<(Cow<'static, [u8]>, String)> {
    let norm = normalize(path);
    UiAssets::get(&norm).map(|file| (file.data, content_type(&norm)))
}

fn normalize(raw: &str) -> String {
    let p = raw.trim_start_matches('/').trim();
    if p.is_empty() {
        "index.html".into()
    } else {
        p.to_string()
    }
}

fn content_type(path: &str) -> String {
    let guess = mime_guess::from_path(path).first_or(mime::APPLICATION_OCTET_STREAM);
    match guess.type_() {
        mime::TEXT | mime::APPLICATION if guess.subtype() == mime::JAVASCRIPT => {
            "application/javascript; charset=utf-8".into()
        }
        mime::TEXT if guess.subtype() == mime::HTML => "text/html; charset=utf-8".into(),
        mime::TEXT if guess.subtype() == "css" => "text/css; charset=utf-8".into(),
        _ => guess.essence_str().to_string(),
    }
}
