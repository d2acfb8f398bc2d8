//! End-to-end checks through the public API: config on disk, scan, render.

use simple_srcset::config;
use simple_srcset::render::ResponsiveImage;
use simple_srcset::resolver::{ImageDescriptor, ResolveError, ResolveRequest, Resolver};
use simple_srcset::scan::{self, Manifest};
use simple_srcset::tabs::{TabPanel, render_tab_panel};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_png(root: &Path, rel: &str, width: u32, height: u32) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::new(width, height).save(&path).unwrap();
}

fn entry<'a>(manifest: &'a Manifest, path: &str) -> &'a scan::ImageEntry {
    manifest
        .images
        .iter()
        .find(|e| e.source_path == path)
        .unwrap()
}

#[test]
fn custom_preset_flows_from_config_to_markup() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(
        root.join("config.toml"),
        r#"
[images]
default_preset = "card"
loading = "eager"

[presets.card]
xs = 100
sm = 100
md = "50vw"
lg = "320px"
xl = "320px"
2xl = "320px"
"#,
    )
    .unwrap();
    write_png(root, "cards/one.png", 700, 400);

    let manifest = scan::scan(root).unwrap();
    let card = entry(&manifest, "cards/one.png");
    assert_eq!(card.preset, "card");
    assert_eq!(card.resolution.widths, vec![375, 640]);
    assert_eq!(
        card.resolution.sizes,
        "(min-width: 1536px) 320px, (min-width: 1280px) 320px, (min-width: 1024px) 320px, \
         (min-width: 768px) 50vw, (min-width: 640px) 100vw, (min-width: 375px) 100vw, 100vw"
    );

    let img = ResponsiveImage::new(
        &card.source_path,
        "Card",
        card.descriptor(),
        &card.resolution,
        &manifest.config.images.url_pattern,
        card.loading,
    );
    let html = img.render().into_string();
    assert!(html.contains(r#"srcset="cards/one-375.png 375w, cards/one-640.png 640w""#));
    assert!(html.contains(r#"loading="eager""#));
    assert!(html.contains(r#"width="700""#));
}

#[test]
fn incomplete_custom_preset_fails_at_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[presets.card]\nxs = 100\nsm = 100\n",
    )
    .unwrap();
    let err = config::load_config(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("missing breakpoints: md, lg, xl, 2xl"));
}

#[test]
fn resolver_from_config_knows_custom_presets() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[images]\nwidths = [100, 200, 400]\n\n[presets.avatar]\nxs = 48\nsm = 48\nmd = 64\nlg = 64\nxl = 64\n2xl = 64\n",
    )
    .unwrap();
    let site = config::load_config(tmp.path()).unwrap();
    let resolver = Resolver::from_config(&site).unwrap();

    // Bare numbers <= 100 stay percentages, even for a preset meant as pixels
    let res = resolver
        .resolve(&ImageDescriptor::new(256), &ResolveRequest::new().preset("avatar"))
        .unwrap();
    assert_eq!(res.widths, vec![100, 200]);
    assert!(res.sizes.ends_with(", 48vw"));

    let err = resolver
        .resolve(&ImageDescriptor::new(256), &ResolveRequest::new().preset("banner"))
        .unwrap_err();
    assert_eq!(err, ResolveError::UnknownPreset("banner".to_string()));
}

#[test]
fn tab_panel_renders_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tabs.toml");
    fs::write(
        &path,
        r#"
[[tabs]]
title = "Plan"
body = "First *plan*."

[tabs.image]
src = "img/plan.jpg"
width = 2000
alt = "Whiteboard"

[[tabs]]
title = "Launch"
body = "Then launch."
"#,
    )
    .unwrap();

    let panel = TabPanel::load(&path).unwrap();
    let rendered = render_tab_panel(
        &panel,
        &panel.initial_state(),
        &Resolver::default(),
        &config::SiteConfig::default().images,
    );
    assert!(rendered.errors.is_empty());
    let html = rendered.markup.into_string();
    assert!(html.contains("img/plan-1536.jpg 1536w"));
    assert!(html.contains(r#"alt="Whiteboard""#));
    assert!(html.contains("<em>plan</em>"));
    assert!(html.contains("<summary>Launch</summary>"));
}
