use super::*;
use crate::scene::color::WHITE;

#[test]
fn presets_resolve_size_and_rate() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.fps().unwrap(), Fps::new(30, 1).unwrap());
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(1280, 720).unwrap());
    assert_eq!(cfg.background(), BLACK);

    let low = RenderConfig {
        quality: Quality::Low,
        ..RenderConfig::default()
    };
    assert_eq!(low.canvas().unwrap(), Canvas::new(854, 480).unwrap());
    assert_eq!(Quality::Production.preset(), (2560, 1440, 60));
}

#[test]
fn json_overrides_presets() {
    let json = r##"{ "quality": "high", "fps": 24, "width": 640, "background": "#ffffff",
        "parallel": true, "threads": 2, "static_frame_elision": false }"##;
    let cfg = RenderConfig::from_reader(json.as_bytes()).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.quality, Quality::High);
    assert_eq!(cfg.fps().unwrap(), Fps::new(24, 1).unwrap());
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(640, 1080).unwrap());
    assert_eq!(cfg.background(), WHITE);
    assert_eq!(cfg.chunk_size, 64);

    let opts = cfg.session_opts();
    assert!(opts.parallel);
    assert_eq!(opts.threads, Some(2));
    assert!(!opts.static_frame_elision);
}

#[test]
fn empty_json_is_the_default() {
    let cfg = RenderConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, RenderConfig::default());
}

#[test]
fn bad_configs_are_rejected() {
    assert!(matches!(
        RenderConfig::from_reader(r#"{ "qualty": "low" }"#.as_bytes()),
        Err(ReelError::Serde(_))
    ));
    let zero_threads = RenderConfig {
        threads: Some(0),
        ..RenderConfig::default()
    };
    assert!(zero_threads.validate().is_err());
    let zero_fps = RenderConfig {
        fps: Some(0),
        ..RenderConfig::default()
    };
    assert!(zero_fps.validate().is_err());
    let missing_fonts = RenderConfig {
        fonts_dir: Some("/definitely/not/here".into()),
        ..RenderConfig::default()
    };
    assert!(missing_fonts.validate().is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = RenderConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}
