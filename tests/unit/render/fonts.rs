use super::*;

#[test]
fn missing_fonts_dir_is_tolerated() {
    let db = build_fontdb(&RenderSettings {
        fonts_dir: Some("/definitely/not/here".into()),
        skip_system_fonts: true,
    });
    assert_eq!(db.len(), 0);
}

#[test]
fn options_share_the_database() {
    let db = build_fontdb(&RenderSettings {
        fonts_dir: None,
        skip_system_fonts: true,
    });
    let opts = usvg_options(Arc::clone(&db));
    assert!(Arc::ptr_eq(&opts.fontdb, &db));
}
