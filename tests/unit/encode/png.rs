use super::*;
use crate::foundation::core::Fps;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("linkage_reel_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn half_red() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    }
}

#[test]
fn sequence_sink_names_files_by_frame_index() {
    let dir = scratch_dir("seq");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
        bg_rgba: [0, 0, 255, 255],
    })
    .unwrap();
    sink.push_frame(FrameIndex(7), &half_red()).unwrap();
    sink.end().unwrap();

    let path = sink.path_for(FrameIndex(7));
    assert!(path.ends_with("frame_000007.png"));
    assert_eq!(sink.written(), 1);

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    // transparent pixel is flattened onto the background
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_png_rejects_short_buffers() {
    let dir = scratch_dir("short");
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 8],
        premultiplied: false,
    };
    assert!(write_png(&dir.join("x.png"), &frame, [0, 0, 0, 255]).is_err());
}
