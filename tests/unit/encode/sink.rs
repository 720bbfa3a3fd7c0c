use super::*;

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: px.to_vec(),
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
        bg_rgba: [0, 0, 0, 255],
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([1, 2, 3, 255])).unwrap();
    sink.push_frame(FrameIndex(2), &frame([4, 5, 6, 255])).unwrap();
    assert!(sink.push_frame(FrameIndex(2), &frame([0; 4])).is_err());
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config().unwrap().width, 1);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, [0, 2]);
}

#[test]
fn flatten_alpha_zero_yields_background() {
    let src = [0u8, 0, 0, 0];
    let mut dst = [0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = [1u8, 2, 3, 255];
    let mut dst = [0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], [0; 4]).is_err());
}
