use lens_bubble::{
    Filter, FrameRGBA, RenderOpts, Resolution, Texture, render_frame, render_frame_with_opts,
};

/// Red channel encodes x, green encodes y.
fn gradient(width: u32, height: u32) -> Texture {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
    });
    Texture::from_image(img).unwrap()
}

fn nearest() -> RenderOpts {
    RenderOpts {
        filter: Filter::Nearest,
        ..RenderOpts::default()
    }
}

#[test]
fn render_is_deterministic() {
    let t1 = gradient(48, 31);
    let t2 = gradient(17, 60);
    let res = Resolution::new(64, 40).unwrap();

    let a = render_frame(res, 0.27, &t1, &t2).unwrap();
    let b = render_frame(res, 0.27, &t1, &t2).unwrap();
    assert_eq!(a, b);
}

#[test]
fn parallel_matches_serial() {
    let t1 = gradient(80, 50);
    let t2 = gradient(50, 80);
    let res = Resolution::new(96, 54).unwrap();

    for progress in [0.0, 0.1, 0.33, 0.8, 1.0] {
        let serial = render_frame_with_opts(res, progress, &t1, &t2, &RenderOpts::default())
            .unwrap();
        let parallel = render_frame_with_opts(
            res,
            progress,
            &t1,
            &t2,
            &RenderOpts {
                parallel: true,
                threads: Some(3),
                ..RenderOpts::default()
            },
        )
        .unwrap();
        assert_eq!(serial, parallel, "progress={progress}");
    }
}

#[test]
fn endpoints_show_each_image_unchanged() {
    let res = Resolution::new(40, 24).unwrap();
    let t1 = gradient(40, 24);
    let t2 = Texture::from_image(image::RgbaImage::from_fn(40, 24, |x, y| {
        image::Rgba([200 - x as u8, 100 + y as u8, 7, 255])
    }))
    .unwrap();

    let start = render_frame_with_opts(res, 0.0, &t1, &t2, &nearest()).unwrap();
    let end = render_frame_with_opts(res, 1.0, &t1, &t2, &nearest()).unwrap();

    for y in 0..res.height {
        for x in 0..res.width {
            let p1 = t1.texel(i64::from(x), i64::from(y)).map(|c| (c * 255.0).round() as u8);
            let p2 = t2.texel(i64::from(x), i64::from(y)).map(|c| (c * 255.0).round() as u8);
            assert_eq!(start.pixel(x, y), p1, "start ({x},{y})");
            assert_eq!(end.pixel(x, y), p2, "end ({x},{y})");
        }
    }
}

#[test]
fn lens_pulls_samples_toward_the_center_near_the_edge() {
    let res = Resolution::new(200, 200).unwrap();
    let t1 = Texture::solid(200, 200, [50, 50, 50, 255]).unwrap();
    let t2 = gradient(200, 200);

    // radius = 1.5 * |(200, 200)| * 0.2 ~= 84.9, focus radius ~= 21.2
    let frame: FrameRGBA = render_frame(res, 0.2, &t1, &t2).unwrap();

    // inside the focus circle: undistorted
    assert_eq!(frame.pixel(110, 100)[0], 110);
    // just inside the edge: sampled several texels closer to the center
    let near_edge = frame.pixel(180, 100)[0];
    assert!(near_edge < 180 && near_edge > 170, "got {near_edge}");
    // outside: first image
    assert_eq!(frame.pixel(195, 100), [50, 50, 50, 255]);
    assert_eq!(frame.pixel(0, 0), [50, 50, 50, 255]);
}

#[test]
fn mismatched_aspect_ratios_render_full_frames() {
    let t1 = gradient(300, 20);
    let t2 = gradient(5, 400);
    let res = Resolution::new(34, 76).unwrap();
    for progress in [-0.2, 0.0, 0.45, 1.0, 3.0] {
        let frame = render_frame(res, progress, &t1, &t2).unwrap();
        assert_eq!(frame.data.len(), 34 * 76 * 4);
        // both images are opaque, so every pixel is too
        assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    }
}

#[test]
fn odd_by_odd_frames_leave_the_exact_center_pixel_transparent() {
    let t1 = Texture::solid(3, 3, [200, 10, 10, 255]).unwrap();
    let t2 = Texture::solid(3, 3, [10, 10, 200, 255]).unwrap();
    let res = Resolution::new(3, 3).unwrap();

    for opts in [
        RenderOpts::default(),
        RenderOpts {
            parallel: true,
            threads: Some(2),
            ..RenderOpts::default()
        },
    ] {
        let frame = render_frame_with_opts(res, 0.5, &t1, &t2, &opts).unwrap();
        // the lens direction is undefined there and every channel quantizes to 0
        assert_eq!(frame.pixel(1, 1), [0, 0, 0, 0]);
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    assert_eq!(frame.pixel(x, y), [10, 10, 200, 255], "({x},{y})");
                }
            }
        }
    }
}

#[test]
fn zero_resolution_is_rejected() {
    let t = gradient(2, 2);
    let res = Resolution {
        width: 0,
        height: 10,
    };
    assert!(render_frame(res, 0.5, &t, &t).is_err());
}
