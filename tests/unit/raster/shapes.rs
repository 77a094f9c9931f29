use super::*;
use crate::raster::buffer::ChannelLayout;

fn luma(w: u32, h: u32) -> RasterBuffer {
    RasterBuffer::filled(w, h, ChannelLayout::Luma, &[0]).unwrap()
}

#[test]
fn ellipse_fills_center_and_leaves_corners() {
    let mut buf = luma(21, 21);
    CpuRasterizer::new()
        .draw_ellipse(&mut buf, BBox::centered(10, 10, 6), &[200])
        .unwrap();
    assert_eq!(buf.pixel(10, 10), &[200]);
    assert_eq!(buf.pixel(0, 0), &[0]);
    assert_eq!(buf.pixel(20, 20), &[0]);
    // Corner of the bounding box is outside the inscribed ellipse.
    assert_eq!(buf.pixel(4, 4), &[0]);
}

#[test]
fn rounded_rect_without_radius_overwrites_interior() {
    let mut buf = RasterBuffer::filled(10, 10, ChannelLayout::Luma, &[40]).unwrap();
    CpuRasterizer::new()
        .draw_rounded_rect(&mut buf, BBox::new(2, 2, 7, 7), 0.0, &[220])
        .unwrap();
    assert_eq!(buf.pixel(3, 3), &[220]);
    assert_eq!(buf.pixel(6, 6), &[220]);
    assert_eq!(buf.pixel(0, 0), &[40]);
    assert_eq!(buf.pixel(9, 9), &[40]);
}

#[test]
fn full_arc_draws_ring_but_not_center() {
    let mut buf = luma(21, 21);
    CpuRasterizer::new()
        .draw_arc(&mut buf, BBox::new(0, 0, 20, 20), 0.0, 360.0, &[255], 3.0)
        .unwrap();
    assert_eq!(buf.pixel(10, 10), &[0]);
    assert!(buf.pixel(19, 10)[0] > 200);
    assert!(buf.pixel(10, 1)[0] > 200);
}

#[test]
fn half_arc_follows_clockwise_angles() {
    let mut buf = luma(21, 21);
    CpuRasterizer::new()
        .draw_arc(&mut buf, BBox::new(0, 0, 20, 20), 0.0, 180.0, &[255], 3.0)
        .unwrap();
    // 0..180 degrees clockwise from three o'clock is the lower half.
    assert!(buf.pixel(10, 19)[0] > 200);
    assert_eq!(buf.pixel(10, 1), &[0]);
}

#[test]
fn chord_fills_region_under_arc() {
    let mut buf = luma(21, 21);
    CpuRasterizer::new()
        .draw_chord(&mut buf, BBox::new(0, 0, 20, 20), 0.0, 180.0, &[180], 5.0)
        .unwrap();
    assert_eq!(buf.pixel(10, 14), &[180]);
    assert_eq!(buf.pixel(10, 5), &[0]);
}

#[test]
fn vertical_line_spans_both_endpoints() {
    let mut buf = luma(10, 10);
    CpuRasterizer::new()
        .draw_line(
            &mut buf,
            Point::new(5.0, 0.0),
            Point::new(5.0, 9.0),
            &[255],
            1.0,
        )
        .unwrap();
    for y in 0..10 {
        assert!(buf.pixel(5, y)[0] >= 250, "row {y}");
        assert_eq!(buf.pixel(2, y), &[0]);
    }
}

#[test]
fn rgba_color_is_written_per_channel() {
    let mut buf = RasterBuffer::filled(16, 16, ChannelLayout::Rgba, &[0, 0, 0, 0]).unwrap();
    CpuRasterizer::new()
        .draw_ellipse(&mut buf, BBox::new(0, 0, 15, 15), &[250, 120, 3, 180])
        .unwrap();
    assert_eq!(buf.pixel(8, 8), &[250, 120, 3, 180]);
    assert_eq!(buf.pixel(0, 0), &[0, 0, 0, 0]);
}

#[test]
fn shape_outside_buffer_is_a_noop() {
    let mut buf = luma(8, 8);
    let before = buf.clone();
    CpuRasterizer::new()
        .draw_ellipse(&mut buf, BBox::new(40, 40, 60, 60), &[255])
        .unwrap();
    assert_eq!(buf, before);
}

#[test]
fn color_channel_mismatch_is_rejected() {
    let mut buf = luma(8, 8);
    let err = CpuRasterizer::new()
        .draw_ellipse(&mut buf, BBox::new(0, 0, 7, 7), &[1, 2, 3, 4])
        .unwrap_err();
    assert!(matches!(err, FilmError::InvalidArgument(_)));
}

#[test]
fn non_positive_stroke_width_is_rejected() {
    let mut buf = luma(8, 8);
    let mut r = CpuRasterizer::new();
    assert!(
        r.draw_arc(&mut buf, BBox::new(0, 0, 7, 7), 0.0, 90.0, &[1], 0.0)
            .is_err()
    );
    assert!(
        r.draw_line(&mut buf, Point::ZERO, Point::new(3.0, 3.0), &[1], -2.0)
            .is_err()
    );
}

#[test]
fn tiled_rendering_matches_a_single_render() {
    let mut whole = luma(48, 40);
    let mut tiled = luma(48, 40);
    let bbox = BBox::new(3, 2, 44, 37);
    CpuRasterizer::new()
        .draw_ellipse(&mut whole, bbox, &[230])
        .unwrap();
    CpuRasterizer::with_tile_size(7)
        .draw_ellipse(&mut tiled, bbox, &[230])
        .unwrap();

    assert_eq!(tiled.pixel(24, 20), &[230]);
    assert_eq!(tiled.pixel(0, 0), &[0]);
    for (a, b) in whole.data().iter().zip(tiled.data()) {
        assert!(a.abs_diff(*b) <= 2, "{a} vs {b}");
    }
}

#[test]
fn regions_wider_than_u16_are_drawn() {
    let mut buf = luma(70_000, 3);
    CpuRasterizer::new()
        .draw_line(
            &mut buf,
            Point::new(0.0, 1.0),
            Point::new(69_999.0, 1.0),
            &[255],
            1.0,
        )
        .unwrap();
    for x in [0, 4095, 4096, 35_000, 69_999] {
        assert!(buf.pixel(x, 1)[0] >= 250, "column {x}");
        assert_eq!(buf.pixel(x, 0), &[0]);
    }
}
