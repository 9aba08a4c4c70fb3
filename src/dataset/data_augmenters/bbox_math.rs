use crate::dataset::common_structs::NormalizedBbox;

/// Box geometry counterparts of the image operations. These are
/// deterministic in the sampled transform parameters so they can be
/// tested without touching the rng.

/// Pixel-space crop window inside the source image.
#[derive(Debug, Clone, Copy)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Mirrors boxes across the horizontal mid line, matching `flipv` on
/// the image. Widths and heights are untouched.
pub fn flip_bbox_vertically(bb: NormalizedBbox) -> NormalizedBbox {
    NormalizedBbox {
        y_center: 1.0 - bb.y_center,
        ..bb
    }
}

/// Rotates a box by `angle_rad` about the image center and returns the
/// axis-aligned hull of the rotated corners, clipped to the frame.
/// Returns `None` when the fraction of the original box area left
/// inside the frame falls below `min_visibility`.
pub fn rotate_bbox(
    bb: NormalizedBbox,
    angle_rad: f64,
    img_width: u32,
    img_height: u32,
    min_visibility: f64,
) -> Option<NormalizedBbox> {
    let (w, h) = (f64::from(img_width), f64::from(img_height));
    let (cx, cy) = (w / 2.0, h / 2.0);
    let bx = bb.x_center * w;
    let by = bb.y_center * h;
    let bw = bb.width * w;
    let bh = bb.height * h;

    let corners = [
        (bx - bw / 2.0, by - bh / 2.0),
        (bx + bw / 2.0, by - bh / 2.0),
        (bx + bw / 2.0, by + bh / 2.0),
        (bx - bw / 2.0, by + bh / 2.0),
    ];
    let (sin, cos) = angle_rad.sin_cos();
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (x, y) in corners {
        // same convention as the image rotation: y grows downwards
        let (dx, dy) = (x - cx, y - cy);
        let rx = cx + dx * cos - dy * sin;
        let ry = cy + dx * sin + dy * cos;
        min_x = min_x.min(rx);
        min_y = min_y.min(ry);
        max_x = max_x.max(rx);
        max_y = max_y.max(ry);
    }

    let x1 = min_x.max(0.0);
    let y1 = min_y.max(0.0);
    let x2 = max_x.min(w);
    let y2 = max_y.min(h);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    let visible = (x2 - x1) * (y2 - y1) / (bw * bh);
    if visible < min_visibility {
        return None;
    }
    Some(NormalizedBbox {
        x_center: (x1 + x2) / 2.0 / w,
        y_center: (y1 + y2) / 2.0 / h,
        width: (x2 - x1) / w,
        height: (y2 - y1) / h,
    })
}

/// Intersects a box with the crop window and renormalizes the remainder
/// to the cropped frame. Returns `None` when the visible fraction of
/// the original box area falls below `min_visibility`.
pub fn crop_bbox(
    bb: NormalizedBbox,
    crop: CropWindow,
    img_width: u32,
    img_height: u32,
    min_visibility: f64,
) -> Option<NormalizedBbox> {
    let (w, h) = (f64::from(img_width), f64::from(img_height));
    let bx1 = (bb.x_center - bb.width / 2.0) * w;
    let bx2 = (bb.x_center + bb.width / 2.0) * w;
    let by1 = (bb.y_center - bb.height / 2.0) * h;
    let by2 = (bb.y_center + bb.height / 2.0) * h;

    let cx1 = f64::from(crop.x);
    let cy1 = f64::from(crop.y);
    let cx2 = cx1 + f64::from(crop.width);
    let cy2 = cy1 + f64::from(crop.height);

    let x1 = bx1.max(cx1);
    let y1 = by1.max(cy1);
    let x2 = bx2.min(cx2);
    let y2 = by2.min(cy2);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    let visible = (x2 - x1) * (y2 - y1) / ((bx2 - bx1) * (by2 - by1));
    if visible < min_visibility {
        return None;
    }
    let (cw, ch) = (f64::from(crop.width), f64::from(crop.height));
    Some(NormalizedBbox {
        x_center: ((x1 + x2) / 2.0 - cx1) / cw,
        y_center: ((y1 + y2) / 2.0 - cy1) / ch,
        width: (x2 - x1) / cw,
        height: (y2 - y1) / ch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(x_center: f64, y_center: f64, width: f64, height: f64) -> NormalizedBbox {
        NormalizedBbox {
            x_center,
            y_center,
            width,
            height,
        }
    }

    fn assert_close(a: NormalizedBbox, b: NormalizedBbox) {
        for (x, y) in [
            (a.x_center, b.x_center),
            (a.y_center, b.y_center),
            (a.width, b.width),
            (a.height, b.height),
        ] {
            assert!((x - y).abs() < 1e-9, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn vertical_flip_mirrors_y_center() {
        let flipped = flip_bbox_vertically(bb(0.3, 0.25, 0.1, 0.2));
        assert_close(flipped, bb(0.3, 0.75, 0.1, 0.2));
    }

    #[test]
    fn zero_rotation_is_identity() {
        let original = bb(0.5, 0.25, 0.2, 0.1);
        let rotated = rotate_bbox(original, 0.0, 640, 480, 0.4).unwrap();
        assert_close(rotated, original);
    }

    #[test]
    fn quarter_turn_of_centered_square_box_is_identity() {
        let original = bb(0.5, 0.5, 0.2, 0.2);
        let rotated = rotate_bbox(original, std::f64::consts::FRAC_PI_2, 100, 100, 0.4).unwrap();
        assert_close(rotated, original);
    }

    #[test]
    fn rotation_drops_box_leaving_the_frame() {
        // corner box swung well outside a square frame
        let corner = bb(0.05, 0.05, 0.1, 0.1);
        assert!(rotate_bbox(corner, std::f64::consts::FRAC_PI_4, 100, 100, 0.4).is_none());
    }

    #[test]
    fn crop_renormalizes_a_fully_visible_box() {
        let crop = CropWindow {
            x: 0,
            y: 0,
            width: 640,
            height: 640,
        };
        let cropped = crop_bbox(bb(0.32, 0.32, 0.1, 0.1), crop, 1000, 1000, 0.4).unwrap();
        assert_close(cropped, bb(0.5, 0.5, 0.15625, 0.15625));
    }

    #[test]
    fn crop_drops_box_below_visibility_threshold() {
        let crop = CropWindow {
            x: 0,
            y: 0,
            width: 640,
            height: 640,
        };
        // 100px wide box centered at x=685: 5px remain inside, 5% visible
        assert!(crop_bbox(bb(0.685, 0.5, 0.1, 0.1), crop, 1000, 1000, 0.4).is_none());
        // same geometry passes once the threshold allows it
        assert!(crop_bbox(bb(0.685, 0.5, 0.1, 0.1), crop, 1000, 1000, 0.01).is_some());
    }

    #[test]
    fn crop_drops_box_entirely_outside_the_window() {
        let crop = CropWindow {
            x: 0,
            y: 0,
            width: 640,
            height: 640,
        };
        assert!(crop_bbox(bb(0.9, 0.9, 0.1, 0.1), crop, 1000, 1000, 0.4).is_none());
    }

    #[test]
    fn clipped_crop_keeps_half_visible_box() {
        let crop = CropWindow {
            x: 0,
            y: 0,
            width: 640,
            height: 640,
        };
        // 128px wide box centered exactly on the crop edge: 50% visible
        let kept = crop_bbox(bb(0.64, 0.5, 0.128, 0.1), crop, 1000, 1000, 0.4).unwrap();
        // remainder hugs the right edge of the cropped frame
        assert!((kept.x_center + kept.width / 2.0 - 1.0).abs() < 1e-9);
        assert!((kept.width - 64.0 / 640.0).abs() < 1e-9);
    }
}
