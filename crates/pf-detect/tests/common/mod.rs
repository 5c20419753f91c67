#![allow(dead_code)]

use pf_core::{ColorFrame, Image};

pub const SIZE: usize = 480;

pub fn uniform_frame(width: usize, height: usize, value: u8) -> ColorFrame {
    Image::new_fill(width, height, [value; 3])
}

/// Dark filled disc on a lighter background, like a pupil under IR light.
pub fn dark_disc_frame(size: usize, cx: f64, cy: f64, r: f64) -> ColorFrame {
    let mut img = Image::new_fill(size, size, [185u8, 175, 170]);
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            if dx * dx + dy * dy <= r * r {
                *img.get_mut(x, y).expect("in bounds") = [25, 28, 30];
            }
        }
    }
    img
}

pub fn blank_edges(width: usize, height: usize) -> Image<u8> {
    Image::new_fill(width, height, 0u8)
}

/// One-pixel circle outline.
pub fn draw_circle_edges(edges: &mut Image<u8>, cx: f64, cy: f64, r: f64) {
    let steps = (r * 16.0).ceil() as usize;
    for i in 0..steps {
        let t = i as f64 * core::f64::consts::TAU / steps as f64;
        let x = (cx + r * t.cos()).round() as usize;
        let y = (cy + r * t.sin()).round() as usize;
        if let Some(px) = edges.get_mut(x, y) {
            *px = 255;
        }
    }
}

/// One-pixel rectangle outline with top-left corner `(x0, y0)`.
pub fn draw_rect_edges(edges: &mut Image<u8>, x0: usize, y0: usize, w: usize, h: usize) {
    for x in x0..x0 + w {
        *edges.get_mut(x, y0).expect("in bounds") = 255;
        *edges.get_mut(x, y0 + h - 1).expect("in bounds") = 255;
    }
    for y in y0..y0 + h {
        *edges.get_mut(x0, y).expect("in bounds") = 255;
        *edges.get_mut(x0 + w - 1, y).expect("in bounds") = 255;
    }
}
