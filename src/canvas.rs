use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::DrawInstruction;

/// Surface markers are drawn onto
pub trait Canvas {
    fn draw(&mut self, instruction: &DrawInstruction);
}

/// Pixels are replaced, not blended, so overlapping markers keep the opacity of the last one.
impl Canvas for RgbaImage {
    fn draw(&mut self, instruction: &DrawInstruction) {
        let [r, g, b] = instruction.color;
        draw_filled_circle_mut(
            self,
            (
                instruction.center_x.round() as i32,
                instruction.center_y.round() as i32,
            ),
            instruction.radius.round() as i32,
            Rgba([r, g, b, instruction.opacity]),
        );
    }
}

pub fn paint<'a>(
    canvas: &mut impl Canvas,
    instructions: impl IntoIterator<Item = &'a DrawInstruction>,
) {
    for instruction in instructions {
        canvas.draw(instruction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_filled_marker() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 0]));
        paint(
            &mut canvas,
            &[DrawInstruction {
                center_x: 10.2,
                center_y: 9.8,
                radius: 3.,
                color: [0, 255, 0],
                opacity: 80,
            }],
        );
        assert_eq!(Rgba([0, 255, 0, 80]), *canvas.get_pixel(10, 10));
        assert_eq!(Rgba([0, 255, 0, 80]), *canvas.get_pixel(12, 10));
        assert_eq!(Rgba([255, 255, 255, 0]), *canvas.get_pixel(0, 0));
    }

    #[test]
    fn markers_outside_are_clipped() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 0]));
        canvas.draw(&DrawInstruction {
            center_x: -50.,
            center_y: 2.,
            radius: 2.,
            color: [255, 0, 0],
            opacity: 255,
        });
        assert!(canvas.pixels().all(|p| p[3] == 0));
    }
}
