use super::model::LogoFrame;
use super::{NUCLEUS_FACTOR, ORBIT_COUNT, ORBIT_RX_FACTOR, ORBIT_RY_FACTOR, ORBIT_STEP, STROKE_FACTOR};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use cursorkit::Point;
use std::f64::consts::PI;

struct LogoRenderer<'a> {
    frame: &'a LogoFrame,
    center: Point,
}

impl<'a> LogoRenderer<'a> {
    fn new(frame: &'a LogoFrame, center: Point) -> Self {
        Self { frame, center }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.logo.into_components();
        cr.set_source_rgba(r, g, b, a);

        cr.save()?;
        cr.translate(self.center.x, self.center.y);
        cr.rotate(self.frame.angle.to_radians());
        for i in 0..ORBIT_COUNT {
            self.draw_orbit(cr, i as f64 * ORBIT_STEP)?;
        }
        self.draw_nucleus(cr)?;
        cr.restore()
    }

    fn draw_orbit(&self, cr: &Context, tilt: f64) -> Result<(), cairo::Error> {
        let size = self.frame.size;

        // scale only while building the path so the stroke stays uniform
        cr.save()?;
        cr.rotate(tilt);
        cr.scale(size * ORBIT_RX_FACTOR, size * ORBIT_RY_FACTOR);
        cr.new_sub_path();
        cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        cr.restore()?;

        cr.set_line_width(size * STROKE_FACTOR);
        cr.stroke()
    }

    fn draw_nucleus(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.arc(0.0, 0.0, self.frame.size * NUCLEUS_FACTOR, 0.0, 2.0 * PI);
        cr.fill()
    }
}

pub fn draw(
    cr: &Context,
    frame: &LogoFrame,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let center = Point::new(width / 2.0, height / 2.0);
    LogoRenderer::new(frame, center).draw(cr, colors)
}
